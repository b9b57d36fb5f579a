use serde::{Deserialize, Serialize};

/// Timing and location settings shared by both views.
///
/// Every field has a default, so a host may pass a partial JSON object
/// (or nothing at all) and only override what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    /// Seconds between consecutive door reveals (door k opens at k × interval).
    pub door_interval: f32,
    /// Number of countdown steps shown before the first door (default: 3).
    pub countdown_steps: u32,
    /// Seconds per countdown step.
    pub countdown_step: f32,
    /// Seconds between a door starting to open and its image being resolved.
    pub transition_delay: f32,
    /// Duration of the image pop-in once a door has opened.
    pub reveal_pop: f32,
    /// Delay between preload settling and the sequence starting on its own.
    pub autostart_delay: f32,
    /// Quiet period before a search query is applied.
    pub search_debounce: f32,
    /// How long a toast stays on screen.
    pub toast_duration: f32,
    /// Delay between consecutive catalog cards appearing.
    pub card_stagger: f32,
    /// Delay between selecting a card and leaving the catalog.
    pub selection_delay: f32,
    /// Root directory of the per-letter example images.
    pub assets_root: String,
    /// Placeholder shown on a closed door.
    pub door_placeholder: String,
    /// Local storage key holding the progress map.
    pub storage_key: String,
    /// Page hosting the catalog.
    pub home_page: String,
    /// Page hosting the reveal view.
    pub reveal_page: String,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            door_interval: 3.0,
            countdown_steps: 3,
            countdown_step: 1.0,
            transition_delay: 1.0,
            reveal_pop: 0.25,
            autostart_delay: 1.0,
            search_debounce: 0.3,
            toast_duration: 3.0,
            card_stagger: 0.05,
            selection_delay: 0.3,
            assets_root: "صور".to_string(),
            door_placeholder: "assets/images/door-open.gif".to_string(),
            storage_key: "learningProgress".to_string(),
            home_page: "index.html".to_string(),
            reveal_page: "letter.html".to_string(),
        }
    }
}

impl LessonConfig {
    /// Parse a config override from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a config override, falling back to defaults on empty or bad input.
    pub fn from_json_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring invalid lesson config: {}", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = LessonConfig::from_json(r#"{ "door_interval": 2.0 }"#).unwrap();
        assert_eq!(config.door_interval, 2.0);
        assert_eq!(config.countdown_steps, 3);
        assert_eq!(config.storage_key, "learningProgress");
    }

    #[test]
    fn bad_json_falls_back() {
        let config = LessonConfig::from_json_or_default("{ not json");
        assert_eq!(config, LessonConfig::default());
        assert_eq!(LessonConfig::from_json_or_default("  "), LessonConfig::default());
    }
}
