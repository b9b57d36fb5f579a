use super::table::LetterEntry;

/// Path of example image `door` (1-based) for a letter:
/// `<root>/<glyph>/icon<NN>.png`.
pub fn example_image_path(root: &str, glyph: char, door: usize) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        format!("{}/icon{:02}.png", glyph, door)
    } else {
        format!("{}/{}/icon{:02}.png", root, glyph, door)
    }
}

/// Every example image path a letter's doors will ask for, in door order.
pub fn preload_paths(root: &str, letter: &LetterEntry) -> Vec<String> {
    (1..=letter.door_count())
        .map(|door| example_image_path(root, letter.glyph, door))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::table::find;

    #[test]
    fn two_digit_door_index() {
        assert_eq!(example_image_path("صور", 'ب', 1), "صور/ب/icon01.png");
        assert_eq!(example_image_path("assets/", 'ت', 4), "assets/ت/icon04.png");
        assert_eq!(example_image_path("", 'ت', 12), "ت/icon12.png");
    }

    #[test]
    fn preload_covers_each_door() {
        let paths = preload_paths("صور", find('ت').unwrap());
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[3], "صور/ت/icon04.png");
        assert!(preload_paths("صور", find('ه').unwrap()).is_empty());
    }
}
