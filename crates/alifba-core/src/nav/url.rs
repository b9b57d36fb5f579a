use std::borrow::Cow;

use crate::letters::{self, LetterEntry};

/// Query parameter carrying the selected letter.
pub const LETTER_PARAM: &str = "letter";

fn decode_component(raw: &str) -> Option<String> {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

/// First value of `name` in a query string (leading `?` optional).
///
/// Returns `None` when the parameter is absent or its value is not valid
/// percent-encoded UTF-8.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key).as_deref() == Some(name))
        .and_then(|(_, value)| decode_component(value))
}

/// Replace (or add) `name=value` in a URL, keeping its other parameters.
pub fn with_param(url: &str, name: &str, value: &str) -> String {
    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = path.split_once('?').unwrap_or((path, ""));
    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split_once('=').map(|(k, _)| k).unwrap_or(*pair);
            decode_component(key).as_deref() != Some(name)
        })
        .map(str::to_string)
        .collect();
    pairs.push(format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)));

    let mut out = format!("{}?{}", base, pairs.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// URL of the reveal page for `glyph`: `<page>?letter=<percent-encoded glyph>`.
pub fn letter_url(page: &str, glyph: char) -> String {
    with_param(page, LETTER_PARAM, &glyph.to_string())
}

/// The letter named by a reveal page query string, or the default letter.
pub fn letter_from_query(query: &str) -> &'static LetterEntry {
    let raw = query_param(query, LETTER_PARAM);
    let letter = letters::resolve(raw.as_deref());
    if raw.as_deref().map(str::trim) != Some(letter.glyph.to_string().as_str()) {
        log::info!("letter parameter {:?} not recognized, showing {}", raw, letter.glyph);
    }
    letter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::DEFAULT_GLYPH;

    #[test]
    fn encoded_letter_round_trips() {
        let url = letter_url("letter.html", 'ب');
        assert_eq!(url, "letter.html?letter=%D8%A8");
        let query = url.split_once('?').unwrap().1;
        assert_eq!(letter_from_query(query).glyph, 'ب');
    }

    #[test]
    fn reads_first_matching_param() {
        assert_eq!(query_param("?a=1&letter=%D8%AA&letter=x", "letter").as_deref(), Some("ت"));
        assert_eq!(query_param("letter=a+b", "letter").as_deref(), Some("a b"));
        assert_eq!(query_param("flag&letter", "letter").as_deref(), Some(""));
        assert_eq!(query_param("", "letter"), None);
    }

    #[test]
    fn bad_encoding_is_absent() {
        assert_eq!(query_param("letter=%FF", "letter"), None);
        assert_eq!(letter_from_query("letter=%FF").glyph, DEFAULT_GLYPH);
    }

    #[test]
    fn unknown_or_missing_falls_back() {
        assert_eq!(letter_from_query("?letter=X").glyph, 'ي');
        assert_eq!(letter_from_query("").glyph, 'ي');
        assert_eq!(letter_from_query("?other=1").glyph, 'ي');
    }

    #[test]
    fn with_param_replaces_existing() {
        assert_eq!(with_param("letter.html?letter=x&v=2", "letter", "y"), "letter.html?v=2&letter=y");
        assert_eq!(with_param("index.html#top", "q", "1"), "index.html?q=1#top");
    }
}
