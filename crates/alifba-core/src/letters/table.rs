/// Upper bound on doors shown for one letter.
///
/// Authored example counts currently stop at 4; the cap is kept at 6 so new
/// example images can be added without touching the sequencer.
pub const MAX_DOORS: usize = 6;

/// Letter used when the requested one is missing or unknown (last in order).
pub const DEFAULT_GLYPH: char = 'ي';

/// One letter of the alphabet with its lesson metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterEntry {
    /// The letter itself. Unique key.
    pub glyph: char,
    /// Arabic name of the letter.
    pub name: &'static str,
    /// Number of authored example images.
    pub example_count: u32,
    /// 1-based position in the alphabet.
    pub order: u32,
    /// Reference code point (hex), for display only.
    pub codepoint: &'static str,
}

impl LetterEntry {
    const fn new(glyph: char, name: &'static str, example_count: u32, order: u32, codepoint: &'static str) -> Self {
        Self { glyph, name, example_count, order, codepoint }
    }

    /// Doors to show for this letter: the example count capped at `MAX_DOORS`.
    pub fn door_count(&self) -> usize {
        clamp_door_count(self.example_count as usize)
    }
}

pub static LETTERS: [LetterEntry; 28] = [
    LetterEntry::new('أ', "ألف", 2, 1, "0627"),
    LetterEntry::new('ب', "باء", 1, 2, "0628"),
    LetterEntry::new('ت', "تاء", 4, 3, "062A"),
    LetterEntry::new('ث', "ثاء", 4, 4, "062B"),
    LetterEntry::new('ج', "جيم", 4, 5, "062C"),
    LetterEntry::new('ح', "حاء", 3, 6, "062D"),
    LetterEntry::new('خ', "خاء", 3, 7, "062E"),
    LetterEntry::new('د', "دال", 2, 8, "062F"),
    LetterEntry::new('ذ', "ذال", 3, 9, "0630"),
    LetterEntry::new('ر', "راء", 2, 10, "0631"),
    LetterEntry::new('ز', "زاي", 1, 11, "0632"),
    LetterEntry::new('س', "سين", 3, 12, "0633"),
    LetterEntry::new('ش', "شين", 4, 13, "0634"),
    LetterEntry::new('ص', "صاد", 3, 14, "0635"),
    LetterEntry::new('ض', "ضاد", 1, 15, "0636"),
    LetterEntry::new('ط', "طاء", 2, 16, "0637"),
    LetterEntry::new('ظ', "ظاء", 1, 17, "0638"),
    LetterEntry::new('ع', "عين", 2, 18, "0639"),
    LetterEntry::new('غ', "غين", 3, 19, "063A"),
    LetterEntry::new('ف', "فاء", 2, 20, "0641"),
    LetterEntry::new('ق', "قاف", 1, 21, "0642"),
    LetterEntry::new('ك', "كاف", 1, 22, "0643"),
    LetterEntry::new('ل', "لام", 1, 23, "0644"),
    LetterEntry::new('م', "ميم", 3, 24, "0645"),
    LetterEntry::new('ن', "نون", 2, 25, "0646"),
    LetterEntry::new('ه', "هاء", 0, 26, "0647"),
    LetterEntry::new('و', "واو", 2, 27, "0648"),
    LetterEntry::new('ي', "ياء", 1, 28, "064A"),
];

/// Clamp a requested door count into `0..=MAX_DOORS`.
pub fn clamp_door_count(count: usize) -> usize {
    count.min(MAX_DOORS)
}

/// Look up a letter by glyph.
pub fn find(glyph: char) -> Option<&'static LetterEntry> {
    LETTERS.iter().find(|l| l.glyph == glyph)
}

pub fn is_valid(glyph: char) -> bool {
    find(glyph).is_some()
}

/// Position of a letter in the table, if present.
pub fn index_of(glyph: char) -> Option<usize> {
    LETTERS.iter().position(|l| l.glyph == glyph)
}

/// The fallback letter.
pub fn default_letter() -> &'static LetterEntry {
    &LETTERS[LETTERS.len() - 1]
}

/// Look up a letter, substituting the default for unknown glyphs.
pub fn find_or_default(glyph: char) -> &'static LetterEntry {
    find(glyph).unwrap_or_else(default_letter)
}

/// Resolve a raw (already decoded) parameter value to a letter.
/// Anything other than exactly one known glyph resolves to the default.
pub fn resolve(raw: Option<&str>) -> &'static LetterEntry {
    let mut chars = match raw {
        Some(raw) => raw.trim().chars(),
        None => return default_letter(),
    };
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => find_or_default(glyph),
        _ => default_letter(),
    }
}

/// Door count for a glyph: `min(example_count, MAX_DOORS)`.
pub fn validate_door_count(glyph: char) -> usize {
    find_or_default(glyph).door_count()
}

/// The letter after `glyph` in alphabetical order, if any.
pub fn next(glyph: char) -> Option<&'static LetterEntry> {
    index_of(glyph).and_then(|i| LETTERS.get(i + 1))
}

/// The letter before `glyph` in alphabetical order, if any.
pub fn previous(glyph: char) -> Option<&'static LetterEntry> {
    index_of(glyph).and_then(|i| i.checked_sub(1)).map(|i| &LETTERS[i])
}

/// Sum of authored example counts across the alphabet.
pub fn total_examples() -> u32 {
    LETTERS.iter().map(|l| l.example_count).sum()
}

/// Arabic words for 0..=10; larger numbers fall back to digits.
pub fn number_words(n: u32) -> String {
    const WORDS: [&str; 11] = [
        "صفر", "واحد", "اثنان", "ثلاثة", "أربعة", "خمسة", "ستة", "سبعة", "ثمانية", "تسعة", "عشرة",
    ];
    WORDS
        .get(n as usize)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn orders_are_a_permutation() {
        let mut orders: Vec<u32> = LETTERS.iter().map(|l| l.order).collect();
        orders.sort_unstable();
        assert_eq!(orders, (1..=28).collect::<Vec<_>>());
    }

    #[test]
    fn glyphs_are_unique() {
        let glyphs: HashSet<char> = LETTERS.iter().map(|l| l.glyph).collect();
        assert_eq!(glyphs.len(), LETTERS.len());
    }

    #[test]
    fn door_count_is_capped_example_count() {
        for letter in &LETTERS {
            let expected = (letter.example_count as usize).min(MAX_DOORS);
            assert_eq!(validate_door_count(letter.glyph), expected, "letter {}", letter.glyph);
        }
        assert_eq!(validate_door_count('ه'), 0);
        assert_eq!(validate_door_count('ب'), 1);
        assert_eq!(clamp_door_count(9), MAX_DOORS);
    }

    #[test]
    fn unknown_input_resolves_to_default() {
        assert_eq!(resolve(Some("X")).glyph, DEFAULT_GLYPH);
        assert_eq!(resolve(Some("")).glyph, DEFAULT_GLYPH);
        assert_eq!(resolve(Some("بت")).glyph, DEFAULT_GLYPH);
        assert_eq!(resolve(None).glyph, DEFAULT_GLYPH);
        assert_eq!(resolve(Some("ج")).name, "جيم");
        assert_eq!(default_letter().order, 28);
    }

    #[test]
    fn neighbors_stop_at_the_ends() {
        assert_eq!(next('أ').map(|l| l.glyph), Some('ب'));
        assert_eq!(previous('ب').map(|l| l.glyph), Some('أ'));
        assert!(previous('أ').is_none());
        assert!(next('ي').is_none());
        assert!(next('X').is_none());
    }

    #[test]
    fn totals_and_words() {
        assert_eq!(total_examples(), 61);
        assert_eq!(number_words(3), "ثلاثة");
        assert_eq!(number_words(0), "صفر");
        assert_eq!(number_words(28), "28");
    }
}
