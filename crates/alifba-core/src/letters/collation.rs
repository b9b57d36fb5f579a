use std::cmp::Ordering;

/// Primary collation weight of an Arabic character.
///
/// Hamza-carrying alef forms sort with the bare alef and taa marbuta sorts
/// with taa, which is how Arabic dictionaries order names. Everything else
/// keeps its code point order, which already follows the alphabet for the
/// basic letters.
fn primary(c: char) -> u32 {
    match c {
        'آ' | 'أ' | 'إ' | 'ٱ' => 'ا' as u32,
        'ة' => 'ت' as u32,
        'ى' => 'ي' as u32,
        _ => c as u32,
    }
}

/// Compare two Arabic names for display order.
///
/// Primary weights decide; exact code points break ties so the ordering is
/// total and stable.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary_a = a.chars().map(primary);
    let primary_b = b.chars().map(primary);
    primary_a.cmp(primary_b).then_with(|| a.cmp(b))
}
