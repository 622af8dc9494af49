use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison
///
/// Lower-cases, strips diacritics (NFD decomposition with combining
/// diacritical marks removed), collapses whitespace runs to a single space
/// and trims. "  François   DUPONT " becomes "francois dupont".
///
/// Only the combining diacritical blocks are dropped; other marks such as
/// kana voicing marks or Indic vowel signs change the name and are kept.
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[inline]
fn is_combining_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
