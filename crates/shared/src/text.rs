use unicode_normalization::UnicodeNormalization;

/// Folds text for comparison: lower-case, canonical decomposition (NFD),
/// then strip the combining diacritical marks block U+0300..=U+036F.
///
/// Must stay bit-exact: both search queries and candidate values go
/// through the same fold, and boundary normalization of enumerated wire
/// values relies on it too.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}
