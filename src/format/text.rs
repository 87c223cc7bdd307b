// ============================================================================
// Troncature de texte
// ============================================================================
// CONCEPT RUST : String UTF-8
// - .len() compte les OCTETS, pas les caractères
// - .chars() itère sur les caractères Unicode
// - Couper avec &s[..n] peut paniquer au milieu d'un caractère multi-octets
// ============================================================================

/// Longueur maximale du nom d'un wallet dans la liste
pub const WALLET_NAME_MAX_CHARS: usize = 34;

/// Caractère ajouté quand un texte est coupé
pub const ELLIPSIS: char = '…';

/// Coupe un texte à `max_chars` caractères (ellipse comprise)
///
/// - Texte de `max_chars` caractères ou moins : retourné tel quel
/// - Sinon : `max_chars - 1` caractères suivis de '…'
pub fn cut_off_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_unchanged() {
        assert_eq!(cut_off_text("Mon wallet", WALLET_NAME_MAX_CHARS), "Mon wallet");

        let exact = "a".repeat(WALLET_NAME_MAX_CHARS);
        assert_eq!(cut_off_text(&exact, WALLET_NAME_MAX_CHARS), exact);
    }

    #[test]
    fn test_long_name_bounded() {
        let long = "b".repeat(WALLET_NAME_MAX_CHARS + 10);
        let cut = cut_off_text(&long, WALLET_NAME_MAX_CHARS);

        assert_eq!(cut.chars().count(), WALLET_NAME_MAX_CHARS);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_multibyte_not_split() {
        let name = "Épargne à très long terme pour l'été ₿₿₿";
        let cut = cut_off_text(name, 10);

        assert_eq!(cut, "Épargne à…");
        assert_eq!(cut.chars().count(), 10);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(cut_off_text("abc", 0), "");
        assert_eq!(cut_off_text("", 0), "");
    }
}
