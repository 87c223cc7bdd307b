// ============================================================================
// Formatage des montants crypto
// ============================================================================
// Convertit un solde en unités natives (satoshis, wei, ...) en texte lisible
//
// Étapes :
// 1. Division exacte native / multiplicateur (18 décimales internes),
//    sans limite de taille (ExactAmount)
// 2. Troncature à 6 décimales, JAMAIS d'arrondi
// 3. "Zéro ou décimal" : 0.000000 devient "0", les zéros finaux disparaissent
// 4. Séparateurs de milliers et de décimales selon la locale
//
// CONCEPTS RUST :
// 1. ExactAmount (BigInt) : arithmétique exacte, pas de f64 ni de plafond
// 2. Troncature vers zéro, jamais d'arrondi
// 3. Display générique : format_number accepte tout ce qui s'affiche
// ============================================================================

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::RowResult;
use crate::format::exact::ExactAmount;

/// Précision (décimales) de la division interne
pub const DIVIDE_PRECISION: u32 = 18;

/// Nombre maximal de décimales affichées pour un montant crypto
pub const CRYPTO_DECIMALS: u32 = 6;

/// Nombre de décimales affichées pour un montant fiat
pub const FIAT_DECIMALS: u32 = 2;

// ============================================================================
// Locale numérique
// ============================================================================

/// Séparateurs utilisés pour afficher les nombres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NumberLocale {
    /// Séparateur décimal (ex: '.' en anglais, ',' en français)
    pub decimal_separator: char,

    /// Séparateur de milliers (None : pas de regroupement)
    pub grouping_separator: Option<char>,
}

impl NumberLocale {
    /// Locale anglaise : 1,234.56
    pub fn en_us() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: Some(','),
        }
    }

    /// Locale française : 1 234,56 (espace fine insécable)
    pub fn fr_fr() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: Some('\u{202f}'),
        }
    }

    /// Locale allemande : 1.234,56
    pub fn de_de() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: Some('.'),
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::en_us()
    }
}

// ============================================================================
// Affichage
// ============================================================================

/// Formatte un nombre avec les séparateurs de la locale
///
/// Les décimales présentes sont conservées telles quelles.
pub fn format_number<T: Display>(value: T, locale: &NumberLocale) -> String {
    let plain = value.to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut formatted = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    formatted.push_str(sign);
    formatted.push_str(&group_digits(int_part, locale.grouping_separator));
    if let Some(frac) = frac_part {
        formatted.push(locale.decimal_separator);
        formatted.push_str(frac);
    }
    formatted
}

/// Insère le séparateur de milliers tous les 3 chiffres (depuis la droite)
fn group_digits(int_part: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return int_part.to_string();
    };

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Convertit un solde natif en montant affichable
///
/// # Arguments
/// * `native_balance` - Solde en unités natives (ex: "123456789000000000")
/// * `multiplier` - Multiplicateur de la dénomination (ex: "1000000000000000000")
/// * `decimals` - Décimales maximales affichées (CRYPTO_DECIMALS en pratique)
/// * `locale` - Séparateurs
///
/// # Exemple
/// "123456789000000000" / 10^18 -> "0.123456"
pub fn format_crypto_amount(
    native_balance: &str,
    multiplier: &str,
    decimals: u32,
    locale: &NumberLocale,
) -> RowResult<String> {
    let native = ExactAmount::parse(native_balance)?;
    let multiplier = ExactAmount::parse(multiplier)?;

    let quotient = native.div_truncate(&multiplier, DIVIDE_PRECISION)?;
    let display = quotient.truncate(decimals).normalize();

    Ok(format_number(display, locale))
}

/// Formatte un montant fiat : tronqué à 2 décimales, toujours 2 décimales
///
/// Exemple : 1234.5678 -> "1,234.56"
pub fn format_fiat_amount(value: &ExactAmount, locale: &NumberLocale) -> String {
    let fixed = value.truncate(FIAT_DECIMALS).pad_scale(FIAT_DECIMALS);
    format_number(fixed, locale)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;

    const ETH: &str = "1000000000000000000";

    fn en() -> NumberLocale {
        NumberLocale::en_us()
    }

    #[test]
    fn test_truncates_to_six_decimals() {
        let amount = format_crypto_amount("123456789000000000", ETH, CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(amount, "0.123456");
    }

    #[test]
    fn test_truncation_never_rounds_up() {
        // Arrondi donnerait 2, la troncature garde 1.999999
        let amount = format_crypto_amount("1999999900000000000", ETH, CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(amount, "1.999999");

        let exact = format_crypto_amount("1999999000000000000", ETH, CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(exact, "1.999999");
    }

    #[test]
    fn test_infinitesimal_becomes_zero() {
        let amount = format_crypto_amount("100", ETH, CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(amount, "0");

        let zero = format_crypto_amount("0", "100000000", CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(zero, "0");
    }

    #[test]
    fn test_trailing_zeros_removed() {
        let amount = format_crypto_amount("150000000", "100000000", CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(amount, "1.5");

        let whole = format_crypto_amount("300000000", "100000000", CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(whole, "3");
    }

    #[test]
    fn test_small_nonzero_kept() {
        // 0.000001 ETH reste visible
        let amount = format_crypto_amount("1000000000000", ETH, CRYPTO_DECIMALS, &en()).unwrap();
        assert_eq!(amount, "0.000001");
    }

    #[test]
    fn test_grouping_and_locales() {
        let native = "1234567890000000000000"; // 1234.56789 ETH
        assert_eq!(
            format_crypto_amount(native, ETH, CRYPTO_DECIMALS, &en()).unwrap(),
            "1,234.56789"
        );
        assert_eq!(
            format_crypto_amount(native, ETH, CRYPTO_DECIMALS, &NumberLocale::de_de()).unwrap(),
            "1.234,56789"
        );

        let no_grouping = NumberLocale {
            decimal_separator: '.',
            grouping_separator: None,
        };
        assert_eq!(format_number(1234567, &no_grouping), "1234567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number("-1234567.5", &en()), "-1,234,567.5");
        assert_eq!(format_number(999, &en()), "999");
    }

    #[test]
    fn test_invalid_amounts() {
        assert_eq!(
            format_crypto_amount("abc", ETH, CRYPTO_DECIMALS, &en()),
            Err(RowError::InvalidAmount { value: "abc".to_string() })
        );
        assert_eq!(
            format_crypto_amount("1", "0", CRYPTO_DECIMALS, &en()),
            Err(RowError::ZeroMultiplier)
        );
    }

    #[test]
    fn test_balances_beyond_96_bits() {
        // 100 000 NEAR en yoctoNEAR (24 décimales)
        let near = "100000000000000000000000000000";
        assert_eq!(
            format_crypto_amount(near, "1000000000000000000000000", CRYPTO_DECIMALS, &en()).unwrap(),
            "100,000"
        );
        assert_eq!(
            format_crypto_amount(near, ETH, CRYPTO_DECIMALS, &en()).unwrap(),
            "100,000,000,000"
        );

        // 40 chiffres, avec une partie fractionnaire tronquée
        let huge = format!("{}123456789000000000", "1".repeat(22));
        assert_eq!(
            format_crypto_amount(&huge, ETH, CRYPTO_DECIMALS, &en()).unwrap(),
            "1,111,111,111,111,111,111,111.123456"
        );
    }

    #[test]
    fn test_format_fiat_amount() {
        let value = ExactAmount::parse("1234.5678").unwrap();
        assert_eq!(format_fiat_amount(&value, &en()), "1,234.56");
        assert_eq!(format_fiat_amount(&ExactAmount::parse("3").unwrap(), &en()), "3.00");
        assert_eq!(format_fiat_amount(&ExactAmount::parse("-0.001").unwrap(), &en()), "0.00");
    }
}
