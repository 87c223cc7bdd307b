// ============================================================================
// Décimal exact de taille arbitraire
// ============================================================================
// Un solde natif peut dépasser largement 2^96 (100 000 NEAR = 10^29 yocto) :
// un Decimal 96 bits ne suffit pas. ExactAmount garde un entier BigInt et un
// nombre de décimales : valeur = mantissa / 10^scale.
//
// CONCEPTS RUST :
// 1. BigInt (num-bigint) : entier signé sans limite de taille
// 2. Opérations sur références (&a * &b) : pas de copie des grands entiers
// 3. Display : la représentation texte sert au formatage avec locale
// ============================================================================

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use rust_decimal::Decimal;

use crate::error::{RowError, RowResult};

/// 10^exp en BigInt
fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Montant décimal exact : `mantissa / 10^scale`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactAmount {
    mantissa: BigInt,
    scale: u32,
}

impl ExactAmount {
    /// Zéro
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::from(0u32),
            scale: 0,
        }
    }

    /// Parse une chaîne [-]chiffres[.chiffres], sans limite de taille
    pub fn parse(value: &str) -> RowResult<Self> {
        let invalid = || RowError::InvalidAmount {
            value: value.to_string(),
        };

        let trimmed = value.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        let well_formed = !int_part.is_empty()
            && int_part.chars().all(|c| c.is_ascii_digit())
            && frac_part.chars().all(|c| c.is_ascii_digit())
            && !(digits.contains('.') && frac_part.is_empty());
        if !well_formed {
            return Err(invalid());
        }

        let mut mantissa = BigInt::from_str(&format!("{}{}", int_part, frac_part)).map_err(|_| invalid())?;
        if negative {
            mantissa = -mantissa;
        }

        Ok(Self {
            mantissa,
            scale: frac_part.len() as u32,
        })
    }

    /// Conversion depuis un Decimal (taux de change)
    pub fn from_decimal(value: Decimal) -> Self {
        Self {
            mantissa: BigInt::from(value.mantissa()),
            scale: value.scale(),
        }
    }

    /// Vrai si la valeur est nulle
    pub fn is_zero(&self) -> bool {
        self.mantissa.sign() == Sign::NoSign
    }

    /// Nombre de décimales
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Division tronquée (vers zéro) à `precision` décimales
    ///
    /// (a / 10^sa) / (b / 10^sb) = a * 10^(sb + p) / (b * 10^sa), à l'échelle p
    pub fn div_truncate(&self, divisor: &ExactAmount, precision: u32) -> RowResult<Self> {
        if divisor.is_zero() {
            return Err(RowError::ZeroMultiplier);
        }

        let numerator = &self.mantissa * pow10(divisor.scale + precision);
        let denominator = &divisor.mantissa * pow10(self.scale);

        // La division de BigInt tronque vers zéro
        Ok(Self {
            mantissa: numerator / denominator,
            scale: precision,
        })
    }

    /// Produit exact
    pub fn mul(&self, other: &ExactAmount) -> Self {
        Self {
            mantissa: &self.mantissa * &other.mantissa,
            scale: self.scale + other.scale,
        }
    }

    /// Tronque (vers zéro) à `decimals` décimales, sans arrondir
    pub fn truncate(&self, decimals: u32) -> Self {
        if self.scale <= decimals {
            return self.clone();
        }
        Self {
            mantissa: &self.mantissa / pow10(self.scale - decimals),
            scale: decimals,
        }
    }

    /// Complète avec des zéros jusqu'à `decimals` décimales (1.5 -> 1.50)
    pub fn pad_scale(&self, decimals: u32) -> Self {
        if self.scale >= decimals {
            return self.clone();
        }
        Self {
            mantissa: &self.mantissa * pow10(decimals - self.scale),
            scale: decimals,
        }
    }

    /// Supprime les zéros finaux ; zéro devient "0"
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        let ten = BigInt::from(10u32);
        let zero = BigInt::from(0u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && &mantissa % &ten == zero {
            mantissa /= &ten;
            scale -= 1;
        }
        Self { mantissa, scale }
    }
}

/// Texte brut : "-1234.5" (pas de séparateur de milliers)
impl fmt::Display for ExactAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.sign() == Sign::Minus { "-" } else { "" };
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;

        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: &str) -> ExactAmount {
        ExactAmount::parse(value).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(amount("123").to_string(), "123");
        assert_eq!(amount("-0.050").to_string(), "-0.050");
        assert_eq!(amount(" 7.25 ").scale(), 2);

        let huge = "9".repeat(80);
        assert_eq!(amount(&huge).to_string(), huge);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for value in ["", "abc", "1.", ".5", "1.2.3", "--1", "1e18", "12a"] {
            assert_eq!(
                ExactAmount::parse(value),
                Err(RowError::InvalidAmount { value: value.to_string() }),
                "{value}"
            );
        }
    }

    #[test]
    fn test_div_truncate_far_beyond_96_bits() {
        // 10^29 yocto / 10^24 = 100 000
        let native = amount("100000000000000000000000000000");
        let quotient = native.div_truncate(&amount("1000000000000000000000000"), 18).unwrap();
        assert_eq!(quotient.normalize().to_string(), "100000");
    }

    #[test]
    fn test_div_truncate_toward_zero() {
        let quotient = amount("2").div_truncate(&amount("3"), 4).unwrap();
        assert_eq!(quotient.to_string(), "0.6666");

        let negative = amount("-2").div_truncate(&amount("3"), 4).unwrap();
        assert_eq!(negative.to_string(), "-0.6666");

        assert_eq!(amount("1").div_truncate(&amount("0.000"), 4), Err(RowError::ZeroMultiplier));
    }

    #[test]
    fn test_truncate_pad_normalize() {
        assert_eq!(amount("1.999999999").truncate(6).to_string(), "1.999999");
        assert_eq!(amount("3").pad_scale(2).to_string(), "3.00");
        assert_eq!(amount("1.500000").normalize().to_string(), "1.5");
        assert_eq!(amount("-0.0000").normalize().to_string(), "0");
        assert_eq!(amount("-0.001").truncate(2).to_string(), "0.00");
    }

    #[test]
    fn test_from_decimal_and_mul() {
        let rate = ExactAmount::from_decimal(Decimal::from_str("65000.50").unwrap());
        assert_eq!(rate.to_string(), "65000.50");
        assert_eq!(amount("1.5").mul(&rate).to_string(), "97500.750");
    }
}
