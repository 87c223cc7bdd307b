// ============================================================================
// Structure : ExchangeRates
// ============================================================================
// Prix d'une unité d'échange (1 BTC, 1 ETH, ...) dans la devise fiat
//
// CONCEPTS RUST :
// 1. Decimal (rust_decimal) : nombres décimaux exacts
// 2. DateTime<Utc> (chrono) : date de la dernière mise à jour
// ============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Taux de change crypto -> fiat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRates {
    /// Prix d'une unité d'échange, par code devise
    #[serde(default)]
    pub rates: BTreeMap<String, Decimal>,

    /// Date de la dernière mise à jour (None si jamais rafraîchi)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExchangeRates {
    /// Taux vides
    pub fn new() -> Self {
        Self::default()
    }

    /// Prix d'une unité d'échange de la devise
    pub fn rate(&self, currency_code: &str) -> Option<Decimal> {
        self.rates.get(currency_code).copied()
    }

    /// Enregistre un taux
    pub fn set_rate(&mut self, currency_code: &str, rate: Decimal) {
        self.rates.insert(currency_code.to_string(), rate);
    }

    /// Fusionne des taux plus récents (les nouveaux écrasent les anciens)
    pub fn merge(&mut self, newer: ExchangeRates) {
        self.rates.extend(newer.rates);
        if newer.updated_at.is_some() {
            self.updated_at = newer.updated_at;
        }
    }

    /// Vérifie si aucun taux n'est connu
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_merge_keeps_unknown_and_overrides_known() {
        let mut rates = ExchangeRates::new();
        rates.set_rate("BTC", Decimal::from(60000));
        rates.set_rate("ETH", Decimal::from(3000));

        let mut newer = ExchangeRates::new();
        newer.set_rate("BTC", Decimal::from(61000));
        newer.updated_at = Some(Utc::now());

        rates.merge(newer);
        assert_eq!(rates.rate("BTC"), Some(Decimal::from(61000)));
        assert_eq!(rates.rate("ETH"), Some(Decimal::from(3000)));
        assert!(rates.updated_at.is_some());
    }

    #[test]
    fn test_rates_from_json_strings_and_numbers() {
        let rates: ExchangeRates =
            serde_json::from_str(r#"{ "rates": { "BTC": "65000.12", "ETH": 3100 } }"#).unwrap();
        assert_eq!(rates.rate("BTC"), Some(Decimal::from_str("65000.12").unwrap()));
        assert_eq!(rates.rate("ETH"), Some(Decimal::from(3100)));
        assert!(rates.rate("LTC").is_none());
    }
}
