// ============================================================================
// Structures : Settings et CustomTokenInfo
// ============================================================================
// Réglages utilisateur lus par la liste de wallets
//
// CONCEPTS RUST :
// 1. Composition : Settings contient des CurrencySettings et des tokens
// 2. Itérateurs : recherche d'un token avec .iter().find()
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Denomination;

/// Réglages propres à une devise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Clé de dénomination choisie par l'utilisateur (le multiplicateur)
    pub denomination: String,
}

/// Token ajouté par l'utilisateur, absent des tables intégrées
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenInfo {
    /// Code du token (ex: "WINGS")
    pub currency_code: String,

    /// Nom lisible (ex: "Wings")
    #[serde(default)]
    pub currency_name: String,

    /// Dénominations connues ; la première sert d'affichage par défaut
    #[serde(default)]
    pub denominations: Vec<Denomination>,
}

/// Réglages de l'utilisateur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Préférence de dénomination par code devise
    #[serde(default)]
    pub currencies: BTreeMap<String, CurrencySettings>,

    /// Devise fiat par défaut (ex: "iso:USD")
    #[serde(default = "default_fiat")]
    pub default_fiat: String,

    /// Tokens personnalisés
    #[serde(default)]
    pub custom_tokens: Vec<CustomTokenInfo>,

    /// Affiche (ou masque) la valeur fiat dans la liste
    #[serde(default = "default_fiat_visible")]
    pub is_wallet_fiat_balance_visible: bool,
}

fn default_fiat() -> String {
    "iso:USD".to_string()
}

fn default_fiat_visible() -> bool {
    true
}

impl Settings {
    /// Réglages vides avec USD comme devise fiat
    pub fn new() -> Self {
        Self {
            currencies: BTreeMap::new(),
            default_fiat: default_fiat(),
            custom_tokens: Vec::new(),
            is_wallet_fiat_balance_visible: true,
        }
    }

    /// Fixe la dénomination choisie pour une devise (builder)
    pub fn with_denomination(mut self, currency_code: &str, denomination_key: &str) -> Self {
        self.set_denomination(currency_code, denomination_key);
        self
    }

    /// Ajoute un token personnalisé (builder)
    pub fn with_custom_token(mut self, token: CustomTokenInfo) -> Self {
        self.custom_tokens.push(token);
        self
    }

    /// Clé de dénomination choisie pour une devise
    pub fn denomination_key(&self, currency_code: &str) -> Option<&str> {
        self.currencies
            .get(currency_code)
            .map(|currency| currency.denomination.as_str())
    }

    /// Modifie la dénomination choisie pour une devise
    pub fn set_denomination(&mut self, currency_code: &str, denomination_key: &str) {
        self.currencies.insert(
            currency_code.to_string(),
            CurrencySettings {
                denomination: denomination_key.to_string(),
            },
        );
    }

    /// Cherche un token personnalisé par code
    pub fn custom_token(&self, currency_code: &str) -> Option<&CustomTokenInfo> {
        self.custom_tokens
            .iter()
            .find(|token| token.currency_code == currency_code)
    }

    /// Code ISO de la devise fiat sans préfixe (ex: "iso:USD" -> "USD")
    pub fn fiat_code(&self) -> &str {
        self.default_fiat
            .strip_prefix("iso:")
            .unwrap_or(&self.default_fiat)
    }

    /// Bascule l'affichage des montants fiat
    pub fn toggle_fiat_visibility(&mut self) {
        self.is_wallet_fiat_balance_visible = !self.is_wallet_fiat_balance_visible;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_code_strips_prefix() {
        let mut settings = Settings::new();
        assert_eq!(settings.fiat_code(), "USD");

        settings.default_fiat = "EUR".to_string();
        assert_eq!(settings.fiat_code(), "EUR");
    }

    #[test]
    fn test_custom_token_lookup() {
        let settings = Settings::new().with_custom_token(CustomTokenInfo {
            currency_code: "WINGS".to_string(),
            currency_name: "Wings".to_string(),
            denominations: vec![Denomination::new("WINGS", "1000000000000000000", None)],
        });

        assert!(settings.custom_token("WINGS").is_some());
        assert!(settings.custom_token("BTC").is_none());
    }

    #[test]
    fn test_settings_defaults_from_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.default_fiat, "iso:USD");
        assert!(settings.is_wallet_fiat_balance_visible);
        assert!(settings.denomination_key("BTC").is_none());
    }

    #[test]
    fn test_toggle_fiat_visibility() {
        let mut settings = Settings::new().with_denomination("BTC", "100000");
        assert_eq!(settings.denomination_key("BTC"), Some("100000"));

        settings.toggle_fiat_visibility();
        assert!(!settings.is_wallet_fiat_balance_visible);
    }
}
