// ============================================================================
// Structures : Wallet et Denomination
// ============================================================================
// Représente un wallet crypto tel qu'il est fourni à la liste
//
// CONCEPTS RUST :
// 1. BTreeMap : map ordonnée (affichage et sérialisation déterministes)
// 2. #[serde(rename_all = "camelCase")] : le JSON garde les noms d'origine
// 3. #[serde(default)] : champs optionnels dans le fichier
//
// IMPORTANT : les montants sont des chaînes décimales en unités natives
// (satoshis, wei, ...). Jamais de f64 pour un solde !
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Table des dénominations d'une devise, indexée par clé de dénomination
///
/// La clé est le multiplicateur sous forme de chaîne (ex: "100000000" pour BTC,
/// "100000" pour mBTC), c'est elle que les réglages utilisateur référencent.
pub type DenominationTable = BTreeMap<String, Denomination>;

/// Une échelle d'affichage : multiplicateur + symbole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    /// Nom de la dénomination (ex: "BTC", "mBTC", "bits")
    pub name: String,

    /// Facteur (puissance de 10) entre unités natives et unités affichées
    pub multiplier: String,

    /// Symbole affiché après le montant (ex: "₿", "m₿")
    /// CONCEPT RUST : Option pour les données absentes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Denomination {
    /// Crée une dénomination
    pub fn new(name: &str, multiplier: &str, symbol: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            multiplier: multiplier.to_string(),
            symbol: symbol.map(str::to_string),
        }
    }
}

/// Un wallet dans la liste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Identifiant unique du wallet
    pub id: String,

    /// Devise principale (ex: "BTC", "ETH")
    pub currency_code: String,

    /// Nom donné par l'utilisateur
    pub name: String,

    /// Dénominations connues, par code devise puis par clé de dénomination
    /// Contient la devise principale et les tokens intégrés
    #[serde(default)]
    pub all_denominations: BTreeMap<String, DenominationTable>,

    /// Tokens activés sur ce wallet (ex: ["REP", "USDT"])
    #[serde(default)]
    pub enabled_tokens: Vec<String>,

    /// Soldes natifs par code devise (devise principale incluse)
    #[serde(default)]
    pub native_balances: BTreeMap<String, String>,

    /// Solde principal en unités natives
    pub primary_native_balance: String,
}

impl Wallet {
    /// Crée un wallet sans dénominations ni tokens
    pub fn new(id: &str, currency_code: &str, name: &str, primary_native_balance: &str) -> Self {
        let mut native_balances = BTreeMap::new();
        native_balances.insert(currency_code.to_string(), primary_native_balance.to_string());

        Self {
            id: id.to_string(),
            currency_code: currency_code.to_string(),
            name: name.to_string(),
            all_denominations: BTreeMap::new(),
            enabled_tokens: Vec::new(),
            native_balances,
            primary_native_balance: primary_native_balance.to_string(),
        }
    }

    /// Ajoute une dénomination à la table d'une devise (builder)
    ///
    /// CONCEPT RUST : Builder pattern par valeur
    /// - self est consommé puis retourné
    /// - Permet de chaîner : Wallet::new(..).with_denomination(..)
    pub fn with_denomination(mut self, currency_code: &str, denomination: Denomination) -> Self {
        self.all_denominations
            .entry(currency_code.to_string())
            .or_default()
            .insert(denomination.multiplier.clone(), denomination);
        self
    }

    /// Active un token avec son solde natif (builder)
    pub fn with_token(mut self, currency_code: &str, native_balance: &str) -> Self {
        if !self.enabled_tokens.iter().any(|code| code == currency_code) {
            self.enabled_tokens.push(currency_code.to_string());
        }
        self.native_balances
            .insert(currency_code.to_string(), native_balance.to_string());
        self
    }

    /// Table de dénominations d'une devise, si connue du wallet
    pub fn denominations(&self, currency_code: &str) -> Option<&DenominationTable> {
        self.all_denominations.get(currency_code)
    }

    /// Vérifie si un token est activé
    pub fn is_token_enabled(&self, currency_code: &str) -> bool {
        self.enabled_tokens.iter().any(|code| code == currency_code)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_builder() {
        let wallet = Wallet::new("w1", "ETH", "Mon Ether", "1000")
            .with_denomination("ETH", Denomination::new("ETH", "1000000000000000000", Some("Ξ")))
            .with_token("REP", "42");

        assert_eq!(wallet.native_balances.get("ETH").map(String::as_str), Some("1000"));
        assert!(wallet.is_token_enabled("REP"));
        assert!(!wallet.is_token_enabled("ETH"));

        let table = wallet.denominations("ETH").unwrap();
        assert_eq!(table["1000000000000000000"].symbol.as_deref(), Some("Ξ"));
    }

    #[test]
    fn test_wallet_deserialize_camel_case() {
        let json = r#"{
            "id": "abc",
            "currencyCode": "BTC",
            "name": "Épargne",
            "primaryNativeBalance": "150000000",
            "allDenominations": {
                "BTC": {
                    "100000000": { "name": "BTC", "multiplier": "100000000", "symbol": "₿" }
                }
            }
        }"#;

        let wallet: Wallet = serde_json::from_str(json).unwrap();
        assert_eq!(wallet.currency_code, "BTC");
        assert!(wallet.enabled_tokens.is_empty());
        assert_eq!(wallet.denominations("BTC").unwrap().len(), 1);
    }
}
