// ============================================================================
// Résolution des dénominations
// ============================================================================
// Trouve le couple (multiplicateur, symbole) à utiliser pour une devise
//
// Ordre de résolution (dénomination d'affichage) :
// 1. Table intégrée du wallet : entrée choisie dans les réglages
//    (à défaut, l'unité d'échange : l'entrée dont le nom est le code devise)
// 2. Token personnalisé : première dénomination (pas de symbole garanti)
// 3. Sinon : RowError::NoDenomination
// ============================================================================

use crate::error::{RowError, RowResult};
use crate::models::{Denomination, DenominationTable, Settings, Wallet};

/// Origine d'une dénomination résolue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenominationSource {
    /// Table intégrée du wallet
    Builtin,
    /// Token personnalisé des réglages
    CustomToken,
}

/// Dénomination prête à l'emploi
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDenomination {
    /// Multiplicateur (chaîne décimale, puissance de 10)
    pub multiplier: String,
    /// Symbole, s'il est connu
    pub symbol: Option<String>,
    /// D'où vient la dénomination
    pub source: DenominationSource,
}

impl ResolvedDenomination {
    fn from_denomination(denomination: &Denomination, source: DenominationSource) -> Self {
        Self {
            multiplier: denomination.multiplier.clone(),
            symbol: denomination.symbol.clone(),
            source,
        }
    }

    /// Symbole à afficher (chaîne vide si inconnu)
    pub fn symbol_or_empty(&self) -> &str {
        self.symbol.as_deref().unwrap_or("")
    }
}

/// Unité d'échange d'une table : l'entrée nommée comme la devise
fn exchange_entry<'a>(table: &'a DenominationTable, currency_code: &str) -> Option<&'a Denomination> {
    table.values().find(|denomination| denomination.name == currency_code)
}

/// Résout la dénomination d'affichage d'une devise du wallet
///
/// CONCEPT RUST : Option chaining
/// - .and_then() enchaîne les recherches qui peuvent échouer
/// - .or_else() essaie une alternative si la première échoue
pub fn resolve_display_denomination(
    wallet: &Wallet,
    currency_code: &str,
    settings: &Settings,
) -> RowResult<ResolvedDenomination> {
    if let Some(table) = wallet.denominations(currency_code) {
        let selected = settings
            .denomination_key(currency_code)
            .and_then(|key| table.get(key))
            .or_else(|| exchange_entry(table, currency_code));

        if let Some(denomination) = selected {
            return Ok(ResolvedDenomination::from_denomination(
                denomination,
                DenominationSource::Builtin,
            ));
        }
    }

    settings
        .custom_token(currency_code)
        .and_then(|token| token.denominations.first())
        .map(|denomination| ResolvedDenomination {
            multiplier: denomination.multiplier.clone(),
            // Pas de garantie de symbole pour un token personnalisé
            symbol: denomination.symbol.clone(),
            source: DenominationSource::CustomToken,
        })
        .ok_or_else(|| RowError::no_denomination(currency_code))
}

/// Résout l'unité d'échange (1 BTC, 1 ETH) d'une devise
///
/// Sert à la conversion fiat : les taux sont exprimés par unité d'échange.
pub fn resolve_exchange_denomination(
    wallet: &Wallet,
    currency_code: &str,
    settings: &Settings,
) -> RowResult<ResolvedDenomination> {
    if let Some(denomination) = wallet
        .denominations(currency_code)
        .and_then(|table| exchange_entry(table, currency_code))
    {
        return Ok(ResolvedDenomination::from_denomination(
            denomination,
            DenominationSource::Builtin,
        ));
    }

    settings
        .custom_token(currency_code)
        .and_then(|token| {
            token
                .denominations
                .iter()
                .find(|denomination| denomination.name == currency_code)
                .or_else(|| token.denominations.first())
        })
        .map(|denomination| {
            ResolvedDenomination::from_denomination(denomination, DenominationSource::CustomToken)
        })
        .ok_or_else(|| RowError::no_denomination(currency_code))
}

/// Clés de dénomination disponibles pour une devise, de la plus grande à la plus petite
///
/// Utilisé pour faire défiler les dénominations (BTC -> mBTC -> bits -> BTC).
pub fn denomination_keys(wallet: &Wallet, currency_code: &str) -> Vec<String> {
    let Some(table) = wallet.denominations(currency_code) else {
        return Vec::new();
    };

    let mut entries: Vec<(&String, &Denomination)> = table.iter().collect();
    // Tri par nombre de chiffres décroissant : "100000000" avant "100000"
    entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));
    entries.into_iter().map(|(key, _)| key.clone()).collect()
}

/// Clé de dénomination qui suit la clé actuelle (boucle)
pub fn next_denomination_key(wallet: &Wallet, currency_code: &str, settings: &Settings) -> Option<String> {
    let keys = denomination_keys(wallet, currency_code);
    if keys.is_empty() {
        return None;
    }

    let current = resolve_display_denomination(wallet, currency_code, settings)
        .ok()
        .map(|resolved| resolved.multiplier);
    let position = current.and_then(|multiplier| keys.iter().position(|key| *key == multiplier));

    let next_index = match position {
        Some(index) => (index + 1) % keys.len(),
        None => 0,
    };
    keys.get(next_index).cloned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomTokenInfo;

    fn btc_wallet() -> Wallet {
        Wallet::new("w-btc", "BTC", "Bitcoin", "150000000")
            .with_denomination("BTC", Denomination::new("BTC", "100000000", Some("₿")))
            .with_denomination("BTC", Denomination::new("mBTC", "100000", Some("m₿")))
            .with_denomination("BTC", Denomination::new("bits", "100", Some("ƀ")))
    }

    fn wings_settings() -> Settings {
        Settings::new().with_custom_token(CustomTokenInfo {
            currency_code: "WINGS".to_string(),
            currency_name: "Wings".to_string(),
            denominations: vec![Denomination::new("WINGS", "1000000000000000000", None)],
        })
    }

    #[test]
    fn test_builtin_uses_user_choice() {
        let settings = Settings::new().with_denomination("BTC", "100000");
        let resolved = resolve_display_denomination(&btc_wallet(), "BTC", &settings).unwrap();

        assert_eq!(resolved.multiplier, "100000");
        assert_eq!(resolved.symbol.as_deref(), Some("m₿"));
        assert_eq!(resolved.source, DenominationSource::Builtin);
    }

    #[test]
    fn test_builtin_without_choice_uses_exchange_unit() {
        let resolved = resolve_display_denomination(&btc_wallet(), "BTC", &Settings::new()).unwrap();
        assert_eq!(resolved.multiplier, "100000000");
        assert_eq!(resolved.symbol_or_empty(), "₿");
    }

    #[test]
    fn test_custom_token_fallback() {
        let wallet = Wallet::new("w-wings", "WINGS", "Wings", "1");
        let resolved = resolve_display_denomination(&wallet, "WINGS", &wings_settings()).unwrap();

        assert_eq!(resolved.multiplier, "1000000000000000000");
        assert_eq!(resolved.source, DenominationSource::CustomToken);
        assert_eq!(resolved.symbol_or_empty(), "");
    }

    #[test]
    fn test_unresolvable() {
        let wallet = Wallet::new("w-x", "XYZ", "Inconnu", "1");
        let err = resolve_display_denomination(&wallet, "XYZ", &wings_settings()).unwrap_err();
        assert_eq!(err, RowError::no_denomination("XYZ"));

        // Token personnalisé sans aucune dénomination
        let empty = Settings::new().with_custom_token(CustomTokenInfo {
            currency_code: "XYZ".to_string(),
            currency_name: String::new(),
            denominations: Vec::new(),
        });
        assert!(resolve_display_denomination(&wallet, "XYZ", &empty).is_err());
    }

    #[test]
    fn test_exchange_denomination_ignores_user_choice() {
        let settings = Settings::new().with_denomination("BTC", "100");
        let resolved = resolve_exchange_denomination(&btc_wallet(), "BTC", &settings).unwrap();
        assert_eq!(resolved.multiplier, "100000000");
    }

    #[test]
    fn test_denomination_cycle() {
        let wallet = btc_wallet();
        assert_eq!(denomination_keys(&wallet, "BTC"), vec!["100000000", "100000", "100"]);

        let mut settings = Settings::new();
        let next = next_denomination_key(&wallet, "BTC", &settings).unwrap();
        assert_eq!(next, "100000");

        settings.set_denomination("BTC", "100");
        assert_eq!(next_denomination_key(&wallet, "BTC", &settings).unwrap(), "100000000");

        assert!(next_denomination_key(&wallet, "ETH", &settings).is_none());
    }
}
