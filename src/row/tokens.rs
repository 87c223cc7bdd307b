// ============================================================================
// Soldes des tokens activés
// ============================================================================
// Croise native_balances avec enabled_tokens :
// - garde uniquement les tokens activés
// - exclut la devise principale (déjà affichée sur la ligne du wallet)
// ============================================================================

use std::collections::BTreeMap;

use crate::models::Wallet;

/// Soldes natifs des tokens activés, hors devise principale
///
/// CONCEPT RUST : filter + collect dans une map
/// - .filter() garde les entrées qui passent le test
/// - .collect() construit directement une BTreeMap depuis des tuples
pub fn enabled_token_balances(wallet: &Wallet) -> BTreeMap<String, String> {
    wallet
        .native_balances
        .iter()
        .filter(|(code, _)| **code != wallet.currency_code && wallet.is_token_enabled(code))
        .map(|(code, balance)| (code.clone(), balance.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enabled_non_primary_tokens() {
        let mut wallet = Wallet::new("w", "BTC", "Test", "1");
        wallet.enabled_tokens = vec!["BTC".to_string(), "ETH".to_string()];
        wallet.native_balances = BTreeMap::from([
            ("BTC".to_string(), "1".to_string()),
            ("ETH".to_string(), "2".to_string()),
            ("LTC".to_string(), "3".to_string()),
        ]);

        let filtered = enabled_token_balances(&wallet);
        assert_eq!(filtered, BTreeMap::from([("ETH".to_string(), "2".to_string())]));
    }

    #[test]
    fn test_enabled_token_without_balance_is_absent() {
        let mut wallet = Wallet::new("w", "ETH", "Test", "1");
        wallet.enabled_tokens = vec!["REP".to_string()];

        assert!(enabled_token_balances(&wallet).is_empty());
    }
}
