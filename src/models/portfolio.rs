// ============================================================================
// Structure : Portfolio
// ============================================================================
// Le document JSON chargé au démarrage : réglages, wallets et taux connus
//
// Format :
// {
//   "settings": { "defaultFiat": "iso:USD", "currencies": { ... }, ... },
//   "wallets": [ { "id": "...", "currencyCode": "BTC", ... } ],
//   "rates": { "rates": { "BTC": "65000" } }
// }
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{ExchangeRates, Settings, Wallet};

/// Contenu du fichier portfolio
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// Réglages utilisateur
    #[serde(default)]
    pub settings: Settings,

    /// Wallets à afficher, dans l'ordre de la liste
    #[serde(default)]
    pub wallets: Vec<Wallet>,

    /// Taux connus (servent tant que le rafraîchissement n'a pas abouti)
    #[serde(default)]
    pub rates: ExchangeRates,
}

impl Portfolio {
    /// Charge un portfolio depuis un fichier JSON
    ///
    /// CONCEPT RUST : Context trait (anyhow)
    /// - .with_context() ajoute le chemin du fichier à l'erreur
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading portfolio file");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire le portfolio {}", path.display()))?;

        let portfolio: Portfolio = serde_json::from_str(&content)
            .with_context(|| format!("Portfolio JSON invalide : {}", path.display()))?;

        info!(
            wallets = portfolio.wallets.len(),
            custom_tokens = portfolio.settings.custom_tokens.len(),
            rates = portfolio.rates.rates.len(),
            "Portfolio loaded"
        );
        Ok(portfolio)
    }

    /// Codes des devises principales, dont on a besoin du taux
    ///
    /// Les tokens n'affichent pas de valeur fiat : inutile de récupérer leur taux.
    ///
    /// CONCEPT RUST : BTreeSet
    /// - collect() dans un BTreeSet dédoublonne et trie
    pub fn currency_codes(&self) -> Vec<String> {
        let codes: std::collections::BTreeSet<String> = self
            .wallets
            .iter()
            .map(|wallet| wallet.currency_code.clone())
            .collect();
        codes.into_iter().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "settings": { "defaultFiat": "iso:EUR" },
        "wallets": [
            { "id": "1", "currencyCode": "ETH", "name": "Ether", "primaryNativeBalance": "0",
              "enabledTokens": ["REP"] },
            { "id": "2", "currencyCode": "BTC", "name": "Bitcoin", "primaryNativeBalance": "0" }
        ],
        "rates": { "rates": { "BTC": "60000" } }
    }"#;

    #[test]
    fn test_load_portfolio_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let portfolio = Portfolio::load(file.path()).unwrap();
        assert_eq!(portfolio.wallets.len(), 2);
        assert_eq!(portfolio.settings.fiat_code(), "EUR");
        assert!(portfolio.rates.rate("BTC").is_some());
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = Portfolio::load(Path::new("/nonexistent/portfolio.json")).unwrap_err();
        assert!(err.to_string().contains("portfolio"));
    }

    #[test]
    fn test_currency_codes_are_primary_only() {
        let mut portfolio: Portfolio = serde_json::from_str(SAMPLE).unwrap();
        portfolio.wallets.push(portfolio.wallets[1].clone());

        // REP est un token activé : pas de taux demandé
        assert_eq!(portfolio.currency_codes(), vec!["BTC", "ETH"]);
    }
}
