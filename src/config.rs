// ============================================================================
// Configuration
// ============================================================================
// Charge la configuration depuis un fichier JSON
//
// Ordre de recherche :
// 1. --config FILE (ligne de commande)
// 2. Variable d'environnement WALLETLIST_CONFIG
// 3. ~/.config/walletlist/config.json (via dirs::config_dir)
// 4. Valeurs par défaut
//
// CONCEPT RUST : #[serde(default)]
// - Chaque champ absent du fichier prend sa valeur par défaut
// - Un fichier "{}" est donc une configuration valide
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::format::{NumberLocale, CRYPTO_DECIMALS, WALLET_NAME_MAX_CHARS};
use crate::row::slowlog::DEFAULT_SLOW_THRESHOLD;
use crate::row::{MissingDenominationPolicy, RowOptions};

/// Variable d'environnement pointant vers le fichier de configuration
pub const CONFIG_ENV_VAR: &str = "WALLETLIST_CONFIG";

/// Mesure optionnelle du temps de rendu des lignes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowLogConfig {
    /// Active le décorateur SlowLog
    pub enabled: bool,
    /// Seuil en millisecondes au-delà duquel un warning est émis
    pub threshold_ms: u64,
}

impl Default for SlowLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold_ms: DEFAULT_SLOW_THRESHOLD.as_millis() as u64,
        }
    }
}

impl SlowLogConfig {
    /// Seuil sous forme de Duration
    pub fn threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }
}

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fichier portfolio (wallets, réglages, taux)
    pub portfolio_path: PathBuf,

    /// Répertoire des logs
    pub log_dir: PathBuf,

    /// Séparateurs numériques
    pub locale: NumberLocale,

    /// Politique quand une devise n'a pas de dénomination
    pub missing_denomination: MissingDenominationPolicy,

    /// Longueur maximale des noms de wallet
    pub name_max_chars: usize,

    /// Décimales maximales des montants crypto
    pub crypto_decimals: u32,

    /// Rafraîchit les taux depuis Yahoo Finance au démarrage
    pub fetch_rates: bool,

    /// Mesure du rendu des lignes
    pub slowlog: SlowLogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portfolio_path: PathBuf::from("portfolio.json"),
            log_dir: PathBuf::from("./logs"),
            locale: NumberLocale::default(),
            missing_denomination: MissingDenominationPolicy::Skip,
            name_max_chars: WALLET_NAME_MAX_CHARS,
            crypto_decimals: CRYPTO_DECIMALS,
            fetch_rates: true,
            slowlog: SlowLogConfig::default(),
        }
    }
}

impl Config {
    /// Charge la configuration depuis un fichier JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire la configuration {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Configuration JSON invalide : {}", path.display()))
    }

    /// Charge la configuration selon l'ordre de recherche
    ///
    /// Un chemin explicite (argument ou variable d'environnement) qui n'existe
    /// pas est une erreur ; le fichier par défaut, lui, est optionnel.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);

        if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
            info!(path = %path.display(), "Loading configuration");
            return Self::from_file(&path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)
            }
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// ~/.config/walletlist/config.json (Linux) ou équivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("walletlist").join("config.json"))
    }

    /// Options de rendu des lignes déduites de la configuration
    pub fn row_options(&self) -> RowOptions {
        RowOptions {
            name_max_chars: self.name_max_chars,
            crypto_decimals: self.crypto_decimals,
            missing_denomination: self.missing_denomination,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.row_options(), RowOptions::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "missing_denomination": "fail_fast",
                "locale": { "decimal_separator": ",", "grouping_separator": "." },
                "slowlog": { "enabled": true },
                "fetch_rates": false
            }"#,
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.missing_denomination, MissingDenominationPolicy::FailFast);
        assert_eq!(config.locale, NumberLocale::de_de());
        assert!(config.slowlog.enabled);
        assert_eq!(config.slowlog.threshold(), DEFAULT_SLOW_THRESHOLD);
        assert!(!config.fetch_rates);
        assert_eq!(config.name_max_chars, WALLET_NAME_MAX_CHARS);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/walletlist.json"))).is_err());
    }
}
