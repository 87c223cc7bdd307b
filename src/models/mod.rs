// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod wallet;    // Wallet et dénominations (fichier wallet.rs)
pub mod settings;  // Réglages utilisateur et tokens personnalisés
pub mod rates;     // Taux de change crypto -> fiat
pub mod portfolio; // Document JSON chargé au démarrage

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use walletlist::models::wallet::Wallet;
// On peut faire : use walletlist::models::Wallet;
pub use wallet::{Denomination, DenominationTable, Wallet};
pub use settings::{CurrencySettings, CustomTokenInfo, Settings};
pub use rates::ExchangeRates;
pub use portfolio::Portfolio;
