// ============================================================================
// Module : api
// ============================================================================
// Clients API utilisés par l'application (pas par la ligne de wallet) :
// récupération des taux de change crypto -> fiat
// ============================================================================

pub mod yahoo;  // Client API Yahoo Finance

// Re-export des fonctions principales
pub use yahoo::{fetch_exchange_rates, fetch_spot_price};
