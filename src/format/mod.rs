// ============================================================================
// Module : format
// ============================================================================
// Fonctions pures de formatage : montants crypto, montants fiat, texte
// Aucune dépendance à l'UI : testables sans terminal
// ============================================================================

pub mod amount; // Division exacte, troncature, séparateurs
pub mod exact;  // Décimal exact sans limite de taille (BigInt)
pub mod fiat;   // Symboles fiat et conversion crypto -> fiat
pub mod text;   // Troncature des noms

// Re-exports
pub use amount::{
    format_crypto_amount, format_fiat_amount, format_number, NumberLocale, CRYPTO_DECIMALS,
    DIVIDE_PRECISION, FIAT_DECIMALS,
};
pub use exact::ExactAmount;
pub use fiat::{fiat_from_native, fiat_symbol};
pub use text::{cut_off_text, WALLET_NAME_MAX_CHARS};
