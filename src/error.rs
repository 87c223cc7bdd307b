// ============================================================================
// Erreurs de la ligne de wallet
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error
// - #[error("...")] génère l'implémentation de Display
// - La bibliothèque expose des erreurs typées, l'application utilise anyhow
// ============================================================================

use thiserror::Error;

/// Erreurs possibles lors de la construction d'une ligne
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// Ni la table intégrée ni un token personnalisé ne donnent de multiplicateur
    #[error("no denomination found for currency {currency_code}")]
    NoDenomination { currency_code: String },

    /// Montant ou multiplicateur qui n'est pas un nombre décimal
    #[error("invalid decimal amount: {value:?}")]
    InvalidAmount { value: String },

    /// Multiplicateur nul (division impossible)
    #[error("denomination multiplier is zero")]
    ZeroMultiplier,
}

impl RowError {
    /// Crée une erreur NoDenomination
    pub fn no_denomination<T: ToString>(currency_code: T) -> Self {
        Self::NoDenomination {
            currency_code: currency_code.to_string(),
        }
    }

    /// Vrai si l'erreur vient d'une dénomination introuvable
    pub fn is_missing_denomination(&self) -> bool {
        matches!(self, Self::NoDenomination { .. })
    }
}

/// Result spécialisé pour la ligne de wallet
pub type RowResult<T> = std::result::Result<T, RowError>;
