// ============================================================================
// Structure : StateSnapshot
// ============================================================================
// Photo en lecture seule de l'état partagé, passée explicitement à chaque rendu
//
// PATTERN : injection de dépendances
// - Pas d'abonnement global à un store
// - Le composant reçoit ce dont il a besoin (réglages, taux, locale)
// - Les sélecteurs sont des méthodes pures sur la photo
// ============================================================================

use crate::error::RowResult;
use crate::format::{fiat_symbol, NumberLocale};
use crate::models::{ExchangeRates, Settings, Wallet};
use crate::row::denomination::{
    resolve_display_denomination, resolve_exchange_denomination, ResolvedDenomination,
};

/// État partagé lu par les lignes de la liste
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    /// Réglages utilisateur
    pub settings: Settings,

    /// Taux de change connus
    pub rates: ExchangeRates,

    /// Séparateurs numériques
    pub locale: NumberLocale,
}

impl StateSnapshot {
    /// Crée une photo de l'état
    pub fn new(settings: Settings, rates: ExchangeRates, locale: NumberLocale) -> Self {
        Self {
            settings,
            rates,
            locale,
        }
    }

    // ========================================================================
    // Sélecteurs
    // ========================================================================

    /// Dénomination d'affichage d'une devise (choix utilisateur)
    pub fn display_denomination(&self, wallet: &Wallet, currency_code: &str) -> RowResult<ResolvedDenomination> {
        resolve_display_denomination(wallet, currency_code, &self.settings)
    }

    /// Unité d'échange d'une devise (base des taux)
    pub fn exchange_denomination(&self, wallet: &Wallet, currency_code: &str) -> RowResult<ResolvedDenomination> {
        resolve_exchange_denomination(wallet, currency_code, &self.settings)
    }

    /// Symbole de la devise fiat par défaut (le code ISO si inconnu)
    pub fn fiat_symbol(&self) -> String {
        fiat_symbol(&self.settings.default_fiat)
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.fiat_code().to_string())
    }

    /// Vrai si la colonne fiat doit être affichée
    pub fn is_wallet_fiat_balance_visible(&self) -> bool {
        self.settings.is_wallet_fiat_balance_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_symbol_falls_back_to_code() {
        let mut snapshot = StateSnapshot::default();
        assert_eq!(snapshot.fiat_symbol(), "$");

        snapshot.settings.default_fiat = "iso:SEK".to_string();
        assert_eq!(snapshot.fiat_symbol(), "SEK");
    }
}
