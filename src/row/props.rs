// ============================================================================
// Liaison des données : état partagé -> props de la ligne
// ============================================================================
// Couche "data-binding" : combine la photo de l'état (StateSnapshot) avec les
// props fournies par le propriétaire (le wallet) pour produire tout ce dont la
// couche de présentation a besoin.
//
// CONCEPT RUST : Lifetimes 'a
// - Les props empruntent le wallet et les réglages (pas de copie)
// - Le compilateur garantit que la photo vit plus longtemps que les props
// ============================================================================

use tracing::debug;

use crate::error::RowResult;
use crate::format::{fiat_from_native, format_fiat_amount, NumberLocale};
use crate::models::{Settings, Wallet};
use crate::row::denomination::ResolvedDenomination;
use crate::state::StateSnapshot;

/// Props fournies par le propriétaire de la ligne (la liste)
#[derive(Debug, Clone, Copy)]
pub struct WalletRowOwnProps<'a> {
    /// Wallet à afficher
    pub wallet: &'a Wallet,
}

/// Props complètes reçues par la couche de présentation
#[derive(Debug, Clone)]
pub struct WalletRowProps<'a> {
    /// Wallet à afficher
    pub wallet: &'a Wallet,

    /// Réglages (dénominations, tokens personnalisés)
    pub settings: &'a Settings,

    /// Dénomination d'affichage de la devise principale (sélecteur de l'état)
    /// Err(NoDenomination) : la vue applique la politique configurée
    pub display_denomination: RowResult<ResolvedDenomination>,

    /// Séparateurs numériques
    pub locale: NumberLocale,

    /// Symbole de la devise fiat (ex: "$")
    pub fiat_symbol: String,

    /// Affichage de la colonne fiat
    pub is_wallet_fiat_balance_visible: bool,

    /// Valeur fiat formatée (None si aucun taux ou dénomination)
    pub fiat_balance: Option<String>,
}

/// Construit les props d'une ligne à partir de l'état partagé
pub fn map_state_to_props<'a>(
    state: &'a StateSnapshot,
    own_props: WalletRowOwnProps<'a>,
) -> WalletRowProps<'a> {
    let wallet = own_props.wallet;

    let fiat_balance = match calculate_fiat_balance(wallet, state) {
        Ok(balance) => balance,
        Err(error) => {
            debug!(wallet_id = %wallet.id, currency = %wallet.currency_code, %error, "Fiat balance unavailable");
            None
        }
    };

    WalletRowProps {
        wallet,
        settings: &state.settings,
        display_denomination: state.display_denomination(wallet, &wallet.currency_code),
        locale: state.locale,
        fiat_symbol: state.fiat_symbol(),
        is_wallet_fiat_balance_visible: state.is_wallet_fiat_balance_visible(),
        fiat_balance,
    }
}

/// Valeur fiat du solde principal, formatée selon la locale
///
/// Ok(None) : pas de taux connu pour la devise (cas normal au démarrage)
pub fn calculate_fiat_balance(wallet: &Wallet, state: &StateSnapshot) -> RowResult<Option<String>> {
    let Some(rate) = state.rates.rate(&wallet.currency_code) else {
        return Ok(None);
    };

    let exchange = state.exchange_denomination(wallet, &wallet.currency_code)?;
    let value = fiat_from_native(&wallet.primary_native_balance, &exchange.multiplier, rate)?;

    Ok(Some(format_fiat_amount(&value, &state.locale)))
}

// ============================================================================
// Tests
// ============================================================================
