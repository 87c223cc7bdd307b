// ============================================================================
// Module : row
// ============================================================================
// La ligne de wallet, en deux couches :
// - props.rs : liaison état partagé -> props
// - view.rs : props -> vue (fonction pure)
// Plus les briques utilisées par la vue (dénominations, tokens) et le
// décorateur optionnel de mesure (slowlog.rs).
// ============================================================================

pub mod denomination; // Résolution (multiplicateur, symbole)
pub mod tokens;       // Soldes des tokens activés
pub mod props;        // mapStateToProps explicite
pub mod view;         // Composant et vue de la ligne
pub mod slowlog;      // Décorateur de mesure du rendu

// Re-exports
pub use denomination::{
    next_denomination_key, resolve_display_denomination, resolve_exchange_denomination,
    DenominationSource, ResolvedDenomination,
};
pub use props::{map_state_to_props, WalletRowOwnProps, WalletRowProps};
pub use slowlog::SlowLog;
pub use tokens::enabled_token_balances;
pub use view::{
    FiatCell, MissingDenominationPolicy, RowOptions, RowRenderer, TokenLine, WalletRowComponent,
    WalletRowView,
};
