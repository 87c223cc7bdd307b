// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Trait objects : Box<dyn RowRenderer> choisi au démarrage
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les lignes sont recalculées dès que l'état change (refresh_rows)
// ============================================================================

use tracing::{debug, error, info};

use crate::error::RowResult;
use crate::models::{ExchangeRates, Wallet};
use crate::row::view::is_data_error;
use crate::row::{
    map_state_to_props, next_denomination_key, RowRenderer, WalletRowOwnProps, WalletRowView,
};
use crate::state::StateSnapshot;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Pattern "State Machine" : un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : liste des wallets
    WalletList,

    /// Détail du wallet sélectionné (ouvert par appui sur une ligne)
    WalletDetail,
}

/// Wallet choisi par appui sur une ligne (payload du callback)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedWallet {
    pub wallet_id: String,
    pub currency_code: String,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Wallets affichés, dans l'ordre du portfolio
    pub wallets: Vec<Wallet>,

    /// Photo de l'état partagé (réglages, taux, locale)
    pub state: StateSnapshot,

    /// Lignes calculées (les wallets sans dénomination n'y figurent pas)
    pub rows: Vec<WalletRowView>,

    /// Index de la ligne sélectionnée dans `rows`
    pub selected_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Dernier wallet choisi par appui sur une ligne
    pub selected_wallet: Option<SelectedWallet>,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    pub confirm_quit: bool,

    /// Indique si des taux sont en cours de chargement
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Message d'état affiché dans le footer (erreurs de données, etc.)
    pub status_message: Option<String>,

    /// Renderer des lignes (composant nu ou enveloppé par SlowLog)
    renderer: Box<dyn RowRenderer + Send>,
}

impl App {
    /// Crée l'application et calcule les lignes une première fois
    ///
    /// Échoue si une ligne échoue avec la politique FailFast.
    pub fn new(
        wallets: Vec<Wallet>,
        state: StateSnapshot,
        renderer: Box<dyn RowRenderer + Send>,
    ) -> RowResult<Self> {
        let mut app = Self {
            running: true,
            wallets,
            state,
            rows: Vec::new(),
            selected_index: 0,
            current_screen: Screen::WalletList,
            selected_wallet: None,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            status_message: None,
            renderer,
        };
        app.refresh_rows()?;
        Ok(app)
    }

    /// Recalcule toutes les lignes depuis l'état courant
    ///
    /// CONCEPT : invalidation "push"
    /// - Appelé après chaque modification de l'état (taux, réglages)
    /// - Le rendu du terminal ne fait que lire `rows`
    ///
    /// Une erreur de données (solde illisible) retire la ligne et s'affiche
    /// dans le footer ; une dénomination manquante en mode FailFast remonte.
    pub fn refresh_rows(&mut self) -> RowResult<()> {
        let mut rows = Vec::with_capacity(self.wallets.len());
        let mut data_errors = 0;

        for wallet in &self.wallets {
            let props = map_state_to_props(&self.state, WalletRowOwnProps { wallet });
            match self.renderer.render_row(&props) {
                Ok(Some(view)) => rows.push(view),
                Ok(None) => {}
                Err(e) if is_data_error(&e) => {
                    error!(wallet_id = %wallet.id, error = %e, "Invalid wallet data, row skipped");
                    data_errors += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(rows = rows.len(), wallets = self.wallets.len(), "Rows refreshed");
        self.rows = rows;
        self.status_message = (data_errors > 0)
            .then(|| format!("{} wallet(s) avec des données invalides (voir logs)", data_errors));

        // Garde la sélection dans les bornes
        self.selected_index = self.selected_index.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    pub fn tick(&mut self) {}

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigue vers le haut dans la liste
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : soustrait mais ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans la liste
    pub fn navigate_down(&mut self) {
        let max_index = self.rows.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ligne sélectionnée
    pub fn selected_row(&self) -> Option<&WalletRowView> {
        self.rows.get(self.selected_index)
    }

    /// Wallet correspondant à la ligne sélectionnée
    pub fn selected_row_wallet(&self) -> Option<&Wallet> {
        let row = self.selected_row()?;
        self.wallets.iter().find(|wallet| wallet.id == row.wallet_id)
    }

    /// Appui sur la ligne sélectionnée
    ///
    /// CONCEPT RUST : clone pour libérer l'emprunt
    /// - La vue est clonée, puis son callback modifie self
    pub fn press_selected(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            row.press(|wallet_id, currency_code| self.select_wallet(wallet_id, currency_code));
        }
    }

    /// Callback d'appui : mémorise le wallet choisi et ouvre son détail
    pub fn select_wallet(&mut self, wallet_id: &str, currency_code: &str) {
        info!(wallet_id = %wallet_id, currency = %currency_code, "Wallet selected");
        self.selected_wallet = Some(SelectedWallet {
            wallet_id: wallet_id.to_string(),
            currency_code: currency_code.to_string(),
        });
        self.current_screen = Screen::WalletDetail;
    }

    /// Wallet choisi par le dernier appui
    pub fn selected_wallet_details(&self) -> Option<&Wallet> {
        let selected = self.selected_wallet.as_ref()?;
        self.wallets.iter().find(|wallet| wallet.id == selected.wallet_id)
    }

    /// Retourne à la liste
    pub fn show_list(&mut self) {
        self.current_screen = Screen::WalletList;
    }

    /// Vérifie si on est sur la liste
    pub fn is_on_list(&self) -> bool {
        self.current_screen == Screen::WalletList
    }

    /// Vérifie si on est sur le détail d'un wallet
    pub fn is_on_detail(&self) -> bool {
        self.current_screen == Screen::WalletDetail
    }

    // ========================================================================
    // Modifications de l'état partagé
    // ========================================================================

    /// Affiche / masque la colonne fiat
    pub fn toggle_fiat_visibility(&mut self) -> RowResult<()> {
        self.state.settings.toggle_fiat_visibility();
        info!(visible = self.state.settings.is_wallet_fiat_balance_visible, "Fiat visibility toggled");
        self.refresh_rows()
    }

    /// Passe à la dénomination suivante pour la devise de la ligne sélectionnée
    pub fn cycle_denomination(&mut self) -> RowResult<()> {
        let Some(wallet) = self.selected_row_wallet() else {
            return Ok(());
        };
        let currency_code = wallet.currency_code.clone();

        let Some(next_key) = next_denomination_key(wallet, &currency_code, &self.state.settings) else {
            debug!(currency = %currency_code, "No built-in denominations to cycle");
            return Ok(());
        };

        info!(currency = %currency_code, denomination = %next_key, "Denomination changed");
        self.state.settings.set_denomination(&currency_code, &next_key);
        self.refresh_rows()
    }

    /// Intègre des taux fraîchement récupérés
    pub fn apply_rates(&mut self, rates: ExchangeRates) -> RowResult<()> {
        self.state.rates.merge(rates);
        self.refresh_rows()
    }

    // ========================================================================
    // Confirmation de quit et chargement
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Vérifie si des données sont en cours de chargement
    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;
    use crate::models::Denomination;
    use crate::row::{FiatCell, MissingDenominationPolicy, RowOptions, WalletRowComponent};
    use rust_decimal::Decimal;

    fn wallets() -> Vec<Wallet> {
        vec![
            Wallet::new("w-btc", "BTC", "Bitcoin", "150000000")
                .with_denomination("BTC", Denomination::new("BTC", "100000000", Some("₿")))
                .with_denomination("BTC", Denomination::new("mBTC", "100000", Some("m₿"))),
            Wallet::new("w-xyz", "XYZ", "Sans métadonnées", "1"),
            Wallet::new("w-eth", "ETH", "Ether", "2000000000000000000")
                .with_denomination("ETH", Denomination::new("ETH", "1000000000000000000", Some("Ξ"))),
        ]
    }

    fn app_with(policy: MissingDenominationPolicy) -> RowResult<App> {
        let options = RowOptions {
            missing_denomination: policy,
            ..RowOptions::default()
        };
        App::new(
            wallets(),
            StateSnapshot::default(),
            Box::new(WalletRowComponent::new(options)),
        )
    }

    #[test]
    fn test_app_skips_unresolvable_wallet() {
        let app = app_with(MissingDenominationPolicy::Skip).unwrap();
        assert!(app.is_running());
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.rows[1].wallet_id, "w-eth");
    }

    #[test]
    fn test_app_fail_fast() {
        let result = app_with(MissingDenominationPolicy::FailFast);
        assert!(matches!(result, Err(RowError::NoDenomination { .. })));
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app_with(MissingDenominationPolicy::Skip).unwrap();

        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_press_selects_wallet_and_opens_detail() {
        let mut app = app_with(MissingDenominationPolicy::Skip).unwrap();
        app.navigate_down();
        app.press_selected();

        assert!(app.is_on_detail());
        assert_eq!(
            app.selected_wallet,
            Some(SelectedWallet {
                wallet_id: "w-eth".to_string(),
                currency_code: "ETH".to_string(),
            })
        );
        assert_eq!(app.selected_wallet_details().unwrap().name, "Ether");

        app.show_list();
        assert!(app.is_on_list());
    }

    #[test]
    fn test_cycle_denomination_updates_row() {
        let mut app = app_with(MissingDenominationPolicy::Skip).unwrap();
        assert_eq!(app.rows[0].crypto_text(), "1.5 ₿");

        app.cycle_denomination().unwrap();
        assert_eq!(app.rows[0].crypto_text(), "1,500 m₿");
    }

    #[test]
    fn test_rates_and_fiat_toggle() {
        let mut app = app_with(MissingDenominationPolicy::Skip).unwrap();
        assert_eq!(app.rows[0].fiat, FiatCell::Unavailable);

        let mut rates = ExchangeRates::new();
        rates.set_rate("BTC", Decimal::from(60000));
        app.apply_rates(rates).unwrap();
        assert_eq!(app.rows[0].fiat.text(), "$90,000.00");

        app.toggle_fiat_visibility().unwrap();
        assert_eq!(app.rows[0].fiat, FiatCell::Hidden);
    }

    #[test]
    fn test_bad_tokens_keep_row_even_with_fail_fast() {
        let mut list = wallets();
        list.remove(1); // w-xyz : sa devise principale échouerait en FailFast
        list[1] = list[1]
            .clone()
            .with_denomination("SHIB", Denomination::new("SHIB", "1000000000000000000", None))
            .with_token("SHIB", "not-a-balance")
            .with_token("NEAR", &"9".repeat(40));

        let options = RowOptions {
            missing_denomination: MissingDenominationPolicy::FailFast,
            ..RowOptions::default()
        };
        let app = App::new(list, StateSnapshot::default(), Box::new(WalletRowComponent::new(options))).unwrap();

        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.rows[1].crypto_text(), "2 Ξ");
        assert!(app.rows[1].tokens.is_empty());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_invalid_balance_reported_in_status() {
        let mut list = wallets();
        list[0].primary_native_balance = "???".to_string();

        let app = App::new(list, StateSnapshot::default(), Box::new(WalletRowComponent::default())).unwrap();
        assert_eq!(app.rows.len(), 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_quit_two_steps() {
        let mut app = app_with(MissingDenominationPolicy::Skip).unwrap();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }
}
