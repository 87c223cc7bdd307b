// ============================================================================
// Couche de présentation : props -> vue de la ligne
// ============================================================================
// Fonction pure : à partir des props, calcule tout ce qui s'affiche
// (nom tronqué, montant crypto, symbole, cellule fiat, lignes de tokens).
// Le dessin ratatui est fait à part (ui/wallet_row.rs).
//
// CONCEPTS RUST :
// 1. Trait RowRenderer : point d'extension (décorateurs comme SlowLog)
// 2. Result<Option<T>> : erreur / pas de ligne / ligne
// 3. Enum FiatCell : les 3 états de la colonne fiat sont explicites
// ============================================================================

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RowError, RowResult};
use crate::format::{cut_off_text, format_crypto_amount, CRYPTO_DECIMALS, WALLET_NAME_MAX_CHARS};
use crate::row::denomination::{resolve_display_denomination, ResolvedDenomination};
use crate::row::props::WalletRowProps;
use crate::row::tokens::enabled_token_balances;

// ============================================================================
// Options
// ============================================================================

/// Que faire quand aucune dénomination n'est trouvée pour une devise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDenominationPolicy {
    /// Pas de ligne, un warning dans les logs (métadonnées en cours de synchro)
    #[default]
    Skip,
    /// Erreur remontée à l'appelant
    FailFast,
}

/// Options de rendu d'une ligne
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOptions {
    /// Longueur maximale du nom (en caractères)
    pub name_max_chars: usize,
    /// Décimales maximales du montant crypto
    pub crypto_decimals: u32,
    /// Politique en cas de dénomination introuvable
    pub missing_denomination: MissingDenominationPolicy,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            name_max_chars: WALLET_NAME_MAX_CHARS,
            crypto_decimals: CRYPTO_DECIMALS,
            missing_denomination: MissingDenominationPolicy::Skip,
        }
    }
}

// ============================================================================
// Vue
// ============================================================================

/// Contenu de la colonne fiat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FiatCell {
    /// Masquée par les réglages
    Hidden,
    /// Aucun taux connu
    Unavailable,
    /// Montant formaté, symbole compris (ex: "$90,000.00")
    Amount(String),
}

impl FiatCell {
    /// Texte affiché dans la cellule
    pub fn text(&self) -> &str {
        match self {
            FiatCell::Hidden => "",
            FiatCell::Unavailable => "N/A",
            FiatCell::Amount(amount) => amount,
        }
    }
}

/// Sous-ligne d'un token activé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    /// Code du token (ex: "REP")
    pub currency_code: String,
    /// Montant formaté
    pub amount: String,
    /// Symbole (vide si inconnu)
    pub symbol: String,
}

impl TokenLine {
    /// Montant suivi du symbole
    pub fn amount_text(&self) -> String {
        join_amount(&self.amount, &self.symbol)
    }
}

/// Tout ce qu'affiche une ligne de la liste
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRowView {
    /// Identifiant du wallet (renvoyé au callback)
    pub wallet_id: String,
    /// Devise principale (renvoyée au callback)
    pub currency_code: String,
    /// Nom tronqué
    pub name: String,
    /// Montant crypto formaté
    pub crypto_amount: String,
    /// Symbole de la dénomination (vide si inconnu)
    pub crypto_symbol: String,
    /// Colonne fiat
    pub fiat: FiatCell,
    /// Tokens activés (hors devise principale)
    pub tokens: Vec<TokenLine>,
}

impl WalletRowView {
    /// Montant crypto suivi du symbole (ex: "1.5 ₿")
    pub fn crypto_text(&self) -> String {
        join_amount(&self.crypto_amount, &self.crypto_symbol)
    }

    /// Appui sur la ligne : prévient le propriétaire
    ///
    /// Appelle `on_press_select_wallet(wallet_id, currency_code)` une seule
    /// fois et ne modifie rien d'autre.
    pub fn press<F>(&self, on_press_select_wallet: F)
    where
        F: FnOnce(&str, &str),
    {
        on_press_select_wallet(&self.wallet_id, &self.currency_code);
    }
}

fn join_amount(amount: &str, symbol: &str) -> String {
    if symbol.is_empty() {
        amount.to_string()
    } else {
        format!("{} {}", amount, symbol)
    }
}

// ============================================================================
// Trait RowRenderer
// ============================================================================
// CONCEPT RUST : Traits comme interfaces
// - WalletRowComponent : implémentation réelle
// - SlowLog<R> : décorateur qui mesure le temps de rendu
// - L'app manipule un Box<dyn RowRenderer> sans savoir lequel
// ============================================================================

/// Transforme des props en vue de ligne
pub trait RowRenderer {
    /// Ok(None) : la ligne ne doit pas être affichée
    fn render_row(&self, props: &WalletRowProps<'_>) -> RowResult<Option<WalletRowView>>;
}

/// Composant ligne de wallet
#[derive(Debug, Clone, Copy, Default)]
pub struct WalletRowComponent {
    options: RowOptions,
}

impl WalletRowComponent {
    /// Crée le composant avec ses options
    pub fn new(options: RowOptions) -> Self {
        Self { options }
    }

    /// Options courantes
    pub fn options(&self) -> &RowOptions {
        &self.options
    }

    /// Applique la politique sur la dénomination de la devise principale
    ///
    /// Ok(None) si la dénomination manque et que la politique est Skip.
    fn apply_policy(
        &self,
        resolved: RowResult<ResolvedDenomination>,
        wallet_id: &str,
    ) -> RowResult<Option<ResolvedDenomination>> {
        match resolved {
            Ok(denomination) => Ok(Some(denomination)),
            Err(error) if error.is_missing_denomination() => match self.options.missing_denomination {
                MissingDenominationPolicy::Skip => {
                    warn!(wallet_id = %wallet_id, %error, "Skipping row: no denomination");
                    Ok(None)
                }
                MissingDenominationPolicy::FailFast => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    /// Sous-lignes des tokens activés
    ///
    /// Un token en erreur (dénomination inconnue, solde illisible) perd sa
    /// sous-ligne avec un warning ; la ligne du wallet reste affichée, quelle
    /// que soit la politique.
    fn token_lines(&self, props: &WalletRowProps<'_>) -> Vec<TokenLine> {
        let mut lines = Vec::new();

        for (currency_code, native_balance) in enabled_token_balances(props.wallet) {
            match self.token_line(props, &currency_code, &native_balance) {
                Ok(line) => lines.push(line),
                Err(error) => {
                    warn!(wallet_id = %props.wallet.id, token = %currency_code, %error, "Skipping token line");
                }
            }
        }

        lines
    }

    fn token_line(&self, props: &WalletRowProps<'_>, currency_code: &str, native_balance: &str) -> RowResult<TokenLine> {
        let denomination = resolve_display_denomination(props.wallet, currency_code, props.settings)?;
        let amount = format_crypto_amount(
            native_balance,
            &denomination.multiplier,
            self.options.crypto_decimals,
            &props.locale,
        )?;

        Ok(TokenLine {
            currency_code: currency_code.to_string(),
            amount,
            symbol: denomination.symbol_or_empty().to_string(),
        })
    }

    fn fiat_cell(props: &WalletRowProps<'_>) -> FiatCell {
        if !props.is_wallet_fiat_balance_visible {
            return FiatCell::Hidden;
        }
        match &props.fiat_balance {
            Some(balance) => FiatCell::Amount(format!("{}{}", props.fiat_symbol, balance)),
            None => FiatCell::Unavailable,
        }
    }
}

impl RowRenderer for WalletRowComponent {
    fn render_row(&self, props: &WalletRowProps<'_>) -> RowResult<Option<WalletRowView>> {
        let wallet = props.wallet;

        let Some(denomination) = self.apply_policy(props.display_denomination.clone(), &wallet.id)? else {
            return Ok(None);
        };

        let crypto_amount = format_crypto_amount(
            &wallet.primary_native_balance,
            &denomination.multiplier,
            self.options.crypto_decimals,
            &props.locale,
        )?;

        Ok(Some(WalletRowView {
            wallet_id: wallet.id.clone(),
            currency_code: wallet.currency_code.clone(),
            name: cut_off_text(&wallet.name, self.options.name_max_chars),
            crypto_amount,
            crypto_symbol: denomination.symbol_or_empty().to_string(),
            fiat: Self::fiat_cell(props),
            tokens: self.token_lines(props),
        }))
    }
}

/// Erreur non liée aux dénominations (montant invalide, multiplicateur nul)
pub fn is_data_error(error: &RowError) -> bool {
    !error.is_missing_denomination()
}

// ============================================================================
// Tests
// ============================================================================
