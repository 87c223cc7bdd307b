// ============================================================================
// Widget : ligne de wallet
// ============================================================================
// Dessine une WalletRowView sous forme de ListItem ratatui :
//
//   Mon wallet Bitcoin                 1.5 ₿            $90,000.00
//      └ REP                           2.5 R
//
// CONCEPTS RATATUI :
// 1. Span : morceau de texte avec style
// 2. Line : une ligne composée de Spans
// 3. ListItem : un élément de List, peut contenir plusieurs Lines
// ============================================================================

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::format::WALLET_NAME_MAX_CHARS;
use crate::row::{FiatCell, WalletRowView};

/// Largeur de la colonne montant crypto
const CRYPTO_WIDTH: usize = 22;

/// Largeur de la colonne fiat
const FIAT_WIDTH: usize = 16;

/// Largeur de la colonne nom : la plus longue des lignes, au moins 34
///
/// Suit la longueur configurée (name_max_chars) sans la connaître : les noms
/// sont déjà tronqués par le composant.
pub fn name_column_width(rows: &[WalletRowView]) -> usize {
    rows.iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(WALLET_NAME_MAX_CHARS)
}

/// Lignes de texte d'un wallet (ligne principale + une par token)
///
/// CONCEPT RUST : 'static
/// - Les Spans possèdent leurs String (pas d'emprunt de la vue)
/// - Le ListItem peut vivre indépendamment de la vue
pub fn row_lines(view: &WalletRowView, name_width: usize) -> Vec<Line<'static>> {
    let fiat_style = match view.fiat {
        FiatCell::Amount(_) => Style::default().fg(Color::Green),
        FiatCell::Unavailable | FiatCell::Hidden => Style::default().fg(Color::DarkGray),
    };

    let mut lines = Vec::with_capacity(1 + view.tokens.len());
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {:<width$}", view.name, width = name_width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {:>width$}", view.crypto_text(), width = CRYPTO_WIDTH),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {:>width$}", view.fiat.text(), width = FIAT_WIDTH),
            fiat_style,
        ),
    ]));

    // Sous-lignes des tokens activés
    for token in &view.tokens {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    └ {:<width$}", token.currency_code, width = name_width.saturating_sub(5)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!(" {:>width$}", token.amount_text(), width = CRYPTO_WIDTH),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    lines
}

/// ListItem d'une ligne, mis en évidence si sélectionné
pub fn row_list_item(view: &WalletRowView, selected: bool, name_width: usize) -> ListItem<'static> {
    let item = ListItem::new(row_lines(view, name_width));
    if selected {
        item.style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED), // Inverse les couleurs
        )
    } else {
        item
    }
}

// ============================================================================
// Tests
// ============================================================================
