// ============================================================================
// Détail d'un wallet
// ============================================================================
// Écran ouvert par l'appui sur une ligne : affiche le wallet choisi
// (identifiant, devise, solde natif, tokens) et la ligne telle qu'affichée.
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Dessine le détail du wallet sélectionné
pub fn render_wallet_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🔎 Wallet ")
        .title_alignment(Alignment::Center);

    let Some(wallet) = app.selected_wallet_details() else {
        let paragraph = Paragraph::new("Aucun wallet sélectionné").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let row = app.rows.iter().find(|row| row.wallet_id == wallet.id);

    let mut lines = vec![
        Line::from(vec![Span::styled("Nom       ", label), Span::raw(wallet.name.clone())]),
        Line::from(vec![Span::styled("Id        ", label), Span::raw(wallet.id.clone())]),
        Line::from(vec![Span::styled("Devise    ", label), Span::raw(wallet.currency_code.clone())]),
        Line::from(vec![
            Span::styled("Natif     ", label),
            Span::raw(wallet.primary_native_balance.clone()),
        ]),
    ];

    if let Some(row) = row {
        lines.push(Line::from(vec![
            Span::styled("Solde     ", label),
            Span::styled(row.crypto_text(), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Fiat      ", label),
            Span::styled(row.fiat.text().to_string(), Style::default().fg(Color::Green)),
        ]));

        if !row.tokens.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Tokens", label)));
            for token in &row.tokens {
                lines.push(Line::from(format!("  {:<8} {}", token.currency_code, token.amount_text())));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Esc / Space]", label),
        Span::raw(" Retour à la liste"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
