// ============================================================================
// Liste des wallets - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::wallet_detail;
use crate::ui::wallet_row::{name_column_width, row_list_item};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit l'exhaustivité (tous les cas gérés)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::WalletList => render_wallet_list(frame, app),
        Screen::WalletDetail => wallet_detail::render_wallet_detail(frame, app, frame.size()),
    }
}

/// Dessine la liste des wallets
fn render_wallet_list(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_rows(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec() // Convertit Rc<[Rect]> en Vec<Rect>
}

// ============================================================================
// Header : titre et fraîcheur des taux
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" WalletList ")
        .title_alignment(Alignment::Center);

    let rates_info = if app.is_loading_data() {
        app.loading_message
            .clone()
            .unwrap_or_else(|| "Chargement des taux...".to_string())
    } else {
        match app.state.rates.updated_at {
            Some(updated_at) => format!(
                "Taux {} mis à jour à {}",
                app.state.settings.fiat_code(),
                updated_at.format("%H:%M:%S UTC")
            ),
            None if app.state.rates.is_empty() => "Aucun taux de change".to_string(),
            None => format!("Taux {} du portfolio", app.state.settings.fiat_code()),
        }
    };

    let text = vec![Line::from(vec![
        Span::styled(
            format!("{} wallet(s)", app.rows.len()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ·  "),
        Span::styled(rates_info, Style::default().fg(Color::Gray)),
    ])];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : lignes de wallets
// ============================================================================

/// Dessine les lignes
///
/// CONCEPT RATATUI : StatefulWidget
/// - ListState garde la sélection pour faire défiler la liste
/// - Les lignes font plusieurs hauteurs (tokens), le scroll suit la sélection
fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 💼 Wallets ");

    if app.rows.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucun wallet affichable",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = name_column_width(&app.rows);
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| row_list_item(row, index == app.selected_index, name_width))
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

// ============================================================================
// Footer : raccourcis, confirmations, erreurs
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key_style),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                key_style,
            ),
        ])
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            format!("⚠ {}", status),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key_style),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Select  "),
            Span::styled("[u]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Unit  "),
            Span::styled("[f]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Fiat  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Rates"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Denomination, Wallet};
    use crate::row::WalletRowComponent;
    use crate::state::StateSnapshot;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn app() -> App {
        let wallets = vec![Wallet::new("w-btc", "BTC", "Mon Bitcoin", "150000000")
            .with_denomination("BTC", Denomination::new("BTC", "100000000", Some("B")))];
        App::new(wallets, StateSnapshot::default(), Box::new(WalletRowComponent::default())).unwrap()
    }

    #[test]
    fn test_render_list_screen() {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        let app = app();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Mon Bitcoin"));
        assert!(text.contains("1.5 B"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_render_detail_screen() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut app = app();
        app.press_selected();

        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("w-btc"));
    }
}
