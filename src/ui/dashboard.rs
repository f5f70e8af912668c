// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// Le rendu consomme le Snapshot de l'App : à chaque frame, tout est
// redessiné depuis zéro (immediate mode). Les entrées de graphiques
// précédentes sont donc toujours "effacées" par construction.
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
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Pattern matching sur app.current_screen
/// - Le compilateur garantit l'exhaustivité (tous les cas gérés)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Dashboard => {
            render_dashboard(frame, app, false);
        }
        Screen::InputMode => {
            // Dashboard en arrière-plan, ligne de saisie dans le footer
            render_dashboard(frame, app, true);
        }
    }
}

/// Dessine le dashboard : header, liste + graphiques, footer
fn render_dashboard(frame: &mut Frame, app: &App, input_mode: bool) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    // Zone centrale coupée en deux : liste des symboles | panneau graphiques
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Liste des symboles
            Constraint::Percentage(70), // Panneau des graphiques
        ])
        .split(chunks[1]);

    render_symbol_list(frame, app, columns[0]);
    render_charts_panel(frame, app, columns[1]);

    if input_mode {
        render_input_footer(frame, app, chunks[2]);
    } else {
        render_footer(frame, app, chunks[2]);
    }
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
// Header : Titre et intervalle courant
// ============================================================================

/// Dessine le header avec le titre et l'intervalle courant
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyCharts ")
        .title_alignment(Alignment::Center);

    let text = vec![Line::from(vec![
        Span::styled(
            "📈 Intervalle : ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.snapshot().interval_label,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("[h]", Style::default().fg(Color::Yellow)),
        Span::raw(" ◀  ▶ "),
        Span::styled("[l]", Style::default().fg(Color::Yellow)),
    ])];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Liste des symboles (sélectionnable)
// ============================================================================

/// Dessine la liste des symboles suivis
///
/// CONCEPT RATATUI : List widget
/// - REVERSED + BOLD sur l'item sélectionné
fn render_symbol_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Symboles ");

    let snapshot = app.snapshot();

    if snapshot.symbols.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucun symbole suivi",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                "[a] pour en ajouter",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = snapshot
        .symbols
        .iter()
        .enumerate()
        .map(|(index, symbol)| {
            let mut style = Style::default().fg(Color::White);
            if index == app.selected_index {
                style = style
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED); // Inverse les couleurs
            }
            ListItem::new(format!(" {}", symbol)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

// ============================================================================
// Panneau des graphiques
// ============================================================================

/// Dessine le panneau des graphiques
///
/// Pour chaque symbole, dans l'ordre de la liste : le locator de l'image
/// de graphique puis le label "<SYMBOLE> - <intervalle>". Le décodage de
/// l'image elle-même est hors périmètre : le locator est l'artefact rendu.
fn render_charts_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 📊 Graphiques ");

    let snapshot = app.snapshot();
    let mut lines: Vec<Line> = Vec::new();

    for symbol in &snapshot.symbols {
        // Le locator existe pour chaque symbole suivi (invariant du registre)
        let locator = snapshot
            .locators
            .get(symbol)
            .map(String::as_str)
            .unwrap_or("<locator manquant>");

        lines.push(Line::from(Span::styled(
            format!(" {}", locator),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {} - {}", symbol, snapshot.interval_label),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_delete_confirmation() {
        // Message de confirmation de suppression
        let symbol_name = app
            .selected_symbol()
            .map(|s| s.as_str())
            .unwrap_or("?");

        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[d]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                format!(" à nouveau pour supprimer {} ou autre touche pour annuler ⚠", symbol_name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Naviguer  "),
            Span::styled("[h l]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Intervalle  "),
            Span::styled("[a]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Ajouter  "),
            Span::styled("[d]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Supprimer"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le footer en mode input avec la ligne de saisie
///
/// CONCEPT : Modal input (Vim-like)
/// - ESC annule, Enter valide
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert : mode input

    let input_line = Line::from(vec![
        Span::styled(
            &app.input_prompt,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let help_line = Line::from(vec![
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Valider  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Annuler"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
