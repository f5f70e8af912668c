// ============================================================================
// LazyCharts - Watchlist de graphiques boursiers
// ============================================================================
// Programme TUI qui suit une liste de symboles boursiers, persiste la liste
// entre les sessions, et dérive pour chaque symbole l'URL de son image de
// graphique selon l'intervalle de temps sélectionné.
//
// Tout est synchrone et mono-thread : chaque action utilisateur (ajout,
// suppression, changement d'intervalle) s'exécute jusqu'au bout dans la
// boucle d'événements, y compris l'écriture de la persistance.
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazycharts::app::App;
use lazycharts::config::Config;
use lazycharts::store::SymbolStore;
use lazycharts::ui::{events::EventHandler, render};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux/WSL : ~/.local/share/lazycharts/logs/lazycharts.log
/// - macOS : ~/Library/Application Support/lazycharts/logs/lazycharts.log
/// - Windows : C:\Users\<user>\AppData\Roaming\lazycharts\logs\lazycharts.log
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazycharts/logs/lazycharts.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazycharts=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Répertoire de logs sous le répertoire de données de la plateforme,
    // repli sur ./logs si la plateforme n'en expose pas
    let log_dir = dirs::data_dir()
        .map(|dir| dir.join("lazycharts").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Rotation quotidienne : évite que les logs deviennent trop gros
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazycharts.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: lazycharts::registry)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(
            // Filtre par niveau via RUST_LOG
            // Par défaut : debug pour lazycharts, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazycharts=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Logging d'abord : si init échoue, on affiche l'erreur et continue
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyCharts starting up");

    // Configuration (fichier optionnel, valeurs par défaut sinon)
    let config = Config::load()?;

    // Store de persistance : chemin de la config ou emplacement par défaut
    let store = match &config.symbols_file {
        Some(path) => SymbolStore::new(path.clone()),
        None => SymbolStore::default_location()?,
    };

    // Charge la liste de symboles persistée
    // Un fichier absent donne une liste vide : premier lancement normal
    let symbols = store.load()?;
    info!(count = symbols.len(), "Watchlist loaded from store");

    // Crée l'état de l'application : le registre dérive immédiatement
    // les locators pour l'intervalle initial
    let mut app = App::new(config, store, symbols)?;

    // Setup du terminal en mode TUI
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // Exécute l'event loop
    info!("Starting event loop");
    let events = EventHandler::new();
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Event Loop Pattern
// - Loop infinie : while app.is_running()
// - À chaque itération : render, puis input
// - Chaque action s'exécute entièrement avant le rendu suivant
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // ========================================
        // 1. RENDER : Dessine l'interface
        // ========================================
        terminal.draw(|frame| render(frame, app))?;

        // ========================================
        // 2. INPUT : Traite le prochain événement
        // ========================================
        let event = events.next()?;
        handle_event(app, event)?;
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT RUST : Pattern matching avec guards
// - Guard clauses (if) pour filtrer les événements selon l'écran actuel
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: lazycharts::ui::events::Event) -> Result<()> {
    use lazycharts::ui::events::{
        get_char_from_event, is_add_event, is_backspace_event, is_delete_event, is_down_event,
        is_enter_event, is_escape_event, is_next_interval_event, is_previous_interval_event,
        is_quit_event, is_symbol_char_event, is_up_event, Event,
    };

    match event {
        // ========================================
        // Input Mode : la saisie capture tout d'abord
        // ========================================

        // ESC : annuler le mode input
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled input");
            app.cancel_input();
        }

        // Enter : valider et ajouter le lot de symboles
        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            let raw_input = app.submit_input();
            if raw_input.trim().is_empty() {
                debug!("Empty input, nothing to add");
            } else {
                info!(input = %raw_input, "User submitted symbols");
                app.add_symbols(&raw_input)?;
            }
        }

        // Backspace : supprimer le dernier caractère
        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        // Caractères : ajouter au buffer ('q', 'a', etc. inclus)
        Event::Key(_) if is_symbol_char_event(&event) && app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Dashboard
        // ========================================

        // 'q' : quit confirmation two-step
        Event::Key(_) if is_quit_event(&event) && app.is_on_dashboard() => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // 'd' : supprimer le symbole sélectionné (two-step)
        Event::Key(_) if is_delete_event(&event) && app.is_on_dashboard() => {
            if !app.is_empty() {
                if app.is_awaiting_delete_confirmation() {
                    info!("User confirmed delete");
                    app.delete_selected()?;
                } else {
                    info!("User requested delete (awaiting confirmation)");
                    app.request_delete();
                }
            }
        }

        // 'a' : saisir un lot de symboles
        Event::Key(_) if is_add_event(&event) && app.is_on_dashboard() => {
            info!("User requested add symbols");
            app.start_input("Symboles (séparés par des virgules) : ".to_string());
        }

        // Navigation dans la liste
        Event::Key(_) if is_up_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit(); // Annule les confirmations si actives
            app.cancel_delete();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.navigate_down();
        }

        // 'l' / → : intervalle suivant
        Event::Key(_) if is_next_interval_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.shift_interval(1)?;
        }

        // 'h' / ← : intervalle précédent
        Event::Key(_) if is_previous_interval_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.shift_interval(-1)?;
        }

        Event::Tick => {
            // Tick régulier : rien à faire
        }

        Event::Key(_) => {
            // Toute autre touche : annule les confirmations si actives
            app.cancel_quit();
            app.cancel_delete();
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT RUST : Terminal raw mode
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : écran secondaire (ne pollue pas l'historique)
//
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même en cas d'erreur, pour ne pas laisser le
/// terminal cassé.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
