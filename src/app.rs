// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// C'est l'unique contrôleur : il possède le Registry (seule autorité de
// mutation), le sélecteur d'intervalle et le store de persistance. Aucune
// globale : tout l'état vit ici et circule par référence.
//
// PATTERN : "mutate, then notify"
// - Chaque opération mutante met l'état à jour, persiste si nécessaire,
//   puis rafraîchit un Snapshot immutable
// - Le rendu consomme le Snapshot, jamais l'état mutable directement
// ============================================================================

use anyhow::Result;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{IntervalSelector, Symbol};
use crate::registry::{Registry, Snapshot};
use crate::store::SymbolStore;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Représente les différents écrans de l'application
// - Un seul écran actif à la fois, exhaustivité vérifiée par le compilateur
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : liste des symboles + panneau des graphiques
    Dashboard,

    /// Mode saisie : capture une liste de symboles séparés par des virgules
    /// - Enter valide, ESC annule
    InputMode,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Index du symbole sélectionné dans la liste
    pub selected_index: usize,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// Two-step quit : 'q' puis 'q' à nouveau, toute autre touche annule
    pub confirm_quit: bool,

    /// Indique si l'utilisateur a demandé une suppression (attend confirmation)
    pub confirm_delete: bool,

    /// Buffer de saisie pour le mode Input
    pub input_buffer: String,

    /// Prompt affiché en mode Input
    pub input_prompt: String,

    /// Registre des symboles suivis (seule autorité de mutation)
    registry: Registry,

    /// Curseur sur le catalogue d'intervalles (jamais persisté)
    intervals: IntervalSelector,

    /// Persistance de la liste de symboles
    store: SymbolStore,

    /// Configuration (URL de base du serveur de graphiques)
    config: Config,

    /// Dernière photographie de l'état, consommée par le rendu
    snapshot: Snapshot,
}

impl App {
    /// Crée l'application depuis la liste de symboles persistée
    ///
    /// Le sélecteur d'intervalle repart toujours sur la première entrée du
    /// catalogue : seul le TrackedSet survit d'une session à l'autre.
    pub fn new(config: Config, store: SymbolStore, symbols: Vec<Symbol>) -> Result<Self> {
        let mut registry = Registry::from_symbols(symbols);
        let intervals = IntervalSelector::new();
        registry.rebuild_locators(&config.base_url, intervals.current())?;
        let snapshot = registry.snapshot(intervals.label());

        Ok(Self {
            running: true,
            current_screen: Screen::Dashboard,
            selected_index: 0,
            confirm_quit: false,
            confirm_delete: false,
            input_buffer: String::new(),
            input_prompt: String::new(),
            registry,
            intervals,
            store,
            config,
            snapshot,
        })
    }

    /// Dernière photographie de l'état (symboles, locators, label d'intervalle)
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Rafraîchit le Snapshot après une mutation
    fn refresh_snapshot(&mut self) {
        self.snapshot = self.registry.snapshot(self.intervals.label());
    }

    // ========================================================================
    // Opérations mutantes : add / delete / shift interval
    // ========================================================================

    /// Ajoute une saisie brute de symboles ("AAPL, goog ,MSFT")
    ///
    /// Séquence complète : mutation du registre, reconstruction de la
    /// LocatorMap, écriture de la persistance, nouveau Snapshot.
    pub fn add_symbols(&mut self, raw_input: &str) -> Result<()> {
        let added = self.registry.add_symbols(raw_input);
        info!(added, input = raw_input, "Add symbols");

        self.registry
            .rebuild_locators(&self.config.base_url, self.intervals.current())?;
        self.store.save(self.registry.symbols())?;
        self.refresh_snapshot();
        Ok(())
    }

    /// Supprime le symbole sélectionné
    ///
    /// La suppression préserve l'ordre (pas de retri) et retire l'entrée
    /// correspondante de la LocatorMap : pas de rebuild nécessaire.
    /// Liste vide ou index hors liste : no-op.
    pub fn delete_selected(&mut self) -> Result<()> {
        let Some(symbol) = self.selected_symbol().cloned() else {
            self.confirm_delete = false;
            return Ok(());
        };

        self.registry.delete(&symbol);

        // Ajuste l'index si on a supprimé le dernier élément
        if self.selected_index >= self.registry.len() && self.selected_index > 0 {
            self.selected_index -= 1;
        }
        self.confirm_delete = false;

        self.store.save(self.registry.symbols())?;
        self.refresh_snapshot();
        Ok(())
    }

    /// Décale l'intervalle courant (+1 : suivant, -1 : précédent)
    ///
    /// Changement purement en mémoire : la LocatorMap est reconstruite mais
    /// rien n'est persisté (elle se re-dérive du TrackedSet au prochain
    /// lancement).
    pub fn shift_interval(&mut self, delta: i64) -> Result<()> {
        self.intervals.advance(delta);
        info!(interval = self.intervals.label(), "Interval changed");

        self.registry
            .rebuild_locators(&self.config.base_url, self.intervals.current())?;
        self.refresh_snapshot();
        Ok(())
    }

    // ========================================================================
    // Sélection et navigation
    // ========================================================================

    /// Retourne le symbole sélectionné
    pub fn selected_symbol(&self) -> Option<&Symbol> {
        self.registry.symbols().get(self.selected_index)
    }

    /// Navigue vers le haut dans la liste
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : soustrait mais ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans la liste
    pub fn navigate_down(&mut self) {
        let max_index = self.registry.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Vérifie si la liste de symboles est vide
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    // ========================================================================
    // Cycle de vie et écrans
    // ========================================================================

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Vérifie si on est sur le dashboard
    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    /// Vérifie si on est en mode input
    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    // ========================================================================
    // Quit / Delete Confirmation (two-step, style Vim)
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

    /// Demande la confirmation de suppression
    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    /// Annule la demande de suppression
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Vérifie si on attend la confirmation de suppression
    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode input avec un prompt donné
    pub fn start_input(&mut self, prompt: String) {
        self.current_screen = Screen::InputMode;
        self.input_buffer.clear();
        self.input_prompt = prompt;
    }

    /// Annule le mode input et retourne au dashboard
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Récupère la valeur saisie et retourne au dashboard
    pub fn submit_input(&mut self) -> String {
        let value = self.input_buffer.clone();
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        self.input_prompt.clear();
        debug!(input = %value, "Input submitted");
        value
    }

    /// Ajoute un caractère au buffer d'input
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du buffer
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// App de test sur un store jetable
    fn test_app(test_name: &str, symbols: &[&str]) -> App {
        let path = std::env::temp_dir()
            .join(format!("lazycharts-app-{}-{}", std::process::id(), test_name))
            .join("symbols.txt");
        let _ = std::fs::remove_file(&path);

        let symbols = symbols
            .iter()
            .filter_map(|s| Symbol::parse(s))
            .collect();
        App::new(Config::default(), SymbolStore::new(path), symbols).unwrap()
    }

    #[test]
    fn test_app_creation() {
        let app = test_app("creation", &[]);
        assert!(app.is_running());
        assert!(app.is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.snapshot().interval_label, "1d");
    }

    #[test]
    fn test_app_quit_two_step() {
        let mut app = test_app("quit", &[]);

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = test_app("navigation", &["AAPL", "GOOG", "MSFT"]);

        assert_eq!(app.selected_index, 0);
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        // Au max : reste à 2
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_updates_snapshot_and_store() {
        let mut app = test_app("add", &[]);
        app.add_symbols("msft, aapl").unwrap();

        let snapshot = app.snapshot();
        let labels: Vec<&str> = snapshot.symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(labels, vec!["AAPL", "MSFT"]);

        // La LocatorMap couvre exactement le TrackedSet
        assert_eq!(snapshot.locators.len(), 2);
        assert!(snapshot.locators[&Symbol::parse("AAPL").unwrap()]
            .ends_with("q=AAPL&p=1d&i=300"));
    }

    #[test]
    fn test_delete_selected_adjusts_index() {
        let mut app = test_app("delete", &["AAPL", "GOOG"]);
        app.navigate_down(); // sélectionne GOOG (dernier)

        app.delete_selected().unwrap();
        assert_eq!(app.selected_index, 0);

        let labels: Vec<&str> = app.snapshot().symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(labels, vec!["AAPL"]);
    }

    #[test]
    fn test_delete_on_empty_list_is_noop() {
        let mut app = test_app("delete-empty", &[]);
        app.request_delete();
        app.delete_selected().unwrap();
        assert!(!app.is_awaiting_delete_confirmation());
        assert!(app.is_empty());
    }

    #[test]
    fn test_shift_interval_rebuilds_locators() {
        let mut app = test_app("shift", &["AAPL"]);

        app.shift_interval(1).unwrap();
        let snapshot = app.snapshot();
        assert_eq!(snapshot.interval_label, "5d");
        assert!(snapshot.locators[&Symbol::parse("AAPL").unwrap()]
            .ends_with("q=AAPL&p=5d&i=1000"));
    }

    #[test]
    fn test_shift_interval_wraps_backward() {
        let mut app = test_app("wrap", &[]);
        app.shift_interval(-1).unwrap();
        assert_eq!(app.snapshot().interval_label, "1000Y");
    }

    #[test]
    fn test_input_mode_lifecycle() {
        let mut app = test_app("input", &[]);

        app.start_input("Add symbols: ".to_string());
        assert!(app.is_in_input_mode());

        app.append_char('a');
        app.append_char('b');
        app.backspace();
        assert_eq!(app.input_buffer, "a");

        let value = app.submit_input();
        assert_eq!(value, "a");
        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_cancel_input_discards_buffer() {
        let mut app = test_app("cancel-input", &[]);
        app.start_input("Add symbols: ".to_string());
        app.append_char('x');

        app.cancel_input();
        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }
}
