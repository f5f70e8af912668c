// ============================================================================
// Structure : SymbolStore
// ============================================================================
// Persistance de la liste des symboles suivis dans un fichier texte unique
//
// Format : la liste jointe par des virgules ("AAPL,GOOG,MSFT"), c'est tout.
// Un fichier absent est l'état initial normal (premier lancement), jamais
// une erreur de démarrage.
//
// CONCEPTS RUST :
// 1. PathBuf : chemin owned, construit une fois à la création du store
// 2. anyhow::Context : enrichit les erreurs I/O avec le chemin concerné
// 3. std::io::ErrorKind::NotFound : distinguer "absent" de "cassé"
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::Symbol;

/// Nom du fichier de persistance sous le répertoire de données
const SYMBOLS_FILE: &str = "symbols.txt";

/// Adaptateur de persistance pour la liste de symboles
///
/// Limitation documentée : pas d'échappement des virgules. Un symbole
/// contenant une virgule corromprait l'aller-retour — la normalisation
/// des Symbol et le filtre de saisie rendent ce cas inatteignable via l'UI.
#[derive(Debug, Clone)]
pub struct SymbolStore {
    path: PathBuf,
}

impl SymbolStore {
    /// Crée un store sur un chemin explicite (tests, override de config)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Crée un store sur l'emplacement par défaut de la plateforme
    ///
    /// - Linux/WSL : ~/.local/share/lazycharts/symbols.txt
    /// - macOS : ~/Library/Application Support/lazycharts/symbols.txt
    /// - Windows : C:\Users\<user>\AppData\Roaming\lazycharts\symbols.txt
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("Impossible de déterminer le répertoire de données")?
            .join("lazycharts");
        Ok(Self::new(dir.join(SYMBOLS_FILE)))
    }

    /// Chemin du fichier de persistance
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Écrit la liste de symboles, jointe par des virgules
    ///
    /// CONCEPT RUST : Itérer sans collect intermédiaire inutile
    /// - map + collect::<Vec<_>>() + join : simple et lisible,
    ///   la liste est petite (une watchlist, pas un carnet d'ordres)
    pub fn save(&self, symbols: &[Symbol]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Échec de la création du répertoire {}", parent.display())
            })?;
        }

        let joined = symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");

        fs::write(&self.path, joined)
            .with_context(|| format!("Échec de l'écriture de {}", self.path.display()))?;

        debug!(count = symbols.len(), path = %self.path.display(), "Symbols persisted");
        Ok(())
    }

    /// Charge la liste de symboles persistée
    ///
    /// Fichier absent -> liste vide (premier lancement). Les tokens sont
    /// repassés par Symbol::parse : un fichier édité à la main avec des
    /// minuscules ou des espaces est re-normalisé au chargement.
    pub fn load(&self) -> Result<Vec<Symbol>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No persisted symbols (first run)");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Échec de la lecture de {}", self.path.display())
                });
            }
        };

        let symbols: Vec<Symbol> = contents.split(',').filter_map(Symbol::parse).collect();
        info!(count = symbols.len(), "Loaded persisted symbols");
        Ok(symbols)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Store jetable dans le répertoire temporaire du système
    ///
    /// Un nom unique par test évite les collisions entre tests parallèles.
    fn temp_store(test_name: &str) -> SymbolStore {
        let path = std::env::temp_dir()
            .join(format!("lazycharts-test-{}-{}", std::process::id(), test_name))
            .join("symbols.txt");
        // Nettoie un éventuel reste d'une exécution précédente
        let _ = fs::remove_file(&path);
        SymbolStore::new(path)
    }

    fn symbol(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store("round-trip");
        let symbols = vec![symbol("AAPL"), symbol("GOOG")];

        store.save(&symbols).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, symbols);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = temp_store("missing");
        let loaded = store.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let store = temp_store("overwrite");
        store.save(&[symbol("AAPL"), symbol("GOOG")]).unwrap();
        store.save(&[symbol("MSFT")]).unwrap();

        assert_eq!(store.load().unwrap(), vec![symbol("MSFT")]);
    }

    #[test]
    fn test_save_empty_list() {
        let store = temp_store("empty");
        store.save(&[]).unwrap();

        // Fichier présent mais vide : liste vide, pas de symbole vide
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_renormalizes_hand_edited_file() {
        let store = temp_store("hand-edited");
        if let Some(parent) = store.path().parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(store.path(), " aapl , GOOG ,").unwrap();

        assert_eq!(store.load().unwrap(), vec![symbol("AAPL"), symbol("GOOG")]);
    }
}
