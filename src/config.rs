// ============================================================================
// Structure : Config
// ============================================================================
// Configuration optionnelle de l'application, chargée depuis un fichier JSON
//
// Tout a une valeur par défaut : sans fichier de config, l'application
// fonctionne telle quelle. Le fichier permet de pointer vers un autre
// serveur de graphiques ou un autre fichier de symboles.
//
// CONCEPTS RUST :
// 1. #[serde(default)] : chaque champ absent du JSON prend sa valeur défaut
// 2. Deserialize : le JSON est parsé directement dans la struct
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// URL de base du serveur d'images de graphiques
///
/// La query string (q, p, i) est concaténée directement derrière,
/// d'où le '?' final.
pub const DEFAULT_BASE_URL: &str = "https://finance.google.com/finance/getchart?";

/// Configuration de l'application
///
/// Fichier : <config_dir>/lazycharts/config.json, ex sous Linux :
/// ~/.config/lazycharts/config.json
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL de base du serveur de graphiques
    pub base_url: String,

    /// Chemin du fichier de symboles (None : emplacement par défaut)
    pub symbols_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            symbols_file: None,
        }
    }
}

impl Config {
    /// Charge la configuration depuis l'emplacement par défaut
    ///
    /// Fichier absent -> Config::default() (cas normal, pas une erreur).
    /// Fichier présent mais JSON invalide -> erreur avec contexte : mieux
    /// vaut échouer clairement que démarrer avec une config à moitié lue.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Charge la configuration depuis un chemin explicite
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Échec de la lecture de {}", path.display()));
            }
        };

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("JSON invalide dans {}", path.display()))?;

        info!(base_url = %config.base_url, "Config loaded");
        Ok(config)
    }

    /// Chemin du fichier de configuration sur cette plateforme
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lazycharts").join("config.json"))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "lazycharts-config-{}-{}.json",
            std::process::id(),
            test_name
        ))
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.symbols_file.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(temp_path("missing")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "base_url": "http://localhost:8080/chart?" }"#).unwrap();

        let config = Config::load_from(path.clone()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/chart?");
        assert!(config.symbols_file.is_none());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_from(path.clone()).is_err());

        let _ = fs::remove_file(path);
    }
}
