// ============================================================================
// Locator Builder : construction des URLs de graphiques
// ============================================================================
// Fonction pure qui assemble l'URL d'une image de graphique à partir du
// symbole, de la période et de la résolution
//
// CONCEPTS RUST :
// 1. Fonction pure : pas d'état, pas d'effet de bord, déterministe
// 2. Erreur typée : un enum qui implémente std::error::Error
// 3. Slice en paramètre : contrat d'arité vérifiable à l'exécution
// ============================================================================

use std::fmt;

use crate::models::{ChartInterval, Symbol};

/// Clés de la query string, dans l'ordre imposé par le serveur de graphiques
///
/// - q : symbole
/// - p : période affichée
/// - i : résolution d'échantillonnage
const QUERY_KEYS: [&str; 3] = ["q", "p", "i"];

// ============================================================================
// Erreur : LocatorError
// ============================================================================
// CONCEPT RUST : Erreur typée vs anyhow
// - anyhow est parfait pour les frontières applicatives (main, I/O)
// - Ici le test/appelant doit pouvoir matcher sur le genre d'erreur,
//   donc on définit un enum dédié
// ============================================================================

/// Erreurs du Locator Builder
///
/// Une seule variante : violation du contrat d'arité. Ce n'est pas une
/// condition utilisateur, c'est un bug de l'appelant, et elle remonte telle
/// quelle (fatale pour l'opération, pas pour le processus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorError {
    /// Le builder n'a pas reçu exactement trois valeurs (q, p, i)
    InvalidArity { expected: usize, got: usize },
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::InvalidArity { expected, got } => write!(
                f,
                "locator builder attend exactement {} valeurs, reçu {}",
                expected, got
            ),
        }
    }
}

impl std::error::Error for LocatorError {}

// ============================================================================
// Construction de l'URL
// ============================================================================

/// Assemble l'URL d'une image de graphique
///
/// Format produit : `<base_url>q=<SYM>&p=<PERIODE>&i=<RESOLUTION>`
/// L'ordre des clés est fixe (q, p, i), le `&` sépare à partir de la 2e paire.
///
/// `params` porte les trois valeurs dans l'ordre (symbole, période,
/// résolution). Toute autre longueur est une `InvalidArity` : garde-fou
/// contre un appel partiel accidentel.
///
/// Limitation documentée : aucun échappement n'est appliqué. Un symbole
/// contenant un caractère réservé d'URL produit un locator malformé.
///
/// CONCEPT RUST : &[&str]
/// - Une slice de &str : l'appelant garde la propriété de ses strings
/// - La longueur est une donnée runtime, donc le contrat est testable
pub fn build_locator(base_url: &str, params: &[&str]) -> Result<String, LocatorError> {
    if params.len() != QUERY_KEYS.len() {
        return Err(LocatorError::InvalidArity {
            expected: QUERY_KEYS.len(),
            got: params.len(),
        });
    }

    let mut url = String::from(base_url);
    for (i, (key, value)) in QUERY_KEYS.iter().zip(params).enumerate() {
        if i > 0 {
            url.push('&');
        }
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }

    Ok(url)
}

/// Variante typée : construit le locator d'un symbole pour un intervalle donné
///
/// CONCEPT RUST : API en couches
/// - build_locator() : la primitive à arité vérifiée
/// - chart_locator() : l'enrobage typé que le registre utilise,
///   qui ne peut pas se tromper d'arité mais propage quand même l'erreur
pub fn chart_locator(
    base_url: &str,
    symbol: &Symbol,
    interval: ChartInterval,
) -> Result<String, LocatorError> {
    build_locator(base_url, &[symbol.as_str(), interval.label, interval.resolution])
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATALOG;

    const BASE: &str = "https://finance.google.com/finance/getchart?";

    #[test]
    fn test_build_locator_field_order() {
        let url = build_locator(BASE, &["AAPL", "1d", "300"]).unwrap();
        assert_eq!(
            url,
            "https://finance.google.com/finance/getchart?q=AAPL&p=1d&i=300"
        );
    }

    #[test]
    fn test_build_locator_two_params_is_invalid_arity() {
        // Propriété : un appel partiel doit échouer, pas produire une URL
        let result = build_locator(BASE, &["AAPL", "1d"]);
        assert_eq!(
            result,
            Err(LocatorError::InvalidArity { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_build_locator_four_params_is_invalid_arity() {
        let result = build_locator(BASE, &["AAPL", "1d", "300", "extra"]);
        assert_eq!(
            result,
            Err(LocatorError::InvalidArity { expected: 3, got: 4 })
        );
    }

    #[test]
    fn test_chart_locator_uses_catalog_entry() {
        let symbol = Symbol::parse("GOOG").unwrap();
        let url = chart_locator(BASE, &symbol, CATALOG[1]).unwrap();
        assert_eq!(
            url,
            "https://finance.google.com/finance/getchart?q=GOOG&p=5d&i=1000"
        );
    }

    #[test]
    fn test_no_escaping_is_performed() {
        // Limitation documentée : les caractères réservés passent tels quels
        let url = build_locator(BASE, &["A&B", "1d", "300"]).unwrap();
        assert!(url.contains("q=A&B"));
    }

    #[test]
    fn test_error_display() {
        let err = LocatorError::InvalidArity { expected: 3, got: 2 };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }
}
