// ============================================================================
// Structure : Symbol
// ============================================================================
// Représente un symbole boursier normalisé (ticker)
//
// CONCEPTS RUST :
// 1. Newtype pattern : Symbol(String) au lieu d'une String nue
//    - Impossible de stocker un symbole non normalisé par construction
//    - Le type système documente l'invariant
// 2. Ord/PartialOrd dérivés : l'ordre lexicographique de la String interne
//    - Permet le tri de la watchlist et les clés de BTreeMap
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbole boursier normalisé : trimé, en majuscules, jamais vide
///
/// CONCEPT RUST : Invariant par construction
/// - Le seul constructeur public est `parse()`, qui normalise
/// - Deux Symbol sont égaux ssi leurs formes normalisées sont égales
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Normalise une saisie brute en Symbol
    ///
    /// Règles (identiques à la saisie utilisateur) :
    /// - espaces de début/fin supprimés
    /// - conversion en majuscules
    /// - un token vide après trim est rejeté : None
    ///
    /// Note : un token vide (ex: "AAPL,,GOOG" donne un token "") est
    /// explicitement rejeté ici, jamais stocké comme symbole vide.
    ///
    /// CONCEPT RUST : Option<T> comme validation
    /// - Some(symbol) : entrée exploitable
    /// - None : rien à stocker (pas une erreur, juste rien)
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Retourne le symbole sous forme de &str
    ///
    /// CONCEPT RUST : Deref-like accessor
    /// - On ne dérive pas Deref pour garder l'API explicite
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// CONCEPT RUST : Display vs Debug
/// - Display : affichage utilisateur ("AAPL")
/// - Debug : affichage développeur (Symbol("AAPL"))
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
