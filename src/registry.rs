// ============================================================================
// Structure : Registry
// ============================================================================
// Le registre des symboles suivis : la seule autorité de mutation de l'état
//
// Possède deux choses, toujours cohérentes entre elles :
// - la liste ordonnée des symboles suivis (triée, sans doublon)
// - la projection dérivée symbole -> URL de graphique (LocatorMap)
//
// CONCEPTS RUST :
// 1. Single-writer : toutes les mutations passent par &mut self
// 2. BTreeMap : itération triée par clé, alignée sur la liste triée
// 3. "Mutate, then notify" : les mutations ne dessinent rien, le rendu
//    consomme un Snapshot immutable produit après coup
// ============================================================================

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::locator::{chart_locator, LocatorError};
use crate::models::{ChartInterval, Symbol};

/// Registre des symboles suivis et de leurs locators
///
/// Invariants maintenus après chaque opération :
/// - `symbols` est trié lexicographiquement et sans doublon
/// - `locators` contient exactement une entrée par symbole suivi
///   (après un rebuild_locators ; delete retire l'entrée immédiatement)
#[derive(Debug, Default)]
pub struct Registry {
    /// Symboles suivis, triés, uniques
    symbols: Vec<Symbol>,

    /// Projection dérivée symbole -> URL de graphique
    /// Jamais mutée indépendamment : reconstruite à chaque changement
    locators: BTreeMap<Symbol, String>,
}

/// Photographie immutable de l'état, consommée par le rendu
///
/// CONCEPT : Snapshot pattern
/// - Les mutations produisent un Snapshot au lieu d'appeler le rendu inline
/// - Le rendu ne peut pas modifier l'état (il n'a que des clones)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Symboles suivis, dans l'ordre d'affichage
    pub symbols: Vec<Symbol>,

    /// Locator de chaque symbole
    pub locators: BTreeMap<Symbol, String>,

    /// Label de l'intervalle courant (pour "<SYMBOLE> - <label>")
    pub interval_label: &'static str,
}

impl Registry {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Crée un registre depuis une liste chargée de la persistance
    ///
    /// La liste est dédupliquée et triée ici : au démarrage, l'état en
    /// mémoire repart propre même si le fichier a été édité à la main.
    pub fn from_symbols(mut symbols: Vec<Symbol>) -> Self {
        symbols.sort();
        symbols.dedup();
        Self {
            symbols,
            locators: BTreeMap::new(),
        }
    }

    /// Symboles suivis, dans l'ordre
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Locator d'un symbole, s'il est connu
    pub fn locator(&self, symbol: &Symbol) -> Option<&str> {
        self.locators.get(symbol).map(String::as_str)
    }

    /// Nombre de symboles suivis
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Vérifie si le registre est vide
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Ajoute une saisie brute de symboles séparés par des virgules
    ///
    /// Chaque token est normalisé (trim + majuscules) ; les tokens vides
    /// après trim sont ignorés silencieusement, les symboles déjà suivis
    /// sont sautés. La liste entière est retriée après insertion.
    ///
    /// Retourne le nombre de symboles réellement ajoutés.
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - split(',') : découpe la saisie
    /// - filter_map(Symbol::parse) : normalise et écarte les tokens vides
    pub fn add_symbols(&mut self, raw_input: &str) -> usize {
        let mut added = 0;
        for symbol in raw_input.split(',').filter_map(Symbol::parse) {
            if self.symbols.contains(&symbol) {
                debug!(symbol = %symbol, "Symbol already tracked, skipping");
                continue;
            }
            info!(symbol = %symbol, "Tracking new symbol");
            self.symbols.push(symbol);
            added += 1;
        }

        // Retri complet après chaque ajout : invariant de tri
        self.symbols.sort();
        added
    }

    /// Retire un symbole du registre
    ///
    /// Un symbole absent est un no-op, pas une erreur. La suppression
    /// préserve l'ordre du reste de la liste (pas de retri nécessaire)
    /// et retire immédiatement l'entrée correspondante de la LocatorMap.
    ///
    /// Retourne true si un symbole a effectivement été retiré.
    pub fn delete(&mut self, symbol: &Symbol) -> bool {
        match self.symbols.iter().position(|s| s == symbol) {
            Some(index) => {
                // Vec::remove décale le reste : l'ordre est préservé
                self.symbols.remove(index);
                self.locators.remove(symbol);
                info!(symbol = %symbol, "Symbol removed from registry");
                true
            }
            None => {
                debug!(symbol = %symbol, "Delete requested for unknown symbol (no-op)");
                false
            }
        }
    }

    /// Reconstruit intégralement la LocatorMap pour l'intervalle donné
    ///
    /// Appelé après chaque mutation de la liste et après chaque changement
    /// d'intervalle. La map résultante contient exactement une entrée par
    /// symbole suivi ; toute entrée antérieure est écrasée.
    pub fn rebuild_locators(
        &mut self,
        base_url: &str,
        interval: ChartInterval,
    ) -> Result<(), LocatorError> {
        let mut locators = BTreeMap::new();
        for symbol in &self.symbols {
            let url = chart_locator(base_url, symbol, interval)?;
            locators.insert(symbol.clone(), url);
        }
        self.locators = locators;

        debug!(
            count = self.locators.len(),
            interval = interval.label,
            "Locator map rebuilt"
        );
        Ok(())
    }

    /// Produit une photographie immutable de l'état courant
    pub fn snapshot(&self, interval_label: &'static str) -> Snapshot {
        Snapshot {
            symbols: self.symbols.clone(),
            locators: self.locators.clone(),
            interval_label,
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATALOG;

    const BASE: &str = "https://finance.google.com/finance/getchart?";

    fn symbol(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        // "AAPL" puis " aapl " : une seule entrée après normalisation
        let mut registry = Registry::new();
        registry.add_symbols("AAPL");
        registry.add_symbols(" aapl ");

        assert_eq!(registry.symbols(), &[symbol("AAPL")]);
    }

    #[test]
    fn test_tracked_set_stays_sorted() {
        let mut registry = Registry::new();
        registry.add_symbols("MSFT");
        registry.add_symbols("aapl, goog");
        registry.add_symbols("TSLA");

        let mut expected: Vec<Symbol> = registry.symbols().to_vec();
        expected.sort();
        assert_eq!(registry.symbols(), expected.as_slice());
        assert_eq!(
            registry.symbols(),
            &[symbol("AAPL"), symbol("GOOG"), symbol("MSFT"), symbol("TSLA")]
        );
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        // "AAPL,,GOOG" : le token vide ne devient jamais un symbole
        let mut registry = Registry::new();
        let added = registry.add_symbols("AAPL,,GOOG, ");

        assert_eq!(added, 2);
        assert_eq!(registry.symbols(), &[symbol("AAPL"), symbol("GOOG")]);
    }

    #[test]
    fn test_delete_preserves_order_and_is_total() {
        let mut registry = Registry::new();
        registry.add_symbols("AAPL,GOOG,MSFT");

        // Suppression d'un symbole présent : ordre préservé
        assert!(registry.delete(&symbol("GOOG")));
        assert_eq!(registry.symbols(), &[symbol("AAPL"), symbol("MSFT")]);

        // Suppression d'un symbole absent : no-op, pas une erreur
        assert!(!registry.delete(&symbol("TSLA")));
        assert_eq!(registry.symbols(), &[symbol("AAPL"), symbol("MSFT")]);
    }

    #[test]
    fn test_delete_removes_locator_entry() {
        let mut registry = Registry::new();
        registry.add_symbols("AAPL,GOOG");
        registry.rebuild_locators(BASE, CATALOG[0]).unwrap();

        registry.delete(&symbol("AAPL"));
        assert!(registry.locator(&symbol("AAPL")).is_none());
        assert!(registry.locator(&symbol("GOOG")).is_some());
    }

    #[test]
    fn test_locator_derivation() {
        // TrackedSet ["AAPL"], intervalle 0 ("1d"/"300")
        let mut registry = Registry::new();
        registry.add_symbols("AAPL");
        registry.rebuild_locators(BASE, CATALOG[0]).unwrap();

        assert_eq!(
            registry.locator(&symbol("AAPL")),
            Some("https://finance.google.com/finance/getchart?q=AAPL&p=1d&i=300")
        );
    }

    #[test]
    fn test_locator_map_matches_tracked_set() {
        // Une entrée par symbole, ni plus ni moins, après rebuild
        let mut registry = Registry::new();
        registry.add_symbols("MSFT,AAPL,GOOG");
        registry.rebuild_locators(BASE, CATALOG[2]).unwrap();

        let snapshot = registry.snapshot(CATALOG[2].label);
        let map_keys: Vec<&Symbol> = snapshot.locators.keys().collect();
        let set: Vec<&Symbol> = snapshot.symbols.iter().collect();
        assert_eq!(map_keys, set);
    }

    #[test]
    fn test_rebuild_overwrites_previous_interval() {
        let mut registry = Registry::new();
        registry.add_symbols("AAPL");
        registry.rebuild_locators(BASE, CATALOG[0]).unwrap();
        registry.rebuild_locators(BASE, CATALOG[1]).unwrap();

        let url = registry.locator(&symbol("AAPL")).unwrap();
        assert!(url.ends_with("q=AAPL&p=5d&i=1000"));
    }

    #[test]
    fn test_from_symbols_sorts_and_dedups() {
        let registry = Registry::from_symbols(vec![
            symbol("MSFT"),
            symbol("AAPL"),
            symbol("MSFT"),
        ]);
        assert_eq!(registry.symbols(), &[symbol("AAPL"), symbol("MSFT")]);
    }

    #[test]
    fn test_snapshot_carries_interval_label() {
        let mut registry = Registry::new();
        registry.add_symbols("AAPL");
        registry.rebuild_locators(BASE, CATALOG[0]).unwrap();

        let snapshot = registry.snapshot("1d");
        assert_eq!(snapshot.interval_label, "1d");
        assert_eq!(snapshot.symbols.len(), 1);
    }
}
