// ============================================================================
// Structures : ChartInterval et IntervalSelector
// ============================================================================
// Catalogue fixe des intervalles de temps des graphiques, et curseur cyclique
//
// CONCEPTS RUST :
// 1. Tableau const : le catalogue vit dans le binaire, aucune allocation
// 2. &'static str : les labels sont des littéraux, lifetime 'static
// 3. rem_euclid : le vrai modulo "horloge" (le % de Rust garde le signe)
// ============================================================================

/// Un intervalle de graphique : période affichée + résolution d'échantillonnage
///
/// CONCEPT : label vs resolution
/// - label : période totale du graphique ("1d", "5d", "1M", etc.)
/// - resolution : granularité en secondes demandée au serveur de graphiques
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartInterval {
    /// Période affichée (ex: "1d", "3M", "1Y")
    pub label: &'static str,

    /// Résolution d'échantillonnage (ex: "300" = un point toutes les 5 min)
    pub resolution: &'static str,
}

/// Catalogue fixe des intervalles sélectionnables
///
/// Non configurable à l'exécution : l'ordre définit le cycle de navigation.
/// "1000Y" est le mode "tout l'historique" du serveur de graphiques.
pub const CATALOG: [ChartInterval; 9] = [
    ChartInterval { label: "1d", resolution: "300" },
    ChartInterval { label: "5d", resolution: "1000" },
    ChartInterval { label: "1M", resolution: "100000" },
    ChartInterval { label: "3M", resolution: "100000" },
    ChartInterval { label: "6M", resolution: "100000" },
    ChartInterval { label: "1Y", resolution: "100000" },
    ChartInterval { label: "2Y", resolution: "100000" },
    ChartInterval { label: "5Y", resolution: "100000" },
    ChartInterval { label: "1000Y", resolution: "10000" },
];

// ============================================================================
// IntervalSelector : curseur cyclique sur le catalogue
// ============================================================================
// CONCEPT : Curseur modulaire
// - L'index reste toujours dans [0, CATALOG.len())
// - advance(-1) depuis 0 boucle sur le dernier intervalle
// - advance(+1) depuis le dernier boucle sur 0
// ============================================================================

/// Curseur sur le catalogue d'intervalles
///
/// Jamais persisté : chaque lancement repart sur le premier intervalle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSelector {
    index: usize,
}

impl IntervalSelector {
    /// Crée un sélecteur positionné sur le premier intervalle du catalogue
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Index courant dans le catalogue
    pub fn index(&self) -> usize {
        self.index
    }

    /// Intervalle courant
    ///
    /// CONCEPT RUST : Copy
    /// - ChartInterval est Copy (deux &'static str), on retourne une valeur
    pub fn current(&self) -> ChartInterval {
        CATALOG[self.index]
    }

    /// Label de l'intervalle courant (pour l'affichage)
    pub fn label(&self) -> &'static str {
        self.current().label
    }

    /// Décale le curseur de `delta` positions, avec bouclage dans les deux sens
    ///
    /// CONCEPT RUST : rem_euclid vs %
    /// - En Rust, (-1) % 9 == -1 (reste signé, comme en C)
    /// - (-1).rem_euclid(9) == 8 : c'est l'arithmétique d'horloge voulue
    /// - On passe par i64 pour que l'addition puisse devenir négative
    pub fn advance(&mut self, delta: i64) {
        let len = CATALOG.len() as i64;
        self.index = (self.index as i64 + delta).rem_euclid(len) as usize;
    }
}

impl Default for IntervalSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_nine_entries() {
        assert_eq!(CATALOG.len(), 9);
        assert_eq!(CATALOG[0].label, "1d");
        assert_eq!(CATALOG[0].resolution, "300");
        assert_eq!(CATALOG[8].label, "1000Y");
        assert_eq!(CATALOG[8].resolution, "10000");
    }

    #[test]
    fn test_new_starts_at_first_entry() {
        let selector = IntervalSelector::new();
        assert_eq!(selector.index(), 0);
        assert_eq!(selector.label(), "1d");
    }

    #[test]
    fn test_advance_forward() {
        let mut selector = IntervalSelector::new();
        selector.advance(1);
        assert_eq!(selector.index(), 1);
        assert_eq!(selector.label(), "5d");
    }

    #[test]
    fn test_wraparound_backward_from_zero() {
        // Index 0, recul d'un cran : on doit atterrir sur le dernier (8)
        let mut selector = IntervalSelector::new();
        selector.advance(-1);
        assert_eq!(selector.index(), 8);
        assert_eq!(selector.label(), "1000Y");
    }

    #[test]
    fn test_wraparound_forward_from_last() {
        let mut selector = IntervalSelector::new();
        selector.advance(-1); // index 8
        selector.advance(1);  // retour à 0
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let mut selector = IntervalSelector::new();
        for _ in 0..CATALOG.len() {
            selector.advance(1);
        }
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn test_large_negative_delta() {
        let mut selector = IntervalSelector::new();
        selector.advance(-10); // -10 mod 9 == 8
        assert_eq!(selector.index(), 8);
    }
}
