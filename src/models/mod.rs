// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod symbol;   // Déclaration du module symbol (fichier symbol.rs)
pub mod interval; // Déclaration du module interval (fichier interval.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazycharts::models::symbol::Symbol;
// On peut faire : use lazycharts::models::Symbol;
pub use interval::{ChartInterval, IntervalSelector, CATALOG};
pub use symbol::Symbol;
