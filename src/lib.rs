// ============================================================================
// LazyCharts - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod config;    // Fichier de configuration (URL de base, chemins)
pub mod locator;   // Construction des URLs de graphiques
pub mod models;    // Structures de données
pub mod registry;  // Registre des symboles suivis + LocatorMap
pub mod store;     // Persistance de la liste de symboles
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
