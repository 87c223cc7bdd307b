// ============================================================================
// WalletList - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Taux de change (Yahoo Finance)
pub mod app;       // État de l'application
pub mod config;    // Configuration JSON
pub mod error;     // Erreurs typées de la ligne de wallet
pub mod format;    // Formatage des montants et du texte
pub mod models;    // Structures de données
pub mod row;       // Ligne de wallet : props, vue, dénominations
pub mod state;     // Photo de l'état partagé
pub mod ui;        // Interface utilisateur
