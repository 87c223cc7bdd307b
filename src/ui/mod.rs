// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;        // Gestion des événements clavier
pub mod wallet_list;   // Rendu de la liste des wallets
pub mod wallet_row;    // Widget d'une ligne de wallet
pub mod wallet_detail; // Rendu du détail d'un wallet

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use wallet_list::render;
