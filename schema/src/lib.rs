// champion-dex schema - shared data model
// This crate holds the static tables (types, natures, games, form tags) and the plain records
// the gateway produces, so the main crate and its tests agree on one set of shapes.

// Re-export the main types
pub use battle_data::*;
pub use forms::*;
pub use games::*;
pub use names::*;
pub use natures::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod forms;
pub mod games;
pub mod names;
pub mod natures;
pub mod pokemon_types;
pub mod species_data;
