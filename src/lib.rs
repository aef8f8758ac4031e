// In: src/lib.rs

//! Champion Dex team builder
//!
//! Browse Pokemon by generation or game title, inspect type matchups, evolutions and forms,
//! build six-member teams with movesets and keep named teams in a local store. Remote data is
//! cached in two tiers: per-process memory and a persisted store with expiry.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod browse;
pub mod cache;
pub mod clock;
pub mod config;
pub mod effectiveness;
pub mod errors;
pub mod forms;
pub mod gateway;
pub mod moveset;
pub mod persistence;
pub mod roster;
pub mod storage;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `champion-dex` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the shared data model.
pub use schema::{
    // Display helpers
    format_display_name,
    // Records
    BaseStats,
    EvolutionStep,
    // Names and forms
    FormName,
    FormTag,
    FormVariant,
    // Static tables
    GameTitle,
    Generation,
    MegaEvolution,
    Nature,
    PokemonDetail,
    PokemonSummary,
    PokemonType,
};

// --- From this crate's modules (`src/`) ---

// Storage, caching and remote data.
pub use cache::{CacheStore, ClearScope};
pub use clock::{Clock, SystemClock};
pub use config::AppConfig;
pub use gateway::transport::{HttpTransport, ReqwestTransport};
pub use gateway::{AbilityOption, HeldItem, LegalMove, PokemonGateway};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

// Team building.
pub use browse::{BrowseScope, BrowseSession, BrowseState};
pub use effectiveness::TypeMatchupReport;
pub use forms::is_form_available;
pub use moveset::{parse_set, parse_team, MovesetConfig, ParsedSet};
pub use persistence::{RosterStore, SavedRoster};
pub use roster::{CoverageReport, RosterEngine, TeamMember};

// Test doubles for driving the gateway and stores without a network or wall clock.
pub use clock::ManualClock;
pub use gateway::transport::CannedTransport;

// Crate-specific error and result types.
pub use errors::{
    ConfigError, DexError, DexResult, GatewayError, GatewayResult, MovesetError, RosterError,
    RosterResult, StorageError, TransportError,
};
