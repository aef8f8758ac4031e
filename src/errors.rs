use thiserror::Error;

/// Main error type for the champion-dex library
#[derive(Debug, Error)]
pub enum DexError {
    /// Error loading or parsing the configuration file
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Error reading or writing the persisted key-value store
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Error fetching or decoding remote data
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    /// Rejected roster mutation
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Invalid moveset configuration
    #[error("Moveset error: {0}")]
    Moveset(#[from] MovesetError),
    /// Error reading a team file or terminal input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Input that names nothing the builder knows about
    #[error("{0}")]
    InvalidInput(String),
}

impl From<TransportError> for DexError {
    fn from(err: TransportError) -> Self {
        DexError::Gateway(GatewayError::Transport(err))
    }
}

/// Errors related to loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Errors raised by a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the HTTP transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors related to remote data operations
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed data: {0}")]
    MalformedData(String),
}

/// Errors related to moveset validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovesetError {
    #[error("pick at least one move")]
    NoMoves,
    #[error("a Pokemon can know at most 4 moves, got {0}")]
    TooManyMoves(usize),
    #[error("move '{0}' is selected more than once")]
    DuplicateMove(String),
    #[error("nickname '{0}' is longer than 12 characters")]
    NicknameTooLong(String),
    #[error("could not read set: {0}")]
    Unparseable(String),
}

/// Errors related to roster building and saving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{0} is already on the team")]
    DuplicateMember(String),
    #[error("the team already has 6 members")]
    RosterFull,
    #[error("slot {0} does not exist")]
    SlotOutOfRange(usize),
    #[error("slot {0} is empty")]
    EmptySlot(usize),
    #[error("the team needs a name")]
    EmptyName,
    #[error("team names are limited to 30 characters")]
    NameTooLong,
    #[error("add at least one Pokemon before saving")]
    EmptyRoster,
    #[error(transparent)]
    Moveset(#[from] MovesetError),
    #[error("could not persist team: {0}")]
    Persistence(String),
}

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;

/// Type alias for Results using GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Type alias for Results using RosterError
pub type RosterResult<T> = Result<T, RosterError>;

/// Type alias for Results using StorageError
pub type StorageResult<T> = Result<T, StorageError>;
