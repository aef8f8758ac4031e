//! Browse state for the roster list, sequenced so only the newest request lands.
//!
//! Every [`BrowseSession::begin`] issues a new ticket. A result delivered with an older ticket
//! belongs to a request the user has already moved on from and is discarded.

use crate::errors::GatewayResult;
use crate::gateway::PokemonGateway;
use schema::{GameTitle, Generation, PokemonSummary};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseScope {
    Generation(Generation),
    Game(GameTitle),
}

impl BrowseScope {
    pub async fn fetch(self, gateway: &PokemonGateway) -> GatewayResult<Vec<PokemonSummary>> {
        match self {
            BrowseScope::Generation(generation) => gateway.list_generation(generation).await,
            BrowseScope::Game(game) => gateway.list_game(game).await,
        }
    }
}

impl fmt::Display for BrowseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseScope::Generation(generation) => write!(f, "{}", generation),
            BrowseScope::Game(game) => write!(f, "{}", game),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseState {
    Idle,
    Loading,
    Ready(Vec<PokemonSummary>),
    /// The list request failed. Nothing is retried until the next `begin`.
    Failed(String),
}

#[derive(Debug)]
pub struct BrowseSession {
    current: Ticket,
    scope: Option<BrowseScope>,
    state: BrowseState,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self {
            current: Ticket(0),
            scope: None,
            state: BrowseState::Idle,
        }
    }
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> Option<BrowseScope> {
        self.scope
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// Switch to `scope` and wait for its list.
    pub fn begin(&mut self, scope: BrowseScope) -> Ticket {
        self.current = Ticket(self.current.0 + 1);
        self.scope = Some(scope);
        self.state = BrowseState::Loading;
        log::debug!("browse {:?} -> {}", self.current, scope);
        self.current
    }

    /// Apply a list result. Returns false, leaving the state alone, when `ticket` is stale.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: GatewayResult<Vec<PokemonSummary>>,
    ) -> bool {
        if ticket != self.current {
            log::debug!("discarding result for superseded {:?}", ticket);
            return false;
        }
        self.state = match result {
            Ok(list) => BrowseState::Ready(list),
            Err(err) => {
                log::error!("could not load the roster list: {}", err);
                BrowseState::Failed(err.to_string())
            }
        };
        true
    }

    /// Begin, fetch and resolve in one go.
    pub async fn load(&mut self, gateway: &PokemonGateway, scope: BrowseScope) -> &BrowseState {
        let ticket = self.begin(scope);
        let result = scope.fetch(gateway).await;
        self.resolve(ticket, result);
        &self.state
    }

    /// Entries of the loaded list whose name contains `query`, ignoring case. An empty query
    /// returns the whole list.
    pub fn search(&self, query: &str) -> Vec<&PokemonSummary> {
        let BrowseState::Ready(list) = &self.state else {
            return Vec::new();
        };
        let query = query.trim().to_lowercase();
        list.iter()
            .filter(|pokemon| query.is_empty() || pokemon.name.to_lowercase().contains(&query))
            .collect()
    }
}
