//! Saved rosters, kept as one JSON array under a single storage key.
//!
//! The array is never touched by cache clears. Every mutation reads the whole array, changes
//! it and writes it back while holding the store's lock.

use crate::clock::Clock;
use crate::errors::{RosterError, RosterResult, StorageError};
use crate::roster::TeamMember;
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

pub const ROSTERS_KEY: &str = "pokemonTeams";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoster {
    /// Creation time in unix milliseconds, unique across saved rosters.
    pub id: i64,
    pub name: String,
    pub members: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; saved rosters are never edited in place.
    pub updated_at: DateTime<Utc>,
}

impl SavedRoster {
    /// Distinct member types in member order.
    pub fn team_types(&self) -> Vec<PokemonType> {
        let mut types = Vec::new();
        for &pokemon_type in self.members.iter().flat_map(|member| member.types.iter()) {
            if !types.contains(&pokemon_type) {
                types.push(pokemon_type);
            }
        }
        types
    }

    /// The team as battle-simulator import text: a `=== name ===` header followed by one block
    /// per member, separated by blank lines.
    pub fn export_text(&self) -> String {
        let mut blocks = vec![format!("=== {} ===", self.name)];
        blocks.extend(self.members.iter().map(TeamMember::export_block));
        blocks.join("\n\n") + "\n"
    }
}

fn persistence_error(err: StorageError) -> RosterError {
    RosterError::Persistence(err.to_string())
}

pub struct RosterStore {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl RosterStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn read_all(&self) -> RosterResult<Vec<SavedRoster>> {
        match self.storage.get(ROSTERS_KEY).map_err(persistence_error)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|err| RosterError::Persistence(format!("saved teams are unreadable: {}", err))),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self, rosters: &[SavedRoster]) -> RosterResult<()> {
        let raw = serde_json::to_string(rosters)
            .map_err(|err| persistence_error(StorageError::Serialization(err)))?;
        self.storage.set(ROSTERS_KEY, &raw).map_err(persistence_error)
    }

    /// All saved rosters, newest first.
    pub fn list(&self) -> RosterResult<Vec<SavedRoster>> {
        let mut rosters = self.read_all()?;
        rosters.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rosters)
    }

    pub fn get(&self, id: i64) -> RosterResult<Option<SavedRoster>> {
        Ok(self.read_all()?.into_iter().find(|roster| roster.id == id))
    }

    /// Append a new roster stamped with the current time. Callers validate name and members.
    pub fn create(&self, name: &str, members: Vec<TeamMember>) -> RosterResult<SavedRoster> {
        let _guard = self.lock();
        let mut rosters = self.read_all()?;

        let now = self.clock.now();
        let mut id = now.timestamp_millis();
        while rosters.iter().any(|roster| roster.id == id) {
            id += 1;
        }

        let roster = SavedRoster {
            id,
            name: name.to_string(),
            members,
            created_at: now,
            updated_at: now,
        };
        rosters.push(roster.clone());
        self.write_all(&rosters)?;
        log::info!("saved team '{}' ({} members)", roster.name, roster.members.len());
        Ok(roster)
    }

    /// Remove the roster with `id`. Returns whether one was removed.
    pub fn delete(&self, id: i64) -> RosterResult<bool> {
        let _guard = self.lock();
        let mut rosters = self.read_all()?;
        let before = rosters.len();
        rosters.retain(|roster| roster.id != id);
        if rosters.len() == before {
            log::warn!("no saved team with id {}", id);
            return Ok(false);
        }
        self.write_all(&rosters)?;
        log::info!("deleted team {}", id);
        Ok(true)
    }
}
