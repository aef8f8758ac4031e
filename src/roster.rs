//! The team being built: six slots, moveset attachment and team-level type coverage.

use crate::errors::{MovesetError, RosterError, RosterResult};
use crate::moveset::MovesetConfig;
use crate::persistence::{RosterStore, SavedRoster};
use schema::{PokemonSummary, PokemonType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ROSTER_SIZE: usize = 6;
pub const MAX_ROSTER_NAME_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub types: Vec<PokemonType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moveset: Option<MovesetConfig>,
}

impl TeamMember {
    pub fn new(summary: &PokemonSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            sprite: summary.sprite.clone(),
            types: summary.types.clone(),
            moveset: None,
        }
    }

    /// Export block: the full set when configured, otherwise name, id and types.
    pub fn export_block(&self) -> String {
        match &self.moveset {
            Some(moveset) => moveset.export_block(&self.name),
            None => {
                let types: Vec<String> = self.types.iter().map(|t| t.display_name()).collect();
                format!(
                    "{} (#{})\nTypes: {}",
                    schema::format_display_name(&self.name),
                    self.id,
                    types.join(" / ")
                )
            }
        }
    }
}

/// A member picked for the team whose moveset is still being configured. It does not occupy a
/// slot until [`RosterEngine::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMember {
    member: TeamMember,
}

impl PendingMember {
    pub fn member(&self) -> &TeamMember {
        &self.member
    }

    /// Starting point for the moveset picker.
    pub fn default_moveset(&self) -> MovesetConfig {
        MovesetConfig::for_types(&self.member.types)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaknessCount {
    pub pokemon_type: PokemonType,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Distinct types on the team, in slot order.
    pub offensive_types: Vec<PokemonType>,
    /// How many member types list each attacking type as a common weakness, most first.
    pub weaknesses: Vec<WeaknessCount>,
}

/// A moveset that can be attached to a member: valid, with at least one move picked.
fn confirmable(moveset: MovesetConfig) -> RosterResult<MovesetConfig> {
    let moveset = moveset.validate()?;
    if moveset.moves.is_empty() {
        log::warn!("refusing a moveset with every move slot blank");
        return Err(MovesetError::NoMoves.into());
    }
    Ok(moveset)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterEngine {
    slots: [Option<TeamMember>; ROSTER_SIZE],
}

impl RosterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Option<TeamMember>; ROSTER_SIZE] {
        &self.slots
    }

    pub fn members(&self) -> impl Iterator<Item = &TeamMember> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.first_empty_slot().is_none()
    }

    pub fn contains(&self, pokemon_id: u32) -> bool {
        self.members().any(|member| member.id == pokemon_id)
    }

    fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    fn check_can_add(&self, member: &TeamMember) -> RosterResult<usize> {
        if self.contains(member.id) {
            log::warn!("{} is already on the team", member.name);
            return Err(RosterError::DuplicateMember(member.name.clone()));
        }
        self.first_empty_slot().ok_or_else(|| {
            log::warn!("team is full, {} was not added", member.name);
            RosterError::RosterFull
        })
    }

    fn place(&mut self, member: TeamMember) -> RosterResult<usize> {
        let slot = self.check_can_add(&member)?;
        log::debug!("{} placed in slot {}", member.name, slot);
        self.slots[slot] = Some(member);
        Ok(slot)
    }

    /// Put the Pokemon in the first empty slot without a moveset. Returns the slot index.
    pub fn add_member(&mut self, pokemon: &PokemonSummary) -> RosterResult<usize> {
        self.place(TeamMember::new(pokemon))
    }

    /// Select a Pokemon for moveset configuration. Fails early on duplicates and a full team so
    /// the picker is not opened for nothing; the slot is only chosen at confirmation.
    pub fn begin_configure(&self, pokemon: &PokemonSummary) -> RosterResult<PendingMember> {
        let member = TeamMember::new(pokemon);
        self.check_can_add(&member)?;
        Ok(PendingMember { member })
    }

    /// Place a pending member with its moveset in whatever slot is first empty now.
    pub fn confirm(
        &mut self,
        pending: PendingMember,
        moveset: MovesetConfig,
    ) -> RosterResult<usize> {
        let mut member = pending.member;
        member.moveset = Some(confirmable(moveset)?);
        self.place(member)
    }

    /// Attach or replace the moveset of an occupied slot.
    pub fn configure_member(&mut self, slot: usize, moveset: MovesetConfig) -> RosterResult<()> {
        let moveset = confirmable(moveset)?;
        match self.slots.get_mut(slot) {
            None => Err(RosterError::SlotOutOfRange(slot)),
            Some(None) => Err(RosterError::EmptySlot(slot)),
            Some(Some(member)) => {
                member.moveset = Some(moveset);
                Ok(())
            }
        }
    }

    /// Clear a slot. Clearing an empty slot is not an error.
    pub fn remove_member(&mut self, slot: usize) -> RosterResult<Option<TeamMember>> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(RosterError::SlotOutOfRange(slot))?;
        Ok(entry.take())
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Reopen a saved roster for editing, members in their saved order.
    pub fn load(roster: &SavedRoster) -> RosterResult<Self> {
        let mut engine = Self::new();
        for member in &roster.members {
            engine.place(member.clone())?;
        }
        Ok(engine)
    }

    pub fn coverage_report(&self) -> CoverageReport {
        let mut offensive_types = Vec::new();
        let mut counts: HashMap<PokemonType, usize> = HashMap::new();

        for pokemon_type in self.members().flat_map(|member| member.types.iter().copied()) {
            if !offensive_types.contains(&pokemon_type) {
                offensive_types.push(pokemon_type);
            }
            for &weakness in pokemon_type.common_weaknesses() {
                *counts.entry(weakness).or_insert(0) += 1;
            }
        }

        let mut weaknesses: Vec<WeaknessCount> = counts
            .into_iter()
            .map(|(pokemon_type, count)| WeaknessCount {
                pokemon_type,
                count,
            })
            .collect();
        weaknesses.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.pokemon_type.cmp(&b.pokemon_type))
        });

        CoverageReport {
            offensive_types,
            weaknesses,
        }
    }

    /// Persist the current members under `name`. Nothing is written when the name is blank or
    /// too long, or when the team is empty. The in-progress team is left as it is.
    pub fn save(&self, name: &str, store: &RosterStore) -> RosterResult<SavedRoster> {
        let name = name.trim();
        if name.is_empty() {
            log::warn!("refusing to save a team without a name");
            return Err(RosterError::EmptyName);
        }
        if name.chars().count() > MAX_ROSTER_NAME_CHARS {
            log::warn!("refusing to save a team with a {} character name", name.len());
            return Err(RosterError::NameTooLong);
        }
        if self.is_empty() {
            log::warn!("refusing to save an empty team");
            return Err(RosterError::EmptyRoster);
        }

        store.create(name, self.members().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Arc;
    use PokemonType::*;

    fn summary(id: u32, name: &str, types: &[PokemonType]) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            sprite: format!("https://sprites.test/{}.png", id),
            types: types.to_vec(),
        }
    }

    fn store() -> RosterStore {
        RosterStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(ManualClock::new(
                Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
            )),
        )
    }

    fn fire_team() -> RosterEngine {
        let mut engine = RosterEngine::new();
        let names = ["charmander", "vulpix", "growlithe", "ponyta", "magmar", "flareon"];
        for (index, name) in names.iter().enumerate() {
            engine
                .add_member(&summary(index as u32 + 1, name, &[Fire]))
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut engine = RosterEngine::new();
        let pikachu = summary(25, "pikachu", &[Electric]);

        assert_eq!(engine.add_member(&pikachu), Ok(0));
        assert_eq!(
            engine.add_member(&pikachu),
            Err(RosterError::DuplicateMember("pikachu".to_string()))
        );
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_full_team_rejects_a_seventh() {
        let mut engine = fire_team();
        assert!(engine.is_full());
        assert_eq!(
            engine.add_member(&summary(7, "squirtle", &[Water])),
            Err(RosterError::RosterFull)
        );
        assert_eq!(engine.len(), ROSTER_SIZE);
    }

    #[test]
    fn test_add_fills_the_lowest_empty_slot() {
        let mut engine = fire_team();
        engine.remove_member(2).unwrap();
        engine.remove_member(4).unwrap();

        assert_eq!(engine.add_member(&summary(7, "squirtle", &[Water])), Ok(2));
        assert_eq!(engine.add_member(&summary(8, "wartortle", &[Water])), Ok(4));
    }

    #[test]
    fn test_confirmation_decides_the_slot() {
        let mut engine = RosterEngine::new();
        let pending = engine
            .begin_configure(&summary(6, "charizard", &[Fire, Flying]))
            .unwrap();
        let mut moveset = pending.default_moveset();
        assert_eq!(moveset.tera_type, Fire);
        moveset.moves = vec!["flamethrower".to_string()];

        // Slot 0 looked free at selection time but is taken before confirmation.
        engine.add_member(&summary(25, "pikachu", &[Electric])).unwrap();

        assert_eq!(engine.confirm(pending, moveset), Ok(1));
        let charizard = engine.slots()[1].as_ref().unwrap();
        assert_eq!(
            charizard.moveset.as_ref().map(|m| m.moves.clone()),
            Some(vec!["flamethrower".to_string()])
        );
    }

    #[test]
    fn test_confirmation_rechecks_duplicates() {
        let mut engine = RosterEngine::new();
        let charizard = summary(6, "charizard", &[Fire, Flying]);
        let pending = engine.begin_configure(&charizard).unwrap();
        engine.add_member(&charizard).unwrap();

        let mut moveset = pending.default_moveset();
        moveset.moves = vec!["ember".to_string()];
        assert_eq!(
            engine.confirm(pending, moveset),
            Err(RosterError::DuplicateMember("charizard".to_string()))
        );
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_invalid_moveset_leaves_the_team_alone() {
        let mut engine = RosterEngine::new();
        let pending = engine.begin_configure(&summary(1, "bulbasaur", &[Grass])).unwrap();
        let mut moveset = pending.default_moveset();
        moveset.moves = vec!["a", "b", "c", "d", "e"]
            .into_iter()
            .map(str::to_string)
            .collect();

        assert!(matches!(
            engine.confirm(pending, moveset),
            Err(RosterError::Moveset(_))
        ));
        assert!(engine.is_empty());
    }

    #[rstest]
    #[case(0, Ok(()), "occupied slot")]
    #[case(3, Err(RosterError::EmptySlot(3)), "empty slot")]
    #[case(6, Err(RosterError::SlotOutOfRange(6)), "past the end")]
    fn test_configure_member(
        #[case] slot: usize,
        #[case] expected: RosterResult<()>,
        #[case] desc: &str,
    ) {
        let mut engine = RosterEngine::new();
        engine.add_member(&summary(25, "pikachu", &[Electric])).unwrap();
        let mut moveset = MovesetConfig::for_types(&[Electric]);
        moveset.moves = vec!["thunderbolt".to_string()];
        assert_eq!(engine.configure_member(slot, moveset), expected, "{}", desc);
    }

    #[test]
    fn test_blank_move_slots_cannot_be_confirmed() {
        let mut engine = RosterEngine::new();
        let pending = engine.begin_configure(&summary(1, "bulbasaur", &[Grass])).unwrap();
        let mut moveset = pending.default_moveset();
        moveset.moves = vec![String::new(), "  ".to_string()];

        assert_eq!(
            engine.confirm(pending, moveset.clone()),
            Err(RosterError::Moveset(MovesetError::NoMoves))
        );
        assert!(engine.is_empty());

        engine.add_member(&summary(1, "bulbasaur", &[Grass])).unwrap();
        assert_eq!(
            engine.configure_member(0, moveset),
            Err(RosterError::Moveset(MovesetError::NoMoves))
        );
        assert_eq!(engine.slots()[0].as_ref().and_then(|m| m.moveset.clone()), None);
    }

    #[test]
    fn test_remove_member_clears_unconditionally() {
        let mut engine = fire_team();
        assert_eq!(engine.remove_member(0).unwrap().map(|m| m.id), Some(1));
        assert_eq!(engine.remove_member(0).unwrap(), None);
        assert_eq!(engine.remove_member(9), Err(RosterError::SlotOutOfRange(9)));
        assert_eq!(engine.len(), 5);
    }

    #[test]
    fn test_all_fire_coverage() {
        let report = fire_team().coverage_report();

        assert_eq!(report.offensive_types, vec![Fire]);
        assert_eq!(
            report.weaknesses,
            vec![
                WeaknessCount { pokemon_type: Water, count: 6 },
                WeaknessCount { pokemon_type: Ground, count: 6 },
                WeaknessCount { pokemon_type: Rock, count: 6 },
            ]
        );
    }

    #[test]
    fn test_coverage_counts_each_member_type() {
        let mut engine = RosterEngine::new();
        engine.add_member(&summary(6, "charizard", &[Fire, Flying])).unwrap();
        engine.add_member(&summary(130, "gyarados", &[Water, Flying])).unwrap();

        let report = engine.coverage_report();
        assert_eq!(report.offensive_types, vec![Fire, Flying, Water]);
        assert_eq!(
            report.weaknesses[0],
            WeaknessCount { pokemon_type: Electric, count: 3 }
        );
        assert_eq!(
            report.weaknesses[1],
            WeaknessCount { pokemon_type: Rock, count: 3 }
        );
        assert_eq!(
            report.weaknesses[2],
            WeaknessCount { pokemon_type: Ice, count: 2 }
        );
    }

    #[rstest]
    #[case("", RosterError::EmptyName, "blank")]
    #[case("   ", RosterError::EmptyName, "whitespace only")]
    #[case("A team name that is far too long", RosterError::NameTooLong, "32 characters")]
    fn test_save_rejects_bad_names(
        #[case] name: &str,
        #[case] expected: RosterError,
        #[case] desc: &str,
    ) {
        let store = store();
        assert_eq!(fire_team().save(name, &store), Err(expected), "{}", desc);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_rejects_empty_team() {
        let store = store();
        assert_eq!(
            RosterEngine::new().save("Nobody", &store),
            Err(RosterError::EmptyRoster)
        );
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_persists_members_in_slot_order() {
        let store = store();
        let mut engine = fire_team();
        engine.remove_member(0).unwrap();

        let saved = engine.save("  Inferno  ", &store).unwrap();
        assert_eq!(saved.name, "Inferno");
        assert_eq!(saved.members.len(), 5);
        assert_eq!(saved.members[0].name, "vulpix");
        assert_eq!(store.list().unwrap(), vec![saved]);
    }

    #[test]
    fn test_load_reopens_a_saved_team() {
        let store = store();
        let saved = fire_team().save("Inferno", &store).unwrap();

        let reopened = RosterEngine::load(&saved).unwrap();
        assert_eq!(reopened, fire_team());
        assert!(reopened.is_full());
    }
}
