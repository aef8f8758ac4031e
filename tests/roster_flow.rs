//! End-to-end team building against canned remote data: import, save, list, export, reimport.

use champion_dex::cache::generation_listing_key;
use champion_dex::{
    parse_team, AppConfig, CacheStore, CannedTransport, Clock, ManualClock,
    MemoryStorage, Nature, PokemonGateway, PokemonSummary, PokemonType, RosterEngine,
    RosterError, RosterStore,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const API: &str = "https://pokeapi.test/api/v2";

const RAIN_TEAM: &str = "\
Pelipper @ Damp Rock
Ability: Drizzle
Bold Nature
EVs: 252 HP / 252 Def / 4 SpD
- Hurricane
- Scald
- Roost

Kingy (Kingdra) @ Choice Specs
Ability: Swift Swim
Tera Type: Dragon
Modest Nature
- Draco Meteor
- Surf
";

fn pokemon_body(id: u32, name: &str, types: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "sprites": { "front_default": format!("https://sprites.test/{}.png", id) },
        "types": types.iter().enumerate().map(|(slot, name)| json!({
            "slot": slot + 1,
            "type": { "name": name, "url": "" }
        })).collect::<Vec<_>>(),
        "stats": [],
        "species": { "name": name, "url": format!("{}/pokemon-species/{}/", API, id) }
    })
}

struct Fixture {
    gateway: PokemonGateway,
    rosters: RosterStore,
    cache: Arc<CacheStore>,
    clock: Arc<ManualClock>,
}

fn fixture() -> Fixture {
    let transport = CannedTransport::new()
        .with_json(
            format!("{}/pokemon/pelipper", API),
            pokemon_body(279, "pelipper", &["water", "flying"]),
        )
        .with_json(
            format!("{}/pokemon/kingdra", API),
            pokemon_body(230, "kingdra", &["water", "dragon"]),
        );
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 7, 14, 18, 0, 0).unwrap(),
    ));
    let storage = Arc::new(MemoryStorage::new());
    let cache = Arc::new(CacheStore::new(storage.clone(), clock.clone()));
    let config = AppConfig {
        pokeapi_base_url: API.to_string(),
        ..AppConfig::default()
    };

    Fixture {
        gateway: PokemonGateway::new(Arc::new(transport), cache.clone(), config),
        rosters: RosterStore::new(storage, clock.clone()),
        cache,
        clock,
    }
}

async fn import(fixture: &Fixture, text: &str) -> RosterEngine {
    let mut engine = RosterEngine::new();
    for set in parse_team(text).unwrap() {
        let summary = fixture.gateway.pokemon(&set.species).await.unwrap();
        let pending = engine.begin_configure(&summary).unwrap();
        let mut moveset = set.config;
        if !set.explicit_tera {
            moveset.tera_type = pending.default_moveset().tera_type;
        }
        engine.confirm(pending, moveset).unwrap();
    }
    engine
}

#[tokio::test]
async fn test_imported_team_saves_and_exports() {
    let fixture = fixture();
    let engine = import(&fixture, RAIN_TEAM).await;
    assert_eq!(engine.len(), 2);

    let saved = engine.save("Rain", &fixture.rosters).unwrap();
    assert_eq!(saved.id, fixture.clock.now_millis());
    assert_eq!(
        saved.team_types(),
        vec![PokemonType::Water, PokemonType::Flying, PokemonType::Dragon]
    );

    let pelipper = saved.members[0].moveset.as_ref().unwrap();
    assert_eq!(pelipper.tera_type, PokemonType::Water);
    assert_eq!(pelipper.nature, Nature::Bold);
    assert_eq!(pelipper.moves, vec!["hurricane", "scald", "roost"]);

    assert_eq!(
        saved.export_text(),
        "=== Rain ===\n\
         \n\
         Pelipper @ Damp Rock\n\
         Ability: Drizzle\n\
         Tera Type: Water\n\
         Bold Nature\n\
         - Hurricane\n\
         - Scald\n\
         - Roost\n\
         \n\
         Kingy (Kingdra) @ Choice Specs\n\
         Ability: Swift Swim\n\
         Tera Type: Dragon\n\
         Modest Nature\n\
         - Draco Meteor\n\
         - Surf\n"
    );
}

#[tokio::test]
async fn test_export_reimports_to_the_same_team() {
    let fixture = fixture();
    let saved = import(&fixture, RAIN_TEAM)
        .await
        .save("Rain", &fixture.rosters)
        .unwrap();

    fixture.clock.advance(Duration::seconds(30));
    let copy = import(&fixture, &saved.export_text())
        .await
        .save("Rain copy", &fixture.rosters)
        .unwrap();

    assert_eq!(copy.members, saved.members);
    let names: Vec<String> = fixture
        .rosters
        .list()
        .unwrap()
        .into_iter()
        .map(|roster| roster.name)
        .collect();
    assert_eq!(names, vec!["Rain copy", "Rain"]);
}

#[tokio::test]
async fn test_saved_team_survives_cache_clears() {
    let fixture = fixture();
    let saved = import(&fixture, RAIN_TEAM)
        .await
        .save("Rain", &fixture.rosters)
        .unwrap();

    let listing: Vec<PokemonSummary> = Vec::new();
    fixture
        .cache
        .write(&generation_listing_key(1), &listing)
        .unwrap();
    assert_eq!(fixture.gateway.clear_listings().unwrap(), 1);
    fixture.gateway.clear_battle_data().unwrap();

    assert_eq!(fixture.rosters.get(saved.id).unwrap(), Some(saved));
}

#[tokio::test]
async fn test_reopened_team_keeps_duplicate_checks() {
    let fixture = fixture();
    let mut engine = import(&fixture, RAIN_TEAM).await;
    for id in 1..=4 {
        engine
            .add_member(&PokemonSummary {
                id,
                name: format!("filler-{}", id),
                sprite: String::new(),
                types: vec![PokemonType::Normal],
            })
            .unwrap();
    }
    let saved = engine.save("Full", &fixture.rosters).unwrap();

    let mut reopened = RosterEngine::load(&saved).unwrap();
    let kingdra = fixture.gateway.pokemon("kingdra").await.unwrap();
    assert_eq!(
        reopened.add_member(&kingdra),
        Err(RosterError::DuplicateMember("kingdra".to_string()))
    );
    reopened.remove_member(1).unwrap();
    assert_eq!(reopened.add_member(&kingdra), Ok(1));
}
