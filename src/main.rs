//! Command-line front end for the team builder.
//!
//! Usage:
//!   champion-dex browse --gen 1 --search pidg
//!   champion-dex show charizard
//!   champion-dex items choice-scarf
//!   champion-dex team save --name "Rain" --pokemon pelipper,kingdra
//!   champion-dex team save --name "Imported" --file team.txt
//!   champion-dex cache clear --all

use champion_dex::effectiveness::format_multiplier;
use champion_dex::format_display_name;
use champion_dex::{
    AppConfig, BrowseScope, BrowseSession, BrowseState, CacheStore, DexError,
    DexResult, FileStorage, GameTitle, Generation, KeyValueStorage, PokemonGateway, PokemonType,
    ReqwestTransport, RosterEngine, RosterStore, SavedRoster, SystemClock, TypeMatchupReport,
};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "champion-dex", version)]
#[command(about = "Browse Pokemon, check matchups and build teams")]
struct Cli {
    /// Settings file (RON)
    #[arg(long, default_value = champion_dex::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the Pokemon of a generation or game title
    Browse(BrowseArgs),
    /// Stats, evolutions, mega evolutions and forms of one Pokemon
    Show { pokemon: String },
    /// Weaknesses, resistances and offensive advantages of one Pokemon
    Matchups { pokemon: String },
    /// Moves a Pokemon can legally learn
    Moves { pokemon: String },
    /// Abilities a Pokemon can have
    Abilities { pokemon: String },
    /// The held-item picker, or one item's description
    Items { item: Option<String> },
    /// Saved teams
    #[command(subcommand)]
    Team(TeamCommand),
    /// Cached remote data
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Generation number, 1 to 9
    #[arg(long = "gen", conflicts_with = "game")]
    generation: Option<u8>,
    /// Game title slug, e.g. "scarlet-violet"
    #[arg(long)]
    game: Option<String>,
    /// Only show names containing this text
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Subcommand)]
enum TeamCommand {
    /// Build a team and save it
    Save {
        #[arg(long)]
        name: String,
        /// Comma-separated names or ids, added without movesets
        #[arg(long, value_delimiter = ',', conflicts_with = "file")]
        pokemon: Vec<String>,
        /// Team in battle-simulator import syntax
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Saved teams, newest first
    List,
    /// One saved team with its type coverage
    Show { id: i64 },
    /// One saved team as import text
    Export { id: i64 },
    /// Delete a saved team
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum CacheCommand {
    /// Drop cached data. Saved teams are never touched.
    Clear {
        #[arg(long)]
        listings: bool,
        #[arg(long)]
        battle: bool,
        #[arg(long)]
        all: bool,
    },
}

struct App {
    gateway: PokemonGateway,
    rosters: RosterStore,
}

impl App {
    fn open(config: AppConfig) -> DexResult<Self> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::open(config.data_dir.clone())?);
        let clock = Arc::new(SystemClock);
        let cache = Arc::new(CacheStore::new(storage.clone(), clock.clone()));
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self {
            gateway: PokemonGateway::new(transport, cache, config),
            rosters: RosterStore::new(storage, clock),
        })
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> DexResult<()> {
    let config = AppConfig::load(&cli.config)?;
    let app = App::open(config)?;

    match cli.command {
        Command::Browse(args) => browse(&app, args).await,
        Command::Show { pokemon } => show(&app, &pokemon).await,
        Command::Matchups { pokemon } => matchups(&app, &pokemon).await,
        Command::Moves { pokemon } => moves(&app, &pokemon).await,
        Command::Abilities { pokemon } => abilities(&app, &pokemon).await,
        Command::Items { item } => items(&app, item.as_deref()).await,
        Command::Team(command) => team(&app, command).await,
        Command::Cache(CacheCommand::Clear {
            listings,
            battle,
            all,
        }) => clear_cache(&app, listings || all, battle || all),
    }
}

// --- Browsing and lookups ---

fn parse_scope(args: &BrowseArgs) -> DexResult<BrowseScope> {
    match (args.generation, args.game.as_deref()) {
        (Some(number), _) => Generation::new(number)
            .map(BrowseScope::Generation)
            .ok_or_else(|| DexError::InvalidInput(format!("there is no generation {}", number))),
        (None, Some(slug)) => GameTitle::from_slug(slug)
            .map(BrowseScope::Game)
            .ok_or_else(|| DexError::InvalidInput(format!("unknown game title '{}'", slug))),
        (None, None) => Err(DexError::InvalidInput(
            "choose a list with --gen or --game".to_string(),
        )),
    }
}

fn type_list(types: &[PokemonType]) -> String {
    types
        .iter()
        .map(|t| t.display_name())
        .collect::<Vec<_>>()
        .join(" / ")
}

async fn browse(app: &App, args: BrowseArgs) -> DexResult<()> {
    let scope = parse_scope(&args)?;
    let mut session = BrowseSession::new();
    if let BrowseState::Failed(message) = session.load(&app.gateway, scope).await {
        return Err(DexError::InvalidInput(message.clone()));
    }

    let found = session.search(args.search.as_deref().unwrap_or(""));
    println!("{} ({} Pokemon)", scope, found.len());
    for pokemon in found {
        println!(
            "  #{:<5} {:<24} {}",
            pokemon.id,
            format_display_name(&pokemon.name),
            type_list(&pokemon.types)
        );
    }
    Ok(())
}

async fn show(app: &App, pokemon: &str) -> DexResult<()> {
    let detail = app.gateway.pokemon_detail(pokemon).await?;
    println!(
        "#{} {}  [{}]",
        detail.id,
        format_display_name(&detail.name),
        type_list(&detail.types)
    );
    let stats = &detail.base_stats;
    println!(
        "HP {}  Atk {}  Def {}  SpA {}  SpD {}  Spe {}  (total {})",
        stats.hp,
        stats.attack,
        stats.defense,
        stats.sp_attack,
        stats.sp_defense,
        stats.speed,
        stats.total()
    );
    println!("Artwork: {}", detail.normal_artwork);

    if detail.evolutions.len() > 1 {
        let chain: Vec<String> = detail
            .evolutions
            .iter()
            .map(|step| format_display_name(&step.name))
            .collect();
        println!("Evolution: {}", chain.join(" -> "));
    }
    for mega in &detail.mega_evolutions {
        println!(
            "Mega: {} [{}]",
            format_display_name(&mega.name),
            type_list(&mega.types)
        );
    }
    if detail.forms.len() > 1 {
        let forms: Vec<&str> = detail.forms.iter().map(|form| form.label.as_str()).collect();
        println!("Forms: {}", forms.join(", "));
    }
    Ok(())
}

async fn matchups(app: &App, pokemon: &str) -> DexResult<()> {
    let summary = app.gateway.pokemon(pokemon).await?;
    let report = TypeMatchupReport::for_types(&summary.types);
    println!(
        "{} [{}]",
        format_display_name(&summary.name),
        type_list(&summary.types)
    );

    let print_ranked = |label: &str, ranked: Vec<(PokemonType, f32)>| {
        if ranked.is_empty() {
            return;
        }
        let entries: Vec<String> = ranked
            .into_iter()
            .map(|(t, m)| format!("{} {}", t.display_name(), format_multiplier(m)))
            .collect();
        println!("{}: {}", label, entries.join(", "));
    };
    print_ranked("Weak to", report.ranked_weaknesses());
    print_ranked("Resists", report.ranked_resistances());
    let immunities = report.immunities();
    if !immunities.is_empty() {
        println!("Immune to: {}", type_list(&immunities));
    }
    print_ranked("Strong against", report.ranked_advantages());
    Ok(())
}

async fn moves(app: &App, pokemon: &str) -> DexResult<()> {
    let legal = app.gateway.legal_moves(pokemon).await?;
    if legal.is_empty() {
        println!("No learnset found for {}", pokemon);
        return Ok(());
    }
    for entry in legal {
        let power = match entry.record.base_power {
            0 => "-".to_string(),
            power => power.to_string(),
        };
        println!(
            "  {:<24} {:<9} {:<9} {:>4}",
            entry.display_name, entry.record.move_type, entry.record.category, power
        );
    }
    Ok(())
}

async fn abilities(app: &App, pokemon: &str) -> DexResult<()> {
    for ability in app.gateway.pokemon_abilities(pokemon).await? {
        println!("{}: {}", ability.display_name, ability.description);
    }
    Ok(())
}

async fn items(app: &App, item: Option<&str>) -> DexResult<()> {
    let Some(name) = item else {
        for held in app.gateway.held_items().await? {
            println!("  {:<18} {}", held.name, held.description);
        }
        return Ok(());
    };
    match app.gateway.item_details(name).await? {
        Some(record) => println!("{}: {}", record.name, record.description()),
        None => println!("No item called {}", name),
    }
    Ok(())
}

// --- Teams ---

async fn team(app: &App, command: TeamCommand) -> DexResult<()> {
    match command {
        TeamCommand::Save {
            name,
            pokemon,
            file,
        } => {
            let engine = match file {
                Some(path) => build_from_sets(app, &std::fs::read_to_string(path)?).await?,
                None => build_from_names(app, &pokemon).await?,
            };
            let saved = engine.save(&name, &app.rosters)?;
            println!("Saved '{}' as team {}", saved.name, saved.id);
            Ok(())
        }
        TeamCommand::List => {
            for roster in app.rosters.list()? {
                println!(
                    "{}  {:<30} {} members  [{}]  {}",
                    roster.id,
                    roster.name,
                    roster.members.len(),
                    type_list(&roster.team_types()),
                    roster.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(())
        }
        TeamCommand::Show { id } => {
            let roster = saved(app, id)?;
            print!("{}", roster.export_text());
            print_coverage(&roster)
        }
        TeamCommand::Export { id } => {
            print!("{}", saved(app, id)?.export_text());
            Ok(())
        }
        TeamCommand::Delete { id, yes } => {
            let roster = saved(app, id)?;
            if !yes && !confirm(&format!("Delete team '{}'?", roster.name))? {
                println!("Kept '{}'", roster.name);
                return Ok(());
            }
            app.rosters.delete(id)?;
            println!("Deleted '{}'", roster.name);
            Ok(())
        }
    }
}

fn saved(app: &App, id: i64) -> DexResult<SavedRoster> {
    app.rosters
        .get(id)?
        .ok_or_else(|| DexError::InvalidInput(format!("no saved team with id {}", id)))
}

async fn build_from_names(app: &App, names: &[String]) -> DexResult<RosterEngine> {
    let mut engine = RosterEngine::new();
    for name in names.iter().map(|name| name.trim()).filter(|name| !name.is_empty()) {
        let summary = app.gateway.pokemon(&name.to_lowercase()).await?;
        engine.add_member(&summary)?;
    }
    Ok(engine)
}

async fn build_from_sets(app: &App, text: &str) -> DexResult<RosterEngine> {
    let mut engine = RosterEngine::new();
    for set in champion_dex::parse_team(text)? {
        let summary = app.gateway.pokemon(&set.species).await?;
        if set.config.moves.is_empty() {
            // A block without moves carries no moveset, e.g. "Pikachu (#25)".
            engine.add_member(&summary)?;
            continue;
        }
        let pending = engine.begin_configure(&summary)?;
        let mut moveset = set.config;
        if !set.explicit_tera {
            moveset.tera_type = pending.default_moveset().tera_type;
        }
        engine.confirm(pending, moveset)?;
    }
    Ok(engine)
}

fn print_coverage(roster: &SavedRoster) -> DexResult<()> {
    let engine = RosterEngine::load(roster)?;
    let coverage = engine.coverage_report();
    println!("Offensive types: {}", type_list(&coverage.offensive_types));
    for weakness in coverage.weaknesses {
        println!(
            "  {:<9} weakness on {} member type(s)",
            weakness.pokemon_type.display_name(),
            weakness.count
        );
    }
    Ok(())
}

fn confirm(question: &str) -> DexResult<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

// --- Cache ---

fn clear_cache(app: &App, listings: bool, battle: bool) -> DexResult<()> {
    app.gateway.clear_session();
    let mut removed = 0;
    if listings {
        removed += app.gateway.clear_listings()?;
    }
    if battle {
        removed += app.gateway.clear_battle_data()?;
    }
    if !listings && !battle {
        log::info!("only in-memory data was cleared; see --all");
    }
    println!("Removed {} cached entries", removed);
    Ok(())
}
