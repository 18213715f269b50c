use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use the_machine::assets::{AssetDir, REWARD_ASSETS};
use the_machine::config::{Config, Overrides};
use the_machine::console::Console;
use the_machine::db::Database;
use the_machine::engine::Machine;
use the_machine::render;

#[derive(Parser)]
#[command(name = "machine")]
#[command(about = "THE MACHINE: a text adventure that remembers its operators")]
struct Cli {
    /// Transcript database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory holding the ASCII-art rewards
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Seed for random reward draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session at the operator console
    Play,
    /// Print stored transcript records, oldest first
    History {
        /// Number of most recent records to show
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Only records from this session
        #[arg(short, long)]
        session: Option<Uuid>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List reward assets and whether each is present
    Assets,
}

/// Logs go to stderr; stdout is the operator console.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "the_machine=warn,machine=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_database(config: &Config) -> anyhow::Result<Database> {
    let db = Database::open(config.database_path.clone())?;
    db.migrate()?;
    Ok(db)
}

fn play(config: &Config) -> anyhow::Result<()> {
    let db = open_database(config)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let assets = AssetDir::new(&config.assets_dir);
    if !assets.root().is_dir() {
        tracing::warn!(
            "Asset directory {} not found, rewards will show load errors",
            assets.root().display()
        );
    }

    let mut machine = Machine::new(Console::stdio()?, Box::new(db), Box::new(assets), rng);
    let result = machine.run();
    if let Err(e) = &result {
        tracing::error!("Session aborted: {:#}", e);
    }
    machine.close()?;
    result
}

fn history(config: &Config, limit: usize, session: Option<Uuid>, json: bool) -> anyhow::Result<()> {
    let db = open_database(config)?;
    let records = match session {
        Some(id) => db.session_records(id)?,
        None => db.recent_records(limit)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No transcript records.");
    } else {
        print!("{}", render::render_records(&records));
    }
    Ok(())
}

fn list_assets(config: &Config) {
    let assets = AssetDir::new(&config.assets_dir);
    println!("Assets in {}:", assets.root().display());
    for name in REWARD_ASSETS {
        let mark = if assets.contains(name) { "●" } else { "✗" };
        println!("  {} {}", mark, name);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::resolve(Overrides {
        database_path: cli.db,
        assets_dir: cli.assets,
        seed: cli.seed,
    })?;
    tracing::debug!(?config, "Resolved configuration");

    match cli.command {
        None | Some(Commands::Play) => play(&config)?,
        Some(Commands::History {
            limit,
            session,
            json,
        }) => history(&config, limit, session, json)?,
        Some(Commands::Assets) => list_assets(&config),
    }

    Ok(())
}
