//! Card Seeder - Main Binary
//!
//! Seeds the card catalog from sheets, manifests or the starter set, builds
//! starter decks and uploads static item JSON.

use anyhow::{bail, Context, Result};
use card_seeder::{
    blob::{load_items, upload_items, DirectoryBlobStore, UploadOutcome},
    catalog::{build_deck, seed_batch, starter_set, SeedReport},
    config::SeedConfig,
    core::{CardId, DeckOwner},
    loader::{ManifestLoader, SeedBatch, SheetLoader},
    logger::{OutputFormat, SeedLogger, VerbosityLevel},
    store::{JsonFileStore, StoreSession},
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Log line format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for OutputFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => OutputFormat::Text,
            LogFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "seeder")]
#[command(about = "Card Seeder - builds the card catalog and starter decks", long_about = None)]
struct Cli {
    /// Catalog snapshot file (default: store_path from config, else catalog.json)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', global = true, default_value = "normal")]
    verbosity: VerbosityLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed cards from a sheet CSV export, or every .csv under a directory
    SyncSheet {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Rows to skip at the top of each sheet (default from config: 2)
        #[arg(long)]
        header_rows: Option<usize>,
    },

    /// Seed the built-in starter cards
    SeedStarter,

    /// Seed cards from a JSON manifest
    SeedManifest {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Create a deck for a hero or NPC from existing cards
    Deck {
        /// Hero that owns the deck
        #[arg(long, conflicts_with = "npc", required_unless_present = "npc")]
        hero: Option<String>,

        /// NPC that owns the deck
        #[arg(long)]
        npc: Option<String>,

        /// Card to give the owner (repeatable; default: every card in the catalog)
        #[arg(long = "card", value_name = "CARD_ID")]
        cards: Vec<CardId>,

        /// Cards drawn into the deck (default from config: 8)
        #[arg(long)]
        deck_size: Option<usize>,

        /// Random seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Upload item JSON (an array or a single object) to blob storage
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Directory objects are written to (default from config)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Public URL prefix (default from config)
        #[arg(long, value_name = "URL")]
        public_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logger = SeedLogger::with_verbosity(cli.verbosity);
    logger.set_output_format(cli.log_format.into());

    if let Err(error) = run(cli, &logger).await {
        logger.error("seeder", &format!("{error:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, logger: &SeedLogger) -> Result<()> {
    let mut config =
        SeedConfig::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    match cli.command {
        Commands::SyncSheet { path, header_rows } => {
            run_sync_sheet(&config, path, header_rows, logger).await
        }
        Commands::SeedStarter => run_seed(&config, SeedBatch::from_seeds(starter_set()), logger),
        Commands::SeedManifest { path } => run_seed_manifest(&config, path, logger).await,
        Commands::Deck {
            hero,
            npc,
            cards,
            deck_size,
            seed,
        } => run_deck(&config, hero, npc, cards, deck_size, seed, logger),
        Commands::Upload {
            path,
            root,
            public_url,
        } => run_upload(&config, path, root, public_url, logger).await,
    }
}

fn open_store(config: &SeedConfig) -> Result<StoreSession<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("opening catalog {}", config.store_path.display()))?;
    Ok(StoreSession::new(store))
}

/// Seed a batch; the store is released whether or not seeding succeeds
fn run_seed(config: &SeedConfig, batch: SeedBatch, logger: &SeedLogger) -> Result<()> {
    let mut session = open_store(config)?;
    let report: SeedReport = seed_batch(session.store_mut(), logger, batch);
    session.close().context("releasing catalog store")?;

    if report.failed() > 0 || report.incomplete() > 0 {
        logger.warn(
            "summary",
            &format!(
                "{} cards failed and {} were left incomplete",
                report.failed(),
                report.incomplete()
            ),
        );
    }
    Ok(())
}

async fn run_sync_sheet(
    config: &SeedConfig,
    path: PathBuf,
    header_rows: Option<usize>,
    logger: &SeedLogger,
) -> Result<()> {
    let loader = SheetLoader::new(config.kind_table())
        .with_header_rows(header_rows.unwrap_or(config.sheet.header_rows));
    let batch = loader
        .load_path(&path, logger)
        .await
        .with_context(|| format!("reading sheet {}", path.display()))?;

    if batch.is_empty() && batch.rejected_rows == 0 {
        logger.minimal("sheet", "No data found.");
        return Ok(());
    }
    run_seed(config, batch, logger)
}

async fn run_seed_manifest(config: &SeedConfig, path: PathBuf, logger: &SeedLogger) -> Result<()> {
    let batch = ManifestLoader::new(config.kind_table())
        .load(&path, logger)
        .await
        .with_context(|| format!("reading manifest {}", path.display()))?;
    run_seed(config, batch, logger)
}

fn run_deck(
    config: &SeedConfig,
    hero: Option<String>,
    npc: Option<String>,
    cards: Vec<CardId>,
    deck_size: Option<usize>,
    seed: Option<u64>,
    logger: &SeedLogger,
) -> Result<()> {
    let owner = match (hero, npc) {
        (Some(hero), _) => DeckOwner::Hero(hero),
        (None, Some(npc)) => DeckOwner::Npc(npc),
        (None, None) => bail!("a deck needs an owner: pass --hero or --npc"),
    };
    let deck_size = deck_size.unwrap_or(config.deck_size);
    if deck_size == 0 {
        bail!("--deck-size must be at least 1");
    }

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut session = open_store(config)?;
    let card_ids = if cards.is_empty() {
        session.store().tables().cards().iter().map(|c| c.id).collect()
    } else {
        cards
    };
    if card_ids.is_empty() {
        bail!("the catalog has no cards to build a deck from");
    }

    let report = build_deck(
        session.store_mut(),
        logger,
        owner,
        &card_ids,
        &mut rng,
        deck_size,
    )
    .context("creating deck")?;
    session.close().context("releasing catalog store")?;

    logger.minimal(
        "deck",
        &format!(
            "Deck {} for {}: {} owned, {} in deck, {} failed",
            report.deck_id,
            report.owner,
            report.owned.len(),
            report.in_deck.len(),
            report.failures.len()
        ),
    );
    Ok(())
}

async fn run_upload(
    config: &SeedConfig,
    path: PathBuf,
    root: Option<PathBuf>,
    public_url: Option<String>,
    logger: &SeedLogger,
) -> Result<()> {
    let items = load_items(&path)
        .await
        .with_context(|| format!("reading items {}", path.display()))?;

    let blobs = DirectoryBlobStore::new(
        root.unwrap_or_else(|| config.blob.root.clone()),
        public_url.unwrap_or_else(|| config.blob.public_base_url.clone()),
    );
    let outcomes = upload_items(&blobs, &items, logger).await;

    let uploaded = outcomes.iter().filter(|o| o.url().is_some()).count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, UploadOutcome::Skipped { .. }))
        .count();
    logger.minimal(
        "summary",
        &format!(
            "{uploaded} uploaded, {skipped} skipped, {} failed",
            outcomes.len() - uploaded - skipped
        ),
    );
    Ok(())
}
