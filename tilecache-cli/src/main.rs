//! tilecache CLI - Command-line interface
//!
//! Stores, retrieves and removes tiles in a disk tile cache.

mod commands;
mod error;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilecache::cache::TileFileStore;
use tilecache::config::ConfigFile;
use tilecache::coord::TileKey;
use tilecache::logging::init_logging;
use tracing::debug;

use commands::common::{load_config, resolve_store_config, StoreOverrides};
use error::CliError;

#[derive(Parser)]
#[command(name = "tilecache")]
#[command(version = tilecache::VERSION)]
#[command(about = "Disk-backed map tile cache", long_about = None)]
struct Cli {
    /// Config file (default: ~/.tilecache/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cache root directory (overrides config)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Tile file extension without the dot, e.g. png (overrides config)
    #[arg(long, global = true)]
    format: Option<String>,

    /// Use a sharded lock with this many shards instead of one global lock
    #[arg(long, global = true)]
    sharded: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a tile from a file, or from stdin with `-`
    Put {
        /// Tile key as level/col/row
        key: TileKey,
        /// Payload file, or `-` for stdin
        input: PathBuf,
    },
    /// Write a cached tile to stdout or a file (exit code 2 if not cached)
    Get {
        /// Tile key as level/col/row
        key: TileKey,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove a cached tile
    Delete {
        /// Tile key as level/col/row
        key: TileKey,
    },
    /// Print the file path a tile is stored at
    Path {
        /// Tile key as level/col/row
        key: TileKey,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config: ConfigFile = load_config(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let _logging_guard = init_logging(config.logging.directory.as_deref(), level)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let overrides = StoreOverrides {
        root: cli.root,
        format: cli.format,
        sharded: cli.sharded,
    };
    let store = TileFileStore::open(resolve_store_config(&config, &overrides))?;

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Put { key, input } => commands::tile::put(&store, key, &input),
        Commands::Get { key, output } => {
            commands::tile::get(&store, key, output.as_deref(), &mut stdout)
        }
        Commands::Delete { key } => commands::tile::delete(&store, key, &mut stdout),
        Commands::Path { key } => commands::tile::path(&store, key, &mut stdout),
    };

    debug!(stats = %store.stats(), "Tile cache statistics");
    result
}
