//! taskstore Server Binary
//!
//! Serves the task API over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use taskstore::config::resolve_data_file;
use taskstore::network::Server;
use taskstore::{Config, FileTaskStore, PersistMode};
use tracing_subscriber::{fmt, EnvFilter};

/// taskstore Server
#[derive(Parser, Debug)]
#[command(name = "taskstore-server")]
#[command(about = "File-backed task CRUD service over HTTP")]
#[command(version)]
struct Args {
    /// Backing JSON file (defaults to $TASKS_FILE, then $TASKS_DATA_DIR/crud-file/tasks.json,
    /// then the temp directory)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// How the document is rewritten on each mutation
    #[arg(long, value_enum, default_value_t = Mode::Atomic)]
    persist_mode: Mode,

    /// Pretty-print the document on disk
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Truncate,
    Atomic,
}

impl From<Mode> for PersistMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Truncate => PersistMode::Truncate,
            Mode::Atomic => PersistMode::AtomicReplace,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let data_file = args.data_file.unwrap_or_else(resolve_data_file);

    tracing::info!("taskstore Server v{}", taskstore::VERSION);
    tracing::info!("Data file: {}", data_file.display());
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_file(data_file)
        .listen_addr(&args.listen)
        .persist_mode(args.persist_mode.into())
        .pretty(args.pretty)
        .build();

    // Open store; a store that cannot be opened aborts startup
    let store = match FileTaskStore::open(config.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open task store: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Task store initialized successfully");

    let server = match Server::bind(&config, store).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
