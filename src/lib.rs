pub mod acquire;
pub mod cli;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod filter;
pub mod options;
pub mod output;
pub mod rows;
pub mod schedule;
pub mod session;
pub mod show;
pub mod source;
pub mod table;
pub mod view;
pub mod watch;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schedule_viewer", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Show(args) => block_on(show::execute(&args)),
        Commands::Watch(args) => block_on(watch::execute(&args)),
        Commands::Options(args) => block_on(options::execute(&args)),
        Commands::Normalize(args) => {
            let normalized = source::normalize(&args.url);
            debug!("Normalized '{}' -> '{}'", args.url, normalized);
            println!("{normalized}");
            Ok(())
        }
    }
}

// One thread: fetches and the refresh timer interleave cooperatively.
fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Starting async runtime")?;
    let outcome = runtime.block_on(future);
    // a pending stdin read in `watch` must not keep the process alive
    runtime.shutdown_background();
    outcome
}
