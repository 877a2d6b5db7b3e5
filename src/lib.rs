//! focusledger library root.
//! Exposes the ledger engine, the HTTP API, the CLI parser and a high-level
//! run() function.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(cli, cfg),
        Commands::State => cli::commands::state::handle(cli, cfg),
        Commands::Work { .. } => cli::commands::work::handle(cli, cfg),
        Commands::Relax { .. } => cli::commands::relax::handle(cli, cfg),
        Commands::Target { .. } => cli::commands::target::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line DB override, relative to the working directory
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::absolutize(custom_db)?
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ logging: the server honours the configured level, one-shot commands stay quiet
    let level = match cli.command {
        Commands::Serve { .. } => cfg.log_level.as_str(),
        _ => "warn",
    };
    logging::init(level, cfg.log_json);

    // 5️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
