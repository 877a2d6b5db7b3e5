use crate::api;
use crate::cli::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use std::sync::Arc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = &cli.command {
        let addr = bind.clone().unwrap_or_else(|| cfg.bind.clone());

        let ledger = open_ledger(cli, cfg)?;
        let days = ledger.reconcile()?;
        tracing::info!(
            database = %cfg.database_path().display(),
            utc_offset = %cfg.utc_offset,
            caught_up_days = days,
            "ledger ready"
        );

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(api::serve(Arc::new(ledger), &addr))?;
    }

    Ok(())
}
