use crate::cli::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Target { minutes } = &cli.command {
        let ledger = open_ledger(cli, cfg)?;
        match minutes {
            Some(m) => {
                let target = ledger.set_target(*m)?;
                success(format!("Daily target set to {} min", target));
            }
            None => info(format!("Daily target: {} min", ledger.target()?)),
        }
    }
    Ok(())
}
