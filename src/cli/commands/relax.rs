use crate::cli::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Relax { minutes } = &cli.command {
        let balance = open_ledger(cli, cfg)?.spend_relax(*minutes)?;
        success(format!("Relaxed {} min. Balance: {} min", minutes, balance));
        if balance < 0 {
            warning(format!("{} min of work needed to break even", -(balance as i128)));
        }
    }
    Ok(())
}
