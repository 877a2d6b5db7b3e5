use crate::cli::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Work { minutes } = &cli.command {
        let balance = open_ledger(cli, cfg)?.add_work(*minutes)?;
        success(format!("Worked {} min. Balance: {} min", minutes, balance));
    }
    Ok(())
}
