pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::{FixedZoneClock, Ledger, ManualClock};
use crate::db::SettingsStore;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use parser::Cli;
use std::fs;

/// Open the configured store and wrap it in a ledger.
///
/// The clock is the config's fixed zone, unless `--today` pins a date.
pub fn open_ledger(cli: &Cli, cfg: &Config) -> AppResult<Ledger> {
    let db_path = cfg.database_path();
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let store = SettingsStore::open(&db_path.to_string_lossy())?;

    let ledger = match &cli.today {
        Some(raw) => {
            let date = parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?;
            Ledger::new(store, ManualClock::new(date))
        }
        None => Ledger::new(store, FixedZoneClock::new(cfg.offset()?)),
    };

    Ok(ledger.with_default_target(cfg.default_target))
}
