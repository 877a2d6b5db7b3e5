use crate::cli::open_ledger;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its schema
///  - the ledger itself (balance 0, default target, today as last applied)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = cfg.init_all(cli.test)?;

    println!("⚙️  Initializing focusledger…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {}", db_path.display());

    let ledger = open_ledger(cli, cfg)?;
    if ledger.ensure_initialized()? {
        success(format!(
            "Ledger created: balance 0 min, target {} min/day, starting {}",
            ledger.target()?,
            ledger.today()
        ));
    } else {
        info("Ledger already initialized, nothing to do.");
    }

    Ok(())
}
