use crate::cli::open_ledger;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_balance, colorize_minutes};
use crate::utils::mins2readable;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let st = open_ledger(cli, cfg)?.state()?;

    let color = color_for_balance(st.balance);
    println!(
        "📊 Balance      : {}{} min{} ({})",
        color,
        st.balance,
        RESET,
        mins2readable(st.balance, true, false)
    );
    println!("🎯 Target       : {} min/day", st.target);
    println!(
        "⏳ Need         : {}",
        colorize_minutes(st.need, &format!("{} min", st.need))
    );
    println!("📅 Today        : {}", st.today);
    println!("🧾 Last applied : {}", st.last_applied);

    Ok(())
}
