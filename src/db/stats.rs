use crate::db::store::SettingsStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(store: &SettingsStore) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let db_path = store.path();
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) SCHEMA VERSION
    //
    let version: i64 =
        store.with_conn(|conn| Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?))?;
    println!("{}• Schema version:{} {}{}{}", CYAN, RESET, GREEN, version, RESET);

    //
    // 3) SETTINGS
    //
    let rows = store.atomically(|s| s.all())?;
    println!("{}• Settings:{}", CYAN, RESET);
    if rows.is_empty() {
        println!("    {GREY}(ledger not initialized){RESET}");
    }
    for (key, value) in rows {
        println!("    {:<14} {}", key, value);
    }

    println!();
    Ok(())
}
