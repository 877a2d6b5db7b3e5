use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn try_edit(editor: &str) -> bool {
    matches!(
        Command::new(editor).arg(Config::config_file()).status(),
        Ok(s) if s.success()
    )
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        if *edit_config {
            let fallback = default_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if try_edit(&requested) {
                success(format!("Configuration file edited using '{}'", requested));
            } else {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    requested, fallback
                ));
                if try_edit(&fallback) {
                    success(format!("Configuration file edited using fallback '{}'", fallback));
                } else {
                    error(format!("Failed to edit configuration file using '{}'", fallback));
                }
            }

            // Catch mistakes now rather than at the next start
            Config::load()?;
        }
    }

    Ok(())
}
