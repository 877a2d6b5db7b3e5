use clap::{Parser, Subcommand};

/// Command-line interface definition for focusledger
#[derive(Parser)]
#[command(
    name = "focusledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A focus/relax time balance: earn minutes by working, spend them relaxing, pay a daily target",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin "today" to a date (YYYY-MM-DD) instead of reading the clock
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run the HTTP API and dashboard
    Serve {
        /// Listen address (overrides `bind` in the config file)
        #[arg(long = "bind", help = "Address to listen on, e.g. 127.0.0.1:8000")]
        bind: Option<String>,
    },

    /// Show balance, target and minutes owed
    State,

    /// Credit minutes of focused work
    Work {
        /// Minutes worked
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Spend minutes of relaxation
    Relax {
        /// Minutes relaxed
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Show or set the daily target
    Target {
        /// New daily target in minutes (omit to show the current one)
        #[arg(allow_negative_numbers = true)]
        minutes: Option<i64>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}
