//! focusledger main entrypoint.

use focusledger::run;
use focusledger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
