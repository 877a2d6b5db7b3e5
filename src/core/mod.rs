pub mod clock;
pub mod input;
pub mod ledger;

pub use clock::{Clock, FixedZoneClock, ManualClock};
pub use ledger::{DEFAULT_TARGET, Ledger, LedgerState};
