pub mod initialize;
pub mod migrate;
pub mod stats;
pub mod store;

pub use initialize::init_db;
pub use store::{Settings, SettingsStore};
