pub mod config;
pub mod db;
pub mod init;
pub mod relax;
pub mod serve;
pub mod state;
pub mod target;
pub mod work;
