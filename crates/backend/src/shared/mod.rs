pub mod config;
pub mod data;
pub mod debug_log;
pub mod format;
