pub mod debug_log;
pub mod debug_page;
pub mod error;
