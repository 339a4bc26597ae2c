pub mod list;
pub mod toast;
