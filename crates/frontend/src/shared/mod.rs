pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod context_codec;
pub mod date_utils;
pub mod icons;
pub mod number_format;
