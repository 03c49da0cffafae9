// Configuration module for termpong
// Loads optional display, audio and gameplay settings from a TOML file

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::{AudioConfig, Config, DisplayConfig};
