//! Colors for CLI output

pub mod cli;

pub use cli::{ansi, colors_enabled, Theme, ANSI_RESET};
