//! File helpers shared by the shell integration.

pub mod backup;
