//! Process helpers

pub mod process;
pub mod process_guard;

pub use process_guard::{GuardedExit, ProcessGuard};
