//! Shared utilities

pub mod config;
pub mod context;
pub mod process;

pub use config::Config;
pub use context::GlobalContext;
pub use process::{CommandExecutor, SystemExecutor};
