//! Core data structures for clustalo-build.
//!
//! - Host platform and package manager identities
//! - OpenMP tool/formula pairs and flag sets
//! - The build descriptor consumed by the packaging step

pub mod descriptor;
pub mod flags;
pub mod platform;

pub use descriptor::{assemble, BuildDescriptor};
pub use flags::{FlagSet, ToolFormula};
pub use platform::{PackageManager, Platform};
