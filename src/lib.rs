//! clustalo-build - provisions libclustalo and resolves the build flags for
//! the `clustalo` extension module.
//!
//! The library detects the host platform, installs argtable and builds
//! libclustalo from its bundled source archive when needed, probes for an
//! OpenMP toolchain, and assembles the [`BuildDescriptor`] handed to the
//! packaging step.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for clustalo-build unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a mock command executor and source archive fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{FlagResolver, ParallelMode, ProvisionError};
pub use crate::core::{assemble, BuildDescriptor, FlagSet, Platform};
pub use crate::util::context::GlobalContext;
