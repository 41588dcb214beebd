//! High-level operations.
//!
//! This module contains the implementation of clustalo-build commands.

pub mod doctor;
pub mod provision;

pub use doctor::{doctor, format_report, CheckResult, DoctorOptions, DoctorReport};
pub use provision::{provision, ProvisionOptions, ProvisionReport};
