//! Runtime detection
//!
//! This module provides:
//! - Node.js and package manager detection via `--version` probes
//! - Minimum version checks (advisory only)

pub mod check;
pub mod version;

pub use check::{check_node, check_package_manager, RuntimeInfo, RuntimeReport};
