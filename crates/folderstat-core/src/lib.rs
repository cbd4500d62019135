//! Core types for folderstat.
//!
//! This crate provides the data structures shared by the scanner, the
//! renderers and the HTTP layer: extension keys and filters, the ignore
//! set, scan configuration, and per-extension results.
//!
//! Files without an extension are grouped under
//! [`ExtensionKey::NO_EXTENSION`] (`"no_extension"`) on every surface.

mod config;
mod error;
mod extension;
mod ignore;
mod result;
mod size;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use extension::{ExtensionFilter, ExtensionKey};
pub use ignore::{DEFAULT_IGNORED_DIRS, IgnoreSet};
pub use result::{ExtensionStat, ScanResult};
pub use size::format_size;
