//! Rendering of folderstat scan results.
//!
//! A [`ScanResult`](folderstat_core::ScanResult) can be rendered as:
//!
//! - **JSON** - [`UploadReport`] for uploaded folders, [`PathReport`] for
//!   host paths; extensions appear in lexicographic order
//! - **CSV** - header `extension,count,sizebytes,Size` and one row per
//!   extension, either written to any [`std::io::Write`] or produced row by
//!   row for streaming
//!
//! Rendering works purely on the finished result and never touches the
//! filesystem.
//!
//! ```rust,ignore
//! use folderstat_render::{UploadReport, to_json, to_csv_string};
//! use folderstat_scan::{ExtensionScanner, ScanConfig};
//!
//! let result = ExtensionScanner::new().scan(&ScanConfig::new("/data")).unwrap();
//! println!("{}", to_json(&UploadReport::new(&result)).unwrap());
//! println!("{}", to_csv_string(&result).unwrap());
//! ```

mod csv_export;
mod error;
mod format;
mod report;

pub use csv_export::{CSV_FILENAME, CSV_HEADER, CsvRows, csv_rows, to_csv_string, write_csv};
pub use error::RenderError;
pub use format::OutputFormat;
pub use report::{ExtensionSummary, PathReport, UploadReport, to_json, to_json_pretty};
