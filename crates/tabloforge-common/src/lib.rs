//! Tabloforge-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across tabloforge:
//!
//! - **Core Types**: [`Segment`], [`ManifestEntry`] and the duration guard
//! - **Path Utilities**: The recorder's on-disk layout and segment filtering
//! - **Error Handling**: The shared error type and result alias
//!
//! # Examples
//!
//! ```
//! use tabloforge_common::paths::{is_segment_file, segment_dir};
//! use tabloforge_common::{Error, ErrorKind, Result};
//! use std::path::Path;
//!
//! // Resolve where a recording keeps its segments
//! let dir = segment_dir(Path::new("/mnt/tablo"), "791164");
//! assert_eq!(dir, Path::new("/mnt/tablo/rec/791164/segs"));
//!
//! // Filter segment names
//! assert!(is_segment_file("00001.ts", ".ts"));
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::not_found("segment directory", "/mnt/tablo/rec/1/segs"))
//! }
//! assert_eq!(example().unwrap_err().kind(), ErrorKind::NotFound);
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use types::*;
