//! # curlport
//!
//! Turns an API client collection export (Postman v2 JSON) into a directory
//! tree of standalone shell scripts, one cURL invocation per request.
//!
//! ## Features
//! - Folders become directories, requests become `<name>.sh`
//! - Plain and structured URLs, with enabled query params only
//! - Headers, raw bodies, multipart forms and urlencoded forms
//! - One bad request never stops the rest of the export
//!
//! ## Architecture
//! - [`convert`] parses the document and applies the collection-level policy
//! - [`export::Walker`] walks the tree depth-first and writes files
//! - [`curl::to_curl`] translates a single request

pub mod config;
pub mod constants;
pub mod convert;
pub mod curl;
pub mod error;
pub mod export;
pub mod models;
pub mod sanitize;

// Re-export commonly used types
pub use config::Config;
pub use convert::{convert_file, convert_reader, convert_str, convert_value, Outcome};
pub use curl::{resolve_url, shell_escape, to_curl};
pub use error::{ConvertError, SkipReason};
pub use export::{ExportOptions, ExportReport, SkippedItem, Walker};
pub use models::{BodySpec, Collection, CollectionNode, RequestSpec, UrlSpec};
pub use sanitize::sanitize_filename;
