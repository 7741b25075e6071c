//! Application constants
//!
//! Centralized location for default names and output formatting.

/// Name used when the collection has no `info.name`
pub const DEFAULT_COLLECTION_NAME: &str = "UnnamedCollection";

/// Name used for folders without a `name`
pub const DEFAULT_FOLDER_NAME: &str = "UnnamedFolder";

/// Name used for requests without a `name`
pub const DEFAULT_REQUEST_NAME: &str = "UnnamedRequest";

/// Method used when a request does not declare one
pub const DEFAULT_METHOD: &str = "GET";

/// Protocol used when a structured URL does not declare one
pub const DEFAULT_PROTOCOL: &str = "http";

/// First line of every generated script
pub const DEFAULT_SHEBANG: &str = "#!/bin/bash";

/// Extension of generated scripts
pub const SCRIPT_EXTENSION: &str = "sh";

/// Directory the operator is expected to replace in file form fields
pub const FILE_PLACEHOLDER_DIR: &str = "/path/to/your/";

/// Longest path segment produced by sanitization, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Default export root, relative to the working directory
pub const DEFAULT_EXPORT_ROOT: &str = "exported_collections";

/// Per-user configuration directory under `$HOME`
pub const CONFIG_DIR_NAME: &str = ".curlport";

/// Configuration file inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Only collection files with this extension are accepted from disk
pub const ALLOWED_EXTENSION: &str = "json";
