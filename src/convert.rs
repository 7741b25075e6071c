//! Entry points: from a collection payload to a tree of scripts

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::constants::{ALLOWED_EXTENSION, DEFAULT_COLLECTION_NAME};
use crate::error::{ConvertError, Result};
use crate::export::{ExportOptions, ExportReport, Walker};
use crate::models::Collection;
use crate::sanitize::sanitize_or;

/// Result of a run that had something to read
#[derive(Debug)]
pub enum Outcome {
    /// The collection was walked; some items may have been skipped
    Converted(ExportReport),
    /// The document had no top-level items; nothing was written
    Empty {
        collection_name: String,
        output_dir: PathBuf,
    },
}

impl Outcome {
    pub fn collection_name(&self) -> &str {
        match self {
            Outcome::Converted(report) => &report.collection_name,
            Outcome::Empty { collection_name, .. } => collection_name,
        }
    }

    pub fn output_dir(&self) -> &Path {
        match self {
            Outcome::Converted(report) => &report.output_dir,
            Outcome::Empty { output_dir, .. } => output_dir,
        }
    }
}

/// Convert a collection given as JSON text
pub fn convert_str(json: &str, export_root: &Path, options: &ExportOptions) -> Result<Outcome> {
    let doc: Value = serde_json::from_str(json).map_err(|e| {
        tracing::error!(error = %e, "Failed to decode collection JSON");
        ConvertError::InputFormat(e)
    })?;
    convert_value(doc, export_root, options)
}

/// Convert an already parsed collection document.
///
/// Scripts land under `<export_root>/<collection name>/`.
pub fn convert_value(doc: Value, export_root: &Path, options: &ExportOptions) -> Result<Outcome> {
    let collection = Collection::from_value(doc)?;
    tracing::info!(collection = %collection.name, "Processing collection");

    let output_dir = export_root.join(sanitize_or(&collection.name, DEFAULT_COLLECTION_NAME));

    if collection.items.is_empty() {
        tracing::warn!(collection = %collection.name, "Collection is empty or has an invalid structure");
        return Ok(Outcome::Empty {
            collection_name: collection.name,
            output_dir,
        });
    }

    fs::create_dir_all(&output_dir).map_err(|source| ConvertError::Io {
        path: output_dir.clone(),
        source,
    })?;
    tracing::info!(path = %output_dir.display(), "Output directory created");

    let mut walker = Walker::new(collection.name.as_str(), output_dir.as_path(), options);
    walker.walk(&collection.items, &output_dir);
    let report = walker.finish();

    tracing::info!(
        collection = %report.collection_name,
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Collection processed"
    );
    Ok(Outcome::Converted(report))
}

/// Convert a collection read from any reader (e.g. stdin)
pub fn convert_reader<R: Read>(mut reader: R, export_root: &Path, options: &ExportOptions) -> Result<Outcome> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|source| ConvertError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    })?;
    let json = String::from_utf8(bytes)?;
    convert_str(&json, export_root, options)
}

/// Convert a `.json` collection file
pub fn convert_file(path: &Path, export_root: &Path, options: &ExportOptions) -> Result<Outcome> {
    if !has_allowed_extension(path) {
        return Err(ConvertError::InvalidFileType(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json = String::from_utf8(bytes)?;
    convert_str(&json, export_root, options)
}

/// Whether the file name ends in `.json`, case-insensitively
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ALLOWED_EXTENSION))
        .unwrap_or(false)
}
