//! Tree walker: mirrors the collection's folders on disk and writes one
//! script per request.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::constants::{
    DEFAULT_FOLDER_NAME, DEFAULT_REQUEST_NAME, DEFAULT_SHEBANG, SCRIPT_EXTENSION,
};
use crate::curl::to_curl;
use crate::error::SkipReason;
use crate::models::{node_name, CollectionNode, RequestSpec};
use crate::sanitize::sanitize_or;

/// Knobs for the generated scripts
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub shebang: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            shebang: String::from(DEFAULT_SHEBANG),
        }
    }
}

/// A node that produced no output, and why
#[derive(Debug)]
pub struct SkippedItem {
    pub name: String,
    /// Directory the node would have been written into
    pub location: PathBuf,
    pub reason: SkipReason,
}

/// What a finished walk produced
#[derive(Debug)]
pub struct ExportReport {
    pub collection_name: String,
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub folders: usize,
    pub skipped: Vec<SkippedItem>,
}

/// Depth-first walker over one collection.
///
/// Failures are recorded per node; the walk itself never fails.
pub struct Walker<'o> {
    options: &'o ExportOptions,
    report: ExportReport,
}

impl<'o> Walker<'o> {
    pub fn new(
        collection_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        options: &'o ExportOptions,
    ) -> Self {
        Walker {
            options,
            report: ExportReport {
                collection_name: collection_name.into(),
                output_dir: output_dir.into(),
                written: Vec::new(),
                folders: 0,
                skipped: Vec::new(),
            },
        }
    }

    /// Visit `nodes` in order, writing into `dest`
    pub fn walk(&mut self, nodes: &[Value], dest: &Path) {
        for node in nodes {
            self.visit(node, dest);
        }
    }

    pub fn finish(self) -> ExportReport {
        self.report
    }

    fn visit(&mut self, node: &Value, dest: &Path) {
        match CollectionNode::classify(node) {
            Ok(CollectionNode::Folder { name, children }) => self.enter_folder(&name, children, dest),
            Ok(CollectionNode::Request { name, spec }) => self.export_request(&name, &spec, dest),
            Err(reason) => {
                let name = node_name(node, "<unnamed>").to_string();
                self.skip(name, dest, reason);
            }
        }
    }

    fn enter_folder(&mut self, name: &str, children: &[Value], dest: &Path) {
        tracing::info!(folder = %name, "Processing folder");

        let dir = dest.join(sanitize_or(name, DEFAULT_FOLDER_NAME));
        if let Err(source) = fs::create_dir_all(&dir) {
            tracing::error!(folder = %name, path = %dir.display(), error = %source, "Failed to create folder directory");
            self.skip(name.to_string(), dest, SkipReason::CreateDir { path: dir, source });
            return;
        }

        self.report.folders += 1;
        self.walk(children, &dir);
    }

    fn export_request(&mut self, name: &str, spec: &RequestSpec, dest: &Path) {
        tracing::info!(request = %name, "Processing request");

        let command = match to_curl(spec) {
            Ok(command) => command,
            Err(reason) => {
                self.skip(name.to_string(), dest, reason);
                return;
            }
        };

        let filename = format!("{}.{}", sanitize_or(name, DEFAULT_REQUEST_NAME), SCRIPT_EXTENSION);
        let path = dest.join(filename);
        let script = render_script(
            &self.options.shebang,
            &self.report.collection_name,
            name,
            &command,
        );

        match write_script(&path, &script) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Saved cURL command");
                self.report.written.push(path);
            }
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "Failed to write file");
                self.skip(name.to_string(), dest, SkipReason::Write { path, source });
            }
        }
    }

    fn skip(&mut self, name: String, dest: &Path, reason: SkipReason) {
        tracing::warn!(item = %name, dir = %dest.display(), reason = %reason, "Skipping item");
        self.report.skipped.push(SkippedItem {
            name,
            location: dest.to_path_buf(),
            reason,
        });
    }
}

/// Full text of one script file
pub fn render_script(shebang: &str, collection_name: &str, request_name: &str, command: &str) -> String {
    format!(
        "{}\n\n# Generated from Postman collection: {}\n# Request: {}\n\n{}\n",
        shebang,
        comment_safe(collection_name),
        comment_safe(request_name),
        command
    )
}

/// Keep a name on its comment line
fn comment_safe(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn write_script(path: &Path, script: &str) -> std::io::Result<()> {
    fs::write(path, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}
