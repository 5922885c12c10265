// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub capture: CaptureOptions,
    pub export: ExportOptions,
}

/// Where a capture comes from on the command line / viewer toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Whole HTML document: inline `<script>` scan
    Html,
    /// Captured network response body
    Body,
    /// One tagged queue string per line
    Flight,
    /// Fetched over HTTP, then scanned as a document and a body
    Url,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureInput {
    pub kind: InputKind,
    pub source: String,
}

impl CaptureInput {
    pub fn new(kind: InputKind, source: impl Into<String>) -> Self {
        Self { kind, source: source.into() }
    }

    /// Guess the input kind from a file extension (viewer toolbar).
    pub fn guess(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        let kind = if lower.starts_with("http://") {
            InputKind::Url
        } else if lower.ends_with(".html") || lower.ends_with(".htm") {
            InputKind::Html
        } else if lower.ends_with(".flight") || lower.ends_with(".txt") {
            InputKind::Flight
        } else {
            InputKind::Body
        };
        Self::new(kind, path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Browsing context the captures belong to
    pub tab_id: u64,
    pub inputs: Vec<CaptureInput>,
    /// Persist the context snapshot through the coordinator
    pub save: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self { tab_id: 0, inputs: Vec::new(), save: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Json => "json" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(&*stem, ".", self.format.ext()));
        path
    }

    /// Parse GUI/CLI text into dir + stem. Ignores pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }

        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
