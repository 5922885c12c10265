// src/file.rs

use std::{
    error::Error,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::to_csv;
use crate::model::NormalizedRecord;

/// Pretty JSON array (2-space indent).
pub fn to_json(records: &[NormalizedRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Render records in the configured format.
pub fn render(format: ExportFormat, records: &[NormalizedRecord]) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Json => to_json(records)?,
    })
}

/// Write one export file based on ExportOptions. Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    records: &[NormalizedRecord],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    fs::write(&path, render(export.format, records)?)?;
    logf!("Export: {} record(s) → {}", records.len(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Find the nearest existing parent folder by walking up the directory tree.
pub fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    loop {
        if current.is_dir() {
            return current;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return PathBuf::from("."),
        }
    }
}

/// Hand a folder or URL to the platform opener.
pub fn open_with_system(target: &OsStr) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(target)
            .spawn()
            .map_err(|e| format!("Failed to spawn explorer: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(target)
            .spawn()
            .map_err(|e| format!("Failed to spawn open: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(target)
            .spawn()
            .map_err(|e| format!("Failed to spawn xdg-open: {}", e))?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = target;
        Err("Opening folders not supported on this platform".to_string())
    }
}
