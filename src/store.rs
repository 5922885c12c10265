// src/store.rs
use std::{collections::BTreeMap, error::Error, fs, io, path::{Path, PathBuf}};

use crate::bus::TabId;
use crate::config::consts::{CONTEXTS_SUBDIR, STORE_DIR};
use crate::model::NormalizedRecord;

/// On-disk snapshot per context: `<dir>/tab_<id>.json`.
#[derive(Clone, Debug)]
pub struct Store {
    dir: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(PathBuf::from(STORE_DIR).join(CONTEXTS_SUBDIR))
    }
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, tab: TabId) -> PathBuf {
        self.dir.join(format!("tab_{tab}.json"))
    }

    pub fn save_context(&self, tab: TabId, items: &[NormalizedRecord]) -> io::Result<PathBuf> {
        let p = self.path_for(tab);

        // Ensure parent directories exist
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(items)?;
        fs::write(&p, json)?;
        Ok(p)
    }

    pub fn load_context(&self, tab: TabId) -> Result<Vec<NormalizedRecord>, Box<dyn Error>> {
        let text = fs::read_to_string(self.path_for(tab))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Missing files are fine.
    pub fn remove_context(&self, tab: TabId) -> io::Result<()> {
        match fs::remove_file(self.path_for(tab)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Ids of all stored contexts, ascending.
    pub fn list_contexts(&self) -> Vec<TabId> {
        let Ok(entries) = fs::read_dir(&self.dir) else { return Vec::new() };
        let mut ids: Vec<TabId> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                name.strip_prefix("tab_")?.strip_suffix(".json")?.parse().ok()
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Everything readable; broken files are logged and skipped.
    pub fn load_all(&self) -> BTreeMap<TabId, Vec<NormalizedRecord>> {
        let mut out = BTreeMap::new();
        for tab in self.list_contexts() {
            match self.load_context(tab) {
                Ok(items) => { out.insert(tab, items); }
                Err(e) => loge!("Store: tab {tab} unreadable ({e}), skipping"),
            }
        }
        out
    }
}
