use crate::entry::HistoryEntry;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const RECORD_NAME: &str = "clipboard-history.json";

#[derive(Serialize, Deserialize, Default)]
struct Record {
    history: Vec<HistoryEntry>,
}

/// Durable home of the history list: one JSON record in a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(RECORD_NAME),
        }
    }

    /// The platform data directory joined with `clipkeep`
    /// (`$XDG_DATA_HOME/clipkeep` on Linux).
    pub fn default_dir() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("no data directory")?
            .join("clipkeep"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable record is an empty history, never an error.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                log::info!("[store] no history at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(err) => {
                log::warn!("[store] ignoring unreadable history: {err:?}");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Vec<HistoryEntry>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let record: Record = serde_json::from_str(&content)
            .with_context(|| format!("invalid history format in {}", self.path.display()))?;
        Ok(Some(record.history))
    }

    /// Writes to a sibling temp file and renames it over the record, so a
    /// crash mid-write leaves the previous record intact.
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let record = Record {
            history: entries.to_vec(),
        };
        let content = serde_json::to_string(&record).context("failed to serialize history")?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
