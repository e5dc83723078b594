//! On-disk chart record loaded into the chart on start and saved on change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{ChartSnapshot, ToothId};

/// Persisted chart contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Selected teeth in selection order
    #[serde(default)]
    pub selection: Vec<ToothId>,
    /// Summary per selected tooth
    #[serde(default)]
    pub summaries: BTreeMap<ToothId, String>,
    /// When the record was last written
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChartRecord {
    /// Load a record, returning an empty one when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart record: {}", path.display()))?;

        let record: ChartRecord = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse chart record: {}", path.display()))?;

        Ok(record)
    }

    /// Write the record, stamping `updated_at`
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create record directory: {}", parent.display()))?;
        }

        self.updated_at = Some(Utc::now());
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize chart record")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write chart record: {}", path.display()))?;

        Ok(())
    }

    /// Default record location under the user data directory
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join("odontogram").join("chart.json"))
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            selection: self.selection.clone(),
            summaries: self.summaries.clone(),
        }
    }

    /// Replace the chart contents, keeping the previous timestamp until saved
    pub fn update(&mut self, snapshot: ChartSnapshot) {
        self.selection = snapshot.selection;
        self.summaries = snapshot.summaries;
    }
}
