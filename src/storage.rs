//! File helpers for hosts
//!
//! The engine itself keeps no state. Hosts that want the view toggles to
//! survive restarts can use [`Storage`]; [`load_snapshot`] reads a project
//! snapshot exported from the project endpoint.

use crate::timeline::{ProjectRecord, TimelineViewState};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML snapshot of project records (`[[projects]]` tables)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSnapshot {
    pub projects: Vec<ProjectRecord>,
}

/// Load a project snapshot from a TOML file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<ProjectRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project snapshot {}", path.display()))?;
    let snapshot: ProjectSnapshot = toml::from_str(&content)
        .with_context(|| format!("Invalid project snapshot {}", path.display()))?;
    Ok(snapshot.projects)
}

/// Persists [`TimelineViewState`] as a TOML file
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the view state, or the default one if the file does not exist yet
    pub fn load(&self) -> Result<TimelineViewState> {
        if !self.file_path.exists() {
            return Ok(TimelineViewState::default());
        }

        let content = fs::read_to_string(&self.file_path).with_context(|| {
            format!("Failed to read view state file {}", self.file_path.display())
        })?;
        let view: TimelineViewState = toml::from_str(&content)
            .with_context(|| format!("Invalid view state file {}", self.file_path.display()))?;
        Ok(view)
    }

    pub fn save(&self, view: &TimelineViewState) -> Result<()> {
        let content = toml::to_string_pretty(view)?;
        fs::write(&self.file_path, content).with_context(|| {
            format!("Failed to write view state file {}", self.file_path.display())
        })?;
        Ok(())
    }
}
