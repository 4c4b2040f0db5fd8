// Local roster storage backed by a single CSV file in the import schema

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use roster_forecast::models::Roster;
use roster_forecast::services::RosterCsvService;

use crate::config::Config;

/// Storage manager for the roster file
pub struct RosterStore {
    path: PathBuf,
    csv: RosterCsvService,
}

impl RosterStore {
    /// Open the roster file the configuration points at
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.roster_path()?))
    }

    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            csv: RosterCsvService::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the roster, or an empty one when nothing has been saved yet
    pub fn load(&self) -> Result<Roster> {
        if !self.exists() {
            tracing::info!("No roster at {:?}, starting empty", self.path);
            return Ok(Roster::new());
        }

        let report = self
            .csv
            .import_path(&self.path)
            .with_context(|| format!("Failed to read roster file {}", self.path.display()))?;

        if !report.is_clean() {
            let details: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "Roster file {} has invalid rows:\n  {}",
                self.path.display(),
                details.join("\n  ")
            );
        }

        let roster = Roster::from_athletes(report.athletes)
            .with_context(|| format!("Roster file {} is inconsistent", self.path.display()))?;

        tracing::debug!("Loaded {} athletes from {:?}", roster.len(), self.path);
        Ok(roster)
    }

    /// Write the whole roster, replacing the file only once the write succeeded
    pub fn save(&self, roster: &Roster) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create roster directory")?;
            }
        }

        let staging = self.path.with_extension("csv.tmp");
        self.csv
            .export_path(roster.athletes(), &staging)
            .context("Failed to write roster file")?;
        fs::rename(&staging, &self.path).context("Failed to replace roster file")?;

        tracing::debug!("Saved {} athletes to {:?}", roster.len(), self.path);
        Ok(())
    }
}
