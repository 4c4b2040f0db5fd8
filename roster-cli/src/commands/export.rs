use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use roster_forecast::services::RosterCsvService;

use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::widgets::render_success;

#[derive(Args)]
pub struct ExportCommand {
    /// CSV file to write
    file: PathBuf,
}

impl ExportCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let roster = RosterStore::from_config(config)?.load()?;

        RosterCsvService::new().export_path(roster.athletes(), &self.file)?;

        render_success(&format!(
            "Exported {} athletes to {}",
            roster.len(),
            self.file.display()
        ));
        Ok(())
    }
}
