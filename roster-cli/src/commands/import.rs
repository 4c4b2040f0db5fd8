use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use roster_forecast::models::Roster;
use roster_forecast::services::{RosterCsvService, ScholarshipService};

use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::report::render_import_report;
use crate::ui::widgets::{render_success, render_warning};

#[derive(Args)]
pub struct ImportCommand {
    /// CSV file to read
    file: PathBuf,

    /// Replace the roster instead of merging by athlete ID
    #[arg(long)]
    replace: bool,

    /// Validate the file without saving anything
    #[arg(long)]
    dry_run: bool,
}

impl ImportCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let report = RosterCsvService::new().import_path(&self.file)?;

        println!(
            "Read {} rows from {}",
            report.rows_read,
            self.file.display()
        );
        render_import_report(&report);

        if report.athletes.is_empty() {
            bail!("No valid athletes in {}", self.file.display());
        }

        let store = RosterStore::from_config(config)?;
        let imported = report.athletes.len();

        let roster = if self.replace {
            Roster::from_athletes(report.athletes)?
        } else {
            let mut roster = store.load()?;
            for athlete in report.athletes {
                roster.upsert(athlete)?;
            }
            roster
        };

        let service = ScholarshipService::new(config.scholarship_policy());
        for allocation in service.allocation_summary(&roster) {
            if allocation.over_limit {
                render_warning(&format!(
                    "{} aid is {:.2} equivalencies, over the {:.2} limit",
                    allocation.gender, allocation.equivalencies, allocation.limit
                ));
            }
        }

        if self.dry_run {
            println!(
                "Dry run: {} athletes would be {}, roster would hold {}",
                imported,
                if self.replace { "loaded" } else { "merged" },
                roster.len()
            );
            return Ok(());
        }

        store.save(&roster)?;
        render_success(&format!(
            "Imported {} athletes into {} ({} total)",
            imported,
            store.path().display(),
            roster.len()
        ));

        Ok(())
    }
}
