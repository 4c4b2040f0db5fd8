use anyhow::Result;
use clap::{value_parser, Args};

use roster_forecast::models::{MAX_GRADUATION_YEAR, MIN_GRADUATION_YEAR};
use roster_forecast::services::{RosterStatsService, ScholarshipService};

use super::current_year;
use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::report::render_stats;

#[derive(Args)]
pub struct StatsCommand {
    /// Season used for class years
    #[arg(long, value_parser = value_parser!(i32).range(i64::from(MIN_GRADUATION_YEAR)..=i64::from(MAX_GRADUATION_YEAR)))]
    year: Option<i32>,

    /// Print JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl StatsCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let roster = RosterStore::from_config(config)?.load()?;
        let year = self.year.unwrap_or_else(current_year);

        let stats = RosterStatsService::new(config.scholarship_policy(), config.academic_thresholds())
            .summarize(&roster, year);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        let allocations = ScholarshipService::new(config.scholarship_policy()).allocation_summary(&roster);
        render_stats(&stats, &allocations);

        Ok(())
    }
}
