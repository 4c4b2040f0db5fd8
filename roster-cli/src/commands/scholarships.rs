use anyhow::Result;
use clap::Args;

use roster_forecast::services::ScholarshipService;

use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::report::render_allocations;

#[derive(Args)]
pub struct ScholarshipsCommand {
    /// Print JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl ScholarshipsCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let roster = RosterStore::from_config(config)?.load()?;
        let allocations = ScholarshipService::new(config.scholarship_policy()).allocation_summary(&roster);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&allocations)?);
        } else {
            render_allocations(&allocations);
        }

        Ok(())
    }
}
