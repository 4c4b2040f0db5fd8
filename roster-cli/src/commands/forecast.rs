use anyhow::Result;
use clap::{value_parser, Args, ValueEnum};

use roster_forecast::models::{
    ConfidenceLevel, ForecastConfig, RosterForecast, MAX_GRADUATION_YEAR, MIN_GRADUATION_YEAR,
};
use roster_forecast::services::ForecastService;

use super::current_year;
use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ForecastView {
    Scholarships,
    Graduation,
    Performance,
    Recruiting,
    All,
}

#[derive(Args)]
pub struct ForecastCommand {
    /// Which forecast to show
    #[arg(value_enum, default_value = "all")]
    view: ForecastView,

    /// Seasons to project (1-10)
    #[arg(short, long)]
    years: Option<u32>,

    /// Projection band: low, medium or high
    #[arg(short, long)]
    confidence: Option<ConfidenceLevel>,

    /// First projected season, defaults to the current year
    #[arg(long, value_parser = value_parser!(i32).range(i64::from(MIN_GRADUATION_YEAR)..=i64::from(MAX_GRADUATION_YEAR)))]
    base_year: Option<i32>,

    /// Print JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl ForecastCommand {
    /// Configured forecast inputs with the command-line overrides applied
    pub fn forecast_config(&self, config: &Config) -> ForecastConfig {
        let mut forecast = config.to_forecast_config(self.base_year.unwrap_or_else(current_year));
        if let Some(years) = self.years {
            forecast = forecast.with_horizon(years);
        }
        if let Some(confidence) = self.confidence {
            forecast = forecast.with_confidence(confidence);
        }
        forecast
    }

    pub async fn execute(self, config: &Config) -> Result<()> {
        let roster = RosterStore::from_config(config)?.load()?;
        let service = ForecastService::new(self.forecast_config(config))?;
        let forecast = service.generate(&roster);

        if self.json {
            println!("{}", self.to_json(&forecast)?);
            return Ok(());
        }

        match self.view {
            ForecastView::Scholarships => report::render_scholarship_forecast(&forecast.scholarships),
            ForecastView::Graduation => report::render_graduation_forecast(&forecast.graduation),
            ForecastView::Performance => report::render_performance_forecast(&forecast.performance),
            ForecastView::Recruiting => report::render_recruiting_forecast(&forecast.recruiting),
            ForecastView::All => report::render_forecast(&forecast),
        }

        Ok(())
    }

    fn to_json(&self, forecast: &RosterForecast) -> Result<String> {
        let json = match self.view {
            ForecastView::Scholarships => serde_json::to_string_pretty(&forecast.scholarships)?,
            ForecastView::Graduation => serde_json::to_string_pretty(&forecast.graduation)?,
            ForecastView::Performance => serde_json::to_string_pretty(&forecast.performance)?,
            ForecastView::Recruiting => serde_json::to_string_pretty(&forecast.recruiting)?,
            ForecastView::All => serde_json::to_string_pretty(forecast)?,
        };
        Ok(json)
    }
}
