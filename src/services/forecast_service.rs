use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::models::{ForecastConfig, Roster, RosterForecast};
use crate::services::{
    GraduationForecastService, PerformanceProjectionService, RecruitingForecastService,
    ScholarshipService,
};

/// Service producing every forecast view for a roster in one pass
#[derive(Debug, Clone)]
pub struct ForecastService {
    config: ForecastConfig,
    scholarship_service: ScholarshipService,
    graduation_service: GraduationForecastService,
    performance_service: PerformanceProjectionService,
    recruiting_service: RecruitingForecastService,
}

impl ForecastService {
    /// Create a new ForecastService, rejecting an invalid configuration
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        let scholarship_service = ScholarshipService::new(config.policy.clone());
        let graduation_service = GraduationForecastService::new(config.policy.clone());

        Ok(Self {
            config,
            scholarship_service,
            graduation_service,
            performance_service: PerformanceProjectionService::new(),
            recruiting_service: RecruitingForecastService::new(),
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Generate the scholarship, graduation, performance and recruiting forecasts
    pub fn generate(&self, roster: &Roster) -> RosterForecast {
        info!(
            "Generating {}-year forecast from {} at {} confidence",
            self.config.horizon_years, self.config.base_year, self.config.confidence
        );

        let scholarships = self.scholarship_service.forecast(roster, &self.config);
        let graduation = self.graduation_service.forecast(roster, &self.config);
        let performance = self.performance_service.forecast(roster, &self.config);
        let recruiting = self.recruiting_service.forecast(roster, &self.config);

        RosterForecast {
            generated_at: Utc::now(),
            base_year: self.config.base_year,
            horizon_years: self.config.horizon_years,
            confidence: self.config.confidence,
            athletes_considered: roster.active().count(),
            scholarships,
            graduation,
            performance,
            recruiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn test_rejects_invalid_horizon() {
        let result = ForecastService::new(ForecastConfig::new(2025).with_horizon(0));
        assert!(matches!(result, Err(RosterError::InvalidConfig { .. })));
    }

    #[test]
    fn test_empty_roster_forecast() {
        let service = ForecastService::new(ForecastConfig::new(2025).with_horizon(2)).unwrap();
        let forecast = service.generate(&Roster::new());

        assert_eq!(forecast.athletes_considered, 0);
        assert_eq!(forecast.scholarships.years.len(), 2);
        assert_eq!(forecast.graduation.total_departures, 0);
        assert!(forecast.performance.athletes.is_empty());
        // Every target is open on an empty roster, once
        assert_eq!(forecast.recruiting.total_recruits_needed, 27 * 2);
    }
}
