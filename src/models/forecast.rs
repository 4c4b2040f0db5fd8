use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::athlete::{EventGroup, MAX_GRADUATION_YEAR, MIN_GRADUATION_YEAR};
use super::graduation::GraduationForecast;
use super::performance::PerformanceForecast;
use super::recruiting::RecruitingForecast;
use super::scholarship::{ScholarshipForecast, ScholarshipPolicy};
use crate::error::{Result, RosterError};

pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 10;
pub const DEFAULT_HORIZON_YEARS: u32 = 4;

/// How wide the low/high band around each projection is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Relative half-width of the projection band
    pub fn band(&self) -> f64 {
        match self {
            ConfidenceLevel::Low => 0.20,
            ConfidenceLevel::Medium => 0.10,
            ConfidenceLevel::High => 0.05,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "Low"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for ConfidenceLevel {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ConfidenceLevel::Low),
            "medium" | "med" => Ok(ConfidenceLevel::Medium),
            "high" => Ok(ConfidenceLevel::High),
            _ => Err(RosterError::invalid_config(
                "confidence",
                format!("unknown confidence level '{}'", s),
            )),
        }
    }
}

/// A projected value with its confidence band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub expected: f64,
    pub low: f64,
    pub high: f64,
}

impl Projection {
    pub fn new(expected: f64, confidence: ConfidenceLevel) -> Self {
        let band = confidence.band();
        let a = expected * (1.0 - band);
        let b = expected * (1.0 + band);
        Self {
            expected,
            low: a.min(b),
            high: a.max(b),
        }
    }
}

/// Desired athletes per event group, applied to each gender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitingTargets {
    pub sprints: u32,
    pub hurdles: u32,
    pub distance: u32,
    pub jumps: u32,
    pub throws: u32,
    pub multi_events: u32,
}

impl Default for RecruitingTargets {
    fn default() -> Self {
        Self {
            sprints: 6,
            hurdles: 3,
            distance: 8,
            jumps: 4,
            throws: 4,
            multi_events: 2,
        }
    }
}

impl RecruitingTargets {
    pub fn target_for(&self, group: EventGroup) -> u32 {
        match group {
            EventGroup::Sprints => self.sprints,
            EventGroup::Hurdles => self.hurdles,
            EventGroup::Distance => self.distance,
            EventGroup::Jumps => self.jumps,
            EventGroup::Throws => self.throws,
            EventGroup::MultiEvents => self.multi_events,
        }
    }
}

/// Inputs shared by every forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub base_year: i32,
    pub horizon_years: u32,
    pub confidence: ConfidenceLevel,
    pub policy: ScholarshipPolicy,
    pub targets: RecruitingTargets,
}

impl ForecastConfig {
    pub fn new(base_year: i32) -> Self {
        Self {
            base_year,
            horizon_years: DEFAULT_HORIZON_YEARS,
            confidence: ConfidenceLevel::default(),
            policy: ScholarshipPolicy::default(),
            targets: RecruitingTargets::default(),
        }
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    pub fn with_confidence(mut self, confidence: ConfidenceLevel) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_policy(mut self, policy: ScholarshipPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_targets(mut self, targets: RecruitingTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Calendar years covered, paired with their offset from the base year
    pub fn years(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        (0..self.horizon_years).map(move |k| (k, self.base_year + k as i32))
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(&self.base_year) {
            return Err(RosterError::invalid_config(
                "base_year",
                format!(
                    "{} is outside {}-{}",
                    self.base_year, MIN_GRADUATION_YEAR, MAX_GRADUATION_YEAR
                ),
            ));
        }
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(RosterError::invalid_config(
                "horizon_years",
                format!(
                    "{} is outside {}-{}",
                    self.horizon_years, MIN_HORIZON_YEARS, MAX_HORIZON_YEARS
                ),
            ));
        }
        self.policy.validate()
    }
}

/// Every forecast view for one roster and configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterForecast {
    pub generated_at: DateTime<Utc>,
    pub base_year: i32,
    pub horizon_years: u32,
    pub confidence: ConfidenceLevel,
    pub athletes_considered: usize,
    pub scholarships: ScholarshipForecast,
    pub graduation: GraduationForecast,
    pub performance: PerformanceForecast,
    pub recruiting: RecruitingForecast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_band() {
        let projection = Projection::new(100.0, ConfidenceLevel::Low);
        assert_eq!(projection.expected, 100.0);
        assert!((projection.low - 80.0).abs() < 1e-9);
        assert!((projection.high - 120.0).abs() < 1e-9);

        let narrow = Projection::new(100.0, ConfidenceLevel::High);
        assert!(narrow.high - narrow.low < projection.high - projection.low);
    }

    #[test]
    fn test_years_iterator() {
        let config = ForecastConfig::new(2025).with_horizon(3);
        let years: Vec<(u32, i32)> = config.years().collect();
        assert_eq!(years, vec![(0, 2025), (1, 2026), (2, 2027)]);
    }

    #[test]
    fn test_horizon_validation() {
        assert!(ForecastConfig::new(2025).validate().is_ok());
        assert!(ForecastConfig::new(2025).with_horizon(0).validate().is_err());
        assert!(ForecastConfig::new(2025).with_horizon(11).validate().is_err());
    }

    #[test]
    fn test_base_year_validation() {
        let err = ForecastConfig::new(i32::MAX).with_horizon(2).validate().unwrap_err();
        assert!(err.to_string().contains("base_year"));
        assert!(ForecastConfig::new(i32::MIN).validate().is_err());
        assert!(ForecastConfig::new(2100).with_horizon(10).validate().is_ok());
    }

    #[test]
    fn test_confidence_parsing() {
        assert_eq!("HIGH".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::High);
        assert_eq!("med".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::Medium);
        assert!("certain".parse::<ConfidenceLevel>().is_err());
    }

    #[test]
    fn test_default_targets() {
        let targets = RecruitingTargets::default();
        let total: u32 = EventGroup::ALL.iter().map(|g| targets.target_for(*g)).sum();
        assert_eq!(total, 27);
    }
}
