use serde::{Deserialize, Serialize};

use super::athlete::Gender;
use super::forecast::Projection;
use crate::error::{Result, RosterError};

/// NCAA Division I track & field / cross country equivalency limits
pub const NCAA_MEN_LIMIT: f64 = 12.6;
pub const NCAA_WOMEN_LIMIT: f64 = 18.0;

/// Scholarship rules and costs used for allocation checks and projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipPolicy {
    pub full_scholarship_value: f64, // dollars per academic year
    pub men_limit: f64,              // equivalencies
    pub women_limit: f64,            // equivalencies
    pub annual_cost_increase: f64,   // 0.03 = 3% per year
}

impl Default for ScholarshipPolicy {
    fn default() -> Self {
        Self {
            full_scholarship_value: 30_000.0,
            men_limit: NCAA_MEN_LIMIT,
            women_limit: NCAA_WOMEN_LIMIT,
            annual_cost_increase: 0.03,
        }
    }
}

impl ScholarshipPolicy {
    pub fn limit_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Men => self.men_limit,
            Gender::Women => self.women_limit,
        }
    }

    /// Cost multiplier `years_out` seasons after the base year
    pub fn cost_factor(&self, years_out: u32) -> f64 {
        (1.0 + self.annual_cost_increase).powi(years_out as i32)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.full_scholarship_value.is_finite() || self.full_scholarship_value <= 0.0 {
            return Err(RosterError::invalid_config(
                "full_scholarship_value",
                "must be greater than zero",
            ));
        }
        for (name, limit) in [("men_limit", self.men_limit), ("women_limit", self.women_limit)] {
            if !limit.is_finite() || limit < 0.0 {
                return Err(RosterError::invalid_config(name, "must not be negative"));
            }
        }
        if !self.annual_cost_increase.is_finite() || self.annual_cost_increase <= -1.0 {
            return Err(RosterError::invalid_config(
                "annual_cost_increase",
                "must be greater than -1.0",
            ));
        }
        Ok(())
    }
}

/// Current allocation for one gender against its limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderAllocation {
    pub gender: Gender,
    pub athletes_on_aid: usize,
    pub total_dollars: f64,
    pub equivalencies: f64,
    pub limit: f64,
    pub remaining: f64, // negative when over the limit
    pub utilization_percentage: f64,
    pub over_limit: bool,
}

/// Multi-year scholarship spending forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipForecast {
    pub years: Vec<ScholarshipYear>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipYear {
    pub year: i32,
    pub cost_factor: f64,
    pub by_gender: Vec<GenderScholarshipYear>,
    pub committed_dollars: f64,
    pub available_dollars: f64,
    pub projected_spending: Projection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderScholarshipYear {
    pub gender: Gender,
    pub athletes_on_aid: usize,
    pub committed_equivalencies: f64,
    pub committed_dollars: f64,
    pub limit: f64,
    pub available_equivalencies: f64,
    pub available_dollars: f64,
    pub utilization_percentage: f64,
    pub over_limit: bool,
}
