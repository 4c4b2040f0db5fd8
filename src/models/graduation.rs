use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::athlete::{EventGroup, Gender, Tier};
use super::forecast::Projection;

/// Graduation impact across the forecast horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationForecast {
    pub years: Vec<GraduationYearImpact>,
    pub total_departures: usize,
}

/// Who leaves after one season and what the team loses with them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationYearImpact {
    pub year: i32,
    pub departing: Vec<DepartingAthlete>,
    pub by_gender: BTreeMap<Gender, usize>,
    pub by_event_group: BTreeMap<EventGroup, usize>,
    pub by_tier: BTreeMap<Tier, usize>,
    pub scholarship_dollars_freed: f64,
    pub equivalencies_freed: f64,
    pub average_departing_gpa: Option<f64>,
    pub impact_score: f64, // sum of departing tier weights
    pub impact_level: ImpactLevel,
    pub impact_projection: Projection,
    pub returning_athletes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartingAthlete {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub event_group: EventGroup,
    pub tier: Tier,
    pub scholarship_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    None,
    Moderate,
    Significant,
    Severe,
}

impl ImpactLevel {
    pub fn from_score(score: f64) -> Self {
        if score <= 0.0 {
            ImpactLevel::None
        } else if score < 2.0 {
            ImpactLevel::Moderate
        } else if score < 4.0 {
            ImpactLevel::Significant
        } else {
            ImpactLevel::Severe
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::None => write!(f, "None"),
            ImpactLevel::Moderate => write!(f, "Moderate"),
            ImpactLevel::Significant => write!(f, "Significant"),
            ImpactLevel::Severe => write!(f, "Severe"),
        }
    }
}
