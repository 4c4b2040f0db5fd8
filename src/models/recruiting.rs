use serde::{Deserialize, Serialize};

use super::athlete::{EventGroup, Gender};
use super::forecast::Projection;

/// Recruiting needs per season, event group and gender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitingForecast {
    pub needs: Vec<RecruitingNeed>,
    pub budgets: Vec<RecruitingBudget>,
    pub total_recruits_needed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitingNeed {
    pub year: i32,
    pub gender: Gender,
    pub event_group: EventGroup,
    pub target: u32,
    pub departures: u32,
    pub returning: u32,
    pub recruits_present: u32, // signed in earlier horizon years
    pub needed: u32,
    pub priority: RecruitingPriority,
}

/// Scholarship room for one recruiting class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitingBudget {
    pub year: i32,
    pub gender: Gender,
    pub available_equivalencies: f64,
    pub recruits_needed: u32,
    pub suggested_equivalency_per_recruit: f64,
    pub recruits_projection: Projection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitingPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RecruitingPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecruitingPriority::Low => write!(f, "Low"),
            RecruitingPriority::Medium => write!(f, "Medium"),
            RecruitingPriority::High => write!(f, "High"),
        }
    }
}
