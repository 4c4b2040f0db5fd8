use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::athlete::{ClassYear, EventGroup, Gender, Tier};
use super::forecast::Projection;
use super::mark::Mark;

/// Projected development of the team and of each athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceForecast {
    pub years: Vec<PerformanceYear>,
    pub athletes: Vec<AthleteProjection>,
}

/// Team-level view of one projected season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceYear {
    pub year: i32,
    pub enrolled_athletes: usize,
    pub tier_distribution: BTreeMap<Tier, usize>,
    pub average_tier_score: Option<f64>,
    pub team_strength: Projection, // sum of projected tier weights
    pub projected_promotions: usize, // athletes above their current tier
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProjection {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub event_group: EventGroup,
    pub primary_event: String,
    pub current_tier: Tier,
    pub personal_best: Option<Mark>,
    pub seasons: Vec<SeasonProjection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonProjection {
    pub year: i32,
    pub class_year: ClassYear,
    pub tier_score: f64,
    pub projected_tier: Tier,
    pub projected_mark: Option<Mark>,
    pub conservative_mark: Option<Mark>,
    pub optimistic_mark: Option<Mark>,
}

impl AthleteProjection {
    /// Projection for the final season the athlete is on the roster
    pub fn final_season(&self) -> Option<&SeasonProjection> {
        self.seasons.last()
    }
}
