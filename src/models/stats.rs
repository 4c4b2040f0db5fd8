use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::athlete::{ClassYear, EventGroup, Gender, Tier, MAX_GPA, MIN_GPA};
use crate::error::{Result, RosterError};

/// GPA lines for the academic watch list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicThresholds {
    pub risk_gpa: f64,
    pub watch_gpa: f64,
}

impl Default for AcademicThresholds {
    fn default() -> Self {
        Self {
            risk_gpa: 2.0,
            watch_gpa: 2.5,
        }
    }
}

impl AcademicThresholds {
    /// Both lines on the GPA scale, at-risk not above watch
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("risk_gpa", self.risk_gpa), ("watch_gpa", self.watch_gpa)] {
            if !value.is_finite() || !(MIN_GPA..=MAX_GPA).contains(&value) {
                return Err(RosterError::invalid_config(
                    name,
                    format!("{} is outside {:.1}-{:.1}", value, MIN_GPA, MAX_GPA),
                ));
            }
        }
        if self.risk_gpa > self.watch_gpa {
            return Err(RosterError::invalid_config(
                "risk_gpa",
                format!("{} is above watch_gpa {}", self.risk_gpa, self.watch_gpa),
            ));
        }
        Ok(())
    }
}

/// Dashboard overview of the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterStats {
    pub reference_year: i32,
    pub total_athletes: usize,
    pub active_athletes: usize,
    pub archived_athletes: usize,

    // Composition (active athletes)
    pub by_gender: BTreeMap<Gender, usize>,
    pub by_tier: BTreeMap<Tier, usize>,
    pub by_event_group: BTreeMap<EventGroup, usize>,
    pub by_class_year: BTreeMap<ClassYear, usize>,

    // Academics
    pub average_gpa: Option<f64>,
    pub gpa_std_dev: Option<f64>,
    pub average_gpa_by_gender: BTreeMap<Gender, f64>,
    pub average_gpa_by_tier: BTreeMap<Tier, f64>,
    pub academic_watch_list: Vec<AcademicFlag>,

    // Scholarships
    pub total_scholarship_dollars: f64,
    pub equivalencies_by_gender: BTreeMap<Gender, f64>,
    pub scholarship_dollars_by_tier: BTreeMap<Tier, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicFlag {
    pub id: String,
    pub name: String,
    pub gpa: f64,
    pub level: AcademicStanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicStanding {
    AtRisk,
    Watch,
}

impl std::fmt::Display for AcademicStanding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcademicStanding::AtRisk => write!(f, "At Risk"),
            AcademicStanding::Watch => write!(f, "Watch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_validation() {
        assert!(AcademicThresholds::default().validate().is_ok());

        let inverted = AcademicThresholds {
            risk_gpa: 3.0,
            watch_gpa: 2.5,
        };
        assert!(inverted.validate().unwrap_err().to_string().contains("risk_gpa"));

        let off_scale = AcademicThresholds {
            risk_gpa: 2.0,
            watch_gpa: 5.0,
        };
        assert!(off_scale.validate().is_err());

        let nan = AcademicThresholds {
            risk_gpa: f64::NAN,
            watch_gpa: 2.5,
        };
        assert!(nan.validate().is_err());
    }
}
