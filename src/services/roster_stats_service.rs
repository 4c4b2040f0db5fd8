use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use tracing::info;

use crate::models::{
    AcademicFlag, AcademicStanding, AcademicThresholds, Athlete, Gender, Roster, RosterStats,
    ScholarshipPolicy, Tier,
};

/// Service computing the roster overview shown on the dashboard
#[derive(Debug, Clone)]
pub struct RosterStatsService {
    policy: ScholarshipPolicy,
    thresholds: AcademicThresholds,
}

impl RosterStatsService {
    pub fn new(policy: ScholarshipPolicy, thresholds: AcademicThresholds) -> Self {
        Self { policy, thresholds }
    }

    /// Summarize composition, academics and aid for `reference_year`
    pub fn summarize(&self, roster: &Roster, reference_year: i32) -> RosterStats {
        info!("Summarizing roster of {} athletes", roster.len());

        let active: Vec<&Athlete> = roster.active().collect();

        let mut by_gender = BTreeMap::new();
        let mut by_tier = BTreeMap::new();
        let mut by_event_group = BTreeMap::new();
        let mut by_class_year = BTreeMap::new();
        let mut equivalencies_by_gender = BTreeMap::new();
        let mut scholarship_dollars_by_tier = BTreeMap::new();

        for athlete in &active {
            *by_gender.entry(athlete.gender).or_insert(0) += 1;
            *by_tier.entry(athlete.tier).or_insert(0) += 1;
            *by_event_group.entry(athlete.event_group).or_insert(0) += 1;
            *by_class_year
                .entry(athlete.class_year(reference_year))
                .or_insert(0) += 1;
            *equivalencies_by_gender.entry(athlete.gender).or_insert(0.0) +=
                athlete.equivalency(self.policy.full_scholarship_value);
            *scholarship_dollars_by_tier.entry(athlete.tier).or_insert(0.0) +=
                athlete.scholarship_amount;
        }

        let gpas: Vec<f64> = active.iter().map(|a| a.gpa).collect();
        let average_gpa = average(&gpas);
        let gpa_std_dev = if gpas.len() > 1 {
            Some(gpas.iter().std_dev())
        } else {
            None
        };

        let average_gpa_by_gender = Gender::ALL
            .iter()
            .filter_map(|gender| {
                let values: Vec<f64> = active
                    .iter()
                    .filter(|a| a.gender == *gender)
                    .map(|a| a.gpa)
                    .collect();
                average(&values).map(|avg| (*gender, avg))
            })
            .collect();

        let average_gpa_by_tier = Tier::ALL
            .iter()
            .filter_map(|tier| {
                let values: Vec<f64> = active
                    .iter()
                    .filter(|a| a.tier == *tier)
                    .map(|a| a.gpa)
                    .collect();
                average(&values).map(|avg| (*tier, avg))
            })
            .collect();

        RosterStats {
            reference_year,
            total_athletes: roster.len(),
            active_athletes: active.len(),
            archived_athletes: roster.len() - active.len(),
            by_gender,
            by_tier,
            by_event_group,
            by_class_year,
            average_gpa,
            gpa_std_dev,
            average_gpa_by_gender,
            average_gpa_by_tier,
            academic_watch_list: self.academic_watch_list(&active),
            total_scholarship_dollars: active.iter().map(|a| a.scholarship_amount).sum(),
            equivalencies_by_gender,
            scholarship_dollars_by_tier,
        }
    }

    /// Active athletes under the GPA lines, lowest GPA first
    fn academic_watch_list(&self, active: &[&Athlete]) -> Vec<AcademicFlag> {
        let mut flags: Vec<AcademicFlag> = active
            .iter()
            .filter_map(|athlete| {
                let level = if athlete.gpa < self.thresholds.risk_gpa {
                    AcademicStanding::AtRisk
                } else if athlete.gpa < self.thresholds.watch_gpa {
                    AcademicStanding::Watch
                } else {
                    return None;
                };

                Some(AcademicFlag {
                    id: athlete.id.clone(),
                    name: athlete.name.clone(),
                    gpa: athlete.gpa,
                    level,
                })
            })
            .collect();

        flags.sort_by(|a, b| a.gpa.total_cmp(&b.gpa));
        flags
    }
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().mean())
    }
}
