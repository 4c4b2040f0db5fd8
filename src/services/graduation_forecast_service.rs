use std::collections::BTreeMap;
use tracing::info;

use crate::models::{
    Athlete, DepartingAthlete, ForecastConfig, GraduationForecast, GraduationYearImpact,
    ImpactLevel, Projection, Roster, ScholarshipPolicy,
};

/// Service projecting what each graduating class takes off the roster
#[derive(Debug, Clone)]
pub struct GraduationForecastService {
    policy: ScholarshipPolicy,
}

impl GraduationForecastService {
    pub fn new(policy: ScholarshipPolicy) -> Self {
        Self { policy }
    }

    pub fn forecast(&self, roster: &Roster, config: &ForecastConfig) -> GraduationForecast {
        info!(
            "Forecasting graduation impact for {} years from {}",
            config.horizon_years, config.base_year
        );

        let years: Vec<GraduationYearImpact> = config
            .years()
            .map(|(_, year)| self.year_impact(roster, year, config))
            .collect();

        let total_departures = years.iter().map(|y| y.departing.len()).sum();

        GraduationForecast {
            years,
            total_departures,
        }
    }

    fn year_impact(&self, roster: &Roster, year: i32, config: &ForecastConfig) -> GraduationYearImpact {
        let departing: Vec<&Athlete> = roster
            .active()
            .filter(|a| a.graduation_year == year)
            .collect();

        let mut by_gender = BTreeMap::new();
        let mut by_event_group = BTreeMap::new();
        let mut by_tier = BTreeMap::new();

        for athlete in &departing {
            *by_gender.entry(athlete.gender).or_insert(0) += 1;
            *by_event_group.entry(athlete.event_group).or_insert(0) += 1;
            *by_tier.entry(athlete.tier).or_insert(0) += 1;
        }

        let scholarship_dollars_freed: f64 = departing.iter().map(|a| a.scholarship_amount).sum();
        let equivalencies_freed: f64 = departing
            .iter()
            .map(|a| a.equivalency(self.policy.full_scholarship_value))
            .sum();

        let average_departing_gpa = if departing.is_empty() {
            None
        } else {
            Some(departing.iter().map(|a| a.gpa).sum::<f64>() / departing.len() as f64)
        };

        let impact_score: f64 = departing.iter().map(|a| a.tier.weight()).sum();
        let returning_athletes = roster.active().filter(|a| a.graduation_year > year).count();

        GraduationYearImpact {
            year,
            departing: departing
                .iter()
                .map(|a| DepartingAthlete {
                    id: a.id.clone(),
                    name: a.name.clone(),
                    gender: a.gender,
                    event_group: a.event_group,
                    tier: a.tier,
                    scholarship_amount: a.scholarship_amount,
                })
                .collect(),
            by_gender,
            by_event_group,
            by_tier,
            scholarship_dollars_freed,
            equivalencies_freed,
            average_departing_gpa,
            impact_score,
            impact_level: ImpactLevel::from_score(impact_score),
            impact_projection: Projection::new(impact_score, config.confidence),
            returning_athletes,
        }
    }
}
