use std::collections::HashMap;
use tracing::{debug, info};

use crate::models::{
    Athlete, EventGroup, ForecastConfig, Gender, Projection, RecruitingBudget,
    RecruitingForecast, RecruitingNeed, RecruitingPriority, Roster, Tier,
};

/// Seasons a signed recruit is expected to stay on the roster
pub const RECRUIT_SEASONS: i32 = 4;

const HIGH_PRIORITY_NEED: u32 = 3;

/// A recruiting class signed after the season of `year`
#[derive(Debug, Clone, Copy)]
struct SignedClass {
    year: i32,
    recruits: u32,
    equivalency_per_recruit: f64,
}

impl SignedClass {
    /// Whether this class is still on the roster after the season of `year`
    fn present_after(&self, year: i32) -> bool {
        self.year < year && self.year + RECRUIT_SEASONS > year
    }
}

/// Service sizing the recruiting classes needed to hold roster targets
#[derive(Debug, Clone, Default)]
pub struct RecruitingForecastService;

impl RecruitingForecastService {
    pub fn new() -> Self {
        Self
    }

    pub fn forecast(&self, roster: &Roster, config: &ForecastConfig) -> RecruitingForecast {
        info!(
            "Forecasting recruiting needs for {} years from {}",
            config.horizon_years, config.base_year
        );

        let full_value = config.policy.full_scholarship_value;
        let mut signed_by_group: HashMap<(Gender, EventGroup), Vec<SignedClass>> = HashMap::new();
        let mut signed_by_gender: HashMap<Gender, Vec<SignedClass>> = HashMap::new();

        let mut needs = Vec::new();
        let mut budgets = Vec::new();

        for (_, year) in config.years() {
            for gender in Gender::ALL {
                let mut recruits_needed = 0;

                for group in EventGroup::ALL {
                    let in_group: Vec<&Athlete> = roster
                        .active()
                        .filter(|a| a.gender == gender && a.event_group == group)
                        .collect();

                    let departing: Vec<&&Athlete> = in_group
                        .iter()
                        .filter(|a| a.graduation_year == year)
                        .collect();
                    let returning = in_group.iter().filter(|a| a.graduation_year > year).count() as u32;

                    let history = signed_by_group.entry((gender, group)).or_default();
                    let recruits_present: u32 = history
                        .iter()
                        .filter(|c| c.present_after(year))
                        .map(|c| c.recruits)
                        .sum();

                    let target = config.targets.target_for(group);
                    let needed = target.saturating_sub(returning + recruits_present);

                    if needed > 0 {
                        history.push(SignedClass {
                            year,
                            recruits: needed,
                            equivalency_per_recruit: 0.0,
                        });
                    }

                    if departing.is_empty() && needed == 0 {
                        continue;
                    }

                    let key_departure = departing
                        .iter()
                        .any(|a| matches!(a.tier, Tier::Elite | Tier::Competitive));

                    let priority = if needed >= HIGH_PRIORITY_NEED || (key_departure && needed > 0) {
                        RecruitingPriority::High
                    } else if needed > 0 {
                        RecruitingPriority::Medium
                    } else {
                        RecruitingPriority::Low
                    };

                    debug!(
                        "{} {} {}: target {}, returning {}, needed {}",
                        year, gender, group, target, returning, needed
                    );

                    recruits_needed += needed;
                    needs.push(RecruitingNeed {
                        year,
                        gender,
                        event_group: group,
                        target,
                        departures: departing.len() as u32,
                        returning,
                        recruits_present,
                        needed,
                        priority,
                    });
                }

                // Aid left after returning athletes and earlier recruiting classes
                let returning_equivalencies: f64 = roster
                    .active()
                    .filter(|a| a.gender == gender && a.graduation_year > year)
                    .map(|a| a.equivalency(full_value))
                    .sum();

                let classes = signed_by_gender.entry(gender).or_default();
                let earmarked: f64 = classes
                    .iter()
                    .filter(|c| c.present_after(year))
                    .map(|c| c.recruits as f64 * c.equivalency_per_recruit)
                    .sum();

                let available_equivalencies = (config.policy.limit_for(gender)
                    - returning_equivalencies
                    - earmarked)
                    .max(0.0);

                let suggested_equivalency_per_recruit = if recruits_needed == 0 {
                    0.0
                } else {
                    (available_equivalencies / recruits_needed as f64).min(1.0)
                };

                if recruits_needed > 0 {
                    classes.push(SignedClass {
                        year,
                        recruits: recruits_needed,
                        equivalency_per_recruit: suggested_equivalency_per_recruit,
                    });
                }

                budgets.push(RecruitingBudget {
                    year,
                    gender,
                    available_equivalencies,
                    recruits_needed,
                    suggested_equivalency_per_recruit,
                    recruits_projection: Projection::new(recruits_needed as f64, config.confidence),
                });
            }
        }

        let total_recruits_needed = needs.iter().map(|n| n.needed).sum();

        RecruitingForecast {
            needs,
            budgets,
            total_recruits_needed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecruitingTargets;

    fn athlete(gender: Gender, group: EventGroup, tier: Tier, graduation_year: i32) -> Athlete {
        Athlete::new(
            format!("{} {} {}", gender, group, graduation_year),
            gender,
            group,
            tier,
            3.0,
            15_000.0,
            graduation_year,
        )
    }

    fn single_target(group: EventGroup, target: u32) -> RecruitingTargets {
        let mut targets = RecruitingTargets {
            sprints: 0,
            hurdles: 0,
            distance: 0,
            jumps: 0,
            throws: 0,
            multi_events: 0,
        };
        match group {
            EventGroup::Sprints => targets.sprints = target,
            EventGroup::Hurdles => targets.hurdles = target,
            EventGroup::Distance => targets.distance = target,
            EventGroup::Jumps => targets.jumps = target,
            EventGroup::Throws => targets.throws = target,
            EventGroup::MultiEvents => targets.multi_events = target,
        }
        targets
    }

    #[test]
    fn test_replaces_graduating_athletes_once() {
        let roster = Roster::from_athletes(vec![
            athlete(Gender::Men, EventGroup::Jumps, Tier::Elite, 2025),
            athlete(Gender::Men, EventGroup::Jumps, Tier::Developing, 2026),
            athlete(Gender::Men, EventGroup::Jumps, Tier::Developing, 2027),
        ])
        .unwrap();
        let config = ForecastConfig::new(2025)
            .with_horizon(3)
            .with_targets(single_target(EventGroup::Jumps, 3));

        let forecast = RecruitingForecastService::new().forecast(&roster, &config);
        let men_jumps: Vec<&RecruitingNeed> = forecast
            .needs
            .iter()
            .filter(|n| n.gender == Gender::Men && n.event_group == EventGroup::Jumps)
            .collect();

        assert_eq!(men_jumps.len(), 3);

        // 2025: elite leaves, two return, one needed
        assert_eq!(men_jumps[0].needed, 1);
        assert_eq!(men_jumps[0].returning, 2);
        assert_eq!(men_jumps[0].priority, RecruitingPriority::High);

        // 2026: one returns plus the 2025 recruit, one more needed
        assert_eq!(men_jumps[1].recruits_present, 1);
        assert_eq!(men_jumps[1].needed, 1);
        assert_eq!(men_jumps[1].priority, RecruitingPriority::Medium);

        // 2027: nobody returns, two earlier recruits remain
        assert_eq!(men_jumps[2].returning, 0);
        assert_eq!(men_jumps[2].recruits_present, 2);
        assert_eq!(men_jumps[2].needed, 1);

        assert_eq!(forecast.total_recruits_needed, 3);
    }

    #[test]
    fn test_full_roster_needs_nothing() {
        let roster = Roster::from_athletes(vec![
            athlete(Gender::Women, EventGroup::Throws, Tier::Prospect, 2030),
            athlete(Gender::Women, EventGroup::Throws, Tier::Prospect, 2030),
        ])
        .unwrap();
        let config = ForecastConfig::new(2025)
            .with_horizon(4)
            .with_targets(single_target(EventGroup::Throws, 2));

        let forecast = RecruitingForecastService::new().forecast(&roster, &config);

        let women_throws_needed: u32 = forecast
            .needs
            .iter()
            .filter(|n| n.gender == Gender::Women)
            .map(|n| n.needed)
            .sum();
        assert_eq!(women_throws_needed, 0);
    }

    #[test]
    fn test_budget_split_between_recruits() {
        let roster = Roster::from_athletes(vec![
            athlete(Gender::Women, EventGroup::Sprints, Tier::Competitive, 2025),
            athlete(Gender::Women, EventGroup::Sprints, Tier::Competitive, 2025),
        ])
        .unwrap();
        let mut config = ForecastConfig::new(2025)
            .with_horizon(1)
            .with_targets(single_target(EventGroup::Sprints, 4));
        config.policy.women_limit = 2.0;

        let forecast = RecruitingForecastService::new().forecast(&roster, &config);
        let budget = forecast
            .budgets
            .iter()
            .find(|b| b.gender == Gender::Women)
            .unwrap();

        assert_eq!(budget.recruits_needed, 4);
        assert!((budget.available_equivalencies - 2.0).abs() < 1e-9);
        assert!((budget.suggested_equivalency_per_recruit - 0.5).abs() < 1e-9);

        let need = forecast
            .needs
            .iter()
            .find(|n| n.gender == Gender::Women)
            .unwrap();
        assert_eq!(need.priority, RecruitingPriority::High);
        assert_eq!(need.departures, 2);
    }

    #[test]
    fn test_signed_class_window() {
        let class = SignedClass {
            year: 2025,
            recruits: 2,
            equivalency_per_recruit: 0.5,
        };
        assert!(!class.present_after(2025));
        assert!(class.present_after(2026));
        assert!(class.present_after(2028));
        assert!(!class.present_after(2029));
    }
}
