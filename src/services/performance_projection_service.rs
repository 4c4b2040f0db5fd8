use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::models::{
    Athlete, AthleteProjection, ForecastConfig, Mark, PerformanceForecast, PerformanceYear,
    Projection, Roster, SeasonProjection, Tier,
};

const MAX_TIER_SCORE: f64 = 4.0;

/// Service projecting tier development and marks season by season
#[derive(Debug, Clone, Default)]
pub struct PerformanceProjectionService;

impl PerformanceProjectionService {
    pub fn new() -> Self {
        Self
    }

    pub fn forecast(&self, roster: &Roster, config: &ForecastConfig) -> PerformanceForecast {
        info!(
            "Projecting performance for {} years from {}",
            config.horizon_years, config.base_year
        );

        let athletes: Vec<AthleteProjection> = roster
            .active()
            .filter(|a| a.graduation_year >= config.base_year)
            .map(|a| self.project_athlete(a, config))
            .collect();

        let years = config
            .years()
            .map(|(_, year)| self.team_year(&athletes, year, config))
            .collect();

        PerformanceForecast { years, athletes }
    }

    /// Seasons from the base year through graduation or the horizon end
    pub fn project_athlete(&self, athlete: &Athlete, config: &ForecastConfig) -> AthleteProjection {
        let band = config.confidence.band();
        let mut score = athlete.tier.score();
        let mut marks = athlete
            .performance
            .personal_best
            .map(|pb| (pb, pb, pb));
        let mut seasons = Vec::new();

        for (offset, year) in config.years() {
            if year > athlete.graduation_year {
                break;
            }

            let class_year = athlete.class_year(year);

            if offset > 0 {
                score = (score + class_year.development_gain()).min(MAX_TIER_SCORE);
            }
            let projected_tier = Tier::from_score(score);

            if offset > 0 {
                let rate = projected_tier.annual_improvement_rate();
                marks = marks.map(|(expected, conservative, optimistic)| {
                    (
                        expected.improved_by(rate),
                        conservative.improved_by(rate * (1.0 - band)),
                        optimistic.improved_by(rate * (1.0 + band)),
                    )
                });
            }

            seasons.push(SeasonProjection {
                year,
                class_year,
                tier_score: score,
                projected_tier,
                projected_mark: marks.map(|(m, _, _)| m),
                conservative_mark: marks.map(|(_, m, _)| m),
                optimistic_mark: marks.map(|(_, _, m)| m),
            });
        }

        debug!(
            "Projected {} seasons for {} ({})",
            seasons.len(),
            athlete.name,
            athlete.id
        );

        AthleteProjection {
            id: athlete.id.clone(),
            name: athlete.name.clone(),
            gender: athlete.gender,
            event_group: athlete.event_group,
            primary_event: athlete.performance.primary_event.clone(),
            current_tier: athlete.tier,
            personal_best: athlete.performance.personal_best,
            seasons,
        }
    }

    fn team_year(
        &self,
        athletes: &[AthleteProjection],
        year: i32,
        config: &ForecastConfig,
    ) -> PerformanceYear {
        let mut tier_distribution = BTreeMap::new();
        let mut strength = 0.0;
        let mut score_total = 0.0;
        let mut enrolled = 0;
        let mut promotions = 0;

        for athlete in athletes {
            let Some(season) = athlete.seasons.iter().find(|s| s.year == year) else {
                continue;
            };

            enrolled += 1;
            score_total += season.tier_score;
            strength += season.projected_tier.weight();
            *tier_distribution.entry(season.projected_tier).or_insert(0) += 1;

            if season.projected_tier.score() > athlete.current_tier.score() {
                promotions += 1;
            }
        }

        PerformanceYear {
            year,
            enrolled_athletes: enrolled,
            tier_distribution,
            average_tier_score: if enrolled > 0 {
                Some(score_total / enrolled as f64)
            } else {
                None
            },
            team_strength: Projection::new(strength, config.confidence),
            projected_promotions: promotions,
        }
    }
}

/// Projected mark for one athlete in `year`, if they have a personal best
pub fn projected_mark_for(projection: &AthleteProjection, year: i32) -> Option<Mark> {
    projection
        .seasons
        .iter()
        .find(|s| s.year == year)
        .and_then(|s| s.projected_mark)
}
