use tracing::{debug, info, warn};

use crate::error::{Result, RosterError};
use crate::models::{
    ForecastConfig, Gender, GenderAllocation, GenderScholarshipYear, Projection, Roster,
    ScholarshipForecast, ScholarshipPolicy, ScholarshipYear,
};

const LIMIT_EPSILON: f64 = 1e-9;

/// Service for scholarship allocation against NCAA equivalency limits
#[derive(Debug, Clone)]
pub struct ScholarshipService {
    policy: ScholarshipPolicy,
}

impl ScholarshipService {
    pub fn new(policy: ScholarshipPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScholarshipPolicy {
        &self.policy
    }

    /// Current allocation per gender, men first
    pub fn allocation_summary(&self, roster: &Roster) -> Vec<GenderAllocation> {
        Gender::ALL
            .iter()
            .map(|gender| {
                let on_aid: Vec<f64> = roster
                    .active()
                    .filter(|a| a.gender == *gender && a.scholarship_amount > 0.0)
                    .map(|a| a.scholarship_amount)
                    .collect();

                let total_dollars: f64 = on_aid.iter().sum();
                let equivalencies = equivalencies(total_dollars, self.policy.full_scholarship_value);
                let limit = self.policy.limit_for(*gender);

                GenderAllocation {
                    gender: *gender,
                    athletes_on_aid: on_aid.len(),
                    total_dollars,
                    equivalencies,
                    limit,
                    remaining: limit - equivalencies,
                    utilization_percentage: utilization(equivalencies, limit),
                    over_limit: equivalencies > limit + LIMIT_EPSILON,
                }
            })
            .collect()
    }

    /// Check that giving `athlete_id` the `proposed_amount` keeps their
    /// gender within its limit. Archived athletes hold no aid, so the check
    /// passes for them.
    pub fn check_allocation(
        &self,
        roster: &Roster,
        athlete_id: &str,
        proposed_amount: f64,
    ) -> Result<()> {
        let athlete = roster
            .get(athlete_id)
            .ok_or_else(|| RosterError::AthleteNotFound(athlete_id.to_string()))?;

        if !athlete.is_active() {
            return Ok(());
        }

        self.check_gender_total(
            roster,
            athlete.gender,
            Some(athlete_id),
            proposed_amount,
        )
    }

    /// Check a new athlete's aid before it is added to the roster
    pub fn check_new_allocation(
        &self,
        roster: &Roster,
        gender: Gender,
        proposed_amount: f64,
    ) -> Result<()> {
        self.check_gender_total(roster, gender, None, proposed_amount)
    }

    fn check_gender_total(
        &self,
        roster: &Roster,
        gender: Gender,
        replacing: Option<&str>,
        proposed_amount: f64,
    ) -> Result<()> {
        self.policy.validate()?;

        let others: f64 = roster
            .active()
            .filter(|a| a.gender == gender && Some(a.id.as_str()) != replacing)
            .map(|a| a.scholarship_amount)
            .sum();

        let requested = (others + proposed_amount) / self.policy.full_scholarship_value;
        let limit = self.policy.limit_for(gender);

        debug!(
            "{} allocation check: {:.3} of {:.3} equivalencies",
            gender, requested, limit
        );

        if requested > limit + LIMIT_EPSILON {
            warn!("{} allocation of {:.2} would exceed the limit", gender, requested);
            return Err(RosterError::ScholarshipLimitExceeded {
                gender,
                requested,
                limit,
            });
        }

        Ok(())
    }

    /// Project committed and available aid for each year of the horizon
    pub fn forecast(&self, roster: &Roster, config: &ForecastConfig) -> ScholarshipForecast {
        info!(
            "Forecasting scholarships for {} years from {}",
            config.horizon_years, config.base_year
        );

        let full_value = self.policy.full_scholarship_value;

        let years = config
            .years()
            .map(|(offset, year)| {
                let cost_factor = self.policy.cost_factor(offset);

                let by_gender: Vec<GenderScholarshipYear> = Gender::ALL
                    .iter()
                    .map(|gender| {
                        let enrolled: Vec<f64> = roster
                            .active()
                            .filter(|a| {
                                a.gender == *gender
                                    && a.is_enrolled_in(year)
                                    && a.scholarship_amount > 0.0
                            })
                            .map(|a| a.scholarship_amount)
                            .collect();

                        let base_dollars: f64 = enrolled.iter().sum();
                        let committed_equivalencies = base_dollars / full_value;
                        let limit = self.policy.limit_for(*gender);
                        let available_equivalencies = (limit - committed_equivalencies).max(0.0);

                        GenderScholarshipYear {
                            gender: *gender,
                            athletes_on_aid: enrolled.len(),
                            committed_equivalencies,
                            committed_dollars: base_dollars * cost_factor,
                            limit,
                            available_equivalencies,
                            available_dollars: available_equivalencies * full_value * cost_factor,
                            utilization_percentage: utilization(committed_equivalencies, limit),
                            over_limit: committed_equivalencies > limit + LIMIT_EPSILON,
                        }
                    })
                    .collect();

                let committed_dollars: f64 = by_gender.iter().map(|g| g.committed_dollars).sum();
                let available_dollars: f64 = by_gender.iter().map(|g| g.available_dollars).sum();

                ScholarshipYear {
                    year,
                    cost_factor,
                    by_gender,
                    committed_dollars,
                    available_dollars,
                    projected_spending: Projection::new(committed_dollars, config.confidence),
                }
            })
            .collect();

        ScholarshipForecast { years }
    }
}

fn utilization(equivalencies: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        equivalencies / limit * 100.0
    } else {
        0.0
    }
}

fn equivalencies(dollars: f64, full_scholarship_value: f64) -> f64 {
    if full_scholarship_value > 0.0 {
        dollars / full_scholarship_value
    } else {
        0.0
    }
}
