// Shared roster fixtures for integration tests

#![allow(dead_code)]

use roster_forecast::models::{Athlete, EventGroup, Gender, Mark, Roster, Tier};

pub const BASE_YEAR: i32 = 2025;

pub fn athlete(
    name: &str,
    gender: Gender,
    event_group: EventGroup,
    tier: Tier,
    gpa: f64,
    scholarship_amount: f64,
    graduation_year: i32,
) -> Athlete {
    Athlete::new(
        name.to_string(),
        gender,
        event_group,
        tier,
        gpa,
        scholarship_amount,
        graduation_year,
    )
}

/// A small two-gender squad spread across classes and event groups
pub fn sample_roster() -> Roster {
    let athletes = vec![
        athlete("Marcus Hill", Gender::Men, EventGroup::Sprints, Tier::Elite, 3.2, 30_000.0, 2025)
            .with_primary_event("100m")
            .with_personal_best(Mark::time(10.21))
            .with_ranking(Some(1), Some(12)),
        athlete("Devon Park", Gender::Men, EventGroup::Sprints, Tier::Developing, 2.4, 7_500.0, 2027)
            .with_primary_event("200m")
            .with_personal_best(Mark::time(21.80)),
        athlete("Tomas Varga", Gender::Men, EventGroup::Distance, Tier::Competitive, 3.7, 15_000.0, 2026)
            .with_primary_event("1500m")
            .with_personal_best(Mark::time(226.4)),
        athlete("Isaac Moore", Gender::Men, EventGroup::Throws, Tier::Prospect, 1.9, 0.0, 2028)
            .with_primary_event("Discus")
            .with_personal_best(Mark::distance(48.5)),
        athlete("Ava Chen", Gender::Women, EventGroup::Jumps, Tier::Elite, 3.9, 30_000.0, 2026)
            .with_primary_event("Long Jump")
            .with_personal_best(Mark::distance(6.45)),
        athlete("Nia Johnson", Gender::Women, EventGroup::Hurdles, Tier::Competitive, 3.1, 22_500.0, 2025)
            .with_primary_event("100mH")
            .with_personal_best(Mark::time(13.20)),
        athlete("Sofia Rossi", Gender::Women, EventGroup::Distance, Tier::Developing, 3.5, 12_000.0, 2028)
            .with_primary_event("5000m"),
        athlete("Grace Okafor", Gender::Women, EventGroup::MultiEvents, Tier::Prospect, 2.8, 6_000.0, 2027)
            .with_primary_event("Heptathlon")
            .with_personal_best(Mark::points(5210.0)),
    ];

    Roster::from_athletes(athletes).expect("fixture roster is valid")
}
