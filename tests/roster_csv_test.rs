mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use roster_forecast::models::{
    Athlete, AthleteStatus, EventGroup, Gender, Mark, MarkKind, Roster, Tier,
};
use roster_forecast::services::RosterCsvService;
use roster_forecast::RosterError;

use common::sample_roster;

/// Comparable view of an athlete with marks in their display form
fn summary(roster: &Roster) -> Vec<(String, String, Gender, Tier, String, String, i32, Option<String>)> {
    roster
        .iter()
        .map(|a| {
            (
                a.id.clone(),
                a.name.clone(),
                a.gender,
                a.tier,
                format!("{:.2}", a.gpa),
                format!("{:.2}", a.scholarship_amount),
                a.graduation_year,
                a.performance.personal_best.map(|m| m.to_string()),
            )
        })
        .collect()
}

#[test]
fn test_export_then_import_keeps_roster() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.csv");
    let service = RosterCsvService::new();

    let mut roster = sample_roster();
    let archived_id = roster.athletes()[1].id.clone();
    roster.archive(&archived_id).unwrap();

    service.export_path(roster.athletes(), &path).unwrap();
    let report = service.import_path(&path).unwrap();

    assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.rows_read, 8);

    let imported = Roster::from_athletes(report.athletes).unwrap();
    assert_eq!(summary(&imported), summary(&roster));
    assert_eq!(
        imported.get(&archived_id).map(|a| a.status),
        Some(AthleteStatus::Archived)
    );

    let marcus = imported.find("marcus hill").unwrap();
    assert_eq!(marcus.ranking.conference, Some(1));
    assert_eq!(marcus.ranking.national, Some(12));
    assert_eq!(marcus.performance.primary_event, "100m");
}

#[test]
fn test_export_keeps_mark_kind_and_precision() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.csv");
    let service = RosterCsvService::new();

    // A time on a jumper and fractional points would read back as another kind
    // if written in display form
    let athletes = vec![
        Athlete::new("Nia Ford".to_string(), Gender::Women, EventGroup::Jumps, Tier::Developing, 3.1, 0.0, 2027)
            .with_personal_best(Mark::time(10.5))
            .with_season_best(Mark::distance(6.123)),
        Athlete::new("Kai Turner".to_string(), Gender::Men, EventGroup::MultiEvents, Tier::Prospect, 2.9, 0.0, 2028)
            .with_personal_best(Mark::points(5400.5)),
        Athlete::new("Eli Stone".to_string(), Gender::Men, EventGroup::Sprints, Tier::Elite, 3.4, 15_000.0, 2026)
            .with_personal_best(Mark::time(10.523))
            .with_season_best(Mark::time(65.25)),
    ];

    service.export_path(&athletes, &path).unwrap();
    let report = service.import_path(&path).unwrap();
    assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);

    let marks = |list: &[Athlete]| -> Vec<(Option<Mark>, Option<Mark>)> {
        list.iter()
            .map(|a| (a.performance.personal_best, a.performance.season_best))
            .collect()
    };
    assert_eq!(marks(&report.athletes), marks(&athletes));
    assert_eq!(
        report.athletes[0].performance.personal_best.map(|m| m.kind),
        Some(MarkKind::Time)
    );
}

#[test]
fn test_import_of_hand_written_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("coach.csv");
    fs::write(
        &path,
        "Name,Gender,Event_Group,Tier,GPA,Scholarship_Amount,Graduation_Year,Personal_Best\n\
         Lena Brooks,W,distance,competitive,3.45,\"$12,500\",2027,4:18.90\n\
         Omar Diaz,M,throws,elite,4.6,20000,2026,61.20m\n\
         Kai Turner,men,multi events,prospect,2.9,0,2029,6890 pts\n",
    )
    .unwrap();

    let report = RosterCsvService::new().import_path(&path).unwrap();

    assert_eq!(report.rows_read, 3);
    assert_eq!(report.athletes.len(), 2);
    assert_eq!(report.rejected_rows(), 1);
    assert_eq!(report.errors[0].line, 3);
    assert_eq!(report.errors[0].field, "gpa");

    let lena = &report.athletes[0];
    assert_eq!(lena.scholarship_amount, 12_500.0);
    assert_eq!(
        lena.performance.personal_best.map(|m| m.to_string()),
        Some("4:18.90".to_string())
    );
    assert!(!lena.id.is_empty());
}

#[test]
fn test_missing_columns_fail_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "name,gender,tier\nAva Chen,women,elite\n").unwrap();

    let err = RosterCsvService::new().import_path(&path).unwrap_err();
    assert_matches!(
        err,
        RosterError::MissingColumns(ref columns)
            if columns == &["event_group", "gpa", "scholarship_amount", "graduation_year"]
    );
    assert_eq!(
        err.to_string(),
        "Missing required columns: event_group, gpa, scholarship_amount, graduation_year"
    );
}
