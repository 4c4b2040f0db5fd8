use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, RosterError};
use crate::models::{
    validate_gpa, validate_graduation_year, validate_name, validate_rank, validate_scholarship,
    Athlete, AthleteStatus, AthleticPerformance, EventGroup, Gender, Mark, Ranking, Tier,
};

/// Column order written on export
pub const CSV_HEADERS: [&str; 14] = [
    "id",
    "name",
    "gender",
    "event_group",
    "primary_event",
    "tier",
    "gpa",
    "scholarship_amount",
    "graduation_year",
    "personal_best",
    "season_best",
    "conference_rank",
    "national_rank",
    "status",
];

/// Columns an import file must carry
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "gender",
    "event_group",
    "tier",
    "gpa",
    "scholarship_amount",
    "graduation_year",
];

/// A validation problem on one row of an import file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub line: usize, // 1-based file line, header is line 1
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.field, self.message)
    }
}

/// Result of reading a roster file: the valid athletes plus every row error
#[derive(Debug, Default)]
pub struct ImportReport {
    pub athletes: Vec<Athlete>,
    pub errors: Vec<RowError>,
    pub rows_read: usize,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of distinct rows that were rejected
    pub fn rejected_rows(&self) -> usize {
        self.errors
            .iter()
            .map(|e| e.line)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Reads and writes rosters in the fixed CSV schema
#[derive(Debug, Clone, Default)]
pub struct RosterCsvService;

impl RosterCsvService {
    pub fn new() -> Self {
        Self
    }

    /// Import athletes from a CSV file on disk
    pub fn import_path(&self, path: &Path) -> Result<ImportReport> {
        info!("Importing roster from {:?}", path);
        let file = File::open(path)?;
        self.import_reader(BufReader::new(file))
    }

    /// Import athletes from any CSV source. Row problems are collected in the
    /// report; only unreadable input or a missing required column fails.
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<ImportReport> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !columns.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RosterError::MissingColumns(missing));
        }

        for name in columns.keys() {
            if !CSV_HEADERS.contains(&name.as_str()) {
                debug!("Ignoring unknown column '{}'", name);
            }
        }

        let mut report = ImportReport::default();
        let mut seen_ids = HashSet::new();

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2);

            // Skip fully blank lines
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            report.rows_read += 1;

            let row = RowCells {
                record: &record,
                columns: &columns,
            };

            match parse_row(&row, line, &mut seen_ids) {
                Ok(athlete) => report.athletes.push(athlete),
                Err(mut errors) => {
                    debug!("Rejected line {} with {} errors", line, errors.len());
                    report.errors.append(&mut errors);
                }
            }
        }

        if !report.is_clean() {
            warn!(
                "Roster import rejected {} of {} rows",
                report.rejected_rows(),
                report.rows_read
            );
        }
        info!("Imported {} athletes", report.athletes.len());

        Ok(report)
    }

    /// Export athletes to a CSV file on disk
    pub fn export_path(&self, athletes: &[Athlete], path: &Path) -> Result<()> {
        info!("Exporting {} athletes to {:?}", athletes.len(), path);
        let file = File::create(path)?;
        self.export_writer(athletes, BufWriter::new(file))
    }

    /// Write athletes in the fixed header order
    pub fn export_writer<W: Write>(&self, athletes: &[Athlete], writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(CSV_HEADERS)?;

        for athlete in athletes {
            writer.write_record(athlete_record(athlete))?;
        }

        writer.flush()?;
        Ok(())
    }
}

struct RowCells<'a> {
    record: &'a csv::StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl RowCells<'_> {
    fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|i| self.record.get(*i))
            .unwrap_or("")
    }
}

/// Collects every field error on a row instead of stopping at the first
struct RowParser {
    line: usize,
    errors: Vec<RowError>,
}

impl RowParser {
    fn new(line: usize) -> Self {
        Self {
            line,
            errors: Vec::new(),
        }
    }

    fn take<T>(&mut self, field: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                let message = match error {
                    RosterError::InvalidField { reason, .. } => reason,
                    other => other.to_string(),
                };
                self.push(field, message);
                None
            }
        }
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.push(RowError {
            line: self.line,
            field: field.to_string(),
            message,
        });
    }
}

fn parse_row(
    row: &RowCells<'_>,
    line: usize,
    seen_ids: &mut HashSet<String>,
) -> std::result::Result<Athlete, Vec<RowError>> {
    let mut parser = RowParser::new(line);

    let raw_name = row.get("name");
    let name = parser.take("name", validate_name(raw_name).map(|_| raw_name.to_string()));
    let gender = parser.take("gender", row.get("gender").parse::<Gender>());
    let event_group = parser.take("event_group", row.get("event_group").parse::<EventGroup>());
    let tier = parser.take("tier", row.get("tier").parse::<Tier>());
    let status = parser.take("status", row.get("status").parse::<AthleteStatus>());

    let gpa = parser.take(
        "gpa",
        parse_required::<f64>(row.get("gpa"), "gpa").and_then(|gpa| {
            validate_gpa(gpa)?;
            Ok(gpa)
        }),
    );
    let scholarship_amount = parser.take(
        "scholarship_amount",
        parse_money(row.get("scholarship_amount")).and_then(|amount| {
            validate_scholarship(amount)?;
            Ok(amount)
        }),
    );
    let graduation_year = parser.take(
        "graduation_year",
        parse_required::<i32>(row.get("graduation_year"), "graduation_year").and_then(|year| {
            validate_graduation_year(year)?;
            Ok(year)
        }),
    );
    let conference = parser.take(
        "conference_rank",
        parse_rank(row.get("conference_rank"), "conference_rank"),
    );
    let national = parser.take(
        "national_rank",
        parse_rank(row.get("national_rank"), "national_rank"),
    );

    // Marks are read according to the event group, so they can only be
    // checked once the group itself is valid
    let (personal_best, season_best) = match event_group {
        Some(group) => (
            parser.take("personal_best", parse_mark(row.get("personal_best"), group)),
            parser.take("season_best", parse_mark(row.get("season_best"), group)),
        ),
        None => (Some(None), Some(None)),
    };

    let id = match row.get("id") {
        "" => Uuid::new_v4().to_string(),
        id => id.to_string(),
    };
    if !seen_ids.insert(id.clone()) {
        parser.push("id", format!("duplicate id {}", id));
    }

    let (
        Some(name),
        Some(gender),
        Some(event_group),
        Some(tier),
        Some(status),
        Some(gpa),
        Some(scholarship_amount),
        Some(graduation_year),
        Some(conference),
        Some(national),
        Some(personal_best),
        Some(season_best),
    ) = (
        name,
        gender,
        event_group,
        tier,
        status,
        gpa,
        scholarship_amount,
        graduation_year,
        conference,
        national,
        personal_best,
        season_best,
    )
    else {
        return Err(parser.errors);
    };

    if !parser.errors.is_empty() {
        return Err(parser.errors);
    }

    let primary_event = match row.get("primary_event") {
        "" => event_group.to_string(),
        event => event.to_string(),
    };

    Ok(Athlete {
        id,
        name,
        gender,
        event_group,
        performance: AthleticPerformance {
            primary_event,
            personal_best,
            season_best,
        },
        ranking: Ranking {
            conference,
            national,
        },
        tier,
        gpa,
        scholarship_amount,
        graduation_year,
        status,
    })
}

fn parse_required<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T> {
    if raw.is_empty() {
        return Err(RosterError::invalid_field(field, "is required"));
    }
    raw.parse::<T>()
        .map_err(|_| RosterError::invalid_field(field, format!("'{}' is not a number", raw)))
}

/// Dollar amounts may carry a leading `$` and thousands separators
fn parse_money(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(RosterError::invalid_field("scholarship_amount", "is required"));
    }
    cleaned.parse::<f64>().map_err(|_| {
        RosterError::invalid_field("scholarship_amount", format!("'{}' is not an amount", raw))
    })
}

fn parse_rank(raw: &str, field: &str) -> Result<Option<u32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let rank = raw
        .parse::<u32>()
        .map_err(|_| RosterError::invalid_field(field, format!("'{}' is not a rank", raw)))?;
    validate_rank(field, Some(rank))?;
    Ok(Some(rank))
}

fn parse_mark(raw: &str, group: EventGroup) -> Result<Option<Mark>> {
    if raw.is_empty() {
        return Ok(None);
    }
    Mark::parse(raw, group).map(Some)
}

fn athlete_record(athlete: &Athlete) -> Vec<String> {
    let optional = |value: Option<String>| value.unwrap_or_default();

    vec![
        athlete.id.clone(),
        athlete.name.clone(),
        athlete.gender.as_str().to_string(),
        athlete.event_group.as_str().to_string(),
        athlete.performance.primary_event.clone(),
        athlete.tier.as_str().to_string(),
        athlete.gpa.to_string(),
        format!("{:.2}", athlete.scholarship_amount),
        athlete.graduation_year.to_string(),
        optional(athlete.performance.personal_best.map(|m| m.to_record())),
        optional(athlete.performance.season_best.map(|m| m.to_record())),
        optional(athlete.ranking.conference.map(|r| r.to_string())),
        optional(athlete.ranking.national.map(|r| r.to_string())),
        athlete.status.as_str().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,gender,event_group,primary_event,tier,gpa,scholarship_amount,graduation_year,personal_best,season_best,conference_rank,national_rank,status";

    fn import(csv: &str) -> Result<ImportReport> {
        RosterCsvService::new().import_reader(csv.as_bytes())
    }

    #[test]
    fn test_import_valid_rows() {
        let csv = format!(
            "{}\n\
             a1,Jonah Reyes,men,distance,1500m,elite,3.6,\"$24,000\",2026,3:38.20,3:40.10,2,15,active\n\
             ,Priya Shah,women,jumps,,developing,3.1,0,2028,6.10m,,,,\n",
            HEADER
        );

        let report = import(&csv).unwrap();
        assert!(report.is_clean(), "{:?}", report.errors);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.athletes.len(), 2);

        let jonah = &report.athletes[0];
        assert_eq!(jonah.id, "a1");
        assert_eq!(jonah.scholarship_amount, 24_000.0);
        assert_eq!(jonah.ranking.national, Some(15));
        assert!((jonah.performance.personal_best.unwrap().value - 218.2).abs() < 1e-9);

        let priya = &report.athletes[1];
        assert!(Uuid::parse_str(&priya.id).is_ok());
        assert_eq!(priya.performance.primary_event, "Jumps");
        assert_eq!(priya.performance.personal_best, Some(Mark::distance(6.10)));
        assert_eq!(priya.status, AthleteStatus::Active);
    }

    #[test]
    fn test_import_collects_row_errors() {
        let csv = "name,gender,event_group,tier,gpa,scholarship_amount,graduation_year\n\
                   Good Row,women,sprints,prospect,3.0,1000,2027\n\
                   ,x,relay,legend,4.8,-5,abc\n\
                   Also Good,m,throws,competitive,2.9,2500,2026\n";

        let report = import(csv).unwrap();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.athletes.len(), 2);
        assert_eq!(report.rejected_rows(), 1);

        let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
        for expected in [
            "name",
            "gender",
            "event_group",
            "tier",
            "gpa",
            "scholarship_amount",
            "graduation_year",
        ] {
            assert!(fields.contains(&expected), "missing error for {}", expected);
        }
        assert!(report.errors.iter().all(|e| e.line == 3));
    }

    #[test]
    fn test_import_missing_columns() {
        let result = import("name,gender\nA,men\n");
        match result {
            Err(RosterError::MissingColumns(columns)) => {
                assert!(columns.contains(&"tier".to_string()));
                assert!(columns.contains(&"gpa".to_string()));
                assert!(!columns.contains(&"name".to_string()));
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_import_duplicate_ids() {
        let csv = "id,name,gender,event_group,tier,gpa,scholarship_amount,graduation_year\n\
                   x,A,men,sprints,elite,3.0,0,2026\n\
                   x,B,men,sprints,elite,3.0,0,2026\n";

        let report = import(csv).unwrap();
        assert_eq!(report.athletes.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "id");
        assert_eq!(report.errors[0].line, 3);
    }

    #[test]
    fn test_import_bad_mark() {
        let csv = "name,gender,event_group,tier,gpa,scholarship_amount,graduation_year,personal_best\n\
                   A,men,sprints,elite,3.0,0,2026,quick\n";

        let report = import(csv).unwrap();
        assert!(report.athletes.is_empty());
        assert_eq!(report.errors[0].field, "personal_best");
    }

    #[test]
    fn test_export_writes_fixed_header() {
        let athlete = Athlete::new(
            "Lena Ortiz".to_string(),
            Gender::Women,
            EventGroup::Throws,
            Tier::Elite,
            3.75,
            30_000.0,
            2026,
        )
        .with_primary_event("Shot Put")
        .with_personal_best(Mark::distance(17.42));

        let mut buffer = Vec::new();
        RosterCsvService::new()
            .export_writer(&[athlete.clone()], &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));

        let row = lines.next().unwrap();
        assert!(row.starts_with(&athlete.id));
        assert!(row.contains("Lena Ortiz,women,throws,Shot Put,elite,3.75,30000.00,2026,17.42m"));
        assert!(row.ends_with(",active"));
    }
}
