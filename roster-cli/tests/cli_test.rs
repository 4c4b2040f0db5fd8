use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ROSTER_CSV: &str = "\
name,gender,event_group,primary_event,tier,gpa,scholarship_amount,graduation_year,personal_best
Marcus Hill,men,sprints,100m,elite,3.2,30000,2025,10.21
Ava Chen,women,jumps,Long Jump,elite,3.9,30000,2026,6.45m
Isaac Moore,men,throws,Discus,prospect,1.9,0,2028,48.50m
";

/// A command isolated from the user's home, config and roster
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn roster_path(&self) -> PathBuf {
        self.dir.path().join("roster.csv")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("roster").unwrap();
        cmd.env("HOME", self.dir.path())
            .env("ROSTER_FORECAST_CONFIG", self.dir.path().join("config.toml"))
            .env("ROSTER_FORECAST_ROSTER", self.roster_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn import(&self, path: &Path) {
        self.cmd().arg("import").arg(path).assert().success();
    }
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Track & field roster dashboard"))
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("athlete"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_roster"));
}

#[test]
fn test_import_then_list() {
    let sandbox = Sandbox::new();
    let file = sandbox.write("team.csv", ROSTER_CSV);

    sandbox
        .cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 athletes"));

    assert!(sandbox.roster_path().exists());

    sandbox
        .cmd()
        .args(["athlete", "list", "--gender", "men", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marcus Hill"))
        .stdout(predicate::str::contains("Isaac Moore"))
        .stdout(predicate::str::contains("Ava Chen").not());
}

#[test]
fn test_dry_run_saves_nothing() {
    let sandbox = Sandbox::new();
    let file = sandbox.write("team.csv", ROSTER_CSV);

    sandbox
        .cmd()
        .args(["import", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!sandbox.roster_path().exists());
}

#[test]
fn test_import_reports_row_errors() {
    let sandbox = Sandbox::new();
    let file = sandbox.write(
        "bad.csv",
        "name,gender,event_group,tier,gpa,scholarship_amount,graduation_year\n\
         Ava Chen,women,jumps,elite,3.9,30000,2026\n\
         Nobody,robot,jumps,elite,3.0,0,2026\n",
    );

    sandbox
        .cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("line 3: gender"))
        .stdout(predicate::str::contains("1 of 2 rows rejected"));

    let missing = sandbox.write("missing.csv", "name,gender\nAva Chen,women\n");
    sandbox
        .cmd()
        .arg("import")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required columns"));
}

#[test]
fn test_stats_json() {
    let sandbox = Sandbox::new();
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    let output = sandbox
        .cmd()
        .args(["stats", "--year", "2025", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["active_athletes"], 3);
    assert_eq!(stats["academic_watch_list"][0]["name"], "Isaac Moore");
    assert_eq!(stats["academic_watch_list"][0]["level"], "at_risk");
}

#[test]
fn test_forecast_json() {
    let sandbox = Sandbox::new();
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    let output = sandbox
        .cmd()
        .args(["forecast", "all", "--base-year", "2025", "--years", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let forecast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(forecast["horizon_years"], 3);
    assert_eq!(forecast["graduation"]["total_departures"], 2);
    assert_eq!(forecast["scholarships"]["years"].as_array().unwrap().len(), 3);

    sandbox
        .cmd()
        .args(["forecast", "recruiting", "--base-year", "2025", "--years", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon_years"));
}

#[test]
fn test_forecast_report() {
    let sandbox = Sandbox::new();
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    sandbox
        .cmd()
        .args(["forecast", "graduation", "--base-year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class of 2025: 1 departing"))
        .stdout(predicate::str::contains("Marcus Hill"));
}

#[test]
fn test_add_respects_scholarship_limit() {
    let sandbox = Sandbox::new();
    sandbox.write("config.toml", "[scholarships]\nmen_limit = 1.5\n");
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    let add = [
        "athlete",
        "add",
        "Devon Park",
        "--gender",
        "men",
        "--group",
        "sprints",
        "--tier",
        "developing",
        "--gpa",
        "2.9",
        "--scholarship",
        "20000",
        "--grad-year",
        "2027",
        "--pb",
        "21.80",
    ];

    sandbox
        .cmd()
        .args(add)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--allow-over-limit"));

    sandbox
        .cmd()
        .args(add)
        .arg("--allow-over-limit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Devon Park"));

    sandbox
        .cmd()
        .args(["athlete", "show", "devon park"])
        .assert()
        .success()
        .stdout(predicate::str::contains("21.80"));
}

#[test]
fn test_edit_archive_and_delete() {
    let sandbox = Sandbox::new();
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    sandbox
        .cmd()
        .args(["athlete", "edit", "Ava Chen", "--gpa", "3.6", "--tier", "competitive"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["athlete", "show", "Ava Chen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.60"))
        .stdout(predicate::str::contains("Competitive"));

    sandbox
        .cmd()
        .args(["athlete", "edit", "Ava Chen", "--gpa", "4.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gpa"));

    sandbox
        .cmd()
        .args(["athlete", "archive", "Ava Chen"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["athlete", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ava Chen").not());

    sandbox
        .cmd()
        .args(["athlete", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ava Chen (archived)"));

    sandbox
        .cmd()
        .args(["athlete", "delete", "Ava Chen", "--force"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["athlete", "show", "Ava Chen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_export_round_trip() {
    let sandbox = Sandbox::new();
    sandbox.import(&sandbox.write("team.csv", ROSTER_CSV));

    let out = sandbox.dir.path().join("export.csv");
    sandbox.cmd().arg("export").arg(&out).assert().success();

    let exported = fs::read_to_string(&out).unwrap();
    assert!(exported.starts_with("id,name,gender,event_group,primary_event,tier"));
    assert!(exported.contains("Marcus Hill"));
    assert_eq!(exported.lines().count(), 4);
}

#[test]
fn test_config_init() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    let written = fs::read_to_string(sandbox.dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[forecast]"));
    assert!(written.contains("horizon_years = 4"));

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_year_arguments_are_bounded() {
    let sandbox = Sandbox::new();

    let cases: [&[&str]; 3] = [
        &["stats", "--year", "2147483647"],
        &["athlete", "list", "--year", "0"],
        &["forecast", "--base-year", "2147483647"],
    ];

    for args in cases {
        sandbox
            .cmd()
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }
}
