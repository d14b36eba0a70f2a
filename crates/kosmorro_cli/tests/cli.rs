use assert_cmd::Command;
use chrono::Utc;
use predicates::prelude::*;

const PHASES: [&str; 8] = [
    "New Moon",
    "Waxing Crescent",
    "First Quarter",
    "Waxing Gibbous",
    "Full Moon",
    "Waning Gibbous",
    "Last Quarter",
    "Waning Crescent",
];

fn kosmorro() -> Command {
    let mut cmd = Command::cargo_bin("kosmorro").unwrap();
    cmd.env_remove("KOSMORRO_LATITUDE")
        .env_remove("KOSMORRO_LONGITUDE")
        .env_remove("KOSMORRO_TIMEZONE")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn help_message() {
    let today = Utc::now();
    let out = kosmorro()
        .arg("--help")
        .assert()
        .success()
        .stderr("")
        .get_output()
        .stdout
        .clone();
    // Help text may be wrapped.
    let help = String::from_utf8(out)
        .unwrap()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    assert!(help.contains("Compute the ephemerides and the events"), "{help}");
    assert!(help.contains("KOSMORRO_LATITUDE"));
    assert!(help.contains("KOSMORRO_TIMEZONE"));
    assert!(help.contains("--no-graph"));
    assert!(help.contains(&format!("Defaults to today ({})", today.format("%Y-%m-%d"))));
}

#[test]
fn version_flag() {
    kosmorro()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("kosmorro "));
}

#[test]
fn run_without_argument() {
    let today = Utc::now();
    let out = stdout_of(&mut kosmorro());
    let lines: Vec<_> = out.split('\n').collect();
    assert_eq!(lines.len(), 7, "{out}");
    assert_eq!(lines[0], today.format("%A %B %d, %Y").to_string());
    assert_eq!(lines[1], "");
    let phase = lines[2].strip_prefix("Moon phase: ").unwrap();
    assert!(PHASES.contains(&phase));
    assert!(PHASES.iter().any(|p| lines[3].starts_with(&format!("{p} on "))));
    assert!(lines[3].contains(" at "));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Note: All the hours are given in UTC.");
    assert_eq!(lines[6], "");
}

#[test]
fn fixed_date_text() {
    let out = stdout_of(kosmorro().args(["--date", "2021-11-23"]));
    assert_eq!(
        out,
        "Tuesday November 23, 2021\n\
         \n\
         Moon phase: Full Moon\n\
         Waning Gibbous on Tuesday November 23, 2021 at 07:31\n\
         \n\
         Note: All the hours are given in UTC.\n"
    );
}

#[test]
fn json_format() {
    let out = stdout_of(kosmorro().args(["-d", "2021-11-23", "--format", "json"]));
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["phase"], "Full Moon");
    assert_eq!(doc["nextPhase"]["date"], "2021-11-23");
    assert_eq!(doc["nextPhase"]["time"], "07:31");
}

#[test]
fn coordinates_add_ephemerides() {
    let out = stdout_of(kosmorro().args(["-lat", "50.5824", "-lon", "3.0624", "-d", "2021-11-23"]));
    assert_eq!(out.split('\n').count(), 12, "{out}");
    assert!(out.contains("\nSun "));
}

#[test]
fn coordinates_from_environment() {
    let out = stdout_of(
        kosmorro()
            .env("KOSMORRO_LATITUDE", "50.5824")
            .env("KOSMORRO_LONGITUDE", "3.0624")
            .env("KOSMORRO_TIMEZONE", "1")
            .args(["-d", "2021-11-23"]),
    );
    assert_eq!(out.split('\n').count(), 12, "{out}");
    assert!(out.ends_with("Note: All the hours are given in the UTC+1 timezone.\n"));
}

#[test]
fn invalid_date_is_an_error() {
    kosmorro()
        .args(["--date", "+3x"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("error: invalid date"));
}

#[test]
fn out_of_range_date_is_an_error() {
    kosmorro()
        .args(["--date", "3500-01-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: unsupported instant"));
}

#[test]
fn pdf_requires_output() {
    kosmorro()
        .args(["--format", "pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires an output file"));
}

#[test]
fn pdf_to_file() {
    let path = std::env::temp_dir().join(format!("kosmorro-cli-{}.pdf", std::process::id()));
    kosmorro()
        .args(["-f", "pdf", "-lat", "48.85", "-lon", "2.35", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout("");
    let bytes = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn huge_timezone_is_named_in_the_error() {
    kosmorro()
        .args(["-d", "2021-11-23", "-t", "1e7"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: unsupported timezone: the UTC+10000000 offset"));
}

#[test]
fn zero_timezone_gives_the_utc_note() {
    let out = stdout_of(kosmorro().env("KOSMORRO_TIMEZONE", "0").args(["-d", "2021-11-23"]));
    assert!(out.ends_with("\nNote: All the hours are given in UTC.\n"), "{out}");
}

#[test]
fn unsigned_chained_interval() {
    let today = Utc::now().date_naive();
    let expected = today
        .checked_add_months(chrono::Months::new(12))
        .and_then(|d| d.checked_add_months(chrono::Months::new(2)))
        .unwrap()
        .format("%A %B %d, %Y")
        .to_string();
    let out = stdout_of(kosmorro().args(["-d", "1y2m"]));
    assert_eq!(out.lines().next(), Some(expected.as_str()));
}
