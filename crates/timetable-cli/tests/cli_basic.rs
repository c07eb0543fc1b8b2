//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway HOME and timetables
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const JITISH: &str = r#"{"timetable": {
  "MONDAY": [
    {"slot": "A1", "courseCode": "CS101", "courseTitle": "Intro to Programming",
     "start": "09:00", "end": "10:00", "venue": "LT-1"},
    {"slot": "B1", "courseCode": "MA201", "courseTitle": "Linear Algebra",
     "start": "10:05", "end": "11:35", "venue": "LT-2"}
  ],
  "WEDNESDAY": [
    {"slot": "C1", "courseCode": "PH110", "courseTitle": "Physics",
     "start": "08:00", "end": "09:00", "venue": "Hall B"}
  ]
}}"#;

const RAHUL: &str = r#"{"timetable": {"MONDAY": [
  {"slot": "R1", "courseCode": "EE100", "courseTitle": "Circuits",
   "start": "09:15", "end": "10:45", "venue": "Lab 3"}]}}"#;

struct Env {
    home: TempDir,
}

impl Env {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let dir = home.path().join("timetables");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Jitish.json"), JITISH).unwrap();
        std::fs::write(dir.join("Rahul.json"), RAHUL).unwrap();
        Self { home }
    }

    fn dir(&self) -> std::path::PathBuf {
        self.home.path().join("timetables")
    }

    /// Run the CLI and return (exit code, stdout, stderr).
    fn run(&self, args: &[&str]) -> (i32, String, String) {
        run_cli(self.home.path(), &self.dir(), args)
    }
}

fn run_cli(home: &Path, dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_class-timetable"))
        .env("HOME", home)
        .env_remove("CLASS_TIMETABLE_ENV")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_people_list() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["people"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Jitish"));
    assert!(stdout.contains("Rahul"));
}

#[test]
fn test_people_list_json() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["people", "--json"]);
    assert_eq!(code, 0);
    let people = parse_json(&stdout);
    assert_eq!(people[0]["name"], "Jitish");
    assert_eq!(people[1]["file_name"], "Rahul.json");
}

#[test]
fn test_now_during_class_json() {
    let env = Env::new();
    let (code, stdout, stderr) =
        env.run(&["now", "--person", "jitish", "--at", "2026-10-19T09:30", "--json"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let snap = parse_json(&stdout);
    assert_eq!(snap["person"], "Jitish");
    assert_eq!(snap["state"]["current"]["class"]["courseCode"], "CS101");
    assert_eq!(snap["state"]["current"]["ends_in_secs"], 1800);
    assert_eq!(snap["state"]["upcoming"]["starts_in"]["kind"], "today");
    assert_eq!(snap["state"]["upcoming"]["starts_in"]["secs"], 2100);
    assert_eq!(snap["state"]["is_class_running"], true);
}

#[test]
fn test_now_after_classes_points_to_later_day() {
    let env = Env::new();
    let (code, stdout, _) =
        env.run(&["now", "--person", "Jitish", "--at", "2026-10-19T23:00", "--json"]);
    assert_eq!(code, 0);

    let snap = parse_json(&stdout);
    assert!(snap["state"]["current"].is_null());
    assert_eq!(snap["state"]["upcoming"]["class"]["courseCode"], "PH110");
    assert_eq!(snap["state"]["upcoming"]["starts_in"]["kind"], "later_day");
}

#[test]
fn test_now_text_output() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["now", "--person", "Jitish", "--at", "2026-10-19T09:30"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ends in 30:00"));
    assert!(stdout.contains("starts in 35:00"));
}

#[test]
fn test_select_sets_default_person() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["select", "rahul"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("selected Rahul"));

    let (code, stdout, _) = env.run(&["now", "--at", "2026-10-19T09:30", "--json"]);
    assert_eq!(code, 0);
    let snap = parse_json(&stdout);
    assert_eq!(snap["person"], "Rahul");
    assert_eq!(snap["state"]["current"]["class"]["courseCode"], "EE100");

    let (_, stdout, _) = env.run(&["people"]);
    assert!(stdout.contains("* Rahul"));
}

#[test]
fn test_week_json_lists_all_days() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["week", "--person", "Jitish", "--json"]);
    assert_eq!(code, 0);
    let days = parse_json(&stdout);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "MONDAY");
    assert_eq!(days[0]["classes"].as_array().unwrap().len(), 2);
    assert_eq!(days[6]["day"], "SUNDAY");
}

#[test]
fn test_unknown_person_fails() {
    let env = Env::new();
    let (code, _, stderr) = env.run(&["now", "--person", "Nobody"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_and_get() {
    let env = Env::new();
    let (code, _, _) = env.run(&["config", "set", "ui.use_24_hour", "false"]);
    assert_eq!(code, 0);
    let (code, stdout, _) = env.run(&["config", "get", "ui.use_24_hour"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "false");

    let (_, stdout, _) = env.run(&["now", "--person", "Jitish", "--at", "2026-10-19T09:30"]);
    assert!(stdout.contains("9:00 AM"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let env = Env::new();
    let (code, _, stderr) = env.run(&["config", "set", "ui.colour", "red"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("ui.colour"));
}

#[test]
fn test_watch_prints_requested_snapshot_count() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&[
        "watch", "--person", "Jitish", "--interval-ms", "20", "--count", "3", "--json",
    ]);
    assert_eq!(code, 0);
    let versions: Vec<u64> = stdout
        .lines()
        .map(|line| parse_json(line)["version"].as_u64().unwrap())
        .collect();
    assert_eq!(versions.len(), 3);
    assert!(versions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_deleted_selection_falls_back_to_first_person() {
    let env = Env::new();
    let (code, _, _) = env.run(&["select", "Rahul"]);
    assert_eq!(code, 0);
    std::fs::remove_file(env.dir().join("Rahul.json")).unwrap();

    let (code, stdout, stderr) = env.run(&["now", "--at", "2026-10-19T09:30", "--json"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(parse_json(&stdout)["person"], "Jitish");
}

#[test]
fn test_week_strict_rejects_malformed_class() {
    let env = Env::new();
    let doc = r#"{"timetable": {"FRIDAY": [
      {"slot": "X1", "courseCode": "CS999", "courseTitle": "Backwards",
       "start": "15:00", "end": "14:00", "venue": ""},
      {"slot": "X2", "courseCode": "CS100", "courseTitle": "Fine",
       "start": "09:00", "end": "10:00", "venue": ""}]}}"#;
    std::fs::write(env.dir().join("Odd.json"), doc).unwrap();

    let (code, _, stderr) = env.run(&["week", "--person", "Odd", "--strict"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Validation error"), "stderr: {stderr}");
    assert!(stderr.contains("X1"));

    let (code, stdout, stderr) = env.run(&["week", "--person", "Odd"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("warning: skipped"));
    assert!(stdout.contains("CS100"));
    assert!(!stdout.contains("CS999"));
}

#[test]
fn test_watch_rejects_zero_count() {
    let env = Env::new();
    let (code, stdout, _) = env.run(&["watch", "--person", "Jitish", "--count", "0", "--json"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
}
