use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RESUME: &str = "Jane Smith
jane.smith@example.com
(415) 555-0100

EXPERIENCE
Senior Engineer, Acme Corp
2020-2023
• Led platform rewrite

SKILLS
Python, Rust, Docker
";

const POSTING: &str = "Backend Engineer at Initech
Location: Austin, TX

Requirements:
• Python experience
• Docker

This is a full-time role.
";

/// A command using a config file inside the temp dir, so the user's own
/// configuration never leaks into tests.
fn vitae(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vitae").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.json"));
    cmd
}

fn init_config(dir: &TempDir) {
    vitae(dir).args(["config", "init"]).assert().success();
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("jane.txt");
    fs::write(&input, RESUME).unwrap();

    let output = vitae(&dir).arg("extract").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["personal"]["fullName"], "Jane Smith");
    assert_eq!(json["personal"]["email"], "jane.smith@example.com");
    assert_eq!(json["experience"][0]["startYear"], "2020");
    assert_eq!(json["skills"], serde_json::json!(["Python", "Rust", "Docker"]));
}

#[test]
fn test_extract_text_with_warnings() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("jane.md");
    fs::write(&input, RESUME).unwrap();

    vitae(&dir)
        .args(["extract", "--format", "text", "--show-warnings"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Jane Smith"))
        .stdout(predicate::str::contains("Summary (generated):"))
        .stderr(predicate::str::contains("Could not find education"));
}

#[test]
fn test_extract_writes_output_file() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("jane.txt");
    let out = dir.path().join("jane.csv");
    fs::write(&input, RESUME).unwrap();

    vitae(&dir)
        .args(["extract", "-f", "csv", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("full_name,email"));
    assert!(csv.contains("Jane Smith"));
}

#[test]
fn test_extract_rejects_short_input() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("short.txt");
    fs::write(&input, "Jane").unwrap();

    vitae(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find readable text"));

    vitae(&dir)
        .args(["extract", "--min-length", "1"])
        .arg(&input)
        .assert()
        .success();
}

#[test]
fn test_extract_missing_and_unsupported_files() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    vitae(&dir)
        .args(["extract", "/nonexistent/resume.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let image = dir.path().join("scan.png");
    fs::write(&image, b"\x89PNG").unwrap();
    vitae(&dir)
        .arg("extract")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn test_job_command() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("posting.txt");
    fs::write(&input, POSTING).unwrap();

    let output = vitae(&dir).arg("job").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Backend Engineer");
    assert_eq!(json["company"], "Initech");
    assert_eq!(json["location"], "Austin, TX");
    assert_eq!(json["employmentType"], "Full-time");
    assert_eq!(json["requirements"], serde_json::json!(["Python experience", "Docker"]));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RESUME).unwrap();
    fs::write(inputs.join("b.md"), RESUME.replace("Jane Smith", "John Doe")).unwrap();
    fs::write(inputs.join("c.txt"), "too short").unwrap();
    fs::write(inputs.join("ignored.png"), b"\x89PNG").unwrap();

    let pattern = format!("{}/*", inputs.display());
    vitae(&dir)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-j", "2", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(out.join("a.txt.json").exists());
    assert!(out.join("b.md.json").exists());
    assert!(!out.join("c.txt.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("a.txt,success,Jane Smith"));
    assert!(lines[2].starts_with("b.md,success,John Doe"));
    assert!(lines[3].starts_with("c.txt,error"));
}

#[test]
fn test_batch_keeps_inputs_and_same_named_outputs_apart() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let inputs = dir.path().join("cvs");
    fs::create_dir_all(inputs.join("one")).unwrap();
    fs::create_dir_all(inputs.join("two")).unwrap();
    fs::write(inputs.join("jane.txt"), RESUME).unwrap();
    fs::write(inputs.join("one/cv.txt"), RESUME).unwrap();
    fs::write(inputs.join("two/cv.txt"), RESUME.replace("Jane Smith", "John Doe")).unwrap();

    // Writing text output next to the .txt inputs
    let pattern = format!("{}/jane.txt", inputs.display());
    vitae(&dir)
        .args(["batch", &pattern, "-f", "text", "-o"])
        .arg(&inputs)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(inputs.join("jane.txt")).unwrap(), RESUME);
    assert!(fs::read_to_string(inputs.join("jane.txt.txt"))
        .unwrap()
        .contains("Name: Jane Smith"));

    let out = dir.path().join("out");
    let pattern = format!("{}/*/cv.txt", inputs.display());
    vitae(&dir)
        .args(["batch", &pattern, "-o"])
        .arg(&out)
        .assert()
        .success();

    let first = fs::read_to_string(out.join("cv.txt.json")).unwrap();
    let second = fs::read_to_string(out.join("cv.txt-2.json")).unwrap();
    assert!(first.contains("Jane Smith"));
    assert!(second.contains("John Doe"));
}

#[test]
fn test_batch_refuses_to_overwrite_an_input() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let inputs = dir.path().join("notes");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("cv.txt"), RESUME).unwrap();
    fs::write(inputs.join("cv.txt.txt"), RESUME).unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    vitae(&dir)
        .args(["batch", &pattern, "-f", "text", "-o"])
        .arg(&inputs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to overwrite input file"));

    assert_eq!(fs::read_to_string(inputs.join("cv.txt.txt")).unwrap(), RESUME);
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("short.txt"), "x").unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    vitae(&dir)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();

    vitae(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    init_config(&dir);
    vitae(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    vitae(&dir)
        .args(["config", "set", "extraction.max_skills", "2"])
        .assert()
        .success();

    vitae(&dir)
        .args(["config", "get", "extraction.max_skills"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    vitae(&dir)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure();

    let input = dir.path().join("jane.txt");
    fs::write(&input, RESUME).unwrap();
    let output = vitae(&dir).arg("extract").arg(&input).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["skills"], serde_json::json!(["Python", "Rust"]));
}
