//! Integration tests for the check loop over files on disk.
//!
//! Each test writes JSON fixtures into a temporary directory and runs
//! [`check::run`] against them, capturing the report in memory.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use songbook_check::check::{self, CheckOptions};
use songbook_check::cli::{OutputFormat, RecordKind};
use songbook_check::input::Source;
use songbook_check::report::{EXIT_INPUT_ERROR, EXIT_INVALID, EXIT_OK};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture should be writable");
    path
}

fn options(kind: RecordKind, format: OutputFormat) -> CheckOptions {
    CheckOptions {
        kind,
        format,
        max_input_bytes: 1024 * 1024,
    }
}

fn grace() -> Value {
    json!({
        "id": "a1b2c3d4-0000-0000-0000-000000000000",
        "title": "Grace",
        "composer": null,
        "lyrics_markdown": null,
        "status": "draft",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": null,
        "published_at": null,
    })
}

fn run(sources: &[Source], options: CheckOptions) -> (String, u8) {
    let mut out = Vec::new();
    let summary = check::run(sources, options, &mut out).expect("writing to a Vec cannot fail");
    (String::from_utf8(out).unwrap(), summary.exit_code())
}

// ---------------------------------------------------------------------------
// Test: all records valid
// ---------------------------------------------------------------------------

#[test]
fn valid_batch_exits_ok() {
    let dir = TempDir::new().unwrap();
    let mut second = grace();
    second["id"] = json!("b2c3d4e5-1111-4111-8111-111111111111");
    second["status"] = json!("published");
    second["published_at"] = json!("2024-02-01T00:00:00Z");
    let path = write_fixture(&dir, "songs.json", &json!([grace(), second]).to_string());

    let (report, code) = run(
        &[Source::File(path.clone())],
        options(RecordKind::Song, OutputFormat::Text),
    );

    assert_eq!(code, EXIT_OK);
    let name = path.display().to_string();
    assert_eq!(report, format!("{name}[0]: ok\n{name}[1]: ok\n"));
}

// ---------------------------------------------------------------------------
// Test: invalid records are all reported
// ---------------------------------------------------------------------------

#[test]
fn every_invalid_record_is_reported() {
    let dir = TempDir::new().unwrap();
    let bad = json!([
        { "id": "not-a-uuid", "title": "Grace", "status": "draft", "created_at": "2024-01-01T00:00:00Z" },
        grace(),
        { "title": "", "status": "archived" },
    ]);
    let path = write_fixture(&dir, "songs.json", &bad.to_string());

    let (report, code) = run(
        &[Source::File(path)],
        options(RecordKind::Song, OutputFormat::Json),
    );

    assert_eq!(code, EXIT_INVALID);
    let lines: Vec<Value> = report
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0]["valid"], false);
    assert_eq!(lines[0]["violations"][0]["field"], "id");
    assert_eq!(lines[0]["violations"][0]["kind"], "format_violation");

    assert_eq!(lines[1]["valid"], true);

    let fields: Vec<&str> = lines[2]["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["id", "title", "status", "created_at"]);
}

// ---------------------------------------------------------------------------
// Test: profiles
// ---------------------------------------------------------------------------

#[test]
fn profile_with_unknown_role_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "profile.json",
        &json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "display_name": null,
            "role": "superadmin",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": null,
        })
        .to_string(),
    );

    let (report, code) = run(
        &[Source::File(path)],
        options(RecordKind::Profile, OutputFormat::Text),
    );

    assert_eq!(code, EXIT_INVALID);
    assert!(report.contains("1 violation(s)"));
    assert!(report.contains("field 'role' (enum_violation)"));
}

// ---------------------------------------------------------------------------
// Test: unreadable sources do not stop the run
// ---------------------------------------------------------------------------

#[test]
fn input_errors_are_reported_and_run_continues() {
    let dir = TempDir::new().unwrap();
    let broken = write_fixture(&dir, "broken.json", "{ \"title\": ");
    let missing = dir.path().join("missing.json");
    let good = write_fixture(&dir, "good.json", &grace().to_string());

    let (report, code) = run(
        &[
            Source::File(broken),
            Source::File(missing),
            Source::File(good.clone()),
        ],
        options(RecordKind::Song, OutputFormat::Text),
    );

    assert_eq!(code, EXIT_INPUT_ERROR);
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("is not valid JSON"));
    assert!(lines[1].contains("failed to read"));
    assert_eq!(lines[2], format!("{}[0]: ok", good.display()));
}

#[test]
fn oversized_source_is_an_input_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "songs.json", &json!([grace(), grace()]).to_string());

    let mut opts = options(RecordKind::Song, OutputFormat::Json);
    opts.max_input_bytes = 16;
    let (report, code) = run(&[Source::File(path)], opts);

    assert_eq!(code, EXIT_INPUT_ERROR);
    let entry: Value = serde_json::from_str(report.trim()).unwrap();
    assert!(entry["error"].as_str().unwrap().contains("16-byte input limit"));
}
