use super::helpers::{read, Workspace};
use csvdedup::error::ExitCode;

const PEOPLE: &str = "a,b,c\n1,2,3\n1,2,9\n4,5,6\n";

#[test]
fn test_selected_columns_write_both_files() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (code, stdout) = ws.run(&["-r", "0,1"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(stdout, "Duplicates found: 1\n");
    assert_eq!(
        read(&ws.path("people_deduped.csv")),
        "a,b,c\n1,2,3\n4,5,6\n"
    );
    assert_eq!(
        read(&ws.path("people_duplicates.csv")),
        "source_line,first_seen_line,a,b,c\n3,2,1,2,9\n"
    );
}

#[test]
fn test_default_selection_uses_all_columns() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (_, stdout) = ws.run(&[]).unwrap();

    assert_eq!(stdout, "Duplicates found: 0\n");
    assert_eq!(read(&ws.path("people_deduped.csv")), PEOPLE);
    assert_eq!(
        read(&ws.path("people_duplicates.csv")),
        "source_line,first_seen_line,a,b,c\n"
    );
}

#[test]
fn test_list_headers() {
    let ws = Workspace::new("people.csv", "name,age,city\nBob,3,Oslo\n");

    let (code, stdout) = ws.run(&["-q"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(stdout, "0: name\n1: age\n2: city\n");
    assert!(!ws.path("people_deduped.csv").exists());
    assert!(!ws.path("people_duplicates.csv").exists());
}

#[test]
fn test_list_headers_as_json() {
    let ws = Workspace::new("people.csv", "name,age\n");

    let (_, stdout) = ws.run(&["-q", "--format", "json"]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value[0]["index"], 0);
    assert_eq!(value[0]["name"], "name");
    assert_eq!(value[1]["name"], "age");
}

#[test]
fn test_count_selects_leading_columns() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (_, stdout) = ws.run(&["-c", "2"]).unwrap();

    assert_eq!(stdout, "Duplicates found: 1\n");
}

#[test]
fn test_specifier_takes_priority_over_count() {
    let ws = Workspace::new("people.csv", PEOPLE);

    // -c 1 alone would report a duplicate; column 2 alone has none
    let (_, stdout) = ws.run(&["-r", "2", "-c", "1"]).unwrap();

    assert_eq!(stdout, "Duplicates found: 0\n");
}

#[test]
fn test_header_names_and_ranges_in_specifier() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (_, by_name) = ws.run(&["-r", "a,b"]).unwrap();
    let (_, by_range) = ws.run(&["-r", "0-1"]).unwrap();

    assert_eq!(by_name, "Duplicates found: 1\n");
    assert_eq!(by_range, by_name);
}

#[test]
fn test_dry_run_writes_no_files() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (code, stdout) = ws.run(&["-r", "0,1", "--dry-run"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(stdout, "Duplicates found: 1\n");
    assert!(!ws.path("people_deduped.csv").exists());
    assert!(!ws.path("people_duplicates.csv").exists());
}

#[test]
fn test_json_report() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (_, stdout) = ws.run(&["-r", "0,1", "--format", "json"]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let summary = &value["summary"];
    assert_eq!(summary["columns"], serde_json::json!([0, 1]));
    assert_eq!(summary["column_names"], serde_json::json!(["a", "b"]));
    assert_eq!(summary["total_rows"], 3);
    assert_eq!(summary["unique_rows"], 2);
    assert_eq!(summary["duplicate_rows"], 1);
    assert!(summary["deduped_file"]
        .as_str()
        .unwrap()
        .ends_with("people_deduped.csv"));
    assert_eq!(value["duplicates"][0]["line"], 3);
    assert_eq!(value["duplicates"][0]["first_seen_line"], 2);
}

#[test]
fn test_json_report_dry_run_has_no_files() {
    let ws = Workspace::new("people.csv", PEOPLE);

    let (_, stdout) = ws
        .run(&["-r", "0,1", "--format", "json", "--dry-run"])
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(value["summary"]["deduped_file"].is_null());
    assert!(value["summary"]["duplicates_file"].is_null());
}

#[test]
fn test_short_rows_are_reported_in_json() {
    let ws = Workspace::new("people.csv", "a,b,c\n1\n1,2,3\n1,,\n");

    let (_, stdout) = ws.run(&["-r", "0,2", "--format", "json"]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["summary"]["short_rows"], 1);
    assert_eq!(value["short_rows"][0]["line"], 2);
    assert_eq!(value["short_rows"][0]["field_count"], 1);
    assert_eq!(value["summary"]["duplicate_rows"], 1);
}

#[test]
fn test_rerun_on_deduped_output_finds_nothing() {
    let ws = Workspace::new("people.csv", PEOPLE);
    ws.run(&["-r", "0,1"]).unwrap();

    let again = Workspace::new("people_deduped.csv", &read(&ws.path("people_deduped.csv")));
    let (_, stdout) = again.run(&["-r", "0,1"]).unwrap();

    assert_eq!(stdout, "Duplicates found: 0\n");
    assert_eq!(
        read(&again.path("people_deduped_deduped.csv")),
        "a,b,c\n1,2,3\n4,5,6\n"
    );
}
