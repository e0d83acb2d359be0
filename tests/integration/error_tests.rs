use super::helpers::Workspace;
use csvdedup::error::{ExitCode, StructuredError};

fn assert_no_outputs(ws: &Workspace) {
    assert!(!ws.path("people_deduped.csv").exists());
    assert!(!ws.path("people_duplicates.csv").exists());
}

#[test]
fn test_count_larger_than_header() {
    let ws = Workspace::new("people.csv", "a,b,c\n1,2,3\n");

    let err = ws.run(&["-c", "5"]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    assert!(format!("{err:#}").contains("Invalid column count 5"));
    assert_no_outputs(&ws);
}

#[test]
fn test_index_out_of_range() {
    let ws = Workspace::new("people.csv", "a,b,c\n1,2,3\n");

    let err = ws.run(&["-r", "0,3"]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    assert!(format!("{err:#}").contains("Invalid column index 3"));
    assert_no_outputs(&ws);
}

#[test]
fn test_unknown_column_name() {
    let ws = Workspace::new("people.csv", "name,email\nx,y\n");

    let err = ws.run(&["-r", "emial"]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    assert!(format!("{err:#}").contains("email"));
    assert_no_outputs(&ws);
}

#[test]
fn test_empty_file_is_malformed() {
    let ws = Workspace::new("people.csv", "");

    let err = ws.run(&[]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::MalformedInput);
    assert_no_outputs(&ws);
}

#[test]
fn test_list_headers_on_empty_file_is_malformed() {
    let ws = Workspace::new("people.csv", "");

    let err = ws.run(&["-q"]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::MalformedInput);
}

#[test]
fn test_missing_input_is_general_error() {
    let ws = Workspace::new("people.csv", "a\n1\n");
    std::fs::remove_file(&ws.input).unwrap();

    let err = ws.run(&[]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_invalid_config_is_general_error() {
    let ws = Workspace::new("people.csv", "a\n1\n");
    ws.write_config("delimiter = \"§\"\n");

    let err = ws.run(&[]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert_no_outputs(&ws);
}

#[test]
fn test_structured_error_for_bad_count() {
    let ws = Workspace::new("people.csv", "a,b,c\n1,2,3\n");

    let err = ws.run(&["-c", "0"]).unwrap_err();
    let structured = StructuredError::new(&err, ExitCode::for_error(&err));
    let json = serde_json::to_value(&structured).unwrap();

    assert_eq!(json["code"], "CD002");
    assert_eq!(json["exit_code"], 2);
    assert_eq!(
        json["message"],
        "Invalid column count 0: must be between 1 and 3"
    );
}

#[test]
fn test_cli_delimiter_overrides_invalid_config_delimiter() {
    let ws = Workspace::new("people.csv", "a;b\n1;2\n1;3\n");
    ws.write_config("delimiter = \"\\n\"\n");

    let (code, stdout) = ws.run(&["-d", ";", "-r", "0"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(stdout, "Duplicates found: 1\n");
}

#[test]
fn test_quote_delimiter_is_rejected() {
    let ws = Workspace::new("people.csv", "a\n1\n");

    let err = ws.run(&["-d", "\""]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("Invalid delimiter"));
    assert_no_outputs(&ws);
}
