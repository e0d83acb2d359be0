use super::helpers::{read, Workspace};

#[test]
fn test_no_annotate_keeps_plain_header() {
    let ws = Workspace::new("people.csv", "a,b,c\n1,2,3\n1,2,9\n");

    ws.run(&["-r", "0", "--no-annotate"]).unwrap();

    assert_eq!(
        read(&ws.path("people_duplicates.csv")),
        "a,b,c\n1,2,9\n"
    );
}

#[test]
fn test_tab_delimiter_round_trips() {
    let ws = Workspace::new("people.tsv", "a\tb\nx\t1\nx\t2\n");

    ws.run(&["-d", "tab", "-r", "a"]).unwrap();

    assert_eq!(read(&ws.path("people_deduped.tsv")), "a\tb\nx\t1\n");
    assert_eq!(
        read(&ws.path("people_duplicates.tsv")),
        "source_line\tfirst_seen_line\ta\tb\n3\t2\tx\t2\n"
    );
}

#[test]
fn test_config_file_sets_suffixes_and_delimiter() {
    let ws = Workspace::new("people.csv", "a;b\n1;2\n1;3\n");
    ws.write_config(
        "delimiter = \";\"\ndeduped_suffix = \"_clean\"\nduplicates_suffix = \"_removed\"\n",
    );

    ws.run(&["-r", "0"]).unwrap();

    assert_eq!(read(&ws.path("people_clean.csv")), "a;b\n1;2\n");
    assert!(ws.path("people_removed.csv").exists());
    assert!(!ws.path("people_deduped.csv").exists());
}

#[test]
fn test_cli_delimiter_overrides_config() {
    let ws = Workspace::new("people.csv", "a|b\n1|2\n1|3\n");
    ws.write_config("delimiter = \";\"\n");

    let (_, stdout) = ws.run(&["-d", "|", "-r", "0"]).unwrap();

    assert_eq!(stdout, "Duplicates found: 1\n");
}

#[test]
fn test_quoted_fields_are_requoted() {
    let ws = Workspace::new("people.csv", "name,city\n\"Smith, J\",Paris\n\"Smith, J\",Rome\n");

    ws.run(&["-r", "name"]).unwrap();

    assert_eq!(
        read(&ws.path("people_deduped.csv")),
        "name,city\n\"Smith, J\",Paris\n"
    );
    assert_eq!(
        read(&ws.path("people_duplicates.csv")),
        "source_line,first_seen_line,name,city\n3,2,\"Smith, J\",Rome\n"
    );
}

#[test]
fn test_file_without_extension() {
    let ws = Workspace::new("records", "k\n1\n1\n");

    ws.run(&[]).unwrap();

    assert_eq!(read(&ws.path("records_deduped")), "k\n1\n");
    assert!(ws.path("records_duplicates").exists());
}

#[test]
fn test_existing_output_is_overwritten() {
    let ws = Workspace::new("people.csv", "k\n1\n1\n");
    std::fs::write(ws.path("people_deduped.csv"), "stale contents\n").unwrap();

    ws.run(&[]).unwrap();

    assert_eq!(read(&ws.path("people_deduped.csv")), "k\n1\n");
}

#[test]
fn test_source_lines_count_blank_lines() {
    let ws = Workspace::new("people.csv", "a,b\n\n1,2\n\n1,2\n");

    ws.run(&[]).unwrap();

    assert_eq!(read(&ws.path("people_deduped.csv")), "a,b\n1,2\n");
    assert_eq!(
        read(&ws.path("people_duplicates.csv")),
        "source_line,first_seen_line,a,b\n5,3,1,2\n"
    );
}
