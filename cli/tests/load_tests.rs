use clap::Parser;
use search_cli::load::{corpus_files, load_corpus};
use search_cli::{error_code, run, Cli};
use search_core::{DocumentStatus, SearchServer};
use std::fs;
use tempfile::tempdir;

fn write_corpus(dir: &std::path::Path) {
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(
        dir.join("a.json"),
        r#"[
            {"id": 101, "text": "fluffy cat fluffy tail", "ratings": [1, 2, 3]},
            {"id": 102, "text": "fluffy red dog", "status": "BANNED", "ratings": [5]}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("nested/b.jsonl"),
        "{\"id\": 103, \"text\": \"tail of the dog\"}\n\n{\"id\": 104, \"text\": \"cat fluffy tail\", \"ratings\": [9]}\n",
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("searchctl").chain(args.iter().copied())).unwrap()
}

#[test]
fn walks_json_and_jsonl() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    assert_eq!(corpus_files(dir.path()).len(), 2);

    let mut server = SearchServer::new();
    let added = load_corpus(&mut server, dir.path()).unwrap();
    assert_eq!(added, 4);
    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![101, 102, 103, 104]);
    assert_eq!(server.match_document("dog", 102).unwrap().1, DocumentStatus::Banned);
}

#[test]
fn duplicate_id_aborts_load() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("docs.jsonl"),
        "{\"id\": 1, \"text\": \"cat\"}\n{\"id\": 1, \"text\": \"dog\"}\n",
    )
    .unwrap();
    let mut server = SearchServer::new();
    let err = load_corpus(&mut server, dir.path()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("already indexed"));
    assert!(message.contains("docs.jsonl:2: document 1"), "{message}");
    assert_eq!(error_code(&err), Some("DUPLICATE_ID"));
}

#[test]
fn missing_field_names_the_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad_corpus.json");
    fs::write(&file, r#"[{"id": 1}]"#).unwrap();
    let mut server = SearchServer::new();
    let err = load_corpus(&mut server, &file).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("bad_corpus.json"), "{message}");
    assert!(message.contains("text"), "{message}");
    assert_eq!(error_code(&err), None);
}

#[test]
fn invalid_utf8_line_names_file_and_line() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad_lines.jsonl");
    fs::write(&file, b"{\"id\": 1, \"text\": \"cat\"}\n\xff\n").unwrap();
    let mut server = SearchServer::new();
    let err = load_corpus(&mut server, &file).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("bad_lines.jsonl:2"), "{message}");
}

#[test]
fn empty_input_is_error() {
    let dir = tempdir().unwrap();
    let mut server = SearchServer::new();
    assert!(load_corpus(&mut server, dir.path()).is_err());
}

#[test]
fn search_command_prints_ranked_documents() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();

    let out = run(cli(&["--input", &input, "--stop-words", "of the", "search", "fluffy -dog"])).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("{ document_id = 101,"));
    assert!(lines[1].starts_with("{ document_id = 104,"));

    let out = run(cli(&["--input", &input, "--json", "search", "dog", "--status", "banned"])).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["id"], 102);
    assert_eq!(json[0]["rating"], 5);
}

#[test]
fn dedup_command_reports_removed_ids() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();

    let out = run(cli(&["--input", &input, "--json", "dedup"])).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["removed"], serde_json::json!([104]));
    assert_eq!(json["remaining"], 3);
}

#[test]
fn match_command_rejects_bad_query() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();
    assert!(run(cli(&["--input", &input, "match", "cat --dog", "--id", "101"])).is_err());

    let out = run(cli(&["--input", &input, "match", "cat tail", "--id", "101"])).unwrap();
    assert_eq!(out.trim(), "{ document_id = 101, status = ACTUAL, words = cat tail }");
}

#[test]
fn stats_command_lists_ids_in_insertion_order() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();

    let out = run(cli(&["--input", &input, "stats"])).unwrap();
    assert_eq!(out, "4 documents\n101\n102\n103\n104\n");

    let out = run(cli(&["--input", &input, "--json", "stats"])).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["count"], 4);
    assert_eq!(json["ids"], serde_json::json!([101, 102, 103, 104]));
}

#[test]
fn min_rating_filter_ignores_status() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();

    let out = run(cli(&["--input", &input, "--json", "search", "fluffy", "--min-rating", "5"])).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![104, 102]);
}

#[test]
fn status_and_min_rating_conflict() {
    let result = Cli::try_parse_from([
        "searchctl", "search", "fluffy", "--status", "actual", "--min-rating", "1",
    ]);
    let err = result.err().unwrap();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}
