use search_cli::{build_server, load_input_docs, run_console};
use search_core::{DocumentStatus, SearchError};
use std::fs;
use tempfile::tempdir;

#[test]
fn console_prints_ranked_documents() {
    let input = "\
и в на
3
белый кот и модный ошейник
2 8 -3
пушистый кот пушистый хвост
3 7 2 7
ухоженный пёс выразительные глаза
4 5 -12 2 1
пушистый ухоженный кот
";
    let mut out = Vec::new();
    run_console(&mut input.as_bytes(), &mut out).unwrap();
    let lines: Vec<String> = String::from_utf8(out).unwrap().lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "{ document_id = 1, relevance = 0.650672, rating = 5 }",
            "{ document_id = 2, relevance = 0.274653, rating = -1 }",
            "{ document_id = 0, relevance = 0.101366, rating = 2 }",
        ]
    );
}

#[test]
fn console_surfaces_query_errors() {
    let input = "and\n1\nfluffy cat\n0\n--fluffy\n";
    let err = run_console(&mut input.as_bytes(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err.downcast_ref::<SearchError>(), Some(SearchError::InvalidQuerySyntax { .. })));
}

#[test]
fn console_rejects_oversized_document_count() {
    let input = "and\n18446744073709551615\nfluffy cat\n0\nfluffy\n";
    let mut out = Vec::new();
    assert!(run_console(&mut input.as_bytes(), &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn console_fails_when_documents_run_out() {
    let input = "and\n1000000000\nfluffy cat\n0\n";
    let err = run_console(&mut input.as_bytes(), &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("unexpected end of input"));
}

#[test]
fn loads_json_and_jsonl_from_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a.jsonl"),
        r#"{"id": 1, "text": "fluffy cat fluffy tail", "ratings": [7, 2, 7]}

{"id": 3, "body": "big dog and starling", "ratings": [1, 3, 2]}
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b.json"),
        r#"[{"id": 5, "text": "fluffy starling", "status": "BANNED"}, {"id": 1, "text": "duplicate"}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let docs = load_input_docs(dir.path()).unwrap();
    assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3, 5, 1]);

    let server = build_server("and", docs).unwrap();
    assert_eq!(server.document_count(), 3);
    let top = server.find_top_documents("fluffy").unwrap();
    assert_eq!(top.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);
    let banned = server.find_top_documents_with_status("fluffy", DocumentStatus::Banned).unwrap();
    assert_eq!(banned.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn invalid_record_is_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.jsonl");
    fs::write(&file, "{\"text\": \"missing id\"}\n").unwrap();
    assert!(load_input_docs(&file).is_err());
}

#[test]
fn invalid_stop_words_fail_the_build() {
    let err = build_server("ag\x12g", Vec::new()).unwrap_err();
    assert_eq!(err.downcast_ref::<SearchError>(), Some(&SearchError::InvalidToken("ag\x12g".into())));
}
