//! Integration tests for results persistence and discovery.

use agentic_vision::{
    Error, ExperimentPaths, Mode, QueryResult, QueryStatus, TestRun, find_latest_results,
    load_results, results_file_name, save_results,
};

fn sample_runs() -> Vec<TestRun> {
    vec![TestRun {
        test_id: 1,
        test_name: "finger_counting".to_string(),
        mode: Mode::CodeOn,
        results: vec![
            QueryResult {
                image: "fingers_5.jpg".to_string(),
                status: QueryStatus::Success,
                response_text: "I see 5 fingers total".to_string(),
                code_executed: vec!["len(hand.fingers)".to_string()],
                code_results: vec!["5\n".to_string()],
                images_generated: 1,
                ground_truth: Some(5),
                error: None,
                reason: None,
            },
            QueryResult::skipped("fingers_7.jpg", "file not found"),
            QueryResult {
                image: "fingers_10.jpg".to_string(),
                status: QueryStatus::Error,
                response_text: String::new(),
                code_executed: Vec::new(),
                code_results: Vec::new(),
                images_generated: 0,
                ground_truth: Some(10),
                error: Some("API error 503: Service Unavailable".to_string()),
                reason: None,
            },
        ],
    }]
}

#[test]
fn test_round_trip_reproduces_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExperimentPaths::new(dir.path());
    paths.ensure().unwrap();

    let runs = sample_runs();
    let saved = save_results(&paths, &runs, &results_file_name("20260805_120000")).unwrap();
    let loaded = load_results(&saved).unwrap();

    assert_eq!(loaded, runs);
}

#[test]
fn test_persisted_field_names_are_stable() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExperimentPaths::new(dir.path());
    paths.ensure().unwrap();

    let saved = save_results(
        &paths,
        &sample_runs(),
        &results_file_name("20260805_120000"),
    )
    .unwrap();
    let raw = std::fs::read_to_string(saved).unwrap();

    for field in [
        "\"test_id\"",
        "\"test_name\"",
        "\"mode\"",
        "\"results\"",
        "\"image\"",
        "\"status\"",
        "\"response_text\"",
        "\"code_executed\"",
        "\"code_results\"",
        "\"images_generated\"",
        "\"ground_truth\"",
    ] {
        assert!(raw.contains(field), "missing field {field}");
    }
    assert!(raw.contains("\"code_on\""));
    assert!(raw.contains("\"skipped\""));
}

#[test]
fn test_find_latest_prefers_newest_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExperimentPaths::new(dir.path());
    paths.ensure().unwrap();

    let older = save_results(
        &paths,
        &sample_runs(),
        &results_file_name("20260805_110000"),
    )
    .unwrap();
    // ensure a measurably newer mtime on the second file
    std::thread::sleep(std::time::Duration::from_millis(20));
    let newer = save_results(
        &paths,
        &sample_runs(),
        &results_file_name("20260805_120000"),
    )
    .unwrap();

    let found = find_latest_results(&paths).unwrap();
    assert_eq!(found, newer);
    assert_ne!(found, older);
}

#[test]
fn test_find_latest_ignores_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExperimentPaths::new(dir.path());
    paths.ensure().unwrap();

    std::fs::write(paths.raw.join("notes.txt"), "not a results file").unwrap();
    std::fs::write(paths.raw.join("other.json"), "{}").unwrap();

    match find_latest_results(&paths) {
        Err(Error::NoResults(_)) => {}
        other => panic!("expected NoResults, got {other:?}"),
    }
}

#[test]
fn test_empty_directory_is_nothing_to_process() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExperimentPaths::new(dir.path());
    paths.ensure().unwrap();

    match find_latest_results(&paths) {
        Err(Error::NoResults(_)) => {}
        other => panic!("expected NoResults, got {other:?}"),
    }
}
