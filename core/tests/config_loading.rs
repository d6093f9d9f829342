//! The shipped data/ directory must load and match the demo tables.

use realloc_core::config::PlannerConfig;

fn data_dir() -> String {
    format!("{}/../data", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn shipped_data_matches_demo() {
    let loaded = PlannerConfig::load(&data_dir()).expect("data/ should load");

    assert_eq!(loaded, PlannerConfig::demo());
}

#[test]
fn missing_directory_is_an_error() {
    let err = PlannerConfig::load("/nonexistent/planner-data").unwrap_err();

    assert!(err.to_string().contains("Cannot read"), "unexpected error: {err}");
}
