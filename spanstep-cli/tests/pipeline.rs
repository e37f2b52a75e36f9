//! Integration tests driving the CLI library the way the binary does.

use std::fs;

use clap::Parser;
use spanstep_cli::cli::{Cli, run_cli};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn execute(args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run_cli(cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn steps_csv_for_the_sample_graph() -> TestResult {
    let text = execute(&["spanstep", "report", "--format", "steps-csv"])?;
    let last = text.lines().last().unwrap_or_default();
    assert_eq!(
        last,
        "\"8\",\"F-G\",\"Skipped\",\"D-E(1); A-B(2); B-D(3); C-F(4); A-C(5); E-G(6)\",\"21\""
    );
    Ok(())
}

#[test]
fn report_for_a_disconnected_document() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("islands.json");
    fs::write(
        &path,
        r#"{"nodes": [{"id": "P"}, {"id": "Q"}, {"id": "R"}, {"id": "S"}],
            "edges": [{"id": 1, "from": "P", "to": "Q", "weight": 4},
                      {"id": 2, "from": "R", "to": "S", "weight": 1.5}]}"#,
    )?;
    let Some(path_arg) = path.to_str() else {
        panic!("temporary path must be UTF-8");
    };
    let text = execute(&["spanstep", "report", path_arg, "--format", "text"])?;
    assert!(text.contains("Total MST Cost: 5.5\n"));
    assert!(text.contains("Minimum spanning forest: 2 edges across 2 components"));
    Ok(())
}

#[test]
fn play_prints_each_step_until_the_limit() -> TestResult {
    let text = execute(&[
        "spanstep",
        "play",
        "--interval-ms",
        "20",
        "--speed",
        "4",
        "--max-steps",
        "4",
    ])?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[3].starts_with("[4/8] Considering edge (C, F) — added."));
    Ok(())
}
