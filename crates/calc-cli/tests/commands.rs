//! End-to-end runs of the `calc` subcommands against a catalog file

use calc_cli::{run, Invocation};
use calc_test_utils::{cable_sizing_template, seismic_catalog, voltage_template};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn catalog_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut templates = seismic_catalog();
    templates.push(voltage_template());
    templates.push(cable_sizing_template());
    std::fs::write(&path, serde_json::to_string(&templates).unwrap()).unwrap();
    (dir, path)
}

async fn calc(args: &[&str]) -> anyhow::Result<calc_cli::CommandOutput> {
    let invocation = Invocation::try_parse_from(std::iter::once("calc").chain(args.iter().copied()))?;
    run(&invocation).await
}

#[tokio::test]
async fn search_finds_seismic_templates() {
    let (_dir, path) = catalog_file();
    let path = path.to_str().unwrap();

    let out = calc(&["--catalog", path, "search", "sismic", "--sort", "name"]).await.unwrap();
    let ids: Vec<&str> = out
        .text
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["struct-01", "struct-04", "geo-02"]);

    let out = calc(&["--catalog", path, "--json", "search", "sismic", "--all"]).await.unwrap();
    let found: Vec<serde_json::Value> = serde_json::from_str(&out.text).unwrap();
    assert_eq!(found.len(), 4);
}

#[tokio::test]
async fn show_lists_parameters() {
    let (_dir, path) = catalog_file();
    let out = calc(&["-c", path.to_str().unwrap(), "show", "elec-voltage"]).await.unwrap();
    assert!(out.text.contains("voltage (number, required) [100..240] V: Voltage"));

    let err = calc(&["-c", path.to_str().unwrap(), "show", "nope"]).await.unwrap_err();
    assert!(format!("{err:#}").contains("template not found: nope"));
}

#[tokio::test]
async fn validate_reports_field_errors() {
    let (_dir, path) = catalog_file();
    let path = path.to_str().unwrap();

    let out = calc(&["-c", path, "validate", "elec-voltage", "--set", "voltage=150"]).await.unwrap();
    assert!(out.success);
    assert_eq!(out.text, "valid\n");

    let out = calc(&["-c", path, "validate", "elec-voltage", "--set", "voltage=300"]).await.unwrap();
    assert!(!out.success);
    assert_eq!(out.text, "voltage: maximum value is 240\n");

    let out = calc(&["-c", path, "validate", "elec-voltage"]).await.unwrap();
    assert_eq!(out.text, "voltage: required\n");

    let out = calc(&[
        "-c", path, "validate", "elec-cable", "-s", "current=32", "-s", "circuit=lp12",
    ])
    .await
    .unwrap();
    assert_eq!(out.text, "circuit: use a tag like LP-12\n");

    assert!(calc(&["-c", path, "validate", "elec-voltage", "-s", "phase=3"]).await.is_err());
}

#[tokio::test]
async fn trending_respects_limit_and_config() {
    let (dir, path) = catalog_file();
    let path_str = path.to_str().unwrap();

    let out = calc(&["-c", path_str, "trending", "--limit", "2"]).await.unwrap();
    assert_eq!(out.text.lines().count(), 2);
    assert!(out.text.lines().next().unwrap().starts_with("struct-02"));

    let config = dir.path().join("studio.toml");
    std::fs::write(&config, "[catalog]\ntrending_limit = 3\n").unwrap();
    let out = calc(&["-c", path_str, "--config", config.to_str().unwrap(), "trending"])
        .await
        .unwrap();
    assert_eq!(out.text.lines().count(), 3);
}

#[tokio::test]
async fn config_prints_effective_values() {
    let out = calc(&["config"]).await.unwrap();
    assert!(out.text.contains("history_capacity = 5"));
    assert!(out.text.contains("failure_fallback_message = \"Calculation failed\""));
}

#[tokio::test]
async fn catalog_is_required_for_catalog_commands() {
    let err = calc(&["search", "x"]).await.unwrap_err();
    assert!(err.to_string().contains("--catalog"));
}
