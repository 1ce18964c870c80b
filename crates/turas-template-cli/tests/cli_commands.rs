//! End-to-end tests for the `turas-templates` binary

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;
use turas_template_core::CellValue;
use turas_template_render::load_workbook;

fn turas_templates(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turas-templates"))
        .args(args)
        .env_remove("TURAS_TEMPLATES_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute turas-templates")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn generate_writes_every_catalog_template() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("templates");

    let output = turas_templates(&["generate", "-o", path_arg(&out), "--date", "2025-11-03"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let mut written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    written.sort();
    assert_eq!(written.len(), 11);
    assert!(written.contains(&"Pricing_Config_Template_Annotated.xlsx".to_string()));
    assert!(written.contains(&"Conjoint_Example_Config.xlsx".to_string()));
    assert!(written.contains(&"Parser_Questionnaire_Template.xlsx".to_string()));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("11 template(s) generated"));
}

#[test]
fn generate_selected_modules_only() {
    let dir = tempdir().unwrap();

    let output = turas_templates(&[
        "generate",
        "pricing",
        "keydriver",
        "-o",
        path_arg(dir.path()),
        "--date",
        "2025-11-03",
    ]);
    assert!(output.status.success());

    let loaded = load_workbook(dir.path().join("Pricing_Config_Template_Annotated.xlsx")).unwrap();
    let instructions = loaded.sheet("Instructions").unwrap();
    assert_eq!(instructions.cell(1, 0), Some(&CellValue::from("Created: 2025-11-03")));
    assert!(dir.path().join("KeyDriver_Config_Template_Annotated.xlsx").exists());
    assert!(!dir.path().join("Segment_Config_Template_Annotated.xlsx").exists());
}

#[test]
fn output_directory_falls_back_to_environment() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("from_env");

    let output = Command::new(env!("CARGO_BIN_EXE_turas-templates"))
        .args(["generate", "segment"])
        .env("TURAS_TEMPLATES_DIR", &out)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(out.join("Segment_Config_Template_Annotated.xlsx").exists());
}

#[test]
fn unknown_module_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let output = turas_templates(&["generate", "maxdiff", "-o", path_arg(dir.path())]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown module 'maxdiff'"), "{stderr}");
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn invalid_spec_fails_alone_and_exits_one() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let spec = dir.path().join("broken.json");
    fs::write(
        &spec,
        r#"{
            "module": "broken",
            "sheets": [
                {"name": "Settings", "columns": [{"name": "Setting"}], "rows": []},
                {"name": "Settings", "columns": [{"name": "Setting"}], "rows": []}
            ]
        }"#,
    )
    .unwrap();

    let output = turas_templates(&[
        "generate",
        "tracker",
        "--spec",
        path_arg(&spec),
        "-o",
        path_arg(&out),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.join("Tracker_Config_Template_Annotated.xlsx").exists());
    assert!(!out.join("broken.xlsx").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Duplicate sheet name"), "{stderr}");
}

#[test]
fn spec_module_with_a_path_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let spec = dir.path().join("escape.json");
    fs::write(
        &spec,
        r#"{
            "module": "../escaped",
            "sheets": [{"name": "Settings", "columns": [{"name": "Setting"}], "rows": []}]
        }"#,
    )
    .unwrap();

    let output = turas_templates(&["generate", "--spec", path_arg(&spec), "-o", path_arg(&out)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("escaped.xlsx").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid file name"), "{stderr}");
}

#[test]
fn second_template_for_the_same_file_is_reported() {
    let dir = tempdir().unwrap();
    let spec = dir.path().join("segment.json");
    let described = turas_templates(&["describe", "segment"]);
    fs::write(&spec, &described.stdout).unwrap();

    let out = dir.path().join("out");
    let output = turas_templates(&[
        "generate",
        "segment",
        "--spec",
        path_arg(&spec),
        "-o",
        path_arg(&out),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.join("Segment_Config_Template_Annotated.xlsx").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already written by an earlier template"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 template(s) generated, 1 failed"), "{stdout}");
}

#[test]
fn working_templates_feed_annotate() {
    let dir = tempdir().unwrap();
    let output = turas_templates(&["generate", "--working", "-o", path_arg(dir.path())]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 10);

    let working = dir.path().join("Tabs_Config_Template.xlsx");
    let loaded = load_workbook(&working).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Settings", "Banner", "Stub"]);

    let annotated = dir.path().join("Crosstab_Annotated.xlsx");
    let output = turas_templates(&[
        "annotate",
        path_arg(&working),
        "--module",
        "Crosstab",
        "-o",
        path_arg(&annotated),
        "--date",
        "2025-11-03",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let loaded = load_workbook(&annotated).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Instructions", "Settings", "Banner", "Stub"]);
    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(settings.cell(0, 0), Some(&CellValue::from("Setting")));
    assert_eq!(settings.cell(2, 1), Some(&CellValue::from("survey_data.csv")));
}

#[test]
fn working_flag_rejects_modules_without_a_plain_template() {
    let dir = tempdir().unwrap();
    let output = turas_templates(&[
        "generate",
        "--working",
        "conjoint-example",
        "-o",
        path_arg(dir.path()),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no plain working template"), "{stderr}");
}

#[test]
fn spec_file_round_trips_through_describe() {
    let dir = tempdir().unwrap();
    let spec = dir.path().join("keydriver.json");

    let described = turas_templates(&["describe", "keydriver"]);
    assert!(described.status.success());
    fs::write(&spec, &described.stdout).unwrap();

    let out = dir.path().join("out");
    let output = turas_templates(&["generate", "--spec", path_arg(&spec), "-o", path_arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let loaded = load_workbook(out.join("KeyDriver_Config_Template_Annotated.xlsx")).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Instructions", "Settings", "Variables"]);
}

#[test]
fn list_names_every_module() {
    let output = turas_templates(&["list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.contains("tracker-question-mapping"));
    assert!(stdout.contains("Survey_Structure_Template_Annotated.xlsx"));
}

#[test]
fn patch_then_annotate_the_example_config() {
    let dir = tempdir().unwrap();
    let output = turas_templates(&["generate", "conjoint-example", "-o", path_arg(dir.path())]);
    assert!(output.status.success());
    let config = dir.path().join("Conjoint_Example_Config.xlsx");

    let output = turas_templates(&[
        "patch",
        path_arg(&config),
        "--set",
        "data_file=sample_cbc_data.csv",
        "--set",
        "generate_market_simulator=TRUE",
        "--set",
        "legacy_option=1",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updated: data_file"));
    assert!(stdout.contains("Not found: legacy_option"));

    let loaded = load_workbook(&config).unwrap();
    let settings = loaded.sheet("Settings").unwrap();
    let value_of = |key: &str| {
        settings
            .rows
            .iter()
            .find(|r| r.first() == Some(&CellValue::from(key)))
            .and_then(|r| r.get(1).cloned())
    };
    assert_eq!(value_of("data_file"), Some(CellValue::from("sample_cbc_data.csv")));
    assert_eq!(value_of("generate_market_simulator"), Some(CellValue::from("TRUE")));

    let annotated = dir.path().join("Annotated.xlsx");
    let output = turas_templates(&[
        "annotate",
        path_arg(&config),
        "--module",
        "Conjoint",
        "-o",
        path_arg(&annotated),
        "--date",
        "2025-11-03",
    ]);
    assert!(output.status.success());

    let loaded = load_workbook(&annotated).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Instructions", "Settings", "Attributes"]);
    assert_eq!(
        loaded.sheet("Instructions").unwrap().cell(0, 0),
        Some(&CellValue::from("Conjoint Configuration Template - Instructions"))
    );
}

#[test]
fn patch_requires_key_value_pairs() {
    let dir = tempdir().unwrap();
    let output = turas_templates(&["patch", path_arg(&dir.path().join("x.xlsx")), "--set", "novalue"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("KEY=VALUE"));
}
