//! Integration tests for editing and annotating existing workbooks

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::io::Read;
use std::path::Path;
use turas_template_core::{
    CellRow, CellValue, ColumnSpec, InstructionsSpec, MergeSpan, RenderError, SheetSpec,
    TemplateSpec,
};
use turas_template_render::{
    annotate_working_template, load_workbook, patch_settings, ExcelRenderer, PatchOutcome,
    SettingPatch,
};

fn created() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
}

fn write_example_config(path: &Path) {
    let template = TemplateSpec::new("conjoint-example")
        .instructions(InstructionsSpec::new("Conjoint Example", "Smartphone CBC study."))
        .sheet(
            SheetSpec::new("Settings")
                .column(ColumnSpec::new("Setting").width(30.0))
                .column(ColumnSpec::new("Value").width(45.0))
                .row(CellRow::data(["analysis_type", "choice"]))
                .row(CellRow::data(["data_file", "examples/sample_cbc_data.csv"]))
                .row(CellRow::data([
                    "output_file",
                    "examples/output/example_results.xlsx",
                ]))
                .row(CellRow::data(["generate_market_simulator", "FALSE"]))
                .freeze_header(),
        )
        .sheet(
            SheetSpec::new("Attributes")
                .column(ColumnSpec::new("AttributeName"))
                .column(ColumnSpec::new("NumLevels"))
                .row(CellRow::data([CellValue::from("Brand"), CellValue::from(4)])),
        );

    ExcelRenderer::new()
        .assemble(&template, created())
        .unwrap()
        .persist(path)
        .unwrap();
}

fn write_settings_with_types(path: &Path, header: &[&str]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Settings").unwrap();
    for (col, text) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *text).unwrap();
    }
    sheet.write_string(1, 0, "data_file").unwrap();
    sheet.write_string(1, 1, "data/wave1.csv").unwrap();
    sheet.write_string(2, 0, "include_diagnostics").unwrap();
    sheet.write_boolean(2, 1, true).unwrap();
    sheet.write_string(3, 0, "confidence_level").unwrap();
    sheet.write_number(3, 1, 0.95).unwrap();
    workbook.save(path).unwrap();
}

fn package_parts(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut part = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            part.read_to_end(&mut data).unwrap();
            (part.name().to_string(), data)
        })
        .collect()
}

fn cell_element(xml: &str, reference: &str) -> String {
    let start = xml.find(&format!(r#"<c r="{reference}""#)).unwrap();
    let len = xml[start..].find("</c>").unwrap() + "</c>".len();
    xml[start..start + len].to_string()
}

fn style_attr(cell: &str) -> &str {
    let start = cell.find(" s=\"").unwrap() + 4;
    let len = cell[start..].find('"').unwrap();
    &cell[start..start + len]
}

#[test]
fn patch_rewrites_matching_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example_config.xlsx");
    write_example_config(&path);

    let outcomes = patch_settings(
        &path,
        "Settings",
        &[
            SettingPatch::new("data_file", "sample_cbc_data.csv"),
            SettingPatch::new("output_file", "output/example_results.xlsx"),
        ],
    )
    .unwrap();

    assert_eq!(
        outcomes,
        vec![
            PatchOutcome::Updated {
                key: "data_file".into(),
                row: 2,
                previous: CellValue::from("examples/sample_cbc_data.csv"),
            },
            PatchOutcome::Updated {
                key: "output_file".into(),
                row: 3,
                previous: CellValue::from("examples/output/example_results.xlsx"),
            },
        ]
    );

    let loaded = load_workbook(&path).unwrap();
    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(settings.cell(2, 1), Some(&CellValue::from("sample_cbc_data.csv")));
    assert_eq!(
        settings.cell(3, 1),
        Some(&CellValue::from("output/example_results.xlsx"))
    );
    assert_eq!(settings.cell(1, 1), Some(&CellValue::from("choice")));
    assert_eq!(
        loaded.sheet_names(),
        vec!["Instructions", "Settings", "Attributes"]
    );
    assert_eq!(
        loaded.sheet("Attributes").unwrap().cell(1, 1),
        Some(&CellValue::Number(4.0))
    );
}

#[test]
fn patch_reports_missing_key_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example_config.xlsx");
    write_example_config(&path);

    let outcomes = patch_settings(
        &path,
        "Settings",
        &[
            SettingPatch::new("generate_market_simulator", "TRUE"),
            SettingPatch::new("legacy_option", "x"),
        ],
    )
    .unwrap();

    assert!(outcomes[0].is_updated());
    assert_eq!(
        outcomes[1],
        PatchOutcome::NotFound {
            key: "legacy_option".into()
        }
    );

    let loaded = load_workbook(&path).unwrap();
    assert_eq!(
        loaded.sheet("Settings").unwrap().cell(4, 1),
        Some(&CellValue::from("TRUE"))
    );
}

#[test]
fn patch_with_no_match_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example_config.xlsx");
    write_example_config(&path);
    let before = fs::read(&path).unwrap();

    let outcomes = patch_settings(&path, "Settings", &[SettingPatch::new("absent", "1")]).unwrap();
    assert!(!outcomes[0].is_updated());

    let missing_sheet =
        patch_settings(&path, "Config", &[SettingPatch::new("data_file", "x.csv")]).unwrap();
    assert_eq!(
        missing_sheet,
        vec![PatchOutcome::NotFound {
            key: "data_file".into()
        }]
    );

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn patch_never_matches_the_header_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example_config.xlsx");
    write_example_config(&path);

    let outcomes = patch_settings(&path, "Settings", &[SettingPatch::new("Setting", "x")]).unwrap();
    assert!(!outcomes[0].is_updated());
}

#[test]
fn patch_on_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = patch_settings(
        dir.path().join("absent.xlsx"),
        "Settings",
        &[SettingPatch::new("data_file", "x")],
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
}

#[test]
fn annotate_prepends_generic_instructions() {
    let dir = tempfile::tempdir().unwrap();
    let working = dir.path().join("Conjoint_Config_Template.xlsx");
    let output = dir.path().join("Conjoint_Config_Template_Annotated.xlsx");
    write_example_config(&working);

    let names = annotate_working_template(&working, &output, "Conjoint", created()).unwrap();
    assert_eq!(names, vec!["Instructions", "Settings", "Attributes"]);

    let loaded = load_workbook(&output).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Instructions", "Settings", "Attributes"]);

    let instructions = loaded.sheet("Instructions").unwrap();
    assert_eq!(
        instructions.cell(0, 0),
        Some(&CellValue::from(
            "Conjoint Configuration Template - Instructions"
        ))
    );
    assert_eq!(instructions.cell(8, 0), Some(&CellValue::from("HOW TO USE THIS TEMPLATE")));

    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(settings.cell(0, 0), Some(&CellValue::from("Setting")));
    assert_eq!(settings.cell(2, 1), Some(&CellValue::from("examples/sample_cbc_data.csv")));
}

#[test]
fn patch_keeps_boolean_and_number_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Confidence_Config.xlsx");
    write_settings_with_types(&path, &["Setting", "Value"]);

    let outcomes =
        patch_settings(&path, "Settings", &[SettingPatch::new("data_file", "data/wave2.csv")])
            .unwrap();
    assert!(outcomes[0].is_updated());

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Settings").unwrap();
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("data/wave2.csv".into()))
    );
    assert_eq!(range.get_value((2, 1)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((3, 1)), Some(&Data::Float(0.95)));
}

#[test]
fn patch_changes_only_the_target_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Pricing_Config.xlsx");
    let template = TemplateSpec::new("pricing")
        .instructions(InstructionsSpec::new("Pricing Research", "Price sensitivity."))
        .sheet(
            SheetSpec::new("Settings")
                .column(ColumnSpec::new("Setting").width(30.0))
                .column(ColumnSpec::new("Value").width(40.0))
                .column(ColumnSpec::new("Description").width(50.0))
                .row(CellRow::data(["project_name", "Pricing Study", "Shown in reports"]))
                .row(CellRow::data([
                    "analysis_method",
                    "van_westendorp",
                    "van_westendorp, gabor_granger or both",
                ]))
                .freeze_header(),
        )
        .sheet(
            SheetSpec::new("GaborGranger")
                .column(ColumnSpec::new("Price").status())
                .column(ColumnSpec::new("Column"))
                .column(ColumnSpec::new(""))
                .row(CellRow::documentation_merged(
                    ["Required", "Purchase intent column per price point"],
                    MergeSpan::columns(1, 2),
                ))
                .row(CellRow::example([CellValue::from(49), CellValue::from("pi_49")])),
        );
    ExcelRenderer::new()
        .assemble(&template, created())
        .unwrap()
        .persist(&path)
        .unwrap();
    let before = package_parts(&path);

    patch_settings(
        &path,
        "Settings",
        &[SettingPatch::new("analysis_method", "gabor_granger")],
    )
    .unwrap();
    let after = package_parts(&path);

    let names = |parts: &[(String, Vec<u8>)]| {
        parts.iter().map(|(name, _)| name.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&before), names(&after));

    let changed: Vec<_> = before
        .iter()
        .zip(&after)
        .filter(|(old, new)| old.1 != new.1)
        .map(|(old, new)| {
            (
                old.0.clone(),
                String::from_utf8_lossy(&old.1).into_owned(),
                String::from_utf8_lossy(&new.1).into_owned(),
            )
        })
        .collect();
    let changed_names: Vec<_> = changed.iter().map(|(name, ..)| name.as_str()).collect();
    assert_eq!(changed.len(), 1, "changed parts: {changed_names:?}");
    let (part, old_xml, new_xml) = &changed[0];
    assert!(part.starts_with("xl/worksheets/"), "{part}");

    let merges = |parts: &[(String, Vec<u8>)]| {
        parts
            .iter()
            .map(|(_, data)| String::from_utf8_lossy(data).matches("<mergeCell ").count())
            .sum::<usize>()
    };
    assert!(merges(&before) > 0);
    assert_eq!(merges(&before), merges(&after));

    let old_cell = cell_element(old_xml, "B3");
    let new_cell = cell_element(new_xml, "B3");
    assert_ne!(old_cell, new_cell);
    assert_eq!(style_attr(&new_cell), style_attr(&old_cell));
    assert_eq!(cell_element(new_xml, "C3"), cell_element(old_xml, "C3"));

    let loaded = load_workbook(&path).unwrap();
    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(settings.cell(2, 1), Some(&CellValue::from("gabor_granger")));
    assert_eq!(settings.cell(1, 1), Some(&CellValue::from("Pricing Study")));
}

#[test]
fn repeated_header_text_can_be_patched_and_annotated() {
    let dir = tempfile::tempdir().unwrap();
    let working = dir.path().join("Tracker_Config_Template.xlsx");
    let output = dir.path().join("Tracker_Config_Template_Annotated.xlsx");
    write_settings_with_types(&working, &["Setting", "Value", "Notes", "Notes"]);

    let outcomes =
        patch_settings(&working, "Settings", &[SettingPatch::new("data_file", "wave3.csv")])
            .unwrap();
    assert!(outcomes[0].is_updated());

    let names = annotate_working_template(&working, &output, "Tracker", created()).unwrap();
    assert_eq!(names, vec!["Instructions", "Settings"]);

    let loaded = load_workbook(&output).unwrap();
    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(
        settings.rows[0],
        vec![
            CellValue::from("Setting"),
            CellValue::from("Value"),
            CellValue::from("Notes"),
            CellValue::from("Notes"),
        ]
    );
    assert_eq!(settings.cell(1, 1), Some(&CellValue::from("wave3.csv")));
}
