//! Integration tests: assemble, persist, and read generated workbooks back

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use turas_template_core::{
    CellRow, CellValue, ColumnSpec, InstructionSection, InstructionsSpec, MergeSpan, RenderError,
    SchemaError, SheetSpec, TemplateSpec,
};
use turas_template_render::{load_workbook, ExcelRenderer};

fn created() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
}

fn pricing_like() -> TemplateSpec {
    TemplateSpec::new("pricing")
        .instructions(
            InstructionsSpec::new("Pricing Research Configuration", "Configures a pricing study.")
                .section(InstructionSection::new("Quick start", ["Fill Settings"])),
        )
        .sheet(
            SheetSpec::new("Settings")
                .column(ColumnSpec::new("Setting").width(30.0))
                .column(ColumnSpec::new("Value").width(30.0))
                .column(ColumnSpec::new("Required?").width(12.0).status())
                .row(CellRow::data([
                    "analysis_method",
                    "van_westendorp",
                    "Required",
                ]))
                .row(CellRow::data(["currency_symbol", "$", "Optional"]))
                .freeze_header(),
        )
        .sheet(
            SheetSpec::new("GaborGranger")
                .column(ColumnSpec::new("PricePoint").width(15.0))
                .column(ColumnSpec::new("PurchaseIntentColumn").width(30.0))
                .column(ColumnSpec::new("Notes").width(40.0))
                .row(CellRow::documentation_merged(
                    ["Numeric price", "Column holding intent", ""],
                    MergeSpan::columns(1, 2),
                ))
                .row(CellRow::example([CellValue::from(49), CellValue::from("pi_49")]))
                .row(CellRow::example([CellValue::from(69), CellValue::from("pi_69")])),
        )
}

#[test]
fn sheet_names_match_declaration_with_instructions_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Pricing.xlsx");
    ExcelRenderer::new()
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&path)
        .unwrap();

    let loaded = load_workbook(&path).unwrap();
    assert_eq!(
        loaded.sheet_names(),
        vec!["Instructions", "Settings", "GaborGranger"]
    );
}

#[test]
fn header_and_example_values_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Pricing.xlsx");
    ExcelRenderer::new()
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&path)
        .unwrap();

    let loaded = load_workbook(&path).unwrap();

    let settings = loaded.sheet("Settings").unwrap();
    assert_eq!(
        settings.rows[0],
        vec![
            CellValue::from("Setting"),
            CellValue::from("Value"),
            CellValue::from("Required?")
        ]
    );
    assert_eq!(settings.cell(1, 0), Some(&CellValue::from("analysis_method")));
    assert_eq!(settings.cell(1, 1), Some(&CellValue::from("van_westendorp")));

    let gabor = loaded.sheet("GaborGranger").unwrap();
    assert_eq!(gabor.cell(1, 1), Some(&CellValue::from("Column holding intent")));
    assert_eq!(
        gabor.rows[2],
        vec![CellValue::Number(49.0), CellValue::from("pi_49")]
    );
    assert_eq!(
        gabor.rows[3],
        vec![CellValue::Number(69.0), CellValue::from("pi_69")]
    );
}

#[test]
fn instructions_sheet_carries_title_and_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Pricing.xlsx");
    ExcelRenderer::new()
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&path)
        .unwrap();

    let loaded = load_workbook(&path).unwrap();
    let instructions = loaded.sheet("Instructions").unwrap();
    assert_eq!(
        instructions.cell(0, 0),
        Some(&CellValue::from("Pricing Research Configuration - Instructions"))
    );
    assert_eq!(instructions.cell(1, 0), Some(&CellValue::from("Created: 2025-11-03")));
    assert_eq!(instructions.cell(8, 0), Some(&CellValue::from("QUICK START")));
}

#[test]
fn generating_twice_yields_identical_cells() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");
    let renderer = ExcelRenderer::new();

    renderer
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&first)
        .unwrap();
    renderer
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&second)
        .unwrap();

    let a = load_workbook(&first).unwrap();
    let b = load_workbook(&second).unwrap();
    assert_eq!(a.sheets, b.sheets);
}

#[test]
fn duplicate_sheets_fail_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Broken.xlsx");
    let template = TemplateSpec::new("broken")
        .sheet(SheetSpec::new("Settings").column(ColumnSpec::new("Setting")))
        .sheet(SheetSpec::new("Settings").column(ColumnSpec::new("Setting")));

    let result = ExcelRenderer::new()
        .assemble(&template, created())
        .and_then(|workbook| workbook.persist(&path));

    assert!(matches!(
        result,
        Err(RenderError::Schema(SchemaError::DuplicateSheetName { .. }))
    ));
    assert!(!path.exists());
}

#[test]
fn missing_output_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("Pricing.xlsx");

    let err = ExcelRenderer::new()
        .assemble(&pricing_like(), created())
        .unwrap()
        .persist(&path)
        .unwrap_err();

    match err {
        RenderError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(!path.exists());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn template_without_instructions_has_no_instructions_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Plain.xlsx");
    let mut template = pricing_like();
    template.instructions = None;

    ExcelRenderer::new()
        .assemble(&template, created())
        .unwrap()
        .persist(&path)
        .unwrap();

    let loaded = load_workbook(&path).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Settings", "GaborGranger"]);
}
