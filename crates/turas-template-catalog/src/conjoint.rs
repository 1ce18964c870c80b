//! Choice-based conjoint template

use crate::table::{settings_sheet, sheet};
use turas_template_core::{
    CellRow, CellValue, InstructionSection, InstructionsSpec, MergeSpan, TemplateSpec, TitleSuffix,
};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("conjoint")
        .instructions(instructions())
        .sheet(settings_sheet(
            "Settings",
            "Setting",
            [25.0, 30.0, 12.0, 30.0, 50.0],
            &[
                ["analysis_type", "choice", "Required", "choice", "Analysis type (currently only \"choice\" is supported)"],
                ["data_file", "conjoint_data.csv", "Required", "CSV, XLSX, SAV, RDS file path", "Path to conjoint data file"],
                ["output_file", "conjoint_results.xlsx", "Required", "XLSX file path", "Output Excel file path"],
                ["choice_set_column", "choice_set_id", "Required", "Column name", "Column identifying which alternatives were shown together"],
                ["chosen_column", "chosen", "Required", "Column name", "Column with 1/0 indicating if alternative was chosen"],
                ["respondent_id_column", "resp_id", "Required", "Column name", "Column with unique respondent identifier"],
            ],
        ))
        .sheet(
            sheet(
                "Attributes",
                &[("AttributeName", 18.0), ("NumLevels", 12.0), ("LevelNames", 45.0)],
            )
            .status_column(0)
            .row(CellRow::documentation(["Required?", "Valid Values", "Description"]))
            .row(CellRow::documentation([
                "Required (column name)",
                "Integer (2+)",
                "Comma-separated list",
            ]))
            .row(CellRow::documentation_merged(
                [
                    "Description",
                    "Attribute name must match data column. NumLevels is count of levels. \
                     LevelNames are comma-separated values matching data.",
                    "",
                ],
                MergeSpan::columns(1, 2),
            ))
            .rows(
                [
                    ("Price", "£449, £599, £699"),
                    ("Brand", "Apple, Samsung, Google"),
                    ("Storage", "128GB, 256GB, 512GB"),
                    ("Battery", "12 hours, 18 hours, 24 hours"),
                ]
                .into_iter()
                .map(|(name, levels)| {
                    CellRow::example([
                        CellValue::from(name),
                        CellValue::from(3),
                        CellValue::from(levels),
                    ])
                }),
            )
            .freeze_header(),
        )
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "TURAS Conjoint Analysis",
        "This template configures choice-based conjoint analysis to estimate attribute \
         part-worth utilities.",
    )
    .suffix(TitleSuffix::ConfigurationTemplate)
    .section(InstructionSection::new(
        "Sheets in this template",
        [
            "Settings - Analysis type and data file mapping",
            "Attributes - Product attributes and their levels",
        ],
    ))
    .section(InstructionSection::new(
        "Conjoint analysis",
        [
            "Estimates part-worth utilities for each attribute level",
            "Requires choice-based data (respondents choosing from alternatives)",
            "Calculates relative importance of each attribute",
            "Simulates market share for different product configurations",
        ],
    ))
    .section(InstructionSection::new(
        "Data format",
        [
            "One row per alternative shown to respondent",
            "choice_set_id: Groups alternatives shown together",
            "chosen: 1 if selected, 0 if not",
            "respondent_id: Unique respondent identifier",
            "Attribute columns: Values for each attribute (matching LevelNames)",
        ],
    ))
    .section(InstructionSection::new(
        "Quick start",
        [
            "Update Settings sheet with your data file and column names",
            "Define your attributes in Attributes sheet",
            "Ensure data format matches (one row per alternative)",
            "Save and run: turas_load(\"conjoint\") then run analysis",
        ],
    ))
    .section(InstructionSection::new(
        "Documentation",
        [
            "Yellow rows = parameter documentation (Required?, Valid Values, Description)",
            "Gray rows = example values",
            "Delete documentation rows before production use (optional)",
            "For detailed help, see: modules/conjoint/documentation/",
        ],
    ))
}
