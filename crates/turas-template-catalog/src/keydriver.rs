//! Key driver analysis template

use crate::table::{examples, settings_sheet, sheet};
use turas_template_core::{
    CellRow, InstructionSection, InstructionsSpec, MergeSpan, TemplateSpec, TitleSuffix,
};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("keydriver")
        .instructions(instructions())
        .sheet(settings_sheet(
            "Settings",
            "Setting",
            [25.0, 30.0, 12.0, 30.0, 50.0],
            &[
                ["analysis_name", "Brand Health Drivers", "Optional", "Any text", "Descriptive name for analysis (appears in output)"],
                ["data_file", "keydriver_data.csv", "Required", "CSV, XLSX, SAV, RDS file path", "Path to data file (relative or absolute)"],
                ["output_file", "keydriver_results.xlsx", "Required", "XLSX file path", "Output Excel file path"],
                ["min_sample_size", "30", "Optional", "Positive integer", "Minimum sample size for analysis (default: 30)"],
            ],
        ))
        .sheet(
            sheet(
                "Variables",
                &[("VariableName", 25.0), ("Type", 12.0), ("Label", 30.0)],
            )
            .status_column(0)
            .row(CellRow::documentation(["Required?", "Valid Values", "Description"]))
            .row(CellRow::documentation([
                "Required (column name)",
                "Outcome | Driver | Weight",
                "Display name for output",
            ]))
            .row(CellRow::documentation_merged(
                [
                    "Description",
                    "Variable name must match column in data. Set one Outcome (dependent variable), \
                     multiple Drivers (predictors), optional Weight variable.",
                    "",
                ],
                MergeSpan::columns(1, 2),
            ))
            .rows(examples(&[
                ["overall_satisfaction", "Outcome", "Overall Satisfaction"],
                ["product_quality", "Driver", "Product Quality"],
                ["customer_service", "Driver", "Customer Service"],
                ["value_for_money", "Driver", "Value for Money"],
                ["brand_reputation", "Driver", "Brand Reputation"],
            ]))
            .freeze_header(),
        )
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "TURAS Key Driver Analysis",
        "This template configures key driver analysis to identify which variables drive your \
         outcome metric.",
    )
    .suffix(TitleSuffix::ConfigurationTemplate)
    .section(InstructionSection::new(
        "Sheets in this template",
        [
            "Settings - Basic analysis parameters",
            "Variables - Define outcome and driver variables",
        ],
    ))
    .section(InstructionSection::new(
        "Key driver analysis",
        [
            "Identifies which independent variables (drivers) most influence your outcome",
            "Uses regression-based relative importance analysis",
            "Reports standardized coefficients and relative weights",
        ],
    ))
    .section(InstructionSection::new(
        "Quick start",
        [
            "Update Settings sheet with your data file path",
            "In Variables sheet, set Type=\"Outcome\" for your dependent variable (1 variable)",
            "Set Type=\"Driver\" for all independent variables",
            "Optionally set Type=\"Weight\" for survey weight variable",
            "Save and run: turas_load(\"keydriver\") then run analysis",
        ],
    ))
    .section(InstructionSection::new(
        "Documentation",
        [
            "Yellow rows = parameter documentation (Required?, Valid Values, Description)",
            "Gray rows = example values",
            "Delete documentation rows before production use (optional)",
            "For detailed help, see: modules/keydriver/documentation/",
        ],
    ))
}
