//! Worked smartphone CBC example configuration
//!
//! Unlike the annotated templates this file carries real values only: no
//! documentation or example rows, and no status column. It is the workbook
//! the `patch` command is normally pointed at.

use crate::table::sheet;
use turas_template_core::{
    CellRow, CellValue, InstructionSection, InstructionsSpec, SheetSpec, TemplateSpec,
};

const SETTINGS: &[[&str; 3]] = &[
    ["analysis_type", "choice", "Analysis type: 'choice' or 'rating'"],
    ["estimation_method", "auto", "Estimation method: 'auto', 'mlogit', 'clogit', or 'hb'"],
    ["baseline_handling", "first_level_zero", "How to handle baseline: 'first_level_zero' or 'all_levels_explicit'"],
    ["choice_type", "single", "Choice type: 'single', 'single_with_none', 'best_worst', 'continuous_sum'"],
    ["none_as_baseline", "FALSE", "Treat none option as baseline level (TRUE/FALSE)"],
    ["none_label", "None of these", "Label for none option if applicable"],
    ["data_file", "examples/sample_cbc_data.csv", "Path to data file (relative to config file or absolute)"],
    ["output_file", "examples/output/example_results.xlsx", "Path to output Excel file"],
    ["respondent_id_column", "resp_id", "Column name for respondent ID"],
    ["choice_set_column", "choice_set_id", "Column name for choice set ID"],
    ["alternative_id_column", "alternative_id", "Column name for alternative ID (optional)"],
    ["chosen_column", "chosen", "Column name for chosen indicator (1=chosen, 0=not chosen)"],
    ["confidence_level", "0.95", "Confidence level for intervals (0-1)"],
    ["generate_market_simulator", "FALSE", "Generate interactive market simulator sheet (TRUE/FALSE)"],
    ["include_diagnostics", "TRUE", "Include detailed diagnostics in output (TRUE/FALSE)"],
];

/// (name, label, levels)
const ATTRIBUTES: &[(&str, &str, &[&str])] = &[
    ("Brand", "Brand", &["Apple", "Samsung", "Google", "OnePlus"]),
    ("Price", "Price", &["$299", "$399", "$499", "$599"]),
    ("Screen_Size", "Screen Size", &["5.5 inches", "6.1 inches", "6.7 inches"]),
    ("Battery_Life", "Battery Life", &["12 hours", "18 hours", "24 hours"]),
    ("Camera_Quality", "Camera Quality", &["Basic", "Good", "Excellent"]),
];

const MAX_LEVELS: usize = 6;

pub fn template() -> TemplateSpec {
    TemplateSpec::new("conjoint-example")
        .instructions(instructions())
        .sheet(
            sheet(
                "Settings",
                &[("Setting", 30.0), ("Value", 40.0), ("Description", 60.0)],
            )
            .rows(SETTINGS.iter().map(|row| CellRow::data(*row)))
            .freeze_header(),
        )
        .sheet(attributes())
}

fn attributes() -> SheetSpec {
    let level_headers: Vec<String> = (1..=MAX_LEVELS).map(|n| format!("Level{n}")).collect();
    let mut columns = vec![
        ("AttributeName", 20.0),
        ("AttributeLabel", 20.0),
        ("NumLevels", 15.0),
    ];
    columns.extend(level_headers.iter().map(|h| (h.as_str(), 15.0)));

    sheet("Attributes", &columns)
        .rows(ATTRIBUTES.iter().map(|&(name, label, levels)| {
            CellRow::data(
                [
                    CellValue::from(name),
                    CellValue::from(label),
                    CellValue::Number(levels.len() as f64),
                ]
                .into_iter()
                .chain(levels.iter().map(|&level| CellValue::from(level))),
            )
        }))
        .freeze_header()
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "TURAS Conjoint Analysis Example Configuration",
        "This is an example configuration file for a smartphone choice-based conjoint study.",
    )
    .section(InstructionSection::new(
        "Study design",
        [
            "Choice-based conjoint (CBC)",
            "5 attributes with 3-4 levels each",
            "Auto estimation method (tries mlogit first, falls back to clogit)",
            "First level of each attribute used as reference (utility = 0)",
        ],
    ))
    .section(InstructionSection::new(
        "Attributes",
        [
            "Brand: Apple, Samsung, Google, OnePlus",
            "Price: $299, $399, $499, $599",
            "Screen Size: 5.5\", 6.1\", 6.7\"",
            "Battery Life: 12h, 18h, 24h",
            "Camera Quality: Basic, Good, Excellent",
        ],
    ))
    .section(InstructionSection::new(
        "To use this example",
        [
            "Ensure sample_cbc_data.csv exists in the same directory",
            "Run: source('modules/conjoint/R/00_main.R')",
            "Run: results <- run_conjoint_analysis('modules/conjoint/examples/example_config.xlsx')",
            "Check output in: examples/output/example_results.xlsx",
        ],
    ))
    .section(InstructionSection::new(
        "Customization",
        [
            "Modify attribute names and levels in the Attributes sheet",
            "Adjust settings in the Settings sheet",
            "Update data_file path to point to your data",
            "For more information, see the specification documents in modules/conjoint/",
        ],
    ))
}
