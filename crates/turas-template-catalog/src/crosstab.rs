//! Single-wave cross-tabulation template

use crate::table::{doc, examples, settings_sheet, sheet, STATUS};
use turas_template_core::{InstructionSection, InstructionsSpec, SheetSpec, TemplateSpec};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("crosstab")
        .instructions(instructions())
        .sheet(settings())
        .sheet(banner())
        .sheet(stub())
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Crosstab Configuration Template",
        "This template configures cross-tabulation analysis for single-wave survey data. It \
         defines analysis settings, banner structure (columns), and question selection (rows).",
    )
    .section(InstructionSection::new(
        "How to Use This Template",
        [
            "Configure analysis parameters in the Settings sheet",
            "Define column breakouts (demographics) in the Banner sheet",
            "Select questions to analyze in the Stub sheet",
            "Save and run with TurasTabs module",
            "All file paths can be relative to this config file location",
        ],
    ))
    .section(InstructionSection::new(
        "Quick Settings Guide",
        [
            "decimal_separator: Use \".\" for US/UK format, \",\" for European",
            "alpha: Significance level (0.05 = 95% confidence)",
            "minimum_base: Minimum sample size for significance testing (typically 30)",
            "show_significance: Set to FALSE to hide significance letters",
            "create_index_summary: Set to TRUE to create executive summary sheet",
        ],
    ))
}

fn settings() -> SheetSpec {
    settings_sheet(
        "Settings",
        "Setting",
        [25.0, 25.0, 12.0, 20.0, 50.0],
        &[
            // Core
            ["project_name", "Brand Tracker Q1", "Required", "Any text", "Project name for output filename"],
            ["data_file", "data/survey.csv", "Required", "CSV or XLSX path", "Path to survey data file (relative or absolute)"],
            ["survey_structure_file", "Survey_Structure.xlsx", "Required", "XLSX path", "Survey structure from Parser or manual"],
            ["weight_variable", "weight", "Optional", "Column name or blank", "Weighting variable (leave blank for unweighted)"],
            // Display
            ["decimal_separator", ".", "Required", ". or ,", "Decimal separator: . (US/UK) or , (European)"],
            ["decimal_places_percent", "0", "Required", "0-3", "Decimal places for percentages"],
            ["decimal_places_ratings", "1", "Required", "0-3", "Decimal places for mean ratings"],
            ["decimal_places_index", "1", "Optional", "0-3", "Decimal places for index values"],
            ["decimal_places_numeric", "1", "Optional", "0-3", "Decimal places for numeric statistics"],
            // Significance testing
            ["show_significance", "TRUE", "Required", "TRUE/FALSE or Y/N", "Display significance letters (A, B, C)"],
            ["alpha", "0.05", "Required", "0.01, 0.05, 0.10", "Significance level (0.05 = 95% confidence)"],
            ["minimum_base", "30", "Required", "Numeric > 0", "Minimum sample size for sig testing"],
            ["enable_chi_square", "FALSE", "Optional", "TRUE/FALSE", "Include chi-square test results"],
            ["bonferroni_correction", "TRUE", "Optional", "TRUE/FALSE", "Apply Bonferroni correction for multiple comparisons"],
            // Advanced
            ["create_index_summary", "TRUE", "Optional", "TRUE/FALSE or Y/N", "Create Index_Summary executive dashboard sheet"],
            ["show_standard_deviation", "FALSE", "Optional", "TRUE/FALSE", "Show standard deviation for ratings"],
            ["show_unweighted_n", "TRUE", "Optional", "TRUE/FALSE", "Display unweighted base sizes"],
            ["show_effective_n", "TRUE", "Optional", "TRUE/FALSE", "Display effective sample size (for weighted data)"],
            // Output
            ["output_filename", "Crosstabs.xlsx", "Optional", "Filename", "Output filename (default: Crosstabs.xlsx)"],
            ["output_subfolder", "output", "Optional", "Folder path", "Output subfolder (created if not exists)"],
        ],
    )
}

fn banner() -> SheetSpec {
    sheet(
        "Banner",
        &[
            ("BannerID", 15.0),
            ("BannerLabel", 20.0),
            ("Variable", 15.0),
            ("Filter", 30.0),
            ("Order", 8.0),
            (STATUS, 12.0),
            ("Description", 45.0),
        ],
    )
    .rows([
        doc(5, &["Required", "Unique ID for this banner column"]),
        doc(5, &["Required", "Display label in output (e.g., \"Male\", \"Age 18-34\")"]),
        doc(5, &["Required", "Variable name from data file"]),
        doc(5, &["Optional", "Filter expression (e.g., \"Gender==1\", \"Age>=18 & Age<=34\")"]),
        doc(5, &["Optional", "Display order (1, 2, 3...). Leave blank for default order"]),
    ])
    .rows(examples(&[
        ["Total", "Total", "", "", "1"],
        ["Male", "Male", "Gender", "Gender==1", "2"],
        ["Female", "Female", "Gender", "Gender==2", "3"],
        ["Age_18_34", "Age 18-34", "Age", "Age>=1 & Age<=2", "4"],
        ["Age_35_54", "Age 35-54", "Age", "Age==3", "5"],
        ["Age_55_Plus", "Age 55+", "Age", "Age>=4", "6"],
    ]))
}

fn stub() -> SheetSpec {
    sheet(
        "Stub",
        &[
            ("QuestionCode", 15.0),
            ("QuestionText", 35.0),
            ("Filter", 25.0),
            ("Order", 8.0),
            (STATUS, 12.0),
            ("Description", 50.0),
        ],
    )
    .rows([
        doc(4, &["Required", "Question code from Survey_Structure.xlsx"]),
        doc(4, &["Optional", "Override question text (leave blank to use from Survey_Structure)"]),
        doc(4, &["Optional", "Filter to apply to this question only"]),
        doc(4, &["Optional", "Display order in output"]),
    ])
    .rows(examples(&[
        ["Q1", "Age group", "", "1"],
        ["Q2", "Brand awareness", "", "2"],
        ["Q3", "Overall satisfaction", "Completed==1", "3"],
        ["Q4", "Net Promoter Score", "", "4"],
        ["COMP_SAT", "Overall Satisfaction Index", "", "5"],
    ]))
}
