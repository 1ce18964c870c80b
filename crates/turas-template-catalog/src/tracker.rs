//! Multi-wave tracking template

use crate::table::{doc, examples, settings_sheet, sheet, STATUS};
use turas_template_core::{InstructionSection, InstructionsSpec, SheetSpec, TemplateSpec};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("tracker")
        .instructions(instructions())
        .sheet(waves())
        .sheet(tracked_questions())
        .sheet(banner())
        .sheet(settings_sheet(
            "Settings",
            "Setting",
            [25.0, 20.0, 12.0, 20.0, 50.0],
            &[
                ["project_name", "Customer Satisfaction Tracker", "Required", "Any text", "Project name for output filename"],
                ["decimal_places_ratings", "1", "Required", "0-3", "Decimal places for mean ratings and averages"],
                ["show_significance", "Y", "Required", "Y/N or TRUE/FALSE", "Enable significance testing for wave comparisons"],
                ["alpha", "0.05", "Required", "0.01, 0.05, 0.10", "Significance level (0.05 = 95% confidence)"],
                ["minimum_base", "30", "Required", "Numeric > 0", "Minimum sample size for significance testing"],
                ["decimal_separator", ".", "Required", ". or ,", "Decimal separator: . (US/UK) or , (European)"],
            ],
        ))
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Tracker Configuration Template",
        "This template configures multi-wave tracking analysis. It defines survey waves, tracked \
         questions, demographic breakouts, and analysis settings for trend analysis across time \
         periods.",
    )
    .section(InstructionSection::new(
        "How to Use This Template",
        [
            "Define survey waves in the Waves sheet (one row per wave)",
            "List questions to track in the TrackedQuestions sheet",
            "Configure banner breakouts (demographics) in the Banner sheet",
            "Set analysis parameters in the Settings sheet",
            "Use with Tracker_Question_Mapping to handle question code changes",
            "Run with TurasTracker module",
        ],
    ))
    .section(InstructionSection::new(
        "Wave Configuration Tips",
        [
            "WaveID should be short and consistent (W1, W2, W3 or Q1_2024, Q2_2024)",
            "DataFile paths can be relative to this config file",
            "WeightVar must have the same name across all wave data files",
            "Fieldwork dates are for documentation - not used in calculations",
        ],
    ))
}

fn waves() -> SheetSpec {
    sheet(
        "Waves",
        &[
            ("WaveID", 10.0),
            ("WaveName", 25.0),
            ("DataFile", 25.0),
            ("FieldworkStart", 15.0),
            ("FieldworkEnd", 15.0),
            ("WeightVar", 12.0),
            (STATUS, 12.0),
            ("Description", 45.0),
        ],
    )
    .rows([
        doc(6, &["Required", "Short unique identifier (e.g., W1, W2, Q1_2024)"]),
        doc(6, &["Required", "Descriptive name for reports (e.g., \"Wave 1 - Jan 2024\")"]),
        doc(6, &["Required", "Path to CSV or Excel data file (relative or absolute)"]),
        doc(6, &["Optional", "Fieldwork start date (YYYY-MM-DD format)"]),
        doc(6, &["Optional", "Fieldwork end date (YYYY-MM-DD format)"]),
        doc(6, &["Optional", "Weight variable name (must be consistent across waves)"]),
    ])
    .rows(examples(&[
        ["W1", "Wave 1 - Jan 2024", "data/wave1.csv", "2024-01-15", "2024-01-30", "weight"],
        ["W2", "Wave 2 - Apr 2024", "data/wave2.csv", "2024-04-15", "2024-04-30", "weight"],
        ["W3", "Wave 3 - Jul 2024", "data/wave3.csv", "2024-07-15", "2024-07-30", "weight"],
        ["W4", "Wave 4 - Oct 2024", "data/wave4.csv", "2024-10-15", "2024-10-30", "weight"],
    ]))
}

fn tracked_questions() -> SheetSpec {
    sheet(
        "TrackedQuestions",
        &[("QuestionCode", 20.0), (STATUS, 12.0), ("Description", 60.0)],
    )
    .row(doc(
        1,
        &[
            "Required",
            "Standard question code used for tracking (matches question_mapping.xlsx)",
        ],
    ))
    .rows(examples(&[
        ["Q_SAT"],
        ["Q_NPS"],
        ["Q_VALUE"],
        ["Q_QUALITY"],
        ["COMP_OVERALL"],
    ]))
}

fn banner() -> SheetSpec {
    sheet(
        "Banner",
        &[
            ("BreakVariable", 20.0),
            ("BreakLabel", 20.0),
            (STATUS, 12.0),
            ("Description", 50.0),
        ],
    )
    .rows([
        doc(2, &["Required", "Variable name in data files (must exist in all waves)"]),
        doc(2, &["Required", "Display label for reports"]),
    ])
    .rows(examples(&[
        ["Total", "Total Sample"],
        ["Gender", "Gender"],
        ["AgeGroup", "Age Group"],
        ["Region", "Region"],
    ]))
}
