//! Confidence interval analysis template (MOE, Wilson, bootstrap, Bayesian)

use crate::table::{doc, examples, settings_sheet, sheet, STATUS};
use turas_template_core::{InstructionSection, InstructionsSpec, SheetSpec, TemplateSpec};

/// Analysis columns before the status column on Question_Analysis
const ANALYSIS_COLUMNS: usize = 11;

pub fn template() -> TemplateSpec {
    TemplateSpec::new("confidence")
        .instructions(instructions())
        .sheet(study_settings())
        .sheet(question_analysis())
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Confidence Analysis Configuration Template",
        "This template configures confidence interval analysis for survey data. It supports \
         multiple methods: Margin of Error (MOE), Wilson Score, Bootstrap, and Bayesian Credible \
         Intervals. Configure study-wide settings and question-specific analysis parameters.",
    )
    .section(InstructionSection::new(
        "Analysis Methods Overview",
        [
            "MOE (Margin of Error): Classic ±% confidence intervals using normal approximation",
            "Wilson Score: More accurate for proportions, especially with small samples or extreme values",
            "Bootstrap: Resampling method (1000-10000 iterations) for robust confidence intervals",
            "Bayesian Credible Intervals: Incorporates prior beliefs (requires prior specification)",
        ],
    ))
    .section(InstructionSection::new(
        "When to Use Each Method",
        [
            "Use MOE for quick estimates and standard reporting",
            "Use Wilson when sample is small (<30) or proportions are near 0% or 100%",
            "Use Bootstrap for complex metrics or non-normal distributions",
            "Use Bayesian when you have prior information from past studies",
        ],
    ))
    .section(InstructionSection::new(
        "Common Settings",
        [
            "Confidence_Level: Usually 0.95 (95%), can be 0.90 or 0.99",
            "Bootstrap_Iterations: 5000 is good balance of speed/accuracy",
            "Multiple_Comparison_Adjustment: Use when analyzing many questions simultaneously",
            "DEFF (Design Effect): Set if using complex sampling (usually 1.0-2.0)",
        ],
    ))
}

fn study_settings() -> SheetSpec {
    settings_sheet(
        "Study_Settings",
        "Setting",
        [30.0, 25.0, 15.0, 20.0, 55.0],
        &[
            ["Data_File", "data/survey.csv", "Required", "CSV or XLSX path", "Path to survey data file"],
            ["Output_File", "output/confidence_analysis.xlsx", "Required", "XLSX path", "Output file path (will be created)"],
            ["Calculate_Effective_N", "Y", "Required", "Y/N", "Calculate effective sample size (for weighted data)"],
            ["Confidence_Level", "0.95", "Required", "0.90, 0.95, 0.99", "Confidence level (0.95 = 95% confidence intervals)"],
            ["DEFF", "1.0", "Optional", "Numeric ≥ 1.0", "Design effect for complex sampling (1.0 = simple random sample)"],
            ["Bootstrap_Iterations", "5000", "Required", "1000-10000", "Number of bootstrap resamples (more = more accurate but slower)"],
            ["Random_Seed", "123", "Optional", "Any integer", "Random seed for reproducible bootstrap results"],
            ["Multiple_Comparison_Adjustment", "N", "Required", "Y/N", "Adjust for multiple comparisons (recommended for >10 questions)"],
            ["Multiple_Comparison_Method", "Bonferroni", "If Adjustment=Y", "Bonferroni/Holm/FDR", "Adjustment method: Bonferroni (conservative), Holm (less conservative), FDR (least conservative)"],
            ["Decimal_Separator", ".", "Required", ". or ,", "Decimal separator: . (US/UK) or , (European)"],
        ],
    )
}

fn question_analysis() -> SheetSpec {
    sheet(
        "Question_Analysis",
        &[
            ("Question_ID", 12.0),
            ("Statistic_Type", 12.0),
            ("Categories", 12.0),
            ("Run_MOE", 10.0),
            ("Run_Bootstrap", 12.0),
            ("Run_Credible", 12.0),
            ("Use_Wilson", 12.0),
            ("Prior_Mean", 10.0),
            ("Prior_SD", 10.0),
            ("Promoter_Codes", 15.0),
            ("Detractor_Codes", 20.0),
            (STATUS, 15.0),
            ("Valid Values", 18.0),
            ("Description", 40.0),
        ],
    )
    .rows(
        [
            ["Required", "Any code", "Question code from data file"],
            ["Required", "proportion/mean/nps", "Type of statistic to analyze"],
            ["For proportion only", "Comma-separated", "Response codes to include (e.g., 1,2 for \"Yes,No\")"],
            ["Optional", "Y/N", "Calculate classic Margin of Error (±%)"],
            ["Optional", "Y/N", "Calculate bootstrap confidence interval"],
            ["Optional", "Y/N", "Calculate Bayesian credible interval"],
            ["For proportion only", "Y/N", "Use Wilson score interval (more accurate for small samples)"],
            ["For Bayesian only", "Numeric", "Prior mean estimate (from past studies)"],
            ["For Bayesian mean/nps", "Numeric > 0", "Prior standard deviation (uncertainty in prior)"],
            ["For NPS only", "Comma-separated", "Codes for promoters (typically 9,10)"],
            ["For NPS only", "Comma-separated", "Codes for detractors (typically 0,1,2,3,4,5,6)"],
        ]
        .iter()
        .map(|tail| doc(ANALYSIS_COLUMNS, tail)),
    )
    .rows(examples(&[
        ["Q1", "proportion", "1", "Y", "Y", "N", "Y", "", "", "", ""],
        ["Q2", "proportion", "4,5", "Y", "Y", "Y", "N", "0.65", "", "", ""],
        ["Q3", "mean", "", "Y", "Y", "Y", "", "7.5", "1.2", "", ""],
        ["Q4", "nps", "", "Y", "Y", "N", "", "", "", "9,10", "0,1,2,3,4,5,6"],
        ["Q5", "mean", "", "Y", "N", "N", "", "", "", "", ""],
    ]))
}
