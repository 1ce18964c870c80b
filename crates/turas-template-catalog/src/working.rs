//! Plain working templates
//!
//! The unannotated workbooks analysts fill in: a styled header, sample rows
//! and, on some sheets, a short block of notes underneath. They are also
//! the input `annotate` expects.

use crate::table::sheet;
use crate::{parser, Module};
use turas_template_core::{CellRow, CellValue, SheetSpec, StyleRole, TemplateSpec};

/// File name of the plain template for `module`, if it has one
pub fn file_name(module: Module) -> Option<&'static str> {
    match module {
        Module::Parser => Some(module.file_name()),
        Module::SurveyStructure => Some("Tabs_Survey_Structure_Template.xlsx"),
        Module::Crosstab => Some("Tabs_Config_Template.xlsx"),
        Module::Tracker => Some("Tracker_Config_Template.xlsx"),
        Module::TrackerQuestionMapping => Some("Tracker_Question_Mapping_Template.xlsx"),
        Module::Confidence => Some("Confidence_Config_Template.xlsx"),
        Module::Segment => Some("Segment_Config_Template.xlsx"),
        Module::Pricing => Some("Pricing_Config_Template.xlsx"),
        Module::KeyDriver => Some("KeyDriver_Config_Template.xlsx"),
        Module::Conjoint => Some("Conjoint_Config_Template.xlsx"),
        Module::ConjointExample => None,
    }
}

/// Plain template for `module`, if it has one
pub fn template(module: Module) -> Option<TemplateSpec> {
    let sheets = match module {
        Module::Parser => return Some(parser::template()),
        Module::SurveyStructure => vec![questions(), options()],
        Module::Crosstab => vec![tabs_settings(), banner(), stub()],
        Module::Tracker => vec![waves(), tracked_questions(), tracker_banner(), tracker_settings()],
        Module::TrackerQuestionMapping => vec![question_map()],
        Module::Confidence => vec![confidence_settings(), confidence_questions()],
        Module::Segment => vec![segment_config()],
        Module::Pricing => vec![pricing_settings(), van_westendorp(), gabor_granger()],
        Module::KeyDriver => vec![keydriver_settings(), variables()],
        Module::Conjoint => vec![conjoint_settings(), attributes()],
        Module::ConjointExample => return None,
    };
    Some(
        sheets
            .into_iter()
            .fold(TemplateSpec::new(module.name()), TemplateSpec::sheet),
    )
}

fn table<const N: usize>(name: &str, columns: [(&str, f64); N], rows: &[[&str; N]]) -> SheetSpec {
    sheet(name, &columns).rows(rows.iter().map(|row| CellRow::data(*row)))
}

/// Blank spacer, an `INSTRUCTIONS:` label, then one line per note
fn with_notes(sheet: SheetSpec, lines: &[&str]) -> SheetSpec {
    sheet
        .row(CellRow::Blank)
        .row(CellRow::text(StyleRole::Section, "INSTRUCTIONS:"))
        .rows(lines.iter().map(|line| CellRow::text(StyleRole::PlainText, *line)))
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

fn questions() -> SheetSpec {
    table(
        "Questions",
        [("QuestionCode", 15.0), ("QuestionText", 40.0), ("Variable_Type", 18.0), ("Columns", 12.0)],
        &[
            ["Q01", "Brand Awareness (Unaided)", "Single_Response", ""],
            ["Q02", "Brand Consideration", "Single_Response", ""],
            ["Q03", "Brand Preference", "Single_Response", ""],
            ["Q04", "Overall Satisfaction (1-5)", "Rating", ""],
            ["Q05", "Likelihood to Recommend (0-10)", "NPS", ""],
            ["Gender", "Gender", "Single_Response", ""],
            ["Age_Group", "Age Group", "Single_Response", ""],
        ],
    )
}

/// Numbered options for one question, values counting up from `first`
fn option_rows(code: &str, first: i32, labels: &[&str]) -> Vec<CellRow> {
    labels
        .iter()
        .zip(first..)
        .map(|(label, value)| {
            CellRow::data([
                CellValue::from(code),
                CellValue::from(value),
                CellValue::from(*label),
                CellValue::from("TRUE"),
            ])
        })
        .collect()
}

fn options() -> SheetSpec {
    let brands = ["Brand A", "Brand B", "Brand C"];
    let nps: Vec<String> = (0..=10).map(|n| n.to_string()).collect();
    let nps: Vec<&str> = nps.iter().map(String::as_str).collect();

    sheet(
        "Options",
        &[("QuestionCode", 15.0), ("OptionValue", 12.0), ("OptionText", 30.0), ("ShowInOutput", 12.0)],
    )
    .rows(option_rows("Q01", 1, &["Brand A", "Brand B", "Brand C", "None"]))
    .rows(option_rows("Q02", 1, &brands))
    .rows(option_rows("Q03", 1, &brands))
    .rows(option_rows(
        "Q04",
        1,
        &["1 - Very Dissatisfied", "2", "3", "4", "5 - Very Satisfied"],
    ))
    .rows(option_rows("Q05", 0, &nps))
    .rows(option_rows("Gender", 1, &["Male", "Female"]))
    .rows(option_rows("Age_Group", 1, &["18-34", "35-54", "55+"]))
}

fn tabs_settings() -> SheetSpec {
    table(
        "Settings",
        [("Setting", 25.0), ("Value", 25.0), ("Description", 55.0)],
        &[
            ["survey_structure_file", "Survey_Structure.xlsx", "Path to Survey_Structure.xlsx file"],
            ["data_file", "survey_data.csv", "Path to survey data file (CSV, XLSX, SAV, DTA)"],
            ["output_file", "Crosstab_Results.xlsx", "Path to output Excel file"],
            ["show_significance", "TRUE", "Show significance testing (TRUE/FALSE)"],
            ["significance_level", "0.05", "Significance level (0.05 = 95% confidence, 0.10 = 90%)"],
            ["minimum_base", "30", "Minimum base size for significance testing"],
            ["stat_test", "chi-square", "Statistical test: chi-square, z-test, or t-test"],
            ["decimal_places", "0", "Decimal places for percentages (0 = whole numbers)"],
            ["decimal_places_average", "1", "Decimal places for averages"],
            ["show_frequencies", "TRUE", "Show frequency counts (TRUE/FALSE)"],
            ["show_percentages", "TRUE", "Show column percentages (TRUE/FALSE)"],
            ["weight_column", "NA", "Weight column name (or NA if unweighted)"],
        ],
    )
}

fn banner() -> SheetSpec {
    table(
        "Banner",
        [("BannerQuestion", 20.0)],
        &[["Total"], ["Gender"], ["Age_Group"]],
    )
}

fn stub() -> SheetSpec {
    table(
        "Stub",
        [("StubQuestion", 20.0), ("BaseFilter", 30.0)],
        &[
            ["Q01", ""],
            ["Q02", ""],
            ["Q03", ""],
            ["Q04", "Gender == 'Male'"],
            ["Q05", ""],
        ],
    )
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

fn waves() -> SheetSpec {
    table(
        "Waves",
        [
            ("WaveID", 10.0),
            ("WaveName", 15.0),
            ("DataFile", 20.0),
            ("FieldworkStart", 15.0),
            ("FieldworkEnd", 15.0),
            ("WeightVariable", 15.0),
        ],
        &[
            ["W1", "Q1 2024", "wave1.csv", "2024-01-01", "2024-01-15", "Weight"],
            ["W2", "Q2 2024", "wave2.csv", "2024-04-01", "2024-04-15", "Weight"],
            ["W3", "Q3 2024", "wave3.csv", "2024-07-01", "2024-07-15", "Weight"],
            ["W4", "Q4 2024", "wave4.csv", "2024-10-01", "2024-10-15", "Weight"],
        ],
    )
}

fn tracked_questions() -> SheetSpec {
    table(
        "TrackedQuestions",
        [("QuestionCode", 20.0), ("QuestionText", 40.0), ("QuestionType", 15.0)],
        &[
            ["Q01_Awareness", "Brand Awareness (Unaided)", "proportion"],
            ["Q02_Consideration", "Brand Consideration", "proportion"],
            ["Q03_Preference", "Brand Preference", "proportion"],
            ["Q04_Satisfaction", "Overall Satisfaction (1-5)", "rating"],
            ["Q05_NPS", "Net Promoter Score (0-10)", "nps"],
        ],
    )
}

fn tracker_banner() -> SheetSpec {
    table(
        "Banner",
        [("BreakVariable", 20.0), ("BreakLabel", 20.0)],
        &[
            ["Total", "Total"],
            ["Gender", "Gender"],
            ["Age_Group", "Age Group"],
        ],
    )
}

fn tracker_settings() -> SheetSpec {
    table(
        "Settings",
        [("SettingName", 30.0), ("SettingValue", 30.0)],
        &[
            ["project_name", "2024 Brand Tracking Study"],
            ["output_file", "Tracking_Results.xlsx"],
            ["confidence_level", "0.95"],
            ["min_base_size", "30"],
            ["trend_significance", "TRUE"],
            ["decimal_places_proportion", "0"],
            ["decimal_places_mean", "2"],
            ["show_sample_sizes", "TRUE"],
        ],
    )
}

fn question_map() -> SheetSpec {
    let sheet = table(
        "QuestionMap",
        [
            ("QuestionCode", 20.0),
            ("QuestionText", 40.0),
            ("QuestionType", 15.0),
            ("W1", 18.0),
            ("W2", 18.0),
            ("W3", 20.0),
            ("W4", 20.0),
        ],
        &[
            ["Q01_Awareness", "Brand Awareness (Unaided)", "proportion", "Q1_Awareness", "Q1_Awareness", "Q01_Aware", "Q01_Aware"],
            ["Q02_Consideration", "Brand Consideration", "proportion", "Q2_Consider", "Q2_Consider", "Q02_Consideration", "Q02_Consideration"],
            ["Q03_Preference", "Brand Preference", "proportion", "Q3_Preference", "Q3_Preference", "Q03_Pref", "Q03_Pref"],
            ["Q04_Satisfaction", "Overall Satisfaction (1-5)", "rating", "Q4_Sat", "Q4_Sat", "Q04_Satisfaction", "Q04_Satisfaction"],
            ["Q05_NPS", "Net Promoter Score (0-10)", "nps", "Q5_NPS", "Q5_NPS", "Q05_NPS_Score", "Q05_NPS_Score"],
        ],
    );
    with_notes(
        sheet,
        &[
            "- QuestionCode: Standardized question identifier (used in Tracking_Config.xlsx)",
            "- QuestionText: Question wording",
            "- QuestionType: proportion, rating, nps, or composite",
            "- W1, W2, W3, W4: Actual column names in each wave's data file",
            "- Use NA if question not asked in that wave",
            "- Add more wave columns (W5, W6, etc.) as needed",
        ],
    )
}

// ---------------------------------------------------------------------------
// Confidence and segmentation
// ---------------------------------------------------------------------------

fn confidence_settings() -> SheetSpec {
    table(
        "Settings",
        [("Setting", 25.0), ("Value", 35.0), ("Description", 50.0)],
        &[
            ["data_file", "survey_data.csv", "Path to survey data file"],
            ["survey_structure_file", "Survey_Structure.xlsx", "Path to Survey_Structure.xlsx (from Tabs or Parser)"],
            ["output_file", "Confidence_Analysis.xlsx", "Output Excel file name"],
            ["weight_variable", "Weight", "Weight column name (or NA if unweighted)"],
            ["confidence_level", "0.95", "Confidence level (0.90, 0.95, or 0.99)"],
            ["decimal_separator", ".", "Decimal separator: period (.) or comma (,)"],
            ["bootstrap_iterations", "5000", "Number of bootstrap iterations (1000-10000)"],
            ["methods_proportion", "MOE,Wilson,Bootstrap,Bayesian", "Methods for proportions: MOE, Wilson, Bootstrap, Bayesian"],
            ["methods_mean", "tdist,Bootstrap,Bayesian", "Methods for means: tdist, Bootstrap, Bayesian"],
        ],
    )
}

fn confidence_questions() -> SheetSpec {
    let sheet = table(
        "Questions",
        [
            ("QuestionCode", 18.0),
            ("QuestionType", 18.0),
            ("BayesianPrior_Mean", 20.0),
            ("BayesianPrior_N", 18.0),
        ],
        &[
            ["Q01", "proportion", "0.5", "30"],
            ["Q02", "proportion", "0.5", "30"],
            ["Q03", "rating", "3.5", "30"],
            ["Q04", "nps", "25", "30"],
        ],
    );
    with_notes(
        sheet,
        &[
            "- QuestionCode: Must match codes in Survey_Structure.xlsx",
            "- QuestionType: proportion, rating, or nps",
            "- BayesianPrior_Mean: Prior estimate (e.g., 0.5 = 50% for proportions, 3.5 for 1-5 rating)",
            "- BayesianPrior_N: Prior sample size (strength of prior, typically 30-100)",
            "- Leave Bayesian columns empty if not using Bayesian method",
        ],
    )
}

fn segment_config() -> SheetSpec {
    table(
        "Config",
        [("parameter", 22.0), ("value", 30.0), ("description", 60.0)],
        &[
            ["data_file", "survey_data.csv", "Path to survey data file (CSV or XLSX)"],
            ["id_variable", "RespondentID", "Column name containing respondent ID"],
            ["clustering_vars", "Q1,Q2,Q3,Q4,Q5", "Comma-separated list of variables for clustering"],
            ["profiling_vars", "Age,Gender,Region", "Comma-separated list of variables for profiling segments"],
            ["k_min", "3", "Minimum number of segments to test (exploration mode)"],
            ["k_max", "6", "Maximum number of segments to test (exploration mode)"],
            ["k_final", "4", "Final number of segments (final run mode)"],
            ["output_folder", "output/", "Output directory for results"],
            ["random_seed", "123", "Random seed for reproducibility"],
            ["max_iterations", "100", "Maximum k-means iterations"],
            ["n_starts", "25", "Number of random starts for k-means"],
            ["outlier_method", "zscore", "Outlier detection method: zscore or mahalanobis"],
            ["outlier_threshold", "3", "Outlier threshold (z-score units or chi-square critical value)"],
            ["handle_outliers", "remove", "How to handle outliers: remove, flag, or ignore"],
            ["run_mode", "explore", "Run mode: explore (test k_min to k_max) or final (use k_final)"],
        ],
    )
}

// ---------------------------------------------------------------------------
// Pricing, key driver and conjoint
// ---------------------------------------------------------------------------

fn pricing_settings() -> SheetSpec {
    table(
        "Settings",
        [("Setting", 30.0), ("Value", 40.0)],
        &[
            ["analysis_method", "van_westendorp"],
            ["data_file", "pricing_data.csv"],
            ["output_file", "pricing_results.xlsx"],
            ["weight_var", ""],
            ["dk_codes", ""],
            ["vw_monotonicity_behavior", "flag_only"],
            ["gg_monotonicity_behavior", "smooth"],
            ["segment_vars", ""],
            ["unit_cost", ""],
        ],
    )
}

fn van_westendorp() -> SheetSpec {
    table(
        "VanWestendorp",
        [("Question", 20.0), ("ColumnName", 25.0)],
        &[
            ["too_cheap", "vw_too_cheap"],
            ["cheap", "vw_cheap"],
            ["expensive", "vw_expensive"],
            ["too_expensive", "vw_too_expensive"],
        ],
    )
}

fn gabor_granger() -> SheetSpec {
    sheet("GaborGranger", &[("PricePoint", 15.0), ("PurchaseIntentColumn", 25.0)]).rows(
        [49, 69, 89, 99].map(|price| {
            CellRow::data([CellValue::from(price), CellValue::from(format!("pi_{price}"))])
        }),
    )
}

fn keydriver_settings() -> SheetSpec {
    sheet("Settings", &[("Setting", 20.0), ("Value", 40.0)])
        .row(CellRow::data(["analysis_name", "Brand Health Drivers"]))
        .row(CellRow::data(["data_file", "keydriver_data.csv"]))
        .row(CellRow::data(["output_file", "keydriver_results.xlsx"]))
        .row(CellRow::data([
            CellValue::from("min_sample_size"),
            CellValue::from(30),
        ]))
}

fn variables() -> SheetSpec {
    table(
        "Variables",
        [("VariableName", 25.0), ("Type", 12.0), ("Label", 30.0)],
        &[
            ["overall_satisfaction", "Outcome", "Overall Satisfaction"],
            ["product_quality", "Driver", "Product Quality"],
            ["customer_service", "Driver", "Customer Service"],
            ["value_for_money", "Driver", "Value for Money"],
            ["brand_reputation", "Driver", "Brand Reputation"],
        ],
    )
}

fn conjoint_settings() -> SheetSpec {
    table(
        "Settings",
        [("Setting", 25.0), ("Value", 30.0)],
        &[
            ["analysis_type", "choice"],
            ["data_file", "conjoint_data.csv"],
            ["output_file", "conjoint_results.xlsx"],
            ["choice_set_column", "choice_set_id"],
            ["chosen_column", "chosen"],
            ["respondent_id_column", "resp_id"],
        ],
    )
}

fn attributes() -> SheetSpec {
    sheet(
        "Attributes",
        &[("AttributeName", 18.0), ("NumLevels", 12.0), ("LevelNames", 40.0)],
    )
    .rows(
        [
            ("Price", "\u{a3}449, \u{a3}599, \u{a3}699"),
            ("Brand", "Apple, Samsung, Google"),
            ("Storage", "128GB, 256GB, 512GB"),
            ("Battery", "12 hours, 18 hours, 24 hours"),
        ]
        .map(|(name, levels)| {
            CellRow::data([CellValue::from(name), CellValue::from(3), CellValue::from(levels)])
        }),
    )
}
