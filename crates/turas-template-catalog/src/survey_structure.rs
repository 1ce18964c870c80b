//! Survey structure template: questions, response options and composite metrics

use crate::table::{doc, examples, sheet, STATUS};
use turas_template_core::{InstructionSection, InstructionsSpec, SheetSpec, TemplateSpec};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("survey-structure")
        .instructions(instructions())
        .sheet(questions())
        .sheet(options())
        .sheet(composite_metrics())
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Survey Structure Template",
        "This template defines your survey structure, including all questions, response options, \
         and composite metrics. It serves as the master reference for question codes, types, and \
         valid responses.",
    )
    .section(InstructionSection::new(
        "How to Use This Template",
        [
            "Start with the Questions sheet to define all survey questions",
            "Fill in the Options sheet with response options for each question",
            "Optionally, create composite metrics in the Composite_Metrics sheet",
            "Save and use this file with the Tabs module for cross-tabulation analysis",
            "See example data for reference (gray rows)",
        ],
    ))
    .section(InstructionSection::new(
        "Common Pitfalls",
        [
            "QuestionCode must be unique across all questions",
            "Variable_Type must match the actual question format",
            "For Rating questions, always specify Scale_Min and Scale_Max",
            "Response codes must match between Questions and Options sheets",
            "Do not use special characters in QuestionCode",
        ],
    ))
}

fn questions() -> SheetSpec {
    sheet(
        "Questions",
        &[
            ("QuestionCode", 15.0),
            ("QuestionText", 40.0),
            ("Variable_Type", 12.0),
            ("Scale_Min", 10.0),
            ("Scale_Max", 10.0),
            ("ShowInOutput", 12.0),
            (STATUS, 15.0),
            ("Valid Types", 25.0),
            ("Description", 40.0),
        ],
    )
    .rows([
        doc(6, &["Required", "Single/Multiple/Rating/NPS/Grid/Numeric/Text", "Unique identifier for this question"]),
        doc(6, &["Required", "Must match question structure", "Full question wording as shown to respondents"]),
        doc(6, &["Required", "See Valid Types →", "Type of question (affects analysis methods)"]),
        doc(6, &["For Rating/NPS only", "Numeric", "Minimum value on scale (e.g., 1)"]),
        doc(6, &["For Rating/NPS only", "Numeric", "Maximum value on scale (e.g., 5, 10)"]),
        doc(6, &["Optional (Y/N)", "Default: Y", "Include in output reports"]),
    ])
    .rows(examples(&[
        ["Q1", "What is your age group?", "Single", "", "", "Y"],
        ["Q2", "Which brands are you aware of? (Select all)", "Multiple", "", "", "Y"],
        ["Q3", "Overall satisfaction (1-5)", "Rating", "1", "5", "Y"],
        ["Q4", "How likely are you to recommend? (0-10)", "NPS", "0", "10", "Y"],
        ["Q5_1", "Rate product quality (1-10)", "Grid", "1", "10", "Y"],
        ["Q6", "Number of employees", "Numeric", "", "", "Y"],
        ["Q7", "Additional comments", "Text", "", "", "N"],
    ]))
}

fn options() -> SheetSpec {
    sheet(
        "Options",
        &[
            ("QuestionCode", 15.0),
            ("OptionCode", 12.0),
            ("OptionText", 30.0),
            ("OptionValue", 12.0),
            ("ExcludeFromIndex", 15.0),
            ("BoxCategory", 12.0),
            (STATUS, 15.0),
            ("Description", 45.0),
        ],
    )
    .rows([
        doc(6, &["Required", "Must match QuestionCode from Questions sheet"]),
        doc(6, &["Required", "Unique numeric code for this option (1, 2, 3...)"]),
        doc(6, &["Required", "Response option text shown to respondents"]),
        doc(6, &["Optional", "Numeric value for analysis (usually same as OptionCode)"]),
        doc(6, &["Optional (Y/N)", "Exclude from index calculations (e.g., \"Don't know\")"]),
        doc(6, &["Optional", "Group options: Top2, Bottom2, Positive, Negative"]),
    ])
    .rows(examples(&[
        ["Q1", "1", "Under 18", "1", "N", ""],
        ["Q1", "2", "18-24", "2", "N", ""],
        ["Q1", "3", "25-34", "3", "N", ""],
        ["Q1", "99", "Prefer not to say", "99", "Y", ""],
        ["Q2", "1", "Brand A", "1", "N", ""],
        ["Q2", "2", "Brand B", "2", "N", ""],
        ["Q3", "1", "Very dissatisfied", "1", "N", "Bottom2"],
        ["Q3", "2", "Dissatisfied", "2", "N", "Bottom2"],
        ["Q3", "3", "Neutral", "3", "N", ""],
        ["Q3", "4", "Satisfied", "4", "N", "Top2"],
        ["Q3", "5", "Very satisfied", "5", "N", "Top2"],
    ]))
}

fn composite_metrics() -> SheetSpec {
    sheet(
        "Composite_Metrics",
        &[
            ("CompositeCode", 15.0),
            ("CompositeLabel", 25.0),
            ("CalculationType", 15.0),
            ("SourceQuestions", 20.0),
            ("Weights", 15.0),
            ("ExcludeFromSummary", 15.0),
            ("SectionLabel", 15.0),
            (STATUS, 18.0),
            ("Valid Values", 20.0),
            ("Description", 40.0),
        ],
    )
    .rows([
        doc(7, &["Required", "Must start with COMP_", "Unique identifier for composite metric"]),
        doc(7, &["Required", "", "Display name in reports"]),
        doc(7, &["Required", "Mean/Sum/WeightedMean", "How to combine source questions"]),
        doc(7, &["Required", "Comma-separated codes", "Questions to combine (e.g., Q3,Q4,Q5)"]),
        doc(7, &["For WeightedMean only", "Comma-separated numbers", "Weights matching source questions (e.g., 1,2,1)"]),
        doc(7, &["Optional (Y/N)", "Default: N", "Hide from Index_Summary sheet"]),
        doc(7, &["Optional", "Any text", "Group composites in Index_Summary"]),
    ])
    .rows(examples(&[
        ["COMP_SAT", "Overall Satisfaction", "Mean", "Q3,Q5_1", "", "N", "SATISFACTION"],
        ["COMP_QUALITY", "Quality Index", "WeightedMean", "Q5_1,Q5_2", "2,1", "N", "QUALITY"],
        ["COMP_TOTAL", "Total Score", "Sum", "Q6,Q7,Q8", "", "N", ""],
    ]))
}
