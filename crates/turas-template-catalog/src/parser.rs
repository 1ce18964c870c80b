//! Questionnaire input for the survey structure parser
//!
//! This is a working template rather than an annotated one: a single table
//! followed by its own instructions, with no instructions sheet.

use crate::table::sheet;
use turas_template_core::{CellRow, SheetSpec, StyleRole, TemplateSpec};

const QUESTIONS: [[&str; 3]; 6] = [
    [
        "Q1",
        "Which of the following brands are you aware of? (Select all that apply)",
        "Brand A, Brand B, Brand C, Brand D, Other, None",
    ],
    ["Q2", "Which ONE brand do you prefer?", "Brand A, Brand B, Brand C, Brand D"],
    [
        "Q3",
        "How satisfied are you with [BRAND]? (1=Very Dissatisfied, 5=Very Satisfied)",
        "1, 2, 3, 4, 5",
    ],
    [
        "Q4",
        "How likely are you to recommend [BRAND] to a friend? (0=Not at all likely, 10=Extremely likely)",
        "0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10",
    ],
    [
        "Q5",
        "In the last 3 months, how many times have you purchased [PRODUCT]?",
        "Numeric",
    ],
    ["Q6", "What do you like most about [BRAND]? (Open-ended)", "Open-ended"],
];

const INSTRUCTIONS: [&str; 10] = [
    "1. Enter your survey questions in this template",
    "2. Q_Number: Unique identifier for each question (e.g., Q1, Q2, Q3)",
    "3. Question_Text: Full question wording as shown to respondents",
    "4. Response_Options: Comma-separated list of response options",
    "   - For multi-select: List all options",
    "   - For single choice: List all options",
    "   - For rating scales: List all scale points (e.g., 1, 2, 3, 4, 5)",
    "   - For numeric: Enter 'Numeric'",
    "   - For open-ended: Enter 'Open-ended'",
    "5. Run Parser to generate Survey_Structure.xlsx",
];

pub fn template() -> TemplateSpec {
    TemplateSpec::new("parser").sheet(questionnaire())
}

fn questionnaire() -> SheetSpec {
    sheet(
        "Questionnaire",
        &[("Q_Number", 12.0), ("Question_Text", 80.0), ("Response_Options", 50.0)],
    )
    .rows(QUESTIONS.iter().map(|row| CellRow::example(*row)))
    .row(CellRow::Blank)
    .row(CellRow::Blank)
    .row(CellRow::text(StyleRole::Section, "INSTRUCTIONS:"))
    .rows(
        INSTRUCTIONS
            .iter()
            .map(|line| CellRow::text(StyleRole::PlainText, *line)),
    )
    .freeze_header()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn questionnaire_has_no_instructions_sheet() {
        let template = template();
        assert!(template.instructions.is_none());
        assert_eq!(template.sheet_names(), vec!["Questionnaire"]);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn every_question_lists_its_response_options() {
        let template = template();
        let sheet = template.get_sheet("Questionnaire").unwrap();
        let codes: Vec<_> = sheet.example_rows().map(|r| r[0].to_string()).collect();
        assert_eq!(codes, vec!["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
        assert!(sheet.example_rows().all(|r| !r[2].is_empty()));
    }

    #[test]
    fn instructions_follow_the_table() {
        let template = template();
        let rows = &template.get_sheet("Questionnaire").unwrap().rows;
        assert_eq!(rows[6], CellRow::Blank);
        assert_eq!(rows[8], CellRow::text(StyleRole::Section, "INSTRUCTIONS:"));
        assert_eq!(
            rows.last(),
            Some(&CellRow::text(
                StyleRole::PlainText,
                "5. Run Parser to generate Survey_Structure.xlsx"
            ))
        );
    }
}
