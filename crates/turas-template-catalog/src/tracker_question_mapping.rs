//! Question code mapping across tracker waves

use crate::table::{doc, examples, sheet, STATUS};
use turas_template_core::{InstructionSection, InstructionsSpec, TemplateSpec};

/// Columns before the status column on QuestionMap
const MAPPING_COLUMNS: usize = 8;

pub fn template() -> TemplateSpec {
    TemplateSpec::new("tracker-question-mapping")
        .instructions(instructions())
        .sheet(
            sheet(
                "QuestionMap",
                &[
                    ("QuestionCode", 15.0),
                    ("QuestionText", 35.0),
                    ("QuestionType", 15.0),
                    ("Wave1", 10.0),
                    ("Wave2", 10.0),
                    ("Wave3", 10.0),
                    ("Wave4", 10.0),
                    ("SourceQuestions", 20.0),
                    (STATUS, 15.0),
                    ("Valid Types", 25.0),
                    ("Description", 40.0),
                ],
            )
            .rows(
                [
                    ["Required", "Any unique code", "Standard tracking code (used in TrackedQuestions)"],
                    ["Required", "", "Question wording (for documentation)"],
                    ["Required", "Rating/NPS/SingleChoice/Composite", "Type of question (determines analysis method)"],
                    ["Optional", "Question code or blank", "Question code in Wave 1 data (blank if not asked)"],
                    ["Optional", "Question code or blank", "Question code in Wave 2 data (blank if not asked)"],
                    ["Optional", "Question code or blank", "Question code in Wave 3 data (blank if not asked)"],
                    ["Optional", "Question code or blank", "Question code in Wave 4 data (blank if not asked)"],
                    ["For Composite only", "Comma-separated codes", "Source questions (e.g., Q_SAT,Q_VALUE)"],
                ]
                .iter()
                .map(|tail| doc(MAPPING_COLUMNS, tail)),
            )
            .rows(examples(&[
                ["Q_SAT", "Overall satisfaction (1-10)", "Rating", "Q10", "Q11", "Q12", "Q15", ""],
                ["Q_NPS", "Likelihood to recommend (0-10)", "NPS", "Q25", "Q26", "Q27", "Q30", ""],
                ["Q_VALUE", "Value for money (1-10)", "Rating", "Q15", "Q16", "Q17", "Q20", ""],
                ["Q_BRAND", "Brand preference", "SingleChoice", "Q5", "Q5", "Q5", "Q5", ""],
                ["Q_NEW", "New question added in Wave 2", "Rating", "", "Q30", "Q31", "Q32", ""],
                ["COMP_OVERALL", "Overall Score (Composite)", "Composite", "COMP", "COMP", "COMP", "COMP", "Q_SAT,Q_VALUE"],
            ])),
        )
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Tracker Question Mapping Template",
        "This template maps question codes across survey waves when questions move or are \
         renumbered. It allows TurasTracker to follow the same question even when its code changes.",
    )
    .section(InstructionSection::new(
        "How to Use This Template",
        [
            "Add one row per tracked question in the QuestionMap sheet",
            "Add one column per wave (Wave1, Wave2, Wave3, etc.)",
            "Enter the wave-specific question code in each wave column",
            "Leave blank if question not asked in that wave",
            "For composites, list source questions in SourceQuestions column",
        ],
    ))
    .section(InstructionSection::new(
        "Question Type Guide",
        [
            "Rating: Scale questions (1-5, 1-10, etc.) - reports mean/average",
            "NPS: Net Promoter Score (0-10 scale) - reports NPS score, % promoters/passives/detractors",
            "SingleChoice: Single-select categorical - reports % for each option",
            "Composite: Calculated metric combining multiple questions",
        ],
    ))
    .section(InstructionSection::new(
        "Common Scenarios",
        [
            "Question moved: Q10 → Q11 → Q12 (same question, different codes)",
            "Question added: Leave Wave1 blank, fill Wave2 onwards",
            "Question removed: Fill Wave1-Wave2, leave Wave3 blank",
            "Question unchanged: Same code across all waves",
        ],
    ))
}
