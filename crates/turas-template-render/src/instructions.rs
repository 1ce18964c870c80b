//! Instructions sheet builder

use chrono::NaiveDate;
use turas_template_core::{
    CellRow, ColumnSpec, InstructionsSpec, MergeSpan, SheetSpec, StyleRole, INSTRUCTIONS_SHEET,
};

/// Columns A..F; paragraphs and bullets merge across all of them
const SPAN_COLUMNS: u16 = 6;
const TEXT_WIDTH: f64 = 80.0;
const SPARE_WIDTH: f64 = 8.43;
const OVERVIEW_ROWS: u32 = 3;
const BULLET: &str = "\u{2022} ";

/// Build the instructions sheet.
///
/// `today` is used for the creation stamp unless `spec.created` pins one.
pub fn render_instructions(spec: &InstructionsSpec, today: NaiveDate) -> SheetSpec {
    let full_width = MergeSpan::columns(0, SPAN_COLUMNS - 1);
    let created = spec.created.unwrap_or(today);

    let mut sheet = SheetSpec::instructions(INSTRUCTIONS_SHEET)
        .column(ColumnSpec::new("A").width(TEXT_WIDTH))
        .columns(
            ["B", "C", "D", "E", "F"]
                .into_iter()
                .map(|name| ColumnSpec::new(name).width(SPARE_WIDTH)),
        )
        .row(CellRow::text_merged(
            StyleRole::Title,
            spec.heading(),
            full_width,
        ))
        .row(CellRow::text_merged(
            StyleRole::Caption,
            format!("Created: {}", created.format("%Y-%m-%d")),
            full_width,
        ))
        .row(CellRow::Blank)
        .row(CellRow::text(StyleRole::Heading, "OVERVIEW"))
        .row(CellRow::text_merged(
            StyleRole::Note,
            spec.overview.as_str(),
            full_width.rows(OVERVIEW_ROWS),
        ))
        .row(CellRow::Blank);

    for section in &spec.sections {
        sheet = sheet.row(CellRow::text(StyleRole::Section, section.title.to_uppercase()));
        for item in &section.items {
            sheet = sheet.row(CellRow::text_merged(
                StyleRole::Note,
                format!("{BULLET}{item}"),
                full_width,
            ));
        }
        sheet = sheet.row(CellRow::Blank);
    }

    sheet
}
