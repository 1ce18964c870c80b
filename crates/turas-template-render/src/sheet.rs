//! Sheet renderer
//!
//! Turns a [`SheetSpec`] into a flat list of styled cell writes, merges,
//! widths and a freeze row. Nothing here touches the spreadsheet library;
//! [`crate::excel`] replays the layout onto a worksheet.

use turas_template_core::{CellRow, CellValue, SheetSpec, StyleRole};

/// A single styled cell (zero-based coordinates)
#[derive(Clone, Debug, PartialEq)]
pub struct CellWrite {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
    pub role: StyleRole,
}

/// A merged block (zero-based, inclusive)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub role: StyleRole,
}

/// Everything needed to write one worksheet
#[derive(Clone, Debug, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub cells: Vec<CellWrite>,
    pub merges: Vec<MergeRange>,
    pub widths: Vec<(u16, f64)>,
    pub freeze_row: Option<u32>,
}

impl SheetLayout {
    /// Cell written at a position, if any
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellWrite> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Cells of one sheet row, in column order
    pub fn row(&self, row: u32) -> impl Iterator<Item = &CellWrite> + '_ {
        self.cells.iter().filter(move |c| c.row == row)
    }

    /// Merge whose top-left corner is the given cell
    pub fn merge_at(&self, row: u32, col: u16) -> Option<&MergeRange> {
        self.merges
            .iter()
            .find(|m| m.first_row == row && m.first_col == col)
    }
}

/// Lay out a sheet. The sheet is assumed to be valid.
pub fn layout_sheet(sheet: &SheetSpec) -> SheetLayout {
    let mut layout = SheetLayout {
        name: sheet.name.clone(),
        cells: Vec::new(),
        merges: Vec::new(),
        widths: Vec::with_capacity(sheet.columns.len()),
        freeze_row: sheet.freeze_rows,
    };

    let mut cursor: u32 = 0;
    if sheet.has_header() {
        for (col, column) in sheet.columns.iter().enumerate() {
            layout.cells.push(CellWrite {
                row: 0,
                col: col as u16,
                value: CellValue::from(column.name.as_str()),
                role: StyleRole::Header,
            });
        }
        cursor = 1;
    }

    for row in &sheet.rows {
        emit_row(sheet, row, cursor, &mut layout);
        cursor += row.height();
    }

    for (col, column) in sheet.columns.iter().enumerate() {
        layout.widths.push((col as u16, column.effective_width()));
    }

    layout
}

fn emit_row(sheet: &SheetSpec, row: &CellRow, at: u32, layout: &mut SheetLayout) {
    let (base, status_aware) = match row {
        CellRow::Header { .. } => (StyleRole::Header, false),
        CellRow::Documentation { .. } => (StyleRole::Documentation, true),
        CellRow::Example { .. } => (StyleRole::Example, false),
        CellRow::Data { .. } => (StyleRole::PlainText, true),
        CellRow::Text { role, text, merge } => {
            let col = merge.map_or(0, |m| m.first_col);
            layout.cells.push(CellWrite {
                row: at,
                col,
                value: CellValue::from(text.as_str()),
                role: *role,
            });
            if let Some(span) = merge.filter(|m| !m.is_single_cell()) {
                layout.merges.push(MergeRange {
                    first_row: at,
                    first_col: span.first_col,
                    last_row: at + span.height - 1,
                    last_col: span.last_col,
                    role: *role,
                });
            }
            return;
        }
        CellRow::Blank => return,
    };

    let cells = row.cells();
    let merge = row.merge().filter(|m| !m.is_single_cell());
    let empty = CellValue::empty();

    // Pad to the full width so fills and borders cover the whole row
    for col in 0..sheet.columns.len() {
        let col16 = col as u16;
        if merge.is_some_and(|m| m.contains_col(col16) && col16 != m.first_col) {
            continue;
        }

        let value = cells.get(col).unwrap_or(&empty);
        let role = if status_aware && sheet.is_status_column(col) {
            StyleRole::for_status(value.as_text().unwrap_or_default())
        } else {
            base
        };

        layout.cells.push(CellWrite {
            row: at,
            col: col16,
            value: value.clone(),
            role,
        });

        if let Some(span) = merge.filter(|m| m.first_col == col16) {
            layout.merges.push(MergeRange {
                first_row: at,
                first_col: span.first_col,
                last_row: at + span.height - 1,
                last_col: span.last_col,
                role,
            });
        }
    }
}
