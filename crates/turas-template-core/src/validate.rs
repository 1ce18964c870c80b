//! Structural validation of templates
//!
//! Every check runs before a worksheet is created, so an invalid template
//! never produces a partial file.

use crate::{
    CellRow, SchemaError, SheetKind, SheetSpec, TemplateSpec, INSTRUCTIONS_SHEET,
    MAX_SHEET_NAME_LEN,
};
use std::collections::HashSet;

const FORBIDDEN_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const RESERVED_NAME: &str = "History";

/// Validate a whole template, counting the generated instructions sheet
pub fn validate_template(template: &TemplateSpec) -> Result<(), SchemaError> {
    if template.sheets.is_empty() {
        return Err(SchemaError::EmptyTemplate {
            module: template.module.clone(),
        });
    }

    let mut seen = HashSet::new();
    if template.instructions.is_some() {
        seen.insert(INSTRUCTIONS_SHEET.to_lowercase());
    }
    for sheet in &template.sheets {
        check_unique(&mut seen, &sheet.name)?;
        validate_sheet(sheet)?;
    }
    Ok(())
}

/// Validate an ordered list of already-built sheets
pub fn validate_sheets(module: &str, sheets: &[SheetSpec]) -> Result<(), SchemaError> {
    if sheets.is_empty() {
        return Err(SchemaError::EmptyTemplate {
            module: module.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for sheet in sheets {
        check_unique(&mut seen, &sheet.name)?;
        validate_sheet(sheet)?;
    }
    Ok(())
}

fn check_unique(seen: &mut HashSet<String>, name: &str) -> Result<(), SchemaError> {
    if seen.insert(name.to_lowercase()) {
        Ok(())
    } else {
        Err(SchemaError::DuplicateSheetName {
            name: name.to_string(),
        })
    }
}

/// Validate one sheet in isolation
pub fn validate_sheet(sheet: &SheetSpec) -> Result<(), SchemaError> {
    validate_sheet_name(&sheet.name)?;
    validate_columns(sheet)?;

    for (index, row) in sheet.rows.iter().enumerate() {
        validate_row(sheet, index, row)?;
    }
    Ok(())
}

/// Check a sheet name against the spreadsheet format's rules
pub fn validate_sheet_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptySheetName);
    }

    let len = name.chars().count();
    if len > MAX_SHEET_NAME_LEN {
        return Err(SchemaError::SheetNameTooLong {
            name: name.to_string(),
            len,
        });
    }

    let invalid = |reason: &str| SchemaError::InvalidSheetName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(&format!("contains '{c}'")));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(invalid("starts or ends with an apostrophe"));
    }
    if name.eq_ignore_ascii_case(RESERVED_NAME) {
        return Err(invalid("name is reserved"));
    }
    Ok(())
}

fn validate_columns(sheet: &SheetSpec) -> Result<(), SchemaError> {
    if sheet.columns.is_empty() && sheet.kind != SheetKind::Instructions {
        return Err(SchemaError::NoColumns {
            sheet: sheet.name.clone(),
        });
    }

    let mut names = HashSet::new();
    for column in &sheet.columns {
        if let Some(width) = column.width {
            if !width.is_finite() || width <= 0.0 {
                return Err(SchemaError::InvalidWidth {
                    sheet: sheet.name.clone(),
                    column: column.name.clone(),
                    width,
                });
            }
        }
        if sheet.kind == SheetKind::Data
            && !column.name.is_empty()
            && !names.insert(column.name.as_str())
        {
            return Err(SchemaError::DuplicateColumn {
                sheet: sheet.name.clone(),
                name: column.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_row(sheet: &SheetSpec, index: usize, row: &CellRow) -> Result<(), SchemaError> {
    let columns = sheet.columns.len();
    let cells = row.cells();

    if cells.len() > columns {
        return Err(SchemaError::RowTooWide {
            sheet: sheet.name.clone(),
            row: index,
            cells: cells.len(),
            columns,
        });
    }

    let Some(merge) = row.merge() else {
        return Ok(());
    };

    if merge.first_col > merge.last_col || merge.height == 0 {
        return Err(SchemaError::InvalidMerge {
            sheet: sheet.name.clone(),
            row: index,
            first: merge.first_col,
            last: merge.last_col,
            height: merge.height,
        });
    }

    if usize::from(merge.last_col) >= columns {
        return Err(SchemaError::MergeOutOfBounds {
            sheet: sheet.name.clone(),
            row: index,
            first: merge.first_col,
            last: merge.last_col,
            columns,
        });
    }

    // Only the first cell of a merged block stays visible
    let hidden = cells
        .iter()
        .enumerate()
        .skip(usize::from(merge.first_col) + 1)
        .take(usize::from(merge.last_col - merge.first_col))
        .find(|(_, value)| !value.is_empty());
    if let Some((column, _)) = hidden {
        return Err(SchemaError::MergeHidesValue {
            sheet: sheet.name.clone(),
            row: index,
            column: column as u16,
        });
    }

    Ok(())
}
