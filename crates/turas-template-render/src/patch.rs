//! In-place edits of settings in an existing workbook
//!
//! A patch locates a key in the first column of a sheet (header row
//! excluded, surrounding whitespace ignored) and replaces the value in the
//! second column. Keys that cannot be found are reported, never fatal.
//! Only the replaced cells change; cell types, styles and merges elsewhere
//! in the workbook are left as they were.

use crate::loader::load_workbook;
use crate::package::XlsxPackage;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use turas_template_core::{CellValue, RenderError};

const VALUE_COLUMN: u16 = 1;

/// One `key = value` edit
#[derive(Clone, Debug, PartialEq)]
pub struct SettingPatch {
    pub key: String,
    pub value: CellValue,
}

impl SettingPatch {
    pub fn new(key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse `KEY=VALUE`; the value may itself contain `=`
    pub fn parse(input: &str) -> Option<Self> {
        let (key, value) = input.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value.trim()))
    }
}

/// Result of applying one patch
#[derive(Clone, Debug, PartialEq)]
pub enum PatchOutcome {
    /// The value was replaced; `row` is the zero-based sheet row
    Updated {
        key: String,
        row: usize,
        previous: CellValue,
    },
    /// The key (or the sheet) does not exist; nothing changed for this patch
    NotFound { key: String },
}

impl PatchOutcome {
    pub fn key(&self) -> &str {
        match self {
            Self::Updated { key, .. } | Self::NotFound { key } => key,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Apply setting patches to `sheet_name` of the workbook at `path`.
///
/// The file is rewritten once, and only if at least one key matched.
pub fn patch_settings(
    path: impl AsRef<Path>,
    sheet_name: &str,
    patches: &[SettingPatch],
) -> Result<Vec<PatchOutcome>, RenderError> {
    let path = path.as_ref();
    let workbook = load_workbook(path)?;

    let Some(sheet) = workbook.sheet(sheet_name) else {
        warn!(path = %path.display(), sheet = sheet_name, "sheet not found, nothing patched");
        return Ok(patches
            .iter()
            .map(|p| PatchOutcome::NotFound { key: p.key.clone() })
            .collect());
    };

    let mut outcomes = Vec::with_capacity(patches.len());
    let mut edits = Vec::new();
    for patch in patches {
        let found = sheet.rows.iter().enumerate().skip(1).find_map(|(index, row)| {
            row.first()
                .and_then(CellValue::as_text)
                .filter(|key| key.trim() == patch.key)
                .map(|_| index)
        });

        let Some(index) = found else {
            warn!(path = %path.display(), sheet = sheet_name, key = %patch.key, "setting not found");
            outcomes.push(PatchOutcome::NotFound {
                key: patch.key.clone(),
            });
            continue;
        };

        let previous = sheet
            .cell(index, usize::from(VALUE_COLUMN))
            .cloned()
            .unwrap_or_else(CellValue::empty);
        edits.push((index, &patch.value));
        info!(
            sheet = sheet_name,
            key = %patch.key,
            row = index + 1,
            from = %previous,
            to = %patch.value,
            "patched setting"
        );
        outcomes.push(PatchOutcome::Updated {
            key: patch.key.clone(),
            row: index,
            previous,
        });
    }

    if !edits.is_empty() {
        let mut package = XlsxPackage::open(path).map_err(|e| e.at(path))?;
        let part = package
            .worksheet_part(sheet_name)
            .map_err(|e| e.at(path))?;
        for (index, value) in edits {
            let row = u32::try_from(index).map_err(|_| RenderError::Read {
                path: path.to_path_buf(),
                message: format!("row {index} is beyond the worksheet limit"),
            })?;
            package
                .set_cell(&part, row, VALUE_COLUMN, value)
                .map_err(|e| e.at(path))?;
        }
        let bytes = package.to_bytes().map_err(|e| e.at(path))?;
        fs::write(path, bytes).map_err(|e| RenderError::io(path, e))?;
        info!(path = %path.display(), part = %part, "workbook patched in place");
    }

    Ok(outcomes)
}
