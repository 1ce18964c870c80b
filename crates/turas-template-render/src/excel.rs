//! Workbook assembler
//!
//! Builds one XLSX workbook per template:
//! - Instructions sheet first (when the template has instructions)
//! - Every declared sheet in order, each with header, documentation,
//!   example and data rows styled from the registry
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Settings
//! | Setting         | Value          | Required? | Valid Values        | Description        |
//! |-----------------|----------------|-----------|---------------------|--------------------|
//! | analysis_method | van_westendorp | Required  | van_westendorp, ... | Pricing method ... |
//! ```
//!
//! Validation runs before the first worksheet is created; an invalid
//! template never yields a workbook, and nothing is written to disk.

use crate::formats::ExcelFormats;
use crate::instructions::render_instructions;
use crate::sheet::{layout_sheet, SheetLayout};
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use turas_template_core::{
    validate, CellValue, RenderError, Renderer, SheetSpec, TemplateSpec,
};

/// XLSX renderer for annotated templates
#[derive(Clone, Debug, Default)]
pub struct ExcelRenderer {
    /// Freeze the header row of every data sheet, not only those that ask for it
    pub freeze_all_headers: bool,
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the header row on every data sheet
    pub fn freeze_all_headers(mut self) -> Self {
        self.freeze_all_headers = true;
        self
    }

    /// Validate and assemble a template into an in-memory workbook
    pub fn assemble(
        &self,
        template: &TemplateSpec,
        created: NaiveDate,
    ) -> Result<RenderedWorkbook, RenderError> {
        template.validate()?;

        let mut sheets = Vec::with_capacity(template.sheets.len() + 1);
        if let Some(instructions) = &template.instructions {
            sheets.push(render_instructions(instructions, created));
        }
        sheets.extend(template.sheets.iter().cloned());

        self.render_sheets(&template.module, &sheets)
    }

    /// Validate and render an explicit, already ordered list of sheets
    pub fn render_sheets(
        &self,
        module: &str,
        sheets: &[SheetSpec],
    ) -> Result<RenderedWorkbook, RenderError> {
        validate::validate_sheets(module, sheets)?;

        let formats = ExcelFormats::new();
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let mut layout = layout_sheet(sheet);
            if self.freeze_all_headers && sheet.has_header() && layout.freeze_row.is_none() {
                layout.freeze_row = Some(1);
            }

            let worksheet = workbook.add_worksheet();
            write_layout(worksheet, &layout, &formats)?;
            debug!(
                module,
                sheet = %layout.name,
                cells = layout.cells.len(),
                merges = layout.merges.len(),
                "rendered sheet"
            );
        }

        Ok(RenderedWorkbook {
            module: module.to_string(),
            sheet_names: sheets.iter().map(|s| s.name.clone()).collect(),
            workbook,
        })
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, template: &TemplateSpec, created: NaiveDate) -> Result<Vec<u8>, RenderError> {
        self.assemble(template, created)?.to_bytes()
    }
}

/// Replay a layout onto a worksheet
fn write_layout(
    sheet: &mut Worksheet,
    layout: &SheetLayout,
    formats: &ExcelFormats,
) -> Result<(), RenderError> {
    sheet
        .set_name(&layout.name)
        .map_err(|e| RenderError::Format(e.to_string()))?;

    // Merges first; the top-left value is written over the merged block below
    for merge in &layout.merges {
        sheet
            .merge_range(
                merge.first_row,
                merge.first_col,
                merge.last_row,
                merge.last_col,
                "",
                formats.get(merge.role),
            )
            .map_err(|e| RenderError::Format(e.to_string()))?;
    }

    for cell in &layout.cells {
        let format = formats.get(cell.role);
        match &cell.value {
            CellValue::Number(n) => {
                sheet
                    .write_number_with_format(cell.row, cell.col, *n, format)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
            CellValue::Text(s) if s.is_empty() => {
                sheet
                    .write_blank(cell.row, cell.col, format)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
            CellValue::Text(s) => {
                sheet
                    .write_string_with_format(cell.row, cell.col, s, format)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
        }
    }

    for &(col, width) in &layout.widths {
        sheet.set_column_width(col, width).ok();
    }

    if let Some(row) = layout.freeze_row {
        sheet.set_freeze_panes(row, 0).ok();
    }

    Ok(())
}

/// An assembled workbook, owned by the caller until it is persisted
pub struct RenderedWorkbook {
    module: String,
    sheet_names: Vec<String>,
    workbook: Workbook,
}

impl RenderedWorkbook {
    /// Module the workbook was built for
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Serialize to XLSX bytes
    pub fn to_bytes(mut self) -> Result<Vec<u8>, RenderError> {
        self.workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Write the workbook to `path`.
    ///
    /// The parent directory must already exist; it is never created here.
    pub fn persist(self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(RenderError::io(
                path,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ),
            ));
        }

        let module = self.module.clone();
        let sheets = self.sheet_names.len();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes).map_err(|e| RenderError::io(path, e))?;

        info!(
            module = %module,
            path = %path.display(),
            sheets,
            bytes = bytes.len(),
            "wrote workbook"
        );
        Ok(())
    }
}

impl fmt::Debug for RenderedWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedWorkbook")
            .field("module", &self.module)
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}
