//! Reading existing workbooks back into sheet specs

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use turas_template_core::{
    CellRow, CellValue, ColumnSpec, RenderError, SheetSpec, StyleRole, INSTRUCTIONS_SHEET,
};

const MIN_FIT_WIDTH: f64 = 10.0;
const MAX_FIT_WIDTH: f64 = 60.0;
const NOTE_WIDTH: f64 = 80.0;
const SETTINGS_SHEET: &str = "Settings";

/// Cell values of one worksheet, row-major, anchored at A1
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedSheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

/// Every sheet of a workbook in file order
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedWorkbook {
    pub path: PathBuf,
    pub sheets: Vec<LoadedSheet>,
}

/// Read every sheet's values from an XLSX file
pub fn load_workbook(path: impl AsRef<Path>) -> Result<LoadedWorkbook, RenderError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RenderError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "workbook not found"),
        ));
    }

    let read_error = |message: String| RenderError::Read {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: XlsxError| read_error(e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e: XlsxError| read_error(format!("sheet '{name}': {e}")))?;

        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset as usize];
        for row in range.rows() {
            let mut values = vec![CellValue::empty(); col_offset as usize];
            values.extend(row.iter().map(to_cell_value));
            while values.last().is_some_and(CellValue::is_empty) {
                values.pop();
            }
            rows.push(values);
        }

        debug!(path = %path.display(), sheet = %name, rows = rows.len(), "loaded sheet");
        sheets.push(LoadedSheet { name, rows });
    }

    Ok(LoadedWorkbook {
        path: path.to_path_buf(),
        sheets,
    })
}

fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::from(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
        Data::Empty => CellValue::empty(),
    }
}

impl LoadedWorkbook {
    pub fn sheet(&self, name: &str) -> Option<&LoadedSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

impl LoadedSheet {
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Widest row, in cells
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rebuild a spec from stored values.
    ///
    /// An `Instructions` sheet becomes wrapped notes; any other sheet keeps
    /// row 1 as a header row (its text may repeat) and the remaining rows as
    /// data. `Settings` keeps its header frozen.
    pub fn to_sheet_spec(&self) -> SheetSpec {
        if self.name == INSTRUCTIONS_SHEET {
            return self.to_notes();
        }

        let width = self.width().max(1);
        let columns = (0..width).map(|col| ColumnSpec::new("").width(self.fit_width(col)));

        let rows = self.rows.iter().enumerate().map(|(index, values)| {
            if values.is_empty() {
                CellRow::Blank
            } else if index == 0 {
                CellRow::header(values.iter().cloned())
            } else {
                CellRow::data(values.iter().cloned())
            }
        });

        let sheet = SheetSpec::copied(self.name.as_str()).columns(columns).rows(rows);
        if self.name.eq_ignore_ascii_case(SETTINGS_SHEET) {
            sheet.freeze_header()
        } else {
            sheet
        }
    }

    fn to_notes(&self) -> SheetSpec {
        let rows = self.rows.iter().map(|values| {
            let text = values
                .iter()
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                CellRow::Blank
            } else {
                CellRow::text(StyleRole::Note, text)
            }
        });

        SheetSpec::instructions(self.name.as_str())
            .column(ColumnSpec::new("A").width(NOTE_WIDTH))
            .rows(rows)
    }

    fn fit_width(&self, col: usize) -> f64 {
        let longest = self
            .rows
            .iter()
            .filter_map(|r| r.get(col))
            .map(|v| v.to_string().chars().count())
            .max()
            .unwrap_or(0);
        (longest as f64 + 2.0).clamp(MIN_FIT_WIDTH, MAX_FIT_WIDTH)
    }
}
