//! # turas-template-core
//!
//! Core document model for annotated configuration templates.
//!
//! This crate provides:
//! - Domain types: `TemplateSpec`, `SheetSpec`, `ColumnSpec`, `CellRow`, `InstructionsSpec`
//! - The process-wide style registry (`style::style_for`)
//! - Schema validation (`validate`)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use turas_template_core::{CellRow, ColumnSpec, SheetSpec, TemplateSpec};
//!
//! let settings = SheetSpec::new("Settings")
//!     .column(ColumnSpec::new("Setting").width(25.0))
//!     .column(ColumnSpec::new("Value").width(25.0))
//!     .column(ColumnSpec::new("Required?").status())
//!     .row(CellRow::data(["project_name", "Brand Tracker Q1", "Required"]))
//!     .freeze_header();
//!
//! let template = TemplateSpec::new("crosstab").sheet(settings);
//! assert!(template.validate().is_ok());
//! ```

pub mod style;
pub mod validate;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub use style::{style_for, Font, HorizontalAlign, Style, StyleRole, VerticalAlign};

/// Name of the generated instructions sheet
pub const INSTRUCTIONS_SHEET: &str = "Instructions";

/// Maximum sheet name length accepted by the spreadsheet format
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Width used for columns without an explicit width hint
pub const DEFAULT_COLUMN_WIDTH: f64 = 15.0;

/// Marker that promotes a status cell to the Required style
pub const REQUIRED_MARKER: &str = "Required";

// ============================================================================
// Cell Values
// ============================================================================

/// A literal cell value. The empty string is the empty cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

// ============================================================================
// Columns and Rows
// ============================================================================

/// A column of a sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header text (unique within the sheet)
    pub name: String,
    /// Display width in character units (advisory only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Marks the "Required?" column that gets content-dependent styling
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub status: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
            status: false,
        }
    }

    /// Set the display width
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Mark this column as the Required/Optional status column
    pub fn status(mut self) -> Self {
        self.status = true;
        self
    }

    /// Width the renderer applies to this column
    pub fn effective_width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

/// A block of cells merged into one wrapped-text region.
///
/// Columns are zero-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpan {
    pub first_col: u16,
    pub last_col: u16,
    /// Number of rows covered, starting at the row that owns the span
    #[serde(default = "default_merge_height")]
    pub height: u32,
}

const fn default_merge_height() -> u32 {
    1
}

impl MergeSpan {
    /// Merge columns `first_col..=last_col` of a single row
    pub const fn columns(first_col: u16, last_col: u16) -> Self {
        Self {
            first_col,
            last_col,
            height: 1,
        }
    }

    /// Extend the span downwards to cover `height` rows
    pub const fn rows(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// A span covering one cell merges nothing
    pub const fn is_single_cell(&self) -> bool {
        self.first_col == self.last_col && self.height <= 1
    }

    pub const fn contains_col(&self, col: u16) -> bool {
        col >= self.first_col && col <= self.last_col
    }
}

/// One logical row of a sheet, tagged with the role that decides its styling
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellRow {
    /// A secondary header-styled row
    Header { cells: Vec<CellValue> },
    /// Documentation describing required/optional status, valid values and meaning
    Documentation {
        cells: Vec<CellValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        merge: Option<MergeSpan>,
    },
    /// Literal sample values illustrating correct entry
    Example { cells: Vec<CellValue> },
    /// Real values (e.g. settings defaults)
    Data { cells: Vec<CellValue> },
    /// A single free-text cell with an explicit role
    Text {
        role: StyleRole,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        merge: Option<MergeSpan>,
    },
    /// Spacer row
    Blank,
}

fn collect_cells<I, V>(cells: I) -> Vec<CellValue>
where
    I: IntoIterator<Item = V>,
    V: Into<CellValue>,
{
    cells.into_iter().map(Into::into).collect()
}

impl CellRow {
    pub fn header<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::Header {
            cells: collect_cells(cells),
        }
    }

    pub fn documentation<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::Documentation {
            cells: collect_cells(cells),
            merge: None,
        }
    }

    /// Documentation row whose cells in `merge` read as one wrapped block
    pub fn documentation_merged<I, V>(cells: I, merge: MergeSpan) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::Documentation {
            cells: collect_cells(cells),
            merge: Some(merge),
        }
    }

    pub fn example<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::Example {
            cells: collect_cells(cells),
        }
    }

    pub fn data<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::Data {
            cells: collect_cells(cells),
        }
    }

    pub fn text(role: StyleRole, text: impl Into<String>) -> Self {
        Self::Text {
            role,
            text: text.into(),
            merge: None,
        }
    }

    pub fn text_merged(role: StyleRole, text: impl Into<String>, merge: MergeSpan) -> Self {
        Self::Text {
            role,
            text: text.into(),
            merge: Some(merge),
        }
    }

    /// Cell values carried by this row (empty for text and blank rows)
    pub fn cells(&self) -> &[CellValue] {
        match self {
            Self::Header { cells }
            | Self::Documentation { cells, .. }
            | Self::Example { cells }
            | Self::Data { cells } => cells,
            Self::Text { .. } | Self::Blank => &[],
        }
    }

    /// Merge hint, if any
    pub fn merge(&self) -> Option<MergeSpan> {
        match self {
            Self::Documentation { merge, .. } | Self::Text { merge, .. } => *merge,
            _ => None,
        }
    }

    /// Number of sheet rows this logical row occupies
    pub fn height(&self) -> u32 {
        self.merge().map_or(1, |m| m.height.max(1))
    }
}

// ============================================================================
// Sheets
// ============================================================================

/// Whether a sheet is a table (header row first), free-form instructions or
/// a table copied from an existing workbook
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    #[default]
    Data,
    Instructions,
    /// Header text travels in the first row; column names are unused
    Copied,
}

/// One worksheet of a template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Sheet name (unique within the workbook, at most 31 characters)
    pub name: String,
    #[serde(default)]
    pub kind: SheetKind,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<CellRow>,
    /// Rows frozen at the top of the sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze_rows: Option<u32>,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SheetKind::Data,
            columns: Vec::new(),
            rows: Vec::new(),
            freeze_rows: None,
        }
    }

    /// Free-form sheet without a header row
    pub fn instructions(name: impl Into<String>) -> Self {
        Self {
            kind: SheetKind::Instructions,
            ..Self::new(name)
        }
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnSpec>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn row(mut self, row: CellRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = CellRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Freeze everything above the first data row
    pub fn freeze_header(mut self) -> Self {
        self.freeze_rows = Some(1);
        self
    }

    /// Table whose header is carried by its first row rather than column names
    pub fn copied(name: impl Into<String>) -> Self {
        Self {
            kind: SheetKind::Copied,
            ..Self::new(name)
        }
    }

    /// Flag an existing column as the status column; out-of-range is a no-op
    pub fn status_column(mut self, col: usize) -> Self {
        if let Some(column) = self.columns.get_mut(col) {
            column.status = true;
        }
        self
    }

    pub fn has_header(&self) -> bool {
        self.kind == SheetKind::Data
    }

    /// Zero-based indices of columns flagged as status columns
    pub fn status_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.status)
            .map(|(i, _)| i)
    }

    pub fn is_status_column(&self, col: usize) -> bool {
        self.columns.get(col).is_some_and(|c| c.status)
    }

    /// Example rows in declaration order
    pub fn example_rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.rows.iter().filter_map(|r| match r {
            CellRow::Example { cells } => Some(cells.as_slice()),
            _ => None,
        })
    }

    /// Data rows in declaration order
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.rows.iter().filter_map(|r| match r {
            CellRow::Data { cells } => Some(cells.as_slice()),
            _ => None,
        })
    }
}

// ============================================================================
// Instructions
// ============================================================================

/// A titled list of bullet items on the instructions sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionSection {
    pub title: String,
    pub items: Vec<String>,
}

impl InstructionSection {
    pub fn new<I, S>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Trailing words of the instructions sheet title
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSuffix {
    #[default]
    Instructions,
    ConfigurationTemplate,
}

impl TitleSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instructions => "Instructions",
            Self::ConfigurationTemplate => "Configuration Template",
        }
    }
}

/// Free-text content of the instructions sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionsSpec {
    /// Template name; the sheet title reads "<title> - <suffix>"
    pub title: String,
    #[serde(default)]
    pub suffix: TitleSuffix,
    /// Pinned creation date, overriding the date supplied at render time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDate>,
    pub overview: String,
    #[serde(default)]
    pub sections: Vec<InstructionSection>,
}

impl InstructionsSpec {
    pub fn new(title: impl Into<String>, overview: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suffix: TitleSuffix::default(),
            created: None,
            overview: overview.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: InstructionSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn suffix(mut self, suffix: TitleSuffix) -> Self {
        self.suffix = suffix;
        self
    }

    /// Full sheet title, e.g. "Crosstab Configuration Template - Instructions"
    pub fn heading(&self) -> String {
        format!("{} - {}", self.title, self.suffix.as_str())
    }

    /// Pin the creation date stamp
    pub fn created(mut self, date: NaiveDate) -> Self {
        self.created = Some(date);
        self
    }
}

// ============================================================================
// Template
// ============================================================================

/// Declarative description of one workbook
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Module the template configures (e.g. "pricing")
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionsSpec>,
    pub sheets: Vec<SheetSpec>,
}

impl TemplateSpec {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            instructions: None,
            sheets: Vec::new(),
        }
    }

    pub fn instructions(mut self, instructions: InstructionsSpec) -> Self {
        self.instructions = Some(instructions);
        self
    }

    pub fn sheet(mut self, sheet: SheetSpec) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Load a template from JSON, rejecting specs that violate an invariant
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let template: Self = serde_json::from_str(json)?;
        template.validate()?;
        Ok(template)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every structural invariant before anything is rendered
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate::validate_template(self)
    }

    /// Sheet names in workbook order, including the instructions sheet
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.sheets.len() + 1);
        if self.instructions.is_some() {
            names.push(INSTRUCTIONS_SHEET);
        }
        names.extend(self.sheets.iter().map(|s| s.name.as_str()));
        names
    }

    pub fn get_sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a template; `created` stamps the instructions sheet
    fn render(&self, template: &TemplateSpec, created: NaiveDate) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// A template violates a structural invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Template '{module}' has no sheets")]
    EmptyTemplate { module: String },

    #[error("Sheet name is empty")]
    EmptySheetName,

    #[error("Sheet name '{name}' is {len} characters long (maximum {MAX_SHEET_NAME_LEN})")]
    SheetNameTooLong { name: String, len: usize },

    #[error("Sheet name '{name}' is invalid: {reason}")]
    InvalidSheetName { name: String, reason: String },

    #[error("Duplicate sheet name '{name}'")]
    DuplicateSheetName { name: String },

    #[error("Sheet '{sheet}' has no columns")]
    NoColumns { sheet: String },

    #[error("Sheet '{sheet}' declares column '{name}' more than once")]
    DuplicateColumn { sheet: String, name: String },

    #[error("Sheet '{sheet}' column '{column}' has invalid width {width}")]
    InvalidWidth { sheet: String, column: String, width: f64 },

    #[error("Sheet '{sheet}' row {row} has {cells} values but only {columns} columns")]
    RowTooWide {
        sheet: String,
        row: usize,
        cells: usize,
        columns: usize,
    },

    #[error("Sheet '{sheet}' row {row} merges columns {first}..={last}, outside the {columns} declared columns")]
    MergeOutOfBounds {
        sheet: String,
        row: usize,
        first: u16,
        last: u16,
        columns: usize,
    },

    #[error("Sheet '{sheet}' row {row} has a malformed merge span {first}..={last} (height {height})")]
    InvalidMerge {
        sheet: String,
        row: usize,
        first: u16,
        last: u16,
        height: u32,
    },

    #[error("Sheet '{sheet}' row {row} merge would hide the value in column {column}")]
    MergeHidesValue { sheet: String, row: usize, column: u16 },
}

impl SchemaError {
    /// Sheet the error refers to, if any
    pub fn sheet(&self) -> Option<&str> {
        match self {
            Self::EmptyTemplate { .. } | Self::EmptySheetName => None,
            Self::SheetNameTooLong { name, .. }
            | Self::InvalidSheetName { name, .. }
            | Self::DuplicateSheetName { name } => Some(name),
            Self::NoColumns { sheet }
            | Self::DuplicateColumn { sheet, .. }
            | Self::InvalidWidth { sheet, .. }
            | Self::RowTooWide { sheet, .. }
            | Self::MergeOutOfBounds { sheet, .. }
            | Self::InvalidMerge { sheet, .. }
            | Self::MergeHidesValue { sheet, .. } => Some(sheet),
        }
    }
}

/// Rendering, persistence and workbook-reading errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Failed to read workbook {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
