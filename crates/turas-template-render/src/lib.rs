//! # turas-template-render
//!
//! XLSX backend for annotated configuration templates.
//!
//! This crate provides:
//! - The instructions sheet builder
//! - The sheet renderer (spec to styled cell writes)
//! - The workbook assembler and `persist`
//! - Loading existing workbooks, patching settings in place, and
//!   annotating plain working templates
//!
//! ## Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use turas_template_render::ExcelRenderer;
//!
//! let created = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
//! let workbook = ExcelRenderer::new().assemble(&template, created)?;
//! workbook.persist("templates/Pricing_Config_Template_Annotated.xlsx")?;
//! ```

pub mod annotate;
pub mod excel;
mod formats;
pub mod instructions;
pub mod loader;
mod package;
pub mod patch;
pub mod sheet;

pub use annotate::{annotate_working_template, generic_instructions};
pub use excel::{ExcelRenderer, RenderedWorkbook};
pub use instructions::render_instructions;
pub use loader::{load_workbook, LoadedSheet, LoadedWorkbook};
pub use patch::{patch_settings, PatchOutcome, SettingPatch};
pub use sheet::{layout_sheet, CellWrite, MergeRange, SheetLayout};
