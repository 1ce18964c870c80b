//! Annotating plain working templates
//!
//! Copies every sheet of an existing working template into a new workbook
//! and prepends a generic Instructions sheet for the module.

use crate::excel::ExcelRenderer;
use crate::instructions::render_instructions;
use crate::loader::load_workbook;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;
use turas_template_core::{InstructionSection, InstructionsSpec, RenderError, INSTRUCTIONS_SHEET};

/// Generic instructions used when a module has no bespoke text
pub fn generic_instructions(module_name: &str) -> InstructionsSpec {
    InstructionsSpec::new(
        format!("{module_name} Configuration Template"),
        format!(
            "This template configures {module_name} analysis for TURAS. \
             It defines analysis settings and parameters."
        ),
    )
    .section(InstructionSection::new(
        "How to use this template",
        [
            "Configure analysis parameters in the Settings sheet",
            "Fill in the 'Value' column with your project-specific values",
            "Required fields are highlighted in yellow",
            "Optional fields can be left as default or customized",
            "Save and run with TURAS module",
            "All file paths can be relative to this config file location",
        ],
    ))
}

/// Write an annotated copy of `source` to `output`.
///
/// Returns the sheet names of the new workbook. An `Instructions` sheet
/// already present in the source is replaced.
pub fn annotate_working_template(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    module_name: &str,
    created: NaiveDate,
) -> Result<Vec<String>, RenderError> {
    let source = source.as_ref();
    let output = output.as_ref();
    let loaded = load_workbook(source)?;

    let mut sheets = vec![render_instructions(
        &generic_instructions(module_name),
        created,
    )];
    sheets.extend(
        loaded
            .sheets
            .iter()
            .filter(|s| s.name != INSTRUCTIONS_SHEET)
            .map(|s| s.to_sheet_spec()),
    );

    let workbook = ExcelRenderer::new().render_sheets(module_name, &sheets)?;
    let names = workbook.sheet_names().to_vec();
    workbook.persist(output)?;

    info!(
        module = module_name,
        source = %source.display(),
        output = %output.display(),
        "annotated working template"
    );
    Ok(names)
}
