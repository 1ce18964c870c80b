//! Pricing research template (Van Westendorp PSM and Gabor-Granger)

use crate::table::{examples, settings_sheet, sheet};
use turas_template_core::{
    CellRow, CellValue, InstructionSection, InstructionsSpec, MergeSpan, TemplateSpec, TitleSuffix,
};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("pricing")
        .instructions(instructions())
        .sheet(settings_sheet(
            "Settings",
            "Setting",
            [30.0, 30.0, 12.0, 35.0, 60.0],
            &[
                ["analysis_method", "van_westendorp", "Required", "van_westendorp | gabor_granger | both", "Analysis method: Van Westendorp PSM, Gabor-Granger revenue optimization, or both"],
                ["data_file", "pricing_data.csv", "Required", "CSV, XLSX, SAV, RDS file path", "Path to data file (relative to config file or absolute)"],
                ["output_file", "pricing_results.xlsx", "Required", "XLSX file path", "Output Excel file path (relative to config file or absolute)"],
                ["weight_var", "", "Optional", "Column name", "Weight variable name for weighted analysis"],
                ["dk_codes", "", "Optional", "Comma-separated numbers", "Don't know codes to exclude (e.g., 98,99)"],
                ["vw_monotonicity_behavior", "flag_only", "Optional", "flag_only | drop | fix", "How to handle non-monotonic VW responses (default: flag_only)"],
                ["gg_monotonicity_behavior", "smooth", "Optional", "smooth | flag_only | none", "How to handle non-monotonic GG curves (default: smooth)"],
                ["segment_vars", "", "Optional", "Comma-separated column names", "Variables to segment by (e.g., age_group,region)"],
                ["unit_cost", "", "Optional", "Positive number", "Unit cost for profit optimization in Gabor-Granger"],
            ],
        ))
        .sheet(
            sheet(
                "VanWestendorp",
                &[("Question", 20.0), ("ColumnName", 30.0), ("Description", 60.0)],
            )
            .status_column(0)
            .row(CellRow::documentation([
                "Required: too_cheap | cheap | expensive | too_expensive",
                "Column name in data",
                "One row per Price Sensitivity Meter question",
            ]))
            .rows(examples(&[
                ["too_cheap", "vw_too_cheap", "Price point where product seems too cheap (quality concern)"],
                ["cheap", "vw_cheap", "Price point where product is a bargain"],
                ["expensive", "vw_expensive", "Price point where product starts getting expensive"],
                ["too_expensive", "vw_too_expensive", "Price point where product is too expensive to consider"],
            ]))
            .freeze_header(),
        )
        .sheet(
            sheet(
                "GaborGranger",
                &[("PricePoint", 15.0), ("PurchaseIntentColumn", 30.0)],
            )
            .status_column(0)
            .row(CellRow::documentation(["Required?", "Valid Values"]))
            .row(CellRow::documentation([
                "Required (3+ points)",
                "Column name with 0/1 purchase intent",
            ]))
            .row(CellRow::documentation_merged(
                [
                    "Description",
                    "Define tested price points and corresponding purchase intent columns. Need minimum 3 price points.",
                ],
                MergeSpan::columns(1, 1),
            ))
            .rows(
                [(49, "pi_49"), (69, "pi_69"), (89, "pi_89"), (99, "pi_99")]
                    .into_iter()
                    .map(|(price, column)| {
                        CellRow::example([CellValue::from(price), CellValue::from(column)])
                    }),
            )
            .freeze_header(),
        )
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "TURAS Pricing Analysis",
        "This template configures pricing research analysis using Van Westendorp and/or \
         Gabor-Granger methods.",
    )
    .suffix(TitleSuffix::ConfigurationTemplate)
    .section(InstructionSection::new(
        "Sheets in this template",
        [
            "Settings - Core analysis parameters",
            "VanWestendorp - PSM question mapping (if using Van Westendorp)",
            "GaborGranger - Price points and purchase intent columns (if using Gabor-Granger)",
        ],
    ))
    .section(InstructionSection::new(
        "Supported methods",
        [
            "van_westendorp - Price Sensitivity Meter analysis",
            "gabor_granger - Revenue maximization analysis",
            "both - Run both methods on same dataset",
        ],
    ))
    .section(InstructionSection::new(
        "Quick start",
        [
            "Update Settings sheet with your data file path and method",
            "If using Van Westendorp, map your PSM questions in VanWestendorp sheet",
            "If using Gabor-Granger, define price points in GaborGranger sheet",
            "Save and run: turas_load(\"pricing\") then run analysis",
        ],
    ))
    .section(InstructionSection::new(
        "Documentation",
        [
            "Yellow rows = parameter documentation (Required?, Valid Values, Description)",
            "Gray rows = example values",
            "Delete documentation rows before production use (optional)",
            "For detailed help, see: modules/pricing/documentation/",
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_open_with_analysis_method() {
        let template = template();
        let settings = template.get_sheet("Settings").unwrap();
        let first = settings.data_rows().next().unwrap();
        assert_eq!(first[0], CellValue::from("analysis_method"));
        assert_eq!(first[1], CellValue::from("van_westendorp"));
    }

    #[test]
    fn gabor_granger_examples() {
        let template = template();
        let gg = template.get_sheet("GaborGranger").unwrap();
        let rows: Vec<Vec<CellValue>> = gg.example_rows().map(<[CellValue]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![
                vec![CellValue::from(49), CellValue::from("pi_49")],
                vec![CellValue::from(69), CellValue::from("pi_69")],
                vec![CellValue::from(89), CellValue::from("pi_89")],
                vec![CellValue::from(99), CellValue::from("pi_99")],
            ]
        );
    }

    #[test]
    fn van_westendorp_covers_four_questions() {
        let template = template();
        let vw = template.get_sheet("VanWestendorp").unwrap();
        let questions: Vec<_> = vw
            .example_rows()
            .map(|r| r[0].to_string())
            .collect();
        assert_eq!(questions, ["too_cheap", "cheap", "expensive", "too_expensive"]);
    }

    #[test]
    fn price_column_carries_the_status_text() {
        let template = template();
        for name in ["VanWestendorp", "GaborGranger"] {
            let sheet = template.get_sheet(name).unwrap();
            assert_eq!(sheet.status_columns().collect::<Vec<_>>(), vec![0], "{name}");
        }
    }
}
