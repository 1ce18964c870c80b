//! Shared builders for the literal tables

use turas_template_core::{CellRow, CellValue, ColumnSpec, SheetSpec};

/// Header of the status column
pub(crate) const STATUS: &str = "Required?";

/// Sheet with `(header, width)` columns; a `Required?` column is the status column
pub(crate) fn sheet(name: &str, columns: &[(&str, f64)]) -> SheetSpec {
    SheetSpec::new(name).columns(columns.iter().map(|&(header, width)| {
        let column = ColumnSpec::new(header).width(width);
        if header == STATUS {
            column.status()
        } else {
            column
        }
    }))
}

/// Five-column `<key> | Value | Required? | Valid Values | Description` sheet
/// with the header frozen
pub(crate) fn settings_sheet(
    name: &str,
    key_header: &str,
    widths: [f64; 5],
    rows: &[[&str; 5]],
) -> SheetSpec {
    let [key, value, status, valid, description] = widths;
    sheet(
        name,
        &[
            (key_header, key),
            ("Value", value),
            (STATUS, status),
            ("Valid Values", valid),
            ("Description", description),
        ],
    )
    .rows(rows.iter().map(|row| CellRow::data(*row)))
    .freeze_header()
}

/// Documentation row whose first `skip` cells are blank
pub(crate) fn doc(skip: usize, tail: &[&str]) -> CellRow {
    CellRow::documentation(
        std::iter::repeat(CellValue::empty())
            .take(skip)
            .chain(tail.iter().map(|&s| CellValue::from(s))),
    )
}

/// Example rows from string literals
pub(crate) fn examples<const N: usize>(rows: &[[&str; N]]) -> Vec<CellRow> {
    rows.iter().map(|row| CellRow::example(*row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_column_is_detected_by_header() {
        let sheet = sheet("Banner", &[("BannerID", 15.0), (STATUS, 12.0)]);
        assert_eq!(sheet.status_columns().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn doc_rows_are_left_padded() {
        let row = doc(2, &["Required", "Unique ID"]);
        assert_eq!(
            row.cells(),
            &[
                CellValue::empty(),
                CellValue::empty(),
                CellValue::from("Required"),
                CellValue::from("Unique ID"),
            ]
        );
    }

    #[test]
    fn settings_sheet_layout() {
        let sheet = settings_sheet(
            "Settings",
            "Setting",
            [25.0, 25.0, 12.0, 20.0, 50.0],
            &[["alpha", "0.05", "Required", "0.01, 0.05, 0.10", "Significance level"]],
        );
        let headers: Vec<_> = sheet.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            headers,
            vec!["Setting", "Value", "Required?", "Valid Values", "Description"]
        );
        assert_eq!(sheet.freeze_rows, Some(1));
        assert!(sheet.is_status_column(2));
    }
}
