//! Conversion of registry styles into spreadsheet formats

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};
use turas_template_core::{style_for, HorizontalAlign, Style, StyleRole, VerticalAlign};

/// One prebuilt format per style role
pub(crate) struct ExcelFormats {
    formats: [Format; StyleRole::ALL.len()],
}

impl ExcelFormats {
    pub(crate) fn new() -> Self {
        Self {
            formats: StyleRole::ALL.map(|role| to_format(&style_for(role))),
        }
    }

    pub(crate) fn get(&self, role: StyleRole) -> &Format {
        &self.formats[role as usize]
    }
}

/// Build the spreadsheet format for a style
pub(crate) fn to_format(style: &Style) -> Format {
    let mut format = Format::new().set_font_size(f64::from(style.font.size));

    if style.font.bold {
        format = format.set_bold();
    }
    if style.font.italic {
        format = format.set_italic();
    }
    if let Some(color) = style.font.color {
        format = format.set_font_color(color);
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(fill);
    }
    if style.border {
        format = format.set_border(FormatBorder::Thin);
    }
    if style.wrap {
        format = format.set_text_wrap();
    }

    format = match style.align {
        HorizontalAlign::General => format,
        HorizontalAlign::Left => format.set_align(FormatAlign::Left),
        HorizontalAlign::Center => format.set_align(FormatAlign::Center),
    };
    match style.valign {
        VerticalAlign::Bottom => format,
        VerticalAlign::Center => format.set_align(FormatAlign::VerticalCenter),
        VerticalAlign::Top => format.set_align(FormatAlign::Top),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_order_matches_indexing() {
        for (index, role) in StyleRole::ALL.into_iter().enumerate() {
            assert_eq!(role as usize, index);
        }
    }

    #[test]
    fn formats_follow_the_registry() {
        let formats = ExcelFormats::new();
        for role in StyleRole::ALL {
            assert_eq!(formats.get(role), &to_format(&style_for(role)));
        }
        assert_ne!(
            formats.get(StyleRole::Required),
            formats.get(StyleRole::Optional)
        );
    }
}
