//! Style registry
//!
//! Maps every [`StyleRole`] to a fixed [`Style`]. The table is a compile-time
//! constant; nothing mutates it while the process runs.

use serde::{Deserialize, Serialize};

/// Header fill (dark blue)
pub const HEADER_FILL: u32 = 0x0036_6092;
/// Documentation fill (pale yellow)
pub const DOCUMENTATION_FILL: u32 = 0x00FF_F2CC;
/// Example fill (light gray)
pub const EXAMPLE_FILL: u32 = 0x00E7_E6E6;
/// Required status fill (amber)
pub const REQUIRED_FILL: u32 = 0x00FF_E699;
/// Optional status fill (white)
pub const OPTIONAL_FILL: u32 = 0x00FF_FFFF;
/// White text on header cells
pub const WHITE: u32 = 0x00FF_FFFF;

/// Visual role of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    Header,
    Documentation,
    Example,
    Required,
    Optional,
    PlainText,
    /// Instructions sheet title
    Title,
    /// Creation date line
    Caption,
    /// "OVERVIEW" label
    Heading,
    /// Section title on the instructions sheet
    Section,
    /// Wrapped paragraph or bullet text
    Note,
}

impl StyleRole {
    pub const ALL: [StyleRole; 11] = [
        StyleRole::Header,
        StyleRole::Documentation,
        StyleRole::Example,
        StyleRole::Required,
        StyleRole::Optional,
        StyleRole::PlainText,
        StyleRole::Title,
        StyleRole::Caption,
        StyleRole::Heading,
        StyleRole::Section,
        StyleRole::Note,
    ];

    /// Role of a status-column cell, decided by its own text
    pub fn for_status(text: &str) -> Self {
        if text.contains(crate::REQUIRED_MARKER) {
            Self::Required
        } else {
            Self::Optional
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    #[default]
    Bottom,
    Center,
    Top,
}

/// Font attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    /// Point size
    pub size: u8,
    /// RGB color; `None` keeps the application default
    pub color: Option<u32>,
}

impl Font {
    const fn plain(size: u8) -> Self {
        Self {
            bold: false,
            italic: false,
            size,
            color: None,
        }
    }

    const fn bold(size: u8) -> Self {
        Self {
            bold: true,
            ..Self::plain(size)
        }
    }

    const fn italic(size: u8) -> Self {
        Self {
            italic: true,
            ..Self::plain(size)
        }
    }

    const fn color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }
}

/// Complete visual description of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Option<u32>,
    pub font: Font,
    /// Thin border on all four edges
    pub border: bool,
    pub wrap: bool,
    pub align: HorizontalAlign,
    pub valign: VerticalAlign,
}

impl Style {
    const fn new(font: Font) -> Self {
        Self {
            fill: None,
            font,
            border: false,
            wrap: false,
            align: HorizontalAlign::General,
            valign: VerticalAlign::Bottom,
        }
    }

    const fn fill(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    const fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    const fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    const fn align(mut self, align: HorizontalAlign, valign: VerticalAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }
}

/// Style for a role. Total over [`StyleRole`].
pub const fn style_for(role: StyleRole) -> Style {
    match role {
        StyleRole::Header => Style::new(Font::bold(11).color(WHITE))
            .fill(HEADER_FILL)
            .bordered()
            .wrapped()
            .align(HorizontalAlign::Center, VerticalAlign::Center),
        StyleRole::Documentation => Style::new(Font::italic(9))
            .fill(DOCUMENTATION_FILL)
            .bordered()
            .wrapped()
            .align(HorizontalAlign::Left, VerticalAlign::Top),
        StyleRole::Example => Style::new(Font::plain(11)).fill(EXAMPLE_FILL).bordered(),
        StyleRole::Required => Style::new(Font::bold(9))
            .fill(REQUIRED_FILL)
            .bordered()
            .align(HorizontalAlign::Center, VerticalAlign::Center),
        StyleRole::Optional => Style::new(Font::bold(9))
            .fill(OPTIONAL_FILL)
            .bordered()
            .align(HorizontalAlign::Center, VerticalAlign::Center),
        StyleRole::PlainText => Style::new(Font::plain(11))
            .bordered()
            .wrapped()
            .align(HorizontalAlign::General, VerticalAlign::Top),
        StyleRole::Title => Style::new(Font::bold(16).color(HEADER_FILL)),
        StyleRole::Caption => Style::new(Font::italic(10)),
        StyleRole::Heading => Style::new(Font::bold(14)),
        StyleRole::Section => Style::new(Font::bold(12).color(HEADER_FILL)),
        StyleRole::Note => Style::new(Font::plain(11))
            .wrapped()
            .align(HorizontalAlign::Left, VerticalAlign::Top),
    }
}
