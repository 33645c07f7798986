//! Presentation configuration. The source material existed in two
//! near-identical page variants; they differ only in chart ordering
//! direction and color styling, so both are expressed here as data and
//! the rendering pipeline exists once.

use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Smallest value first; the largest lands at the top end of a
    /// horizontal chart.
    #[default]
    Ascending,
    Descending,
}

/// Colors that differ between the two presentation variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub legal: Color32,
    pub illegal: Color32,
    pub growth: Color32,
    pub active_node: Color32,
    pub inactive_node: Color32,
    pub active_border: Color32,
    pub inactive_border: Color32,
    pub center_fill: Color32,
    pub arrow: Color32,
}

impl Palette {
    pub const fn screen() -> Self {
        Self {
            legal: Color32::from_rgb(0x1f, 0x77, 0xb4),
            illegal: Color32::from_rgb(0xDC, 0x39, 0x12),
            growth: Color32::from_rgb(0x1f, 0x77, 0xb4),
            active_node: Color32::from_rgb(0x00, 0x66, 0x99),
            inactive_node: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            active_border: Color32::BLACK,
            inactive_border: Color32::GRAY,
            center_fill: Color32::from_rgb(0xFF, 0xFF, 0x00),
            arrow: Color32::from_rgb(0x88, 0x88, 0x88),
        }
    }

    /// Higher-contrast variant used when the page is projected.
    pub const fn projector() -> Self {
        Self {
            legal: Color32::from_rgb(0x0b, 0x53, 0x94),
            illegal: Color32::from_rgb(0xb3, 0x1b, 0x1b),
            growth: Color32::from_rgb(0x0b, 0x53, 0x94),
            active_node: Color32::from_rgb(0x00, 0x45, 0x70),
            inactive_node: Color32::from_rgb(0xc8, 0xc8, 0xc8),
            active_border: Color32::BLACK,
            inactive_border: Color32::DARK_GRAY,
            center_fill: Color32::from_rgb(0xFF, 0xD7, 0x00),
            arrow: Color32::from_rgb(0x55, 0x55, 0x55),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationConfig {
    pub order: OrderDirection,
    pub palette: Palette,
}

impl PresentationConfig {
    pub const fn standard() -> Self {
        Self {
            order: OrderDirection::Ascending,
            palette: Palette::screen(),
        }
    }

    pub const fn projector() -> Self {
        Self {
            order: OrderDirection::Descending,
            palette: Palette::projector(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::standard()
    }
}
