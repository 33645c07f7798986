//! Incident-category colors.

use eframe::egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fixed colors for the categories the briefing calls out by name.
/// Drug incidents are deliberately red.
static CATEGORY_COLORS: Lazy<HashMap<&'static str, Color32>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "Drug Users/Dealers",
                Color32::from_rgb(0xDC, 0x39, 0x12),
            ),
            ("Youths", Color32::from_rgb(0xFF, 0x99, 0x00)),
            ("Noise", Color32::from_rgb(0x33, 0x66, 0xCC)),
            ("Rough Sleeper", Color32::from_rgb(0x10, 0x96, 0x18)),
            ("Smoking", Color32::from_rgb(0x99, 0x00, 0x99)),
            ("Loitering", Color32::from_rgb(0x00, 0x99, 0xC6)),
            (
                "Public Indecency",
                Color32::from_rgb(0xDD, 0x44, 0x77),
            ),
            ("Intruder", Color32::from_rgb(0xAA, 0xAA, 0x11)),
            ("Drinking/Drunk", Color32::from_rgb(0x66, 0xAA, 0x00)),
        ])
    });

/// Color for an incident category. Categories outside the fixed table
/// cycle through a categorical scheme keyed by their axis position, so
/// unknown categories still render distinctly and deterministically.
pub fn category_color(category: &str, index: usize) -> Color32 {
    if let Some(&color) = CATEGORY_COLORS.get(category) {
        return color;
    }
    let c = colorous::CATEGORY10[index % colorous::CATEGORY10.len()];
    Color32::from_rgb(c.r, c.g, c.b)
}
