use eframe::egui::Color32;

use crate::fit::FitBounds;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub card_fill: Color32,
    pub card_stroke: Color32,
    pub title_size: f32,
    pub card_text_max: f32,
    pub card_text_min: f32,
    pub card_radius: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xE6, 0xE6, 0xE6),
            muted: Color32::from_rgb(0x8A, 0x8A, 0x8A),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            card_fill: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            card_stroke: Color32::from_rgb(0x44, 0x44, 0x44),
            title_size: 22.0,
            card_text_max: 14.0,
            card_text_min: 10.0,
            card_radius: 10.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF0, 0xF0, 0xF0),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            muted: Color32::from_rgb(0x6B, 0x6B, 0x7A),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            card_fill: Color32::WHITE,
            card_stroke: Color32::from_rgb(0xC8, 0xC8, 0xD0),
            title_size: 22.0,
            card_text_max: 14.0,
            card_text_min: 10.0,
            card_radius: 10.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn fit_bounds(&self) -> FitBounds {
        FitBounds {
            max_size: self.card_text_max,
            min_size: self.card_text_min,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
