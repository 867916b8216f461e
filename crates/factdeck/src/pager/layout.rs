use eframe::egui::{Pos2, Rect, vec2};

const WIDTH_FRACTION: f32 = 0.9;
const HEIGHT_FRACTION: f32 = 0.7;
pub const MIN_CARD_WIDTH: f32 = 220.0;
pub const MIN_CARD_HEIGHT: f32 = 140.0;
/// Space always left between the card and the container edges (both sides together).
pub const CARD_PADDING: f32 = 20.0;
/// Inset of the text area inside the card.
pub const TEXT_MARGIN: f32 = 16.0;

/// Card geometry derived from the container it sits in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub container: Rect,
    pub card: Rect,
}

impl CardLayout {
    pub fn for_container(container: Rect) -> Self {
        let width = card_dimension(container.width(), WIDTH_FRACTION, MIN_CARD_WIDTH);
        let height = card_dimension(container.height(), HEIGHT_FRACTION, MIN_CARD_HEIGHT);
        let card = Rect::from_center_size(container.center(), vec2(width, height));
        Self { container, card }
    }

    pub fn text_center(&self) -> Pos2 {
        self.card.center()
    }

    pub fn wrap_width(&self) -> f32 {
        (self.card.width() - TEXT_MARGIN * 2.0).max(1.0)
    }

    pub fn text_height(&self) -> f32 {
        (self.card.height() - TEXT_MARGIN * 2.0).max(1.0)
    }
}

// The ceiling wins over the floor so the card never spills out of a tiny window.
fn card_dimension(container: f32, fraction: f32, floor: f32) -> f32 {
    let ceiling = (container - CARD_PADDING).max(0.0);
    (container * fraction).max(floor).min(ceiling)
}
