use eframe::egui::{self, Color32, FontId};

pub const ELLIPSIS: &str = "\u{2026}";

/// Anything that can report the rendered height of wrapped text.
/// The wrap width is a property of the measurer, not of the call.
pub trait TextMeasurer {
    fn height(&self, text: &str, font_size: f32) -> f32;
}

/// Measures with egui's own text layout, wrapping at `wrap_width`.
pub struct PainterMeasurer<'a> {
    painter: &'a egui::Painter,
    wrap_width: f32,
}

impl<'a> PainterMeasurer<'a> {
    pub fn new(painter: &'a egui::Painter, wrap_width: f32) -> Self {
        Self {
            painter,
            wrap_width,
        }
    }
}

impl TextMeasurer for PainterMeasurer<'_> {
    fn height(&self, text: &str, font_size: f32) -> f32 {
        let galley = self.painter.layout(
            text.to_string(),
            FontId::proportional(font_size),
            Color32::WHITE,
            self.wrap_width,
        );
        galley.rect.height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub max_size: f32,
    pub min_size: f32,
}

impl Default for FitBounds {
    fn default() -> Self {
        Self {
            max_size: 14.0,
            min_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub font_size: f32,
    pub truncated: bool,
}

/// Find the largest font size in `bounds` at which `text` fits in
/// `max_height`, stepping down one point at a time. If even the smallest
/// size overflows, keep the longest prefix that fits with an ellipsis.
pub fn fit(
    text: &str,
    measurer: &impl TextMeasurer,
    max_height: f32,
    bounds: FitBounds,
) -> FittedText {
    let mut size = bounds.max_size;
    while size > bounds.min_size && measurer.height(text, size) > max_height {
        size = (size - 1.0).max(bounds.min_size);
    }

    if measurer.height(text, size) <= max_height {
        return FittedText {
            text: text.to_string(),
            font_size: size,
            truncated: false,
        };
    }

    FittedText {
        text: truncate_to_fit(text, measurer, max_height, size),
        font_size: size,
        truncated: true,
    }
}

/// Binary search over prefix length (in chars) for the longest
/// `prefix.trim_end() + "…"` that fits. Falls back to the bare ellipsis.
fn truncate_to_fit(
    text: &str,
    measurer: &impl TextMeasurer,
    max_height: f32,
    font_size: f32,
) -> String {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let with_ellipsis = |k: usize| format!("{}{ELLIPSIS}", text[..boundaries[k]].trim_end());

    let mut best: Option<String> = None;
    let mut lo = 0usize;
    let mut hi = boundaries.len() - 1;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let candidate = with_ellipsis(mid);
        if measurer.height(&candidate, font_size) <= max_height {
            best = Some(candidate);
            lo = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            hi = mid - 1;
        }
    }

    best.unwrap_or_else(|| ELLIPSIS.to_string())
}


#[cfg(test)]
mod tests {
    use super::testing::MonoMeasurer;
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn test_short_text_uses_max_size() {
        let m = MonoMeasurer { wrap_width: 200.0 };
        let fitted = fit("Cats sleep a lot", &m, 100.0, FitBounds::default());
        assert_eq!(fitted.font_size, 14.0);
        assert_eq!(fitted.text, "Cats sleep a lot");
        assert!(!fitted.truncated);
    }

    #[test]
    fn test_shrinks_before_truncating() {
        // 60 chars: 3 lines at 14pt (52.5), 2 lines at 13pt (32.5) and at 12pt (30)
        let m = MonoMeasurer { wrap_width: 196.0 };
        let text = "x".repeat(60);
        let fitted = fit(&text, &m, 31.0, FitBounds::default());
        assert!(!fitted.truncated);
        assert_eq!(fitted.font_size, 12.0);
    }

    #[test]
    fn test_truncates_at_floor_size() {
        // one line of 10pt text holds 20 chars and is 12.5 tall
        let m = MonoMeasurer { wrap_width: 100.0 };
        let text = "The quick brown fox jumps over the lazy dog";
        let fitted = fit(text, &m, 13.0, FitBounds::default());
        assert!(fitted.truncated);
        assert_eq!(fitted.font_size, 10.0);
        assert_eq!(fitted.text, "The quick brown fox\u{2026}");
    }

    #[test]
    fn test_nothing_fits_returns_ellipsis() {
        let m = MonoMeasurer { wrap_width: 100.0 };
        let fitted = fit("Anything at all", &m, 1.0, FitBounds::default());
        assert_eq!(fitted.text, ELLIPSIS);
        assert_eq!(fitted.font_size, 10.0);
    }

    #[test]
    fn test_multibyte_text_truncates_on_char_boundary() {
        let m = MonoMeasurer { wrap_width: 50.0 };
        let text = "\u{00e9}\u{00e8}\u{00ea}".repeat(20);
        let fitted = fit(&text, &m, 13.0, FitBounds::default());
        assert!(fitted.text.ends_with(ELLIPSIS));
        assert_eq!(fitted.text.chars().count(), 10);
    }

    struct CountingMeasurer {
        inner: MonoMeasurer,
        calls: Cell<usize>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn height(&self, text: &str, font_size: f32) -> f32 {
            self.calls.set(self.calls.get() + 1);
            self.inner.height(text, font_size)
        }
    }

    #[test]
    fn test_truncation_probes_logarithmically() {
        let m = CountingMeasurer {
            inner: MonoMeasurer { wrap_width: 100.0 },
            calls: Cell::new(0),
        };
        let text = "word ".repeat(400);
        fit(&text, &m, 13.0, FitBounds::default());
        // 5 size probes + at most ~log2(2000) prefix probes
        assert!(m.calls.get() < 20, "too many probes: {}", m.calls.get());
    }

    proptest! {
        #[test]
        fn prop_fit_is_deterministic(text in "[a-z ]{0,200}", max_height in 1.0f32..80.0) {
            let m = MonoMeasurer { wrap_width: 120.0 };
            let a = fit(&text, &m, max_height, FitBounds::default());
            let b = fit(&text, &m, max_height, FitBounds::default());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_truncated_text_is_prefix_plus_ellipsis(text in "[a-z ]{1,300}", max_height in 1.0f32..40.0) {
            let m = MonoMeasurer { wrap_width: 80.0 };
            let fitted = fit(&text, &m, max_height, FitBounds::default());
            if fitted.truncated {
                prop_assert_eq!(fitted.font_size, 10.0);
                prop_assert!(fitted.text.ends_with(ELLIPSIS));
                let body = fitted.text.trim_end_matches(ELLIPSIS);
                prop_assert!(text.starts_with(body));
                prop_assert_eq!(body, body.trim_end());
            } else {
                prop_assert_eq!(&fitted.text, &text);
                prop_assert!(m.height(&text, fitted.font_size) <= max_height);
            }
        }
    }
}
