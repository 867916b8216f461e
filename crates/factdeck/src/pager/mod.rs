pub mod gesture;
pub mod layout;
pub mod transition;
pub mod view;

use std::time::{Duration, Instant};

use eframe::egui::Rect;
use tracing::debug;

use crate::fit::{self, FitBounds, FittedText, TextMeasurer};
use gesture::{Swipe, SwipeTracker};
use layout::CardLayout;
use transition::{SlideDirection, SlideTransition};

pub const DEFAULT_AUTO_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerMode {
    Manual,
    Auto,
}

impl PagerMode {
    pub fn other(self) -> Self {
        match self {
            Self::Manual => Self::Auto,
            Self::Auto => Self::Manual,
        }
    }

    /// Button label for switching *to* this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual mode",
            Self::Auto => "Auto mode",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "auto" => Self::Auto,
            _ => Self::Manual,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PagerOptions {
    pub other_mode_label: String,
    pub auto_advance: bool,
    pub auto_interval: Duration,
    pub fit_bounds: FitBounds,
}

impl PagerOptions {
    pub fn for_mode(mode: PagerMode, auto_interval: Duration, fit_bounds: FitBounds) -> Self {
        Self {
            other_mode_label: mode.other().label().to_string(),
            auto_advance: mode == PagerMode::Auto,
            auto_interval,
            fit_bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerKey {
    Left,
    Right,
}

/// A card text to paint, shifted horizontally from the card centre.
#[derive(Debug)]
pub struct CardText<'a> {
    pub fitted: &'a FittedText,
    pub offset_x: f32,
}

/// Pages through one category's entries with a sliding card.
///
/// Idle when `transition` is `None`; otherwise a slide towards
/// `transition.to` is in flight and every navigation request is dropped
/// until it finishes. All timing is driven by [`CardPager::tick`].
pub struct CardPager {
    category: String,
    entries: Vec<String>,
    index: usize,
    options: PagerOptions,
    transition: Option<SlideTransition>,
    layout: Option<CardLayout>,
    current_fit: Option<FittedText>,
    incoming_fit: Option<FittedText>,
    auto_deadline: Option<Instant>,
    swipe: SwipeTracker,
    keys_bound: bool,
    torn_down: bool,
}

impl CardPager {
    pub fn new(
        category: impl Into<String>,
        entries: Vec<String>,
        options: PagerOptions,
        now: Instant,
    ) -> Self {
        let mut pager = Self {
            category: category.into(),
            entries,
            index: 0,
            options,
            transition: None,
            layout: None,
            current_fit: None,
            incoming_fit: None,
            auto_deadline: None,
            swipe: SwipeTracker::default(),
            keys_bound: true,
            torn_down: false,
        };
        pager.schedule_auto(now);
        debug!(
            category = %pager.category,
            entries = pager.entries.len(),
            mode = ?pager.mode(),
            "pager opened"
        );
        pager
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn mode(&self) -> PagerMode {
        if self.options.auto_advance {
            PagerMode::Auto
        } else {
            PagerMode::Manual
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn current_entry(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn layout(&self) -> Option<CardLayout> {
        self.layout
    }

    /// "3 / 12" style position label.
    pub fn position_label(&self) -> String {
        if self.entries.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.index + 1, self.entries.len())
        }
    }

    pub fn next(&mut self, now: Instant) -> bool {
        self.start_slide(SlideDirection::Forward, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        self.start_slide(SlideDirection::Backward, now)
    }

    fn start_slide(&mut self, direction: SlideDirection, now: Instant) -> bool {
        if self.torn_down || self.transition.is_some() {
            return false;
        }
        let len = self.entries.len();
        // Nothing to slide to: a single entry wraps onto itself.
        if len < 2 {
            return false;
        }
        let to = match direction {
            SlideDirection::Forward => (self.index + 1) % len,
            SlideDirection::Backward => (self.index + len - 1) % len,
        };
        debug!(from = self.index, to, ?direction, "slide started");
        self.transition = Some(SlideTransition::new(self.index, to, direction, now));
        self.incoming_fit = None;
        true
    }

    /// Run every timer whose deadline has passed. Returns true when the
    /// visible state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;

        let finished = match self.transition.as_mut() {
            Some(t) => {
                changed |= t.advance(now);
                t.is_complete()
            }
            None => false,
        };
        if finished {
            self.finish_slide(now);
        }

        if self.auto_deadline.is_some_and(|deadline| now >= deadline) {
            self.auto_deadline = None;
            changed = true;
            // A slide in flight reschedules on completion.
            if !self.next(now) && self.transition.is_none() {
                self.schedule_auto(now);
            }
        }

        changed
    }

    fn finish_slide(&mut self, now: Instant) {
        let Some(t) = self.transition.take() else {
            return;
        };
        self.index = t.to;
        self.incoming_fit = None;
        // Refit from the committed entry rather than carrying the slid text over.
        self.current_fit = None;
        debug!(index = self.index, "slide finished");
        self.schedule_auto(now);
    }

    fn schedule_auto(&mut self, now: Instant) {
        if self.options.auto_advance && !self.torn_down {
            self.auto_deadline = Some(now + self.options.auto_interval);
        }
    }

    /// Recompute the card for a new container size. A resize mid-slide
    /// abandons the slide and keeps the pre-slide index.
    pub fn resize(&mut self, container: Rect, now: Instant) -> bool {
        if self.torn_down || self.layout.is_some_and(|l| l.container == container) {
            return false;
        }
        if let Some(t) = self.transition.take() {
            debug!(from = t.from, to = t.to, "resize abandoned slide");
            self.incoming_fit = None;
            self.schedule_auto(now);
        }
        self.layout = Some(CardLayout::for_container(container));
        self.current_fit = None;
        true
    }

    /// Fit whichever card texts are not yet sized for the current layout.
    pub fn prepare(&mut self, measurer: &impl TextMeasurer) {
        let Some(layout) = self.layout else {
            return;
        };
        let max_height = layout.text_height();
        let bounds = self.options.fit_bounds;

        if self.current_fit.is_none() {
            if let Some(text) = self.entries.get(self.index) {
                self.current_fit = Some(fit::fit(text, measurer, max_height, bounds));
            }
        }
        if self.incoming_fit.is_none() {
            if let Some(text) = self.transition.as_ref().and_then(|t| self.entries.get(t.to)) {
                self.incoming_fit = Some(fit::fit(text, measurer, max_height, bounds));
            }
        }
    }

    /// Texts to paint this frame: the current card, plus the incoming one
    /// while a slide is in flight.
    pub fn visible_texts(&self) -> Vec<CardText<'_>> {
        let card_width = self.layout.map(|l| l.card.width()).unwrap_or(0.0);
        let (outgoing, incoming) = self
            .transition
            .as_ref()
            .map(|t| t.offsets(card_width))
            .unwrap_or((0.0, 0.0));

        let mut texts = Vec::with_capacity(2);
        if let Some(fitted) = &self.current_fit {
            texts.push(CardText {
                fitted,
                offset_x: outgoing,
            });
        }
        if self.transition.is_some() {
            if let Some(fitted) = &self.incoming_fit {
                texts.push(CardText {
                    fitted,
                    offset_x: incoming,
                });
            }
        }
        texts
    }

    pub fn press(&mut self, x: f32) {
        if !self.torn_down {
            self.swipe.press(x);
        }
    }

    pub fn release(&mut self, x: f32, now: Instant) -> bool {
        match self.swipe.release(x) {
            Some(Swipe::Forward) => self.next(now),
            Some(Swipe::Backward) => self.prev(now),
            None => false,
        }
    }

    /// Arrow keys; ignored once the page has released its bindings.
    pub fn handle_key(&mut self, key: PagerKey, now: Instant) -> bool {
        if !self.keys_bound {
            return false;
        }
        match key {
            PagerKey::Left => self.prev(now),
            PagerKey::Right => self.next(now),
        }
    }

    /// Earliest pending deadline, so the host can wake up in time.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let step = self.transition.as_ref().map(|t| t.next_step_at());
        match (step, self.auto_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel both timers and release the keyboard. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.transition = None;
        self.incoming_fit = None;
        self.auto_deadline = None;
        self.keys_bound = false;
        self.swipe.cancel();
        if !self.torn_down {
            self.torn_down = true;
            debug!(category = %self.category, "pager torn down");
        }
    }
}

// State inspection for tests.
#[cfg(test)]
impl CardPager {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.transition.as_ref().map(|t| t.to)
    }

    pub fn auto_deadline(&self) -> Option<Instant> {
        self.auto_deadline
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn keys_bound(&self) -> bool {
        self.keys_bound
    }
}

impl Drop for CardPager {
    fn drop(&mut self) {
        self.teardown();
    }
}
