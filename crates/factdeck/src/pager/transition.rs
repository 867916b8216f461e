use std::time::{Duration, Instant};

pub const SLIDE_STEPS: u32 = 20;
pub const STEP_INTERVAL: Duration = Duration::from_millis(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Forward,
    Backward,
}

impl SlideDirection {
    /// Horizontal sign of travel. Going forward pushes cards to the left.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}

/// An in-flight slide between two entries, advanced one discrete step per
/// elapsed interval.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    pub from: usize,
    pub to: usize,
    pub direction: SlideDirection,
    step: u32,
    next_step_at: Instant,
}

impl SlideTransition {
    pub fn new(from: usize, to: usize, direction: SlideDirection, now: Instant) -> Self {
        Self {
            from,
            to,
            direction,
            step: 0,
            next_step_at: now + STEP_INTERVAL,
        }
    }

    #[cfg(test)]
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn next_step_at(&self) -> Instant {
        self.next_step_at
    }

    pub fn is_complete(&self) -> bool {
        self.step >= SLIDE_STEPS
    }

    /// Take at most one step if its deadline has passed. The next step is
    /// scheduled relative to `now`, like a re-armed one-shot timer.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.is_complete() || now < self.next_step_at {
            return false;
        }
        self.step += 1;
        self.next_step_at = now + STEP_INTERVAL;
        true
    }

    /// Offsets from the card centre for the outgoing and incoming text.
    pub fn offsets(&self, card_width: f32) -> (f32, f32) {
        let sign = self.direction.sign();
        let per_step = card_width / SLIDE_STEPS as f32;
        let outgoing = sign * per_step * self.step as f32;
        let incoming = outgoing - sign * card_width;
        (outgoing, incoming)
    }
}
