/// Minimum horizontal travel, in points, for a press/release to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Forward,
    Backward,
}

/// Remembers where a press started until the matching release.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn press(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn release(&mut self, x: f32) -> Option<Swipe> {
        let delta = x - self.start_x.take()?;
        if delta < -SWIPE_THRESHOLD {
            Some(Swipe::Forward)
        } else if delta > SWIPE_THRESHOLD {
            Some(Swipe::Backward)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_is_forward() {
        let mut t = SwipeTracker::default();
        t.press(300.0);
        assert_eq!(t.release(200.0), Some(Swipe::Forward));
    }

    #[test]
    fn test_swipe_right_is_backward() {
        let mut t = SwipeTracker::default();
        t.press(100.0);
        assert_eq!(t.release(151.0), Some(Swipe::Backward));
    }

    #[test]
    fn test_small_drag_is_not_a_swipe() {
        let mut t = SwipeTracker::default();
        t.press(100.0);
        assert_eq!(t.release(150.0), None);
        t.press(100.0);
        assert_eq!(t.release(50.0), None);
    }

    #[test]
    fn test_release_without_press() {
        let mut t = SwipeTracker::default();
        assert_eq!(t.release(0.0), None);
        t.press(0.0);
        t.cancel();
        assert_eq!(t.release(500.0), None);
    }
}
