//! Smoothed scroll tracker.
//!
//! The raw `scrollY` jumps in wheel-sized steps; the tracker eases a rendered
//! value toward it so plane motion stays fluid. One `update()` per frame, then
//! read `value()` — the frame loop never reads the raw target directly.

const EASE: f32 = 0.1;

/// Threshold below which the eased value snaps to the target, so the tracker
/// settles instead of approaching asymptotically forever.
const SNAP: f32 = 0.05;

#[derive(Debug, Default)]
pub struct ScrollTracker {
    target: f32,
    rendered: f32,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest raw scroll offset (typically `window.scrollY`).
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to an offset with no easing. Used once at scene build so
    /// the first frame overlays correctly even when the page loads scrolled.
    pub fn reset_to(&mut self, offset: f32) {
        self.target = offset;
        self.rendered = offset;
    }

    /// Advance the eased value one frame toward the target.
    pub fn update(&mut self) {
        self.rendered += (self.target - self.rendered) * EASE;
        if (self.target - self.rendered).abs() < SNAP {
            self.rendered = self.target;
        }
    }

    /// The smoothed offset to render with this frame.
    pub fn value(&self) -> f32 {
        self.rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let t = ScrollTracker::new();
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn converges_to_target() {
        let mut t = ScrollTracker::new();
        t.set_target(400.0);
        for _ in 0..200 {
            t.update();
        }
        assert_eq!(t.value(), 400.0);
    }

    #[test]
    fn moves_monotonically_toward_target() {
        let mut t = ScrollTracker::new();
        t.set_target(100.0);
        let mut prev = t.value();
        for _ in 0..50 {
            t.update();
            assert!(t.value() >= prev);
            prev = t.value();
        }
    }

    #[test]
    fn reset_snaps_immediately() {
        let mut t = ScrollTracker::new();
        t.reset_to(750.0);
        assert_eq!(t.value(), 750.0);
        t.update();
        assert_eq!(t.value(), 750.0);
    }

    #[test]
    fn update_without_target_change_is_stable_once_settled() {
        let mut t = ScrollTracker::new();
        t.set_target(10.0);
        for _ in 0..100 {
            t.update();
        }
        let settled = t.value();
        t.update();
        assert_eq!(t.value(), settled);
    }
}
