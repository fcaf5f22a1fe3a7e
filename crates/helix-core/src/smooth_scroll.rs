//! Wheel-driven smooth scrolling.
//!
//! Wheel deltas move a target position; every frame the current position eases
//! toward it and the page is scrolled to the result. Scrolls the wrapper did not
//! cause (keyboard, scrollbar drag) resynchronize both positions.

#[derive(Clone, Copy, Debug)]
pub struct SmoothScroller {
    current: f64,
    target: f64,
    max: f64,
    lerp: f64,
    snap_px: f64,
    wheel_multiplier: f64,
}

impl SmoothScroller {
    pub fn new(lerp: f32, snap_px: f64, wheel_multiplier: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            max: 0.0,
            lerp: lerp.clamp(0.0, 1.0) as f64,
            snap_px,
            wheel_multiplier,
        }
    }

    /// Update the scrollable range; both positions are clamped into it.
    pub fn set_limit(&mut self, max_scroll: f64) {
        self.max = max_scroll.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.current = self.current.clamp(0.0, self.max);
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.target = (self.target + delta_y * self.wheel_multiplier).clamp(0.0, self.max);
    }

    /// A native scroll landed at `scroll_y`. Positions the wrapper itself
    /// wrote are ignored; anything else becomes the new resting point.
    pub fn on_native_scroll(&mut self, scroll_y: f64) {
        if (scroll_y - self.current).abs() <= self.snap_px.max(1.0) {
            return;
        }
        self.current = scroll_y.clamp(0.0, self.max);
        self.target = self.current;
    }

    /// Advance one frame. Returns the position to scroll to while moving.
    pub fn step(&mut self) -> Option<f64> {
        let diff = self.target - self.current;
        if diff == 0.0 {
            return None;
        }
        if diff.abs() <= self.snap_px {
            self.current = self.target;
        } else {
            self.current += diff * self.lerp;
        }
        Some(self.current)
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}
