//! Scroll position → section regions and page progress.
//!
//! Sections are stacked regions exactly one viewport tall with no gaps, so the
//! viewport's vertical center always lies in exactly one of them.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_h: f64,
    pub doc_h: f64,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f64 {
        (self.doc_h - self.viewport_h).max(0.0)
    }

    /// Linear page progress: 0 at the top of the document, 1 at the bottom.
    pub fn raw_progress(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / max).clamp(0.0, 1.0) as f32
    }

    /// Region containing the viewport's vertical center, clamped to `sections`.
    pub fn region_at_center(&self, sections: usize) -> Option<usize> {
        if sections == 0 || self.viewport_h <= 0.0 {
            return None;
        }
        let center = self.scroll_y.max(0.0) + self.viewport_h * 0.5;
        let index = (center / self.viewport_h).floor() as usize;
        Some(index.min(sections - 1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Region `index` became active. `Backward` is an "enter back" from below.
    Enter { index: usize, direction: ScrollDirection },
    Leave { index: usize, direction: ScrollDirection },
}

/// Tracks which region is active and reports crossings.
#[derive(Clone, Debug)]
pub struct ScrollBridge {
    sections: usize,
    active: Option<usize>,
}

impl ScrollBridge {
    pub fn new(sections: usize) -> Self {
        Self {
            sections,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Re-evaluate the active region. Emits nothing while the region is
    /// unchanged; otherwise `Leave(previous)` (if any) followed by
    /// `Enter(next)`. A jump across several regions reports only the region
    /// left and the region landed on.
    pub fn update(&mut self, metrics: &ScrollMetrics) -> SmallVec<[BridgeEvent; 2]> {
        let mut events = SmallVec::new();
        let Some(next) = metrics.region_at_center(self.sections) else {
            return events;
        };
        if self.active == Some(next) {
            return events;
        }
        let direction = match self.active {
            Some(prev) if next < prev => ScrollDirection::Backward,
            _ => ScrollDirection::Forward,
        };
        if let Some(prev) = self.active {
            events.push(BridgeEvent::Leave {
                index: prev,
                direction,
            });
        }
        events.push(BridgeEvent::Enter {
            index: next,
            direction,
        });
        self.active = Some(next);
        events
    }
}

/// Low-pass follower of the raw page progress.
///
/// Approaches its target by `1 - exp(-dt / tau)` per step and snaps once
/// within `snap`, so it stays monotonic while the target moves one way and
/// lands on exactly 0 or 1 at the ends of the page.
#[derive(Clone, Copy, Debug)]
pub struct ScrubbedProgress {
    value: f32,
    target: f32,
    tau_sec: f32,
    snap: f32,
}

impl ScrubbedProgress {
    pub fn new(tau_sec: f32, snap: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            tau_sec,
            snap,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// Jump straight to `value` (used on mount, before any scrubbing).
    pub fn reset_to(&mut self, value: f32) {
        self.target = value.clamp(0.0, 1.0);
        self.value = self.target;
    }

    pub fn step(&mut self, dt_sec: f32) -> f32 {
        let diff = self.target - self.value;
        if diff.abs() <= self.snap || self.tau_sec <= 0.0 {
            self.value = self.target;
            return self.value;
        }
        let alpha = 1.0 - (-dt_sec.max(0.0) / self.tau_sec).exp();
        self.value += diff * alpha;
        if (self.target - self.value).abs() <= self.snap {
            self.value = self.target;
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
