//! Page shell state: which section is active, its overlay fades, and the
//! scrubbed page progress.
//!
//! The shell owns the [`ActiveSection`] signal. Visuals never get called into
//! directly; they compare the signal's generation with the last one they saw
//! and request their own state transition.

use crate::constants::SCROLL_SNAP_EPSILON;
use crate::fader::ContentFader;
use crate::scroll::{BridgeEvent, ScrollBridge, ScrollMetrics, ScrubbedProgress};
use crate::states::section_name;
use smallvec::SmallVec;

/// The current section plus a counter bumped on every change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveSection {
    pub index: Option<usize>,
    pub generation: u64,
    /// Set for the section active at mount, which skips its entry tween.
    pub immediate: bool,
}

impl ActiveSection {
    pub fn name(&self) -> Option<&'static str> {
        self.index.and_then(section_name)
    }

    fn set(&mut self, index: usize, immediate: bool) {
        self.index = Some(index);
        self.generation += 1;
        self.immediate = immediate;
    }
}

pub struct Page {
    bridge: ScrollBridge,
    active: ActiveSection,
    fader: ContentFader,
    scrub: ScrubbedProgress,
    element_counts: Vec<usize>,
}

impl Page {
    /// `element_counts[i]` is the number of fading overlay elements in section `i`.
    pub fn new(element_counts: Vec<usize>, scrub_tau_sec: f32) -> Self {
        Self {
            bridge: ScrollBridge::new(element_counts.len()),
            active: ActiveSection::default(),
            fader: ContentFader::new(),
            scrub: ScrubbedProgress::new(scrub_tau_sec, SCROLL_SNAP_EPSILON),
            element_counts,
        }
    }

    /// Feed a scroll observation. Region crossings update the active section
    /// and schedule overlay fades; the progress target follows the raw value.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics, now_sec: f64) -> SmallVec<[BridgeEvent; 2]> {
        let mounting = self.active.index.is_none();
        if mounting {
            self.scrub.reset_to(metrics.raw_progress());
        } else {
            self.scrub.set_target(metrics.raw_progress());
        }

        let events = self.bridge.update(metrics);
        for ev in &events {
            match *ev {
                BridgeEvent::Leave { index, .. } => {
                    self.fader.fade_out(index, now_sec);
                }
                BridgeEvent::Enter { index, direction } => {
                    let elements = self.element_counts.get(index).copied().unwrap_or(0);
                    if mounting {
                        self.fader.show_immediately(index, elements);
                    } else {
                        self.fader.fade_in(index, elements, now_sec);
                    }
                    self.active.set(index, mounting);
                    log::debug!(
                        "[scroll] enter section {:?} ({index}) {direction:?}",
                        self.active.name()
                    );
                }
            }
        }
        events
    }

    /// Step the scrubbed progress and the overlay fades.
    pub fn tick(&mut self, dt_sec: f32, now_sec: f64, fade_changed: impl FnMut((usize, usize), f32)) -> f32 {
        self.fader.tick(now_sec, fade_changed);
        self.scrub.step(dt_sec)
    }

    pub fn active(&self) -> ActiveSection {
        self.active
    }

    pub fn progress(&self) -> f32 {
        self.scrub.value()
    }

    pub fn fader(&self) -> &ContentFader {
        &self.fader
    }

    /// Stop every overlay fade in flight.
    pub fn release(&mut self) {
        self.fader.clear();
    }
}
