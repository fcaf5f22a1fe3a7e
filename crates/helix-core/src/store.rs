//! Named-state store that tweens a visual's live parameters between sections.

use crate::easing::Ease;
use crate::params::{Param, ParamValues};
use crate::states::{StateDescriptor, SECTION_STATES};
use crate::tween::{Timeline, Tween};

pub struct AnimationStateStore {
    states: &'static [StateDescriptor],
    animated: &'static [Param],
    live: ParamValues,
    timeline: Timeline<Param>,
    tween_sec: f32,
    ease: Ease,
    current: Option<&'static str>,
}

impl AnimationStateStore {
    /// Store over the page's section table, animating only `animated`.
    /// Live values start at the first section's targets.
    pub fn new(animated: &'static [Param], tween_sec: f32) -> Self {
        Self::with_states(&SECTION_STATES, animated, tween_sec)
    }

    pub fn with_states(
        states: &'static [StateDescriptor],
        animated: &'static [Param],
        tween_sec: f32,
    ) -> Self {
        let (live, current) = match states.first() {
            Some(first) => (first.values(), Some(first.name)),
            None => (ParamValues::default(), None),
        };
        Self {
            states,
            animated,
            live,
            timeline: Timeline::new(),
            tween_sec,
            ease: Ease::Power2InOut,
            current,
        }
    }

    /// Start tweens from the current live values toward the named state's targets.
    ///
    /// Returns `false` and changes nothing when no state has that name. A tween
    /// already in flight for a parameter is replaced, so the new tween picks up
    /// from the partially animated value.
    pub fn transition_to_state(&mut self, name: &str, now_sec: f64) -> bool {
        let Some(state) = self.states.iter().find(|s| s.name == name) else {
            log::debug!("[state] ignoring unknown state {name:?}");
            return false;
        };
        for &p in self.animated {
            self.timeline.start(
                p,
                Tween {
                    from: self.live.get(p),
                    to: state.target(p),
                    start_sec: now_sec,
                    delay_sec: 0.0,
                    duration_sec: self.tween_sec,
                    ease: self.ease,
                },
            );
        }
        self.current = Some(state.name);
        true
    }

    /// Jump straight to a state without tweening. Used for the initial section.
    pub fn apply_immediately(&mut self, name: &str) -> bool {
        let Some(state) = self.states.iter().find(|s| s.name == name) else {
            return false;
        };
        for &p in self.animated {
            self.timeline.cancel(p);
            self.live.set(p, state.target(p));
        }
        self.current = Some(state.name);
        true
    }

    /// Schedule a one-off tween on a single parameter, outside of any state.
    pub fn tween_param(&mut self, p: Param, to: f32, duration_sec: f32, ease: Ease, now_sec: f64) {
        self.timeline.start(
            p,
            Tween {
                from: self.live.get(p),
                to,
                start_sec: now_sec,
                delay_sec: 0.0,
                duration_sec,
                ease,
            },
        );
    }

    pub fn set(&mut self, p: Param, v: f32) {
        self.timeline.cancel(p);
        self.live.set(p, v);
    }

    /// Advance every in-flight tween to `now_sec`.
    pub fn tick(&mut self, now_sec: f64) {
        let live = &mut self.live;
        self.timeline.tick(now_sec, |p, v| live.set(p, v));
    }

    pub fn get(&self, p: Param) -> f32 {
        self.live.get(p)
    }

    pub fn live(&self) -> &ParamValues {
        &self.live
    }

    pub fn current_state(&self) -> Option<&'static str> {
        self.current
    }

    /// The tween currently driving `p`, if any.
    pub fn tween(&self, p: Param) -> Option<&Tween> {
        self.timeline.get(p)
    }

    pub fn in_flight(&self) -> usize {
        self.timeline.len()
    }

    /// Drop all scheduled tweens, leaving live values where they are.
    pub fn release(&mut self) {
        self.timeline.clear();
    }
}
