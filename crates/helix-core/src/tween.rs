//! Time-bounded interpolations scheduled on a shared timeline.
//!
//! A [`Timeline`] holds at most one [`Tween`] per key. Scheduling a tween for a
//! key that already has one in flight replaces it; the new tween starts from
//! whatever value the caller supplies, which is normally the current live value.
//! Timelines do not own a clock: callers pass the current time (seconds since
//! start) to both [`Timeline::start`] and [`Timeline::tick`].

use crate::easing::{lerp, Ease};
use fnv::FnvHashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_sec: f64,
    pub delay_sec: f32,
    pub duration_sec: f32,
    pub ease: Ease,
}

impl Tween {
    /// Normalized, un-eased progress at `now`; 0 before the delay elapses.
    pub fn progress(&self, now_sec: f64) -> f32 {
        let elapsed = (now_sec - self.start_sec) as f32 - self.delay_sec;
        if elapsed < 0.0 {
            return 0.0;
        }
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration_sec).min(1.0)
    }

    pub fn value_at(&self, now_sec: f64) -> f32 {
        let t = self.progress(now_sec);
        if t >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.ease.apply(t))
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }

    /// Whether the tween has started writing values (delay elapsed).
    pub fn is_active(&self, now_sec: f64) -> bool {
        (now_sec - self.start_sec) as f32 >= self.delay_sec
    }
}

#[derive(Clone, Debug)]
pub struct Timeline<K: Eq + Hash + Copy> {
    tweens: FnvHashMap<K, Tween>,
}

impl<K: Eq + Hash + Copy> Default for Timeline<K> {
    fn default() -> Self {
        Self {
            tweens: FnvHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Copy> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tween for `key`, overriding any tween already in flight for it.
    pub fn start(&mut self, key: K, tween: Tween) {
        self.tweens.insert(key, tween);
    }

    pub fn cancel(&mut self, key: K) -> Option<Tween> {
        self.tweens.remove(&key)
    }

    pub fn get(&self, key: K) -> Option<&Tween> {
        self.tweens.get(&key)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Apply the value of every active tween through `apply` and drop those that
    /// completed. Tweens still waiting on their delay are left untouched.
    pub fn tick(&mut self, now_sec: f64, mut apply: impl FnMut(K, f32)) {
        self.tweens.retain(|key, tween| {
            if !tween.is_active(now_sec) {
                return true;
            }
            apply(*key, tween.value_at(now_sec));
            !tween.is_finished(now_sec)
        });
    }

    /// Release every scheduled tween without applying it.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(from: f32, to: f32, start: f64, dur: f32) -> Tween {
        Tween {
            from,
            to,
            start_sec: start,
            delay_sec: 0.0,
            duration_sec: dur,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn value_interpolates_and_clamps() {
        let t = tween(0.0, 10.0, 1.0, 2.0);
        assert_eq!(t.value_at(0.5), 0.0);
        assert!((t.value_at(2.0) - 5.0).abs() < 1e-5);
        assert_eq!(t.value_at(3.0), 10.0);
        assert_eq!(t.value_at(9.0), 10.0);
    }

    #[test]
    fn restart_replaces_in_flight_tween() {
        let mut tl = Timeline::new();
        tl.start(0u8, tween(0.0, 1.0, 0.0, 1.0));
        tl.start(0u8, tween(0.5, -1.0, 0.5, 1.0));
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.get(0).map(|t| t.to), Some(-1.0));
    }

    #[test]
    fn tick_removes_finished_and_keeps_delayed() {
        let mut tl = Timeline::new();
        tl.start(1u8, tween(0.0, 1.0, 0.0, 0.5));
        let mut delayed = tween(0.0, 1.0, 0.0, 0.5);
        delayed.delay_sec = 2.0;
        tl.start(2u8, delayed);

        let mut seen = Vec::new();
        tl.tick(1.0, |k, v| seen.push((k, v)));
        assert_eq!(seen, vec![(1, 1.0)]);
        assert_eq!(tl.len(), 1);
        assert!(tl.get(2).is_some());
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let t = tween(3.0, 7.0, 0.0, 0.0);
        assert_eq!(t.value_at(0.0), 7.0);
        assert!(t.is_finished(0.0));
    }

    #[test]
    fn zero_duration_tween_leaves_timeline_on_first_tick() {
        let mut tl = Timeline::new();
        tl.start(0u8, tween(3.0, 7.0, 2.0, 0.0));
        let mut seen = Vec::new();
        tl.tick(2.0, |k, v| seen.push((k, v)));
        assert_eq!(seen, vec![(0, 7.0)]);
        assert!(tl.is_empty());
    }
}
