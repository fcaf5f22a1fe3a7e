//! Opacity timelines for the text overlays of each section.

use crate::constants::{CONTENT_FADE_IN_SEC, CONTENT_FADE_OUT_SEC, CONTENT_STAGGER_SEC};
use crate::easing::Ease;
use crate::tween::{Timeline, Tween};
use fnv::FnvHashMap;

/// Element key: (section index, element index within the section).
pub type FadeKey = (usize, usize);

/// Per-element overlay opacity, tweened on its own timeline.
///
/// Elements that have never been faded in read as fully transparent.
#[derive(Clone, Debug, Default)]
pub struct ContentFader {
    opacity: FnvHashMap<FadeKey, f32>,
    timeline: Timeline<FadeKey>,
    counts: FnvHashMap<usize, usize>,
}

impl ContentFader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fade the section's elements in over 0.8 s, element `i` delayed by
    /// `i * 0.1` s.
    pub fn fade_in(&mut self, section: usize, elements: usize, now_sec: f64) {
        self.counts.insert(section, elements);
        for i in 0..elements {
            let key = (section, i);
            self.timeline.start(
                key,
                Tween {
                    from: self.opacity(key),
                    to: 1.0,
                    start_sec: now_sec,
                    delay_sec: i as f32 * CONTENT_STAGGER_SEC,
                    duration_sec: CONTENT_FADE_IN_SEC,
                    ease: Ease::Power2Out,
                },
            );
        }
    }

    /// Fade every known element of the section out over 0.3 s, all together.
    pub fn fade_out(&mut self, section: usize, now_sec: f64) {
        let elements = self.counts.get(&section).copied().unwrap_or(0);
        for i in 0..elements {
            let key = (section, i);
            self.timeline.start(
                key,
                Tween {
                    from: self.opacity(key),
                    to: 0.0,
                    start_sec: now_sec,
                    delay_sec: 0.0,
                    duration_sec: CONTENT_FADE_OUT_SEC,
                    ease: Ease::Power2In,
                },
            );
        }
    }

    /// Show the section's elements at full opacity with no tween.
    pub fn show_immediately(&mut self, section: usize, elements: usize) {
        self.counts.insert(section, elements);
        for i in 0..elements {
            self.timeline.cancel((section, i));
            self.opacity.insert((section, i), 1.0);
        }
    }

    /// Advance all fades. `changed` receives every element whose opacity was
    /// written this tick.
    pub fn tick(&mut self, now_sec: f64, mut changed: impl FnMut(FadeKey, f32)) {
        let opacity = &mut self.opacity;
        self.timeline.tick(now_sec, |key, v| {
            opacity.insert(key, v);
            changed(key, v);
        });
    }

    pub fn opacity(&self, key: FadeKey) -> f32 {
        self.opacity.get(&key).copied().unwrap_or(0.0)
    }

    /// Current opacity of every known element of `section`.
    pub fn section_opacities(&self, section: usize) -> impl Iterator<Item = (FadeKey, f32)> + '_ {
        let elements = self.counts.get(&section).copied().unwrap_or(0);
        (0..elements).map(move |i| ((section, i), self.opacity((section, i))))
    }

    pub fn tween(&self, key: FadeKey) -> Option<&Tween> {
        self.timeline.get(key)
    }

    pub fn is_idle(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn clear(&mut self) {
        self.timeline.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staggered_fade_in_reaches_full_opacity() {
        let mut f = ContentFader::new();
        f.fade_in(2, 3, 0.0);
        f.tick(0.05, |_, _| {});
        assert!(f.opacity((2, 0)) > 0.0);
        assert_eq!(f.opacity((2, 2)), 0.0);
        f.tick(0.2 + 0.8, |_, _| {});
        assert_eq!(f.opacity((2, 0)), 1.0);
        assert_eq!(f.opacity((2, 2)), 1.0);
        assert!(f.is_idle());
    }

    #[test]
    fn fade_out_only_touches_known_elements() {
        let mut f = ContentFader::new();
        f.show_immediately(0, 2);
        f.fade_out(0, 1.0);
        f.fade_out(5, 1.0);
        assert!(f.tween((0, 1)).is_some());
        assert!(f.tween((5, 0)).is_none());
        assert_eq!(f.section_opacities(5).count(), 0);
        f.tick(1.5, |_, _| {});
        assert_eq!(f.opacity((0, 0)), 0.0);
        assert!(f.section_opacities(0).all(|(_, v)| v == 0.0));
    }
}
