//! End-to-end: scrolling the page drives section states and overlay fades.

use helix_core::easing::Ease;
use helix_core::page::Page;
use helix_core::params::Param;
use helix_core::scroll::{BridgeEvent, ScrollMetrics};
use helix_core::states::{find_state, section_index};
use glam::Vec2;
use helix_core::{
    Camera, FrameInputs, HelixVisual, MorphVisual, SiteConfig, CONTENT_FADE_IN_SEC,
    CONTENT_FADE_OUT_SEC, CONTENT_STAGGER_SEC,
};

const VH: f64 = 800.0;

fn at(scroll_y: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y,
        viewport_h: VH,
        doc_h: VH * 8.0,
    }
}

fn small_config() -> SiteConfig {
    SiteConfig {
        helix_particles: 90,
        ..SiteConfig::default()
    }
}

#[test]
fn initial_section_is_active_without_transition() {
    let config = small_config();
    let mut page = Page::new(vec![2; 8], config.scrub_tau_sec);
    let mut helix = HelixVisual::new(&config);

    let events = page.on_scroll(&at(0.0), 0.0);
    assert_eq!(events.len(), 1);
    let active = page.active();
    assert_eq!(active.name(), Some("hero"));
    assert!(active.immediate);

    assert!(helix.observe(active, 0.0));
    assert_eq!(helix.store().in_flight(), 0);
    assert_eq!(page.fader().opacity((0, 0)), 1.0);
    assert_eq!(page.fader().opacity((0, 1)), 1.0);
}

#[test]
fn crossing_into_philosophy_transitions_once_and_fades_content() {
    let config = small_config();
    let counts = vec![3, 2, 4, 3, 2, 2, 1, 2];
    let mut page = Page::new(counts.clone(), config.scrub_tau_sec);
    let mut helix = HelixVisual::new(&config);
    let mut morph = MorphVisual::new(&config);
    let philosophy = section_index("philosophy").unwrap();
    let team = section_index("team").unwrap();
    assert_eq!(philosophy, 3);

    // mount at hero, then settle on team
    page.on_scroll(&at(0.0), 0.0);
    helix.observe(page.active(), 0.0);
    morph.observe(page.active(), 0.0);
    page.on_scroll(&at(VH * 2.0), 1.0);
    assert!(helix.observe(page.active(), 1.0));
    assert!(morph.observe(page.active(), 1.0));
    page.tick(1.0 / 60.0, 5.0, |_, _| {});
    assert_eq!(page.fader().opacity((team, 0)), 1.0);

    // philosophy's top edge reaches the viewport center
    let now = 6.0;
    let events = page.on_scroll(&at(VH * 2.5), now);
    let enters: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            BridgeEvent::Enter { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(enters, [philosophy]);
    assert_eq!(page.active().name(), Some("philosophy"));

    // the visuals apply it exactly once
    assert!(helix.observe(page.active(), now));
    assert!(morph.observe(page.active(), now));
    assert_eq!(helix.store().current_state(), Some("philosophy"));
    assert!(!helix.observe(page.active(), now + 0.1));
    assert!(page.on_scroll(&at(VH * 2.6), now + 0.2).is_empty());
    assert!(!helix.observe(page.active(), now + 0.2));

    // previous section fades 1 -> 0 over 0.3 s
    for i in 0..counts[team] {
        let tween = page.fader().tween((team, i)).unwrap();
        assert_eq!(tween.from, 1.0);
        assert_eq!(tween.to, 0.0);
        assert_eq!(tween.duration_sec, CONTENT_FADE_OUT_SEC);
        assert_eq!(tween.delay_sec, 0.0);
    }
    // philosophy fades 0 -> 1 over 0.8 s, staggered per element
    for i in 0..counts[philosophy] {
        let tween = page.fader().tween((philosophy, i)).unwrap();
        assert_eq!(tween.from, 0.0);
        assert_eq!(tween.to, 1.0);
        assert_eq!(tween.duration_sec, CONTENT_FADE_IN_SEC);
        assert_eq!(tween.delay_sec, i as f32 * CONTENT_STAGGER_SEC);
        assert_ne!(tween.ease, Ease::Linear);
    }

    let mut written = Vec::new();
    page.tick(1.0 / 60.0, now + 0.5, |key, v| written.push((key, v)));
    assert_eq!(page.fader().opacity((team, 0)), 0.0);
    assert!(written.contains(&((team, 0), 0.0)));

    let last = counts[philosophy] - 1;
    page.tick(1.0 / 60.0, now + 2.0, |_, _| {});
    assert_eq!(page.fader().opacity((philosophy, last)), 1.0);

    // section tweens land on philosophy's targets once they run out
    let target = find_state("philosophy").unwrap();
    let inputs = frame_at(now + config.state_tween_sec as f64, page.progress());
    let uniforms = *helix.update(&inputs);
    assert_eq!(uniforms.radius, target.helix.radius);
    assert_eq!(uniforms.opacity, target.helix.opacity);

    // no keyframes: the morph draws nothing but still follows the section
    assert!(morph.update(&inputs).is_none());
    assert_eq!(morph.store().get(Param::ModelOpacity), target.model.opacity);
}

fn frame_at(time_sec: f64, progress: f32) -> FrameInputs {
    FrameInputs::new(
        time_sec,
        1.0 / 60.0,
        Vec2::ZERO,
        &Camera::default(),
        [800.0, 600.0],
        1.0,
        progress,
    )
}

#[test]
fn release_stops_overlay_fades() {
    let config = small_config();
    let mut page = Page::new(vec![2; 8], config.scrub_tau_sec);
    page.on_scroll(&at(0.0), 0.0);
    page.on_scroll(&at(VH), 1.0);
    assert!(!page.fader().is_idle());

    page.release();
    assert!(page.fader().is_idle());
    let mut writes = 0;
    page.tick(0.016, 5.0, |_, _| writes += 1);
    assert_eq!(writes, 0);
}
