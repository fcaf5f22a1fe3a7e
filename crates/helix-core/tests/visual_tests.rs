//! Host-side tests for the morph visual's lifecycle.

use glam::Vec2;
use helix_core::keyframes::KeyframeSet;
use helix_core::{Camera, FrameInputs, MorphVisual, SiteConfig, REVEAL_DURATION_SEC};

fn keyframes(count: usize, frames: usize) -> KeyframeSet {
    KeyframeSet {
        count,
        duration: frames.saturating_sub(1) as f32,
        times: (0..frames).map(|k| k as f32).collect(),
        positions: vec![vec![0.0; count * 3]; frames],
        normals: vec![vec![0.0; count * 3]; frames],
        random: vec![0.5; count],
    }
}

fn frame(time_sec: f64, dt_sec: f32) -> FrameInputs {
    FrameInputs::new(
        time_sec,
        dt_sec,
        Vec2::new(0.25, -0.5),
        &Camera::default(),
        [1280.0, 720.0],
        2.0,
        0.0,
    )
}

#[test]
fn reveal_runs_once_after_keyframes_arrive() {
    let mut morph = MorphVisual::new(&SiteConfig::default());
    assert!(!morph.is_available());
    assert!(morph.update(&frame(0.5, 0.016)).is_none());

    morph.set_keyframes(keyframes(16, 30), 1.0);
    assert!(morph.is_available());
    morph.update(&frame(1.0, 0.016)).unwrap();
    assert_eq!(morph.uniforms().reveal, 0.0);

    morph.update(&frame(1.0 + REVEAL_DURATION_SEC as f64 / 2.0, 0.016));
    let mid = morph.uniforms().reveal;
    assert!(mid > 0.0 && mid < 1.0);

    morph.update(&frame(1.0 + REVEAL_DURATION_SEC as f64, 0.016));
    assert_eq!(morph.uniforms().reveal, 1.0);

    // a section change does not restart the reveal
    morph.transition_to_state("team", 5.0);
    morph.update(&frame(5.5, 0.016));
    assert_eq!(morph.uniforms().reveal, 1.0);
}

#[test]
fn empty_keyframe_set_stays_unavailable() {
    let mut morph = MorphVisual::new(&SiteConfig::default());
    morph.set_keyframes(keyframes(0, 30), 0.0);
    assert!(!morph.is_available());
    assert!(morph.update(&frame(1.0, 0.016)).is_none());
}

#[test]
fn keyframe_pair_advances_with_time() {
    let mut morph = MorphVisual::new(&SiteConfig::default());
    morph.set_keyframes(keyframes(4, 30), 0.0);
    let first = morph.update(&frame(0.0, 0.0)).unwrap();
    assert_eq!((first.a, first.b), (0, 1));
    let mut pair = first;
    // 29 steps over a 29 s clip: one step per second at speed 1
    for i in 1..=90 {
        pair = morph.update(&frame(i as f64 / 60.0, 1.0 / 60.0)).unwrap();
    }
    assert_eq!(pair.a, 1);
    assert_ne!(pair.a, 0);
    assert_eq!(pair.b, (pair.a + 1) % 30);
    assert_eq!(morph.uniforms().morph, pair.factor);
    assert_eq!(morph.uniforms().pixel_ratio, 2.0);
}
