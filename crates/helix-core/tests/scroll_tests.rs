//! Host-side tests for page scroll progress and region tracking.

use helix_core::scroll::{BridgeEvent, ScrollBridge, ScrollMetrics, ScrubbedProgress};
use helix_core::{SCROLL_SCRUB_TAU_SEC, SCROLL_SNAP_EPSILON};

const VH: f64 = 900.0;
const SECTIONS: usize = 8;

fn at(scroll_y: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y,
        viewport_h: VH,
        doc_h: VH * SECTIONS as f64,
    }
}

#[test]
fn raw_progress_is_exact_at_both_ends() {
    assert_eq!(at(0.0).raw_progress(), 0.0);
    assert_eq!(at(VH * 7.0).raw_progress(), 1.0);
    // overscroll bounce
    assert_eq!(at(-40.0).raw_progress(), 0.0);
    assert_eq!(at(VH * 7.0 + 40.0).raw_progress(), 1.0);
}

#[test]
fn scrubbed_progress_is_monotonic_scrolling_down() {
    let mut scrub = ScrubbedProgress::new(SCROLL_SCRUB_TAU_SEC, SCROLL_SNAP_EPSILON);
    scrub.reset_to(at(0.0).raw_progress());
    assert_eq!(scrub.value(), 0.0);

    let max = VH * 7.0;
    let mut last = 0.0;
    let mut y = 0.0;
    while y < max {
        y = (y + 37.0).min(max);
        scrub.set_target(at(y).raw_progress());
        let v = scrub.step(1.0 / 60.0);
        assert!(v >= last, "progress went backwards at y={y}");
        assert!((0.0..=1.0).contains(&v));
        last = v;
    }
    for _ in 0..1_200 {
        let v = scrub.step(1.0 / 60.0);
        assert!(v >= last);
        last = v;
    }
    assert_eq!(scrub.value(), 1.0);
}

#[test]
fn exactly_one_region_is_active_across_the_page() {
    let mut bridge = ScrollBridge::new(SECTIONS);
    let mut active = None;
    let mut y = 0.0;
    while y <= VH * 7.0 {
        for ev in bridge.update(&at(y)) {
            match ev {
                BridgeEvent::Leave { index, .. } => {
                    assert_eq!(active, Some(index));
                    active = None;
                }
                BridgeEvent::Enter { index, .. } => {
                    assert_eq!(active, None, "entered {index} while another was active");
                    active = Some(index);
                }
            }
        }
        assert_eq!(active, bridge.active());
        y += 13.0;
    }
    assert_eq!(active, Some(SECTIONS - 1));
}

#[test]
fn a_jump_reports_only_the_landing_region() {
    let mut bridge = ScrollBridge::new(SECTIONS);
    bridge.update(&at(0.0));
    let events = bridge.update(&at(VH * 5.0));
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], BridgeEvent::Leave { index: 0, .. }));
    assert!(matches!(events[1], BridgeEvent::Enter { index: 5, .. }));
}
