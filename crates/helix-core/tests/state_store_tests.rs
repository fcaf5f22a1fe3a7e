//! Host-side tests for section state transitions.

use helix_core::params::Param;
use helix_core::states::find_state;
use helix_core::store::AnimationStateStore;
use helix_core::STATE_TWEEN_SEC;

fn helix_store() -> AnimationStateStore {
    AnimationStateStore::new(Param::HELIX, STATE_TWEEN_SEC)
}

#[test]
fn unknown_state_is_a_no_op() {
    let mut store = helix_store();
    store.transition_to_state("problem", 0.0);
    store.tick(0.7);
    let before = *store.live();
    let in_flight = store.in_flight();

    assert!(!store.transition_to_state("nonexistent", 0.8));
    assert_eq!(*store.live(), before);
    assert_eq!(store.in_flight(), in_flight);
    assert_eq!(store.current_state(), Some("problem"));
}

#[test]
fn new_transition_continues_from_partial_value() {
    let mut store = helix_store();
    let hero = find_state("hero").unwrap();
    let team = find_state("team").unwrap();
    // services' radius sits between hero's and team's, so the two
    // transitions pull it in opposite directions
    store.apply_immediately("services");

    store.transition_to_state("hero", 0.0);
    store.tick(1.0);
    let partial = store.get(Param::HelixRadius);
    assert!(partial < find_state("services").unwrap().helix.radius);
    assert!(partial > hero.helix.radius);

    store.transition_to_state("team", 1.0);
    for &p in Param::HELIX {
        let tween = store.tween(p).unwrap();
        assert_eq!(tween.from, store.get(p), "{p:?} must start from its live value");
        assert_eq!(tween.to, team.target(p));
    }

    let mut last = partial;
    for step in 1..=40 {
        store.tick(1.0 + step as f64 * 0.05);
        let v = store.get(Param::HelixRadius);
        assert!(v >= last, "radius moved back toward hero: {v} < {last}");
        last = v;
    }
    assert_eq!(store.get(Param::HelixRadius), team.helix.radius);
    assert_eq!(store.in_flight(), 0);
}

#[test]
fn tweens_on_different_parameters_run_in_parallel() {
    let mut store = helix_store();
    store.transition_to_state("team", 0.0);
    assert_eq!(store.in_flight(), Param::HELIX.len());
    store.tick(STATE_TWEEN_SEC as f64);
    let team = find_state("team").unwrap();
    assert_eq!(store.get(Param::HelixRadius), team.helix.radius);
    assert_eq!(store.get(Param::HelixOpacity), team.helix.opacity);
}

#[test]
fn re_entering_a_section_reapplies_its_state() {
    let mut store = helix_store();
    store.transition_to_state("problem", 0.0);
    store.tick(3.0);
    store.transition_to_state("hero", 3.0);
    store.tick(6.0);
    let hero = find_state("hero").unwrap();
    assert_eq!(store.get(Param::HelixTightness), hero.helix.tightness);
}

#[test]
fn release_freezes_values_mid_transition() {
    let mut store = helix_store();
    store.transition_to_state("team", 0.0);
    store.tick(0.5);
    let frozen = *store.live();
    assert!(store.in_flight() > 0);

    store.release();
    assert_eq!(store.in_flight(), 0);
    store.tick(STATE_TWEEN_SEC as f64 * 2.0);
    assert_eq!(*store.live(), frozen);
}
