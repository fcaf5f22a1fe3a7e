//! The two particle visuals. Each owns its parameter store and uniform block
//! and is the only writer of either.

use crate::config::SiteConfig;
use crate::constants::{
    GLITTER_AMOUNT, HELIX_PARTICLE_SIZE, MODEL_PARTICLE_SIZE, POINTER_REPEL_RADIUS,
    POINTER_REPEL_STRENGTH, REVEAL_DURATION_SEC,
};
use crate::easing::Ease;
use crate::frame::{FrameInputs, KeyframeCursor, KeyframePair};
use crate::geometry::{build_helix_attributes, HelixAttributes};
use crate::keyframes::KeyframeSet;
use crate::page::ActiveSection;
use crate::params::Param;
use crate::store::AnimationStateStore;
use crate::uniforms::{HelixUniforms, MorphUniforms};
use bytemuck::Zeroable;

fn pointer_uniform(inputs: &FrameInputs) -> [f32; 4] {
    [
        inputs.pointer_world.x,
        inputs.pointer_world.y,
        POINTER_REPEL_RADIUS,
        POINTER_REPEL_STRENGTH,
    ]
}

/// Apply a change of the active section to `store`. Returns whether a state
/// was applied.
fn follow_section(
    store: &mut AnimationStateStore,
    seen_generation: &mut u64,
    active: ActiveSection,
    now_sec: f64,
) -> bool {
    if active.generation == *seen_generation {
        return false;
    }
    *seen_generation = active.generation;
    let Some(name) = active.name() else {
        return false;
    };
    if active.immediate {
        store.apply_immediately(name)
    } else {
        store.transition_to_state(name, now_sec)
    }
}

pub struct HelixVisual {
    store: AnimationStateStore,
    uniforms: HelixUniforms,
    attributes: HelixAttributes,
    seen_generation: u64,
}

impl HelixVisual {
    pub fn new(config: &SiteConfig) -> Self {
        let attributes =
            build_helix_attributes(config.helix_particles, config.helix_strands, config.seed);
        Self {
            store: AnimationStateStore::new(Param::HELIX, config.state_tween_sec),
            uniforms: HelixUniforms::zeroed(),
            attributes,
            seen_generation: 0,
        }
    }

    pub fn attributes(&self) -> &HelixAttributes {
        &self.attributes
    }

    pub fn transition_to_state(&mut self, name: &str, now_sec: f64) -> bool {
        self.store.transition_to_state(name, now_sec)
    }

    pub fn observe(&mut self, active: ActiveSection, now_sec: f64) -> bool {
        follow_section(&mut self.store, &mut self.seen_generation, active, now_sec)
    }

    /// Advance tweens and rewrite the uniform block for this frame.
    pub fn update(&mut self, inputs: &FrameInputs) -> &HelixUniforms {
        self.store.tick(inputs.time_sec);
        let s = &self.store;
        self.uniforms = HelixUniforms {
            view_proj: inputs.view_proj.to_cols_array_2d(),
            view: inputs.view.to_cols_array_2d(),
            pointer: pointer_uniform(inputs),
            resolution: inputs.resolution,
            time: inputs.time_sec as f32,
            scroll: inputs.scroll_progress,
            tightness: s.get(Param::HelixTightness),
            radius: s.get(Param::HelixRadius),
            flow_speed: s.get(Param::FlowSpeed),
            opacity: s.get(Param::HelixOpacity),
            particle_size: HELIX_PARTICLE_SIZE,
            pixel_ratio: inputs.pixel_ratio,
            strand_count: self.attributes.strand_count as f32,
            _pad: 0.0,
        };
        &self.uniforms
    }

    pub fn uniforms(&self) -> &HelixUniforms {
        &self.uniforms
    }

    pub fn store(&self) -> &AnimationStateStore {
        &self.store
    }

    pub fn release(&mut self) {
        self.store.release();
    }
}

/// The morphing model. Unavailable (draws nothing) until keyframes arrive,
/// and for good if the model had nothing to sample.
pub struct MorphVisual {
    store: AnimationStateStore,
    uniforms: MorphUniforms,
    keyframes: Option<KeyframeSet>,
    cursor: KeyframeCursor,
    seen_generation: u64,
}

impl MorphVisual {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            store: AnimationStateStore::new(Param::MODEL, config.state_tween_sec),
            uniforms: MorphUniforms::zeroed(),
            keyframes: None,
            cursor: KeyframeCursor::default(),
            seen_generation: 0,
        }
    }

    /// Install sampled keyframes and start the one-shot reveal.
    pub fn set_keyframes(&mut self, keyframes: KeyframeSet, now_sec: f64) {
        self.cursor = KeyframeCursor::new(keyframes.keyframe_count(), keyframes.steps_per_second());
        self.keyframes = Some(keyframes);
        self.store.set(Param::Reveal, 0.0);
        self.store
            .tween_param(Param::Reveal, 1.0, REVEAL_DURATION_SEC, Ease::Power2Out, now_sec);
    }

    pub fn is_available(&self) -> bool {
        self.keyframes.as_ref().is_some_and(|k| k.count > 0)
    }

    pub fn transition_to_state(&mut self, name: &str, now_sec: f64) -> bool {
        self.store.transition_to_state(name, now_sec)
    }

    pub fn observe(&mut self, active: ActiveSection, now_sec: f64) -> bool {
        follow_section(&mut self.store, &mut self.seen_generation, active, now_sec)
    }

    /// Advance tweens and the keyframe cursor. Returns the keyframe pair to
    /// draw, or `None` when there is nothing to draw.
    pub fn update(&mut self, inputs: &FrameInputs) -> Option<KeyframePair> {
        self.store.tick(inputs.time_sec);
        if !self.is_available() {
            return None;
        }
        let s = &self.store;
        let pair = self
            .cursor
            .advance(inputs.dt_sec, s.get(Param::AnimationSpeed));
        let offset = s.live().offset();
        let rotation = s.live().rotation();
        self.uniforms = MorphUniforms {
            view_proj: inputs.view_proj.to_cols_array_2d(),
            view: inputs.view.to_cols_array_2d(),
            pointer: pointer_uniform(inputs),
            offset: [offset.x, offset.y, offset.z, s.get(Param::ModelScale)],
            rotation: [rotation.x, rotation.y, rotation.z, 0.0],
            resolution: inputs.resolution,
            time: inputs.time_sec as f32,
            morph: pair.factor,
            opacity: s.get(Param::ModelOpacity),
            dispersion: s.get(Param::Dispersion),
            noise_intensity: s.get(Param::NoiseIntensity),
            reveal: s.get(Param::Reveal),
            particle_size: MODEL_PARTICLE_SIZE,
            pixel_ratio: inputs.pixel_ratio,
            glitter: GLITTER_AMOUNT,
            _pad: 0.0,
        };
        Some(pair)
    }

    pub fn uniforms(&self) -> &MorphUniforms {
        &self.uniforms
    }

    pub fn store(&self) -> &AnimationStateStore {
        &self.store
    }

    pub fn release(&mut self) {
        self.store.release();
    }
}
