use crate::constants::*;

/// Start-up configuration assembled once by the page shell and handed to
/// every component that needs it.
///
/// Fields:
/// - `helix_particles` / `helix_strands`: size and layout of the helix field
/// - `model_particle_cap`: upper bound on particles sampled from the model
/// - `model_keyframes`: number of evenly spaced clip samples
/// - `model_path`: relative URL of the animated model asset
/// - `state_tween_sec`: duration of section parameter tweens
/// - `scrub_tau_sec`: time constant of the scrubbed scroll progress
/// - `smooth_scroll`: whether wheel input is routed through the smooth-scroll wrapper
/// - `seed`: base seed for per-particle randomness
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub helix_particles: usize,
    pub helix_strands: usize,
    pub model_particle_cap: usize,
    pub model_keyframes: usize,
    pub model_path: String,
    pub state_tween_sec: f32,
    pub scrub_tau_sec: f32,
    pub smooth_scroll: bool,
    pub seed: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            helix_particles: HELIX_PARTICLE_COUNT,
            helix_strands: HELIX_STRAND_COUNT,
            model_particle_cap: MODEL_PARTICLE_CAP,
            model_keyframes: MODEL_KEYFRAME_COUNT,
            model_path: MODEL_ASSET_PATH.to_string(),
            state_tween_sec: STATE_TWEEN_SEC,
            scrub_tau_sec: SCROLL_SCRUB_TAU_SEC,
            smooth_scroll: true,
            seed: HELIX_SEED,
        }
    }
}

impl SiteConfig {
    /// Seed for the morph visual, derived so the two fields never share a stream.
    pub fn model_seed(&self) -> u64 {
        self.seed ^ MODEL_SEED.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
