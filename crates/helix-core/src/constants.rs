// Shared visual tuning constants used by the core visuals and the web front-end.

// Camera
pub const CAMERA_Z: f32 = 6.0; // eye distance from the origin along +Z
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Helix field
pub const HELIX_PARTICLE_COUNT: usize = 15_000;
pub const HELIX_STRAND_COUNT: usize = 3;
pub const HELIX_PARTICLE_SIZE: f32 = 9.0; // pixels at unit view depth
pub const HELIX_SEED: u64 = 0x4845_4C49_58;

// Morphing model
pub const MODEL_PARTICLE_CAP: usize = 20_000;
pub const MODEL_KEYFRAME_COUNT: usize = 30;
pub const MODEL_PARTICLE_SIZE: f32 = 7.0;
pub const MODEL_SEED: u64 = 0x4352_414E_45;
pub const MODEL_ASSET_PATH: &str = "models/crane.glb";
pub const KEYFRAMES_PER_SECOND: f32 = 12.0; // step rate for clips with no usable duration
pub const GLITTER_AMOUNT: f32 = 0.35; // weight of the per-particle opacity shimmer
pub const REVEAL_DURATION_SEC: f32 = 3.0;

// Pointer interaction
pub const POINTER_SMOOTHING: f32 = 0.08; // per-frame blend toward the raw pointer sample
pub const POINTER_REPEL_RADIUS: f32 = 1.2; // world units on the z = 0 plane
pub const POINTER_REPEL_STRENGTH: f32 = 0.45;

// Section transitions
pub const STATE_TWEEN_SEC: f32 = 2.0;
pub const CONTENT_FADE_IN_SEC: f32 = 0.8;
pub const CONTENT_FADE_OUT_SEC: f32 = 0.3;
pub const CONTENT_STAGGER_SEC: f32 = 0.1;

// Scroll
pub const SCROLL_SCRUB_TAU_SEC: f32 = 1.0; // low-pass time constant for scroll progress
pub const SCROLL_SNAP_EPSILON: f32 = 1e-4;
pub const SMOOTH_SCROLL_LERP: f32 = 0.1; // per-frame blend of the smooth-scroll wrapper
pub const SMOOTH_SCROLL_SNAP_PX: f64 = 0.5;
pub const WHEEL_MULTIPLIER: f64 = 1.0;

