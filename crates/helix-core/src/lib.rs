pub mod camera;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod fader;
pub mod frame;
pub mod geometry;
pub mod gltf_import;
pub mod keyframes;
pub mod model;
pub mod page;
pub mod params;
pub mod scroll;
pub mod smooth_scroll;
pub mod states;
pub mod store;
pub mod tween;
pub mod uniforms;
pub mod visual;

pub static HELIX_WGSL: &str = concat!(
    include_str!("../shaders/helix.wgsl"),
    include_str!("../shaders/dot.wgsl")
);
pub static MORPH_WGSL: &str = concat!(
    include_str!("../shaders/noise.wgsl"),
    include_str!("../shaders/morph.wgsl"),
    include_str!("../shaders/dot.wgsl")
);

pub use camera::Camera;
pub use config::SiteConfig;
pub use constants::*;
pub use error::ModelError;
pub use frame::{FrameInputs, KeyframeCursor, KeyframePair, PointerSmoother};
pub use geometry::{HelixAttributes, HelixParticle};
pub use gltf_import::load_glb;
pub use keyframes::{sample_keyframes, KeyframeSet};
pub use model::SkinnedModel;
pub use page::{ActiveSection, Page};
pub use params::Param;
pub use scroll::{BridgeEvent, ScrollMetrics};
pub use smooth_scroll::SmoothScroller;
pub use states::SECTION_STATES;
pub use store::AnimationStateStore;
pub use uniforms::{HelixUniforms, MorphUniforms};
pub use visual::{HelixVisual, MorphVisual};
