//! Static per-section target values.
//!
//! One [`StateDescriptor`] exists for each page section, in document order.
//! The first entry is the initial state applied at mount.

use crate::params::{Param, ParamValues};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixTarget {
    pub tightness: f32,
    pub radius: f32,
    pub flow_speed: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTarget {
    pub opacity: f32,
    pub dispersion: f32,
    pub noise_intensity: f32,
    pub scale: f32,
    pub animation_speed: f32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateDescriptor {
    pub name: &'static str,
    pub helix: HelixTarget,
    pub model: ModelTarget,
}

impl StateDescriptor {
    /// Target value of `p` in this state. `Reveal` always targets fully revealed.
    pub fn target(&self, p: Param) -> f32 {
        match p {
            Param::HelixTightness => self.helix.tightness,
            Param::HelixRadius => self.helix.radius,
            Param::FlowSpeed => self.helix.flow_speed,
            Param::HelixOpacity => self.helix.opacity,
            Param::ModelOpacity => self.model.opacity,
            Param::Dispersion => self.model.dispersion,
            Param::NoiseIntensity => self.model.noise_intensity,
            Param::ModelScale => self.model.scale,
            Param::AnimationSpeed => self.model.animation_speed,
            Param::OffsetX => self.model.position[0],
            Param::OffsetY => self.model.position[1],
            Param::OffsetZ => self.model.position[2],
            Param::RotationX => self.model.rotation[0],
            Param::RotationY => self.model.rotation[1],
            Param::RotationZ => self.model.rotation[2],
            Param::Reveal => 1.0,
        }
    }

    pub fn values(&self) -> ParamValues {
        let mut v = ParamValues::default();
        for p in Param::ALL {
            v.set(p, self.target(p));
        }
        v
    }
}

pub const SECTION_STATES: [StateDescriptor; 8] = [
    StateDescriptor {
        name: "hero",
        helix: HelixTarget { tightness: 3.0, radius: 1.2, flow_speed: 1.0, opacity: 1.0 },
        model: ModelTarget {
            opacity: 0.0,
            dispersion: 0.0,
            noise_intensity: 0.05,
            scale: 1.0,
            animation_speed: 1.0,
            position: [1.6, -0.4, 0.0],
            rotation: [0.0, -0.5, 0.0],
        },
    },
    StateDescriptor {
        name: "problem",
        helix: HelixTarget { tightness: 5.5, radius: 0.9, flow_speed: 2.2, opacity: 0.7 },
        model: ModelTarget {
            opacity: 0.0,
            dispersion: 0.6,
            noise_intensity: 0.25,
            scale: 1.0,
            animation_speed: 1.4,
            position: [1.6, -0.4, 0.0],
            rotation: [0.0, -0.5, 0.0],
        },
    },
    StateDescriptor {
        name: "team",
        helix: HelixTarget { tightness: 2.0, radius: 1.8, flow_speed: 0.6, opacity: 0.35 },
        model: ModelTarget {
            opacity: 0.9,
            dispersion: 0.0,
            noise_intensity: 0.04,
            scale: 1.1,
            animation_speed: 1.0,
            position: [1.8, -0.6, 0.5],
            rotation: [0.1, -0.7, 0.0],
        },
    },
    StateDescriptor {
        name: "philosophy",
        helix: HelixTarget { tightness: 1.5, radius: 2.4, flow_speed: 0.4, opacity: 0.25 },
        model: ModelTarget {
            opacity: 1.0,
            dispersion: 0.15,
            noise_intensity: 0.08,
            scale: 1.3,
            animation_speed: 0.7,
            position: [-1.8, -0.3, 0.8],
            rotation: [0.0, 0.6, 0.0],
        },
    },
    StateDescriptor {
        name: "services",
        helix: HelixTarget { tightness: 4.0, radius: 1.4, flow_speed: 1.4, opacity: 0.6 },
        model: ModelTarget {
            opacity: 0.6,
            dispersion: 0.4,
            noise_intensity: 0.12,
            scale: 0.9,
            animation_speed: 1.2,
            position: [2.2, 0.2, -0.5],
            rotation: [-0.2, -PI / 4.0, 0.1],
        },
    },
    StateDescriptor {
        name: "process",
        helix: HelixTarget { tightness: 6.5, radius: 1.0, flow_speed: 2.8, opacity: 0.8 },
        model: ModelTarget {
            opacity: 0.4,
            dispersion: 0.9,
            noise_intensity: 0.3,
            scale: 1.0,
            animation_speed: 1.8,
            position: [0.0, -0.8, -1.0],
            rotation: [0.0, PI, 0.0],
        },
    },
    StateDescriptor {
        name: "quote",
        helix: HelixTarget { tightness: 1.0, radius: 3.0, flow_speed: 0.3, opacity: 0.2 },
        model: ModelTarget {
            opacity: 0.85,
            dispersion: 0.0,
            noise_intensity: 0.03,
            scale: 1.5,
            animation_speed: 0.5,
            position: [0.0, -0.2, 1.2],
            rotation: [0.15, PI / 6.0, 0.0],
        },
    },
    StateDescriptor {
        name: "cta",
        helix: HelixTarget { tightness: 3.5, radius: 1.3, flow_speed: 1.2, opacity: 1.0 },
        model: ModelTarget {
            opacity: 1.0,
            dispersion: 0.0,
            noise_intensity: 0.06,
            scale: 1.2,
            animation_speed: 1.0,
            position: [0.0, -1.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        },
    },
];

pub fn find_state(name: &str) -> Option<&'static StateDescriptor> {
    SECTION_STATES.iter().find(|s| s.name == name)
}

pub fn section_index(name: &str) -> Option<usize> {
    SECTION_STATES.iter().position(|s| s.name == name)
}

pub fn section_name(index: usize) -> Option<&'static str> {
    SECTION_STATES.get(index).map(|s| s.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_in_document_order() {
        let names: Vec<_> = SECTION_STATES.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            ["hero", "problem", "team", "philosophy", "services", "process", "quote", "cta"]
        );
    }

    #[test]
    fn opacities_are_normalized() {
        for s in &SECTION_STATES {
            assert!((0.0..=1.0).contains(&s.helix.opacity), "{}", s.name);
            assert!((0.0..=1.0).contains(&s.model.opacity), "{}", s.name);
            assert!(s.model.scale > 0.0);
        }
    }

    #[test]
    fn lookup_by_name_and_index_agree() {
        assert_eq!(section_index("philosophy"), Some(3));
        assert_eq!(section_name(3), Some("philosophy"));
        assert!(find_state("missing").is_none());
    }
}
