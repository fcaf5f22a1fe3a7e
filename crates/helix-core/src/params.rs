use glam::Vec3;

/// Every scalar a section state can animate.
///
/// Vector parameters (model offset and rotation) are split per axis so each
/// component tweens independently on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    HelixTightness,
    HelixRadius,
    FlowSpeed,
    HelixOpacity,
    ModelOpacity,
    Dispersion,
    NoiseIntensity,
    ModelScale,
    AnimationSpeed,
    OffsetX,
    OffsetY,
    OffsetZ,
    RotationX,
    RotationY,
    RotationZ,
    Reveal,
}

impl Param {
    pub const COUNT: usize = 16;

    pub const ALL: [Param; Self::COUNT] = [
        Param::HelixTightness,
        Param::HelixRadius,
        Param::FlowSpeed,
        Param::HelixOpacity,
        Param::ModelOpacity,
        Param::Dispersion,
        Param::NoiseIntensity,
        Param::ModelScale,
        Param::AnimationSpeed,
        Param::OffsetX,
        Param::OffsetY,
        Param::OffsetZ,
        Param::RotationX,
        Param::RotationY,
        Param::RotationZ,
        Param::Reveal,
    ];

    /// Parameters driven by section states for the helix field.
    pub const HELIX: &'static [Param] = &[
        Param::HelixTightness,
        Param::HelixRadius,
        Param::FlowSpeed,
        Param::HelixOpacity,
    ];

    /// Parameters driven by section states for the morphing model.
    /// `Reveal` is deliberately absent: it is a one-shot tween started at load.
    pub const MODEL: &'static [Param] = &[
        Param::ModelOpacity,
        Param::Dispersion,
        Param::NoiseIntensity,
        Param::ModelScale,
        Param::AnimationSpeed,
        Param::OffsetX,
        Param::OffsetY,
        Param::OffsetZ,
        Param::RotationX,
        Param::RotationY,
        Param::RotationZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Dense storage for one value per [`Param`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamValues([f32; Param::COUNT]);

impl Default for ParamValues {
    fn default() -> Self {
        Self([0.0; Param::COUNT])
    }
}

impl ParamValues {
    #[inline]
    pub fn get(&self, p: Param) -> f32 {
        self.0[p.index()]
    }

    #[inline]
    pub fn set(&mut self, p: Param, v: f32) {
        self.0[p.index()] = v;
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.get(Param::OffsetX),
            self.get(Param::OffsetY),
            self.get(Param::OffsetZ),
        )
    }

    pub fn rotation(&self) -> Vec3 {
        Vec3::new(
            self.get(Param::RotationX),
            self.get(Param::RotationY),
            self.get(Param::RotationZ),
        )
    }
}
