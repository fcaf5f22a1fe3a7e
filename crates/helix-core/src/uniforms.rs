//! Uniform blocks uploaded once per frame. Field order and padding mirror the
//! `Uniforms` structs in `helix.wgsl` and `morph.wgsl`.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HelixUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// xy: pointer on the z = 0 plane, z: repel radius, w: repel strength
    pub pointer: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub scroll: f32,
    pub tightness: f32,
    pub radius: f32,
    pub flow_speed: f32,
    pub opacity: f32,
    pub particle_size: f32,
    pub pixel_ratio: f32,
    pub strand_count: f32,
    pub _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MorphUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub pointer: [f32; 4],
    /// xyz: section offset, w: scale
    pub offset: [f32; 4],
    /// xyz: Euler rotation in radians
    pub rotation: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    /// Raw factor between keyframe A and B; eased in the shader.
    pub morph: f32,
    pub opacity: f32,
    pub dispersion: f32,
    pub noise_intensity: f32,
    pub reveal: f32,
    pub particle_size: f32,
    pub pixel_ratio: f32,
    pub glitter: f32,
    pub _pad: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn helix_layout_matches_wgsl() {
        assert_eq!(size_of::<HelixUniforms>(), 192);
        assert_eq!(offset_of!(HelixUniforms, pointer), 128);
        assert_eq!(offset_of!(HelixUniforms, resolution), 144);
        assert_eq!(offset_of!(HelixUniforms, tightness), 160);
        assert_eq!(offset_of!(HelixUniforms, strand_count), 184);
    }

    #[test]
    fn morph_layout_matches_wgsl() {
        assert_eq!(size_of::<MorphUniforms>(), 224);
        assert_eq!(offset_of!(MorphUniforms, offset), 144);
        assert_eq!(offset_of!(MorphUniforms, resolution), 176);
        assert_eq!(offset_of!(MorphUniforms, opacity), 192);
        assert_eq!(offset_of!(MorphUniforms, glitter), 216);
    }
}
