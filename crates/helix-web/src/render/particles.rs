use super::helpers::{make_particle_pipeline, uniform_bind_group_layout, QUAD_LAYOUT};
use helix_core::keyframes::KeyframeSet;
use helix_core::{HelixParticle, HelixUniforms, MorphUniforms};
use wgpu::util::DeviceExt;

const HELIX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32, 2 => Float32, 3 => Float32];
const POS_A_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const POS_B_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];
const NORMAL_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32x3];
const RANDOM_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![4 => Float32];

const VEC3_STRIDE: u64 = (std::mem::size_of::<f32>() * 3) as u64;

fn instance_layout(
    stride: u64,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: stride,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

fn uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) struct HelixResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) instances: wgpu::Buffer,
    pub(crate) count: u32,
}

pub(crate) fn create_helix_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    particles: &[HelixParticle],
) -> HelixResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("helix_shader"),
        source: wgpu::ShaderSource::Wgsl(helix_core::HELIX_WGSL.into()),
    });
    let bgl = uniform_bind_group_layout(device, "helix_bgl");
    let uniform_buffer = uniform_buffer::<HelixUniforms>(device, "helix_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("helix_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("helix_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let buffers = [
        QUAD_LAYOUT,
        instance_layout(std::mem::size_of::<HelixParticle>() as u64, &HELIX_ATTRS),
    ];
    let pipeline = make_particle_pipeline(device, "helix_pipeline", &pl, &shader, &buffers, format);
    let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("helix_instances"),
        contents: bytemuck::cast_slice(particles),
        usage: wgpu::BufferUsages::VERTEX,
    });
    HelixResources {
        pipeline,
        uniform_buffer,
        bind_group,
        instances,
        count: particles.len() as u32,
    }
}

/// Per-keyframe vertex buffers for the morph. Uploaded once.
pub(crate) struct KeyframeBuffers {
    pub(crate) positions: Vec<wgpu::Buffer>,
    pub(crate) normals: Vec<wgpu::Buffer>,
    pub(crate) random: wgpu::Buffer,
    pub(crate) count: u32,
}

impl KeyframeBuffers {
    pub(crate) fn upload(device: &wgpu::Device, set: &KeyframeSet) -> Self {
        let array = |label: &str, data: &[f32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        Self {
            positions: set
                .positions
                .iter()
                .map(|p| array("morph_positions", p))
                .collect(),
            normals: set
                .normals
                .iter()
                .map(|n| array("morph_normals", n))
                .collect(),
            random: array("morph_random", &set.random),
            count: set.count as u32,
        }
    }
}

pub(crate) struct MorphResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) keyframes: Option<KeyframeBuffers>,
}

pub(crate) fn create_morph_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
) -> MorphResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("morph_shader"),
        source: wgpu::ShaderSource::Wgsl(helix_core::MORPH_WGSL.into()),
    });
    let bgl = uniform_bind_group_layout(device, "morph_bgl");
    let uniform_buffer = uniform_buffer::<MorphUniforms>(device, "morph_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("morph_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("morph_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    // slot 1/2: keyframe A/B positions, 3: normals, 4: per-particle seed
    let buffers = [
        QUAD_LAYOUT,
        instance_layout(VEC3_STRIDE, &POS_A_ATTRS),
        instance_layout(VEC3_STRIDE, &POS_B_ATTRS),
        instance_layout(VEC3_STRIDE, &NORMAL_ATTRS),
        instance_layout(std::mem::size_of::<f32>() as u64, &RANDOM_ATTRS),
    ];
    let pipeline = make_particle_pipeline(device, "morph_pipeline", &pl, &shader, &buffers, format);
    MorphResources {
        pipeline,
        uniform_buffer,
        bind_group,
        keyframes: None,
    }
}
