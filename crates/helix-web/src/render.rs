mod helpers;
mod particles;

use helix_core::frame::KeyframePair;
use helix_core::geometry::HelixParticle;
use helix_core::keyframes::KeyframeSet;
use helix_core::{HelixUniforms, MorphUniforms};
use particles::{HelixResources, KeyframeBuffers, MorphResources};
use web_sys as web;
use wgpu::util::DeviceExt;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad_vb: wgpu::Buffer,
    helix: HelixResources,
    morph: MorphResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        helix_particles: &[HelixParticle],
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&helpers::QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let helix = particles::create_helix_resources(&device, format, helix_particles);
        let morph = particles::create_morph_resources(&device, format);
        log::info!(
            "[gpu] ready {}x{} format={:?} helix_particles={}",
            width,
            height,
            format,
            helix.count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad_vb,
            helix,
            morph,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.012,
                b: 0.03,
                a: 1.0,
            },
        })
    }

    /// Upload the morph's keyframe arrays. Called once when the model is ready.
    pub fn upload_keyframes(&mut self, set: &KeyframeSet) {
        let buffers = KeyframeBuffers::upload(&self.device, set);
        log::info!(
            "[gpu] uploaded {} keyframes x {} particles",
            buffers.positions.len(),
            buffers.count
        );
        self.morph.keyframes = Some(buffers);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw both fields. The morph is skipped when `morph` is `None` or its
    /// keyframes have not been uploaded.
    pub fn render(
        &mut self,
        helix: &HelixUniforms,
        morph: Option<(&MorphUniforms, KeyframePair)>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.queue
            .write_buffer(&self.helix.uniform_buffer, 0, bytemuck::bytes_of(helix));
        if let Some((u, _)) = morph {
            self.queue
                .write_buffer(&self.morph.uniform_buffer, 0, bytemuck::bytes_of(u));
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.helix.count > 0 {
                rpass.set_pipeline(&self.helix.pipeline);
                rpass.set_bind_group(0, &self.helix.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.helix.instances.slice(..));
                rpass.draw(0..6, 0..self.helix.count);
            }

            if let (Some((_, pair)), Some(kf)) = (morph, &self.morph.keyframes) {
                if let (Some(a), Some(b), Some(n)) = (
                    kf.positions.get(pair.a),
                    kf.positions.get(pair.b),
                    kf.normals.get(pair.a),
                ) {
                    rpass.set_pipeline(&self.morph.pipeline);
                    rpass.set_bind_group(0, &self.morph.bind_group, &[]);
                    rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                    rpass.set_vertex_buffer(1, a.slice(..));
                    rpass.set_vertex_buffer(2, b.slice(..));
                    rpass.set_vertex_buffer(3, n.slice(..));
                    rpass.set_vertex_buffer(4, kf.random.slice(..));
                    rpass.draw(0..6, 0..kf.count);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
