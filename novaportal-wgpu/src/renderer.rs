use wgpu::util::DeviceExt;

use novaportal_gpu_shared::geometry;
use novaportal_gpu_shared::shaders;
use novaportal_gpu_shared::uniforms::{PerFrameUniforms, PerObjectUniforms};
use novaportal_lobby::controller::RenderSurface;
use novaportal_lobby::scene::{self, AmbientScene, Camera};

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

// Near-black clear behind the translucent geometry.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.008,
    g: 0.002,
    b: 0.012,
    a: 1.0,
};

fn accent_rgba(opacity: f32) -> [f32; 4] {
    [
        scene::ACCENT_COLOR[0],
        scene::ACCENT_COLOR[1],
        scene::ACCENT_COLOR[2],
        opacity,
    ]
}

/// Renderer state — owns all wgpu resources behind the backdrop.
pub struct BackdropRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,

    wireframe_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    per_frame_buffer: wgpu::Buffer,
    per_frame_bind_group: wgpu::BindGroup,
    torus_object_buffer: wgpu::Buffer,
    torus_bind_group: wgpu::BindGroup,
    particle_object_buffer: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,

    torus_vertex_buffer: wgpu::Buffer,
    torus_index_buffer: wgpu::Buffer,
    torus_index_count: u32,
    particle_vertex_buffer: wgpu::Buffer,
    particle_count: u32,
}

impl BackdropRenderer {
    /// Create the renderer from a raw window handle and upload the scene's
    /// static geometry (torus wireframe, particle centers). Geometry is
    /// uploaded once; per-frame work is uniform updates and draws only.
    pub fn new(
        window: impl raw_window_handle::HasWindowHandle
            + raw_window_handle::HasDisplayHandle
            + Send
            + Sync
            + 'static,
        width: u32,
        height: u32,
        scene: &AmbientScene,
    ) -> Result<Self, String> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or("Failed to find suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Nova Portal Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .map_err(|e| format!("Failed to create device: {e}"))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Uniform buffers and bind groups
        let per_frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Per-Frame Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let per_object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Per-Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let per_frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Per-Frame Uniforms"),
            size: std::mem::size_of::<PerFrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let torus_object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Torus Object Uniforms"),
            size: std::mem::size_of::<PerObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let particle_object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Object Uniforms"),
            size: std::mem::size_of::<PerObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let per_frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Per-Frame Bind Group"),
            layout: &per_frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: per_frame_buffer.as_entire_binding(),
            }],
        });

        let torus_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Torus Bind Group"),
            layout: &per_object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: torus_object_buffer.as_entire_binding(),
            }],
        });

        let particle_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &per_object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: particle_object_buffer.as_entire_binding(),
            }],
        });

        // Static geometry
        let torus = geometry::torus_wireframe(
            scene::TORUS_RADIUS,
            scene::TORUS_TUBE,
            scene::TORUS_RADIAL_SEGMENTS,
            scene::TORUS_TUBULAR_SEGMENTS,
        );

        let torus_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Torus Wireframe Vertices"),
            contents: bytemuck::cast_slice(&torus.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let torus_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Torus Wireframe Indices"),
            contents: bytemuck::cast_slice(&torus.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let particle_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Centers"),
            contents: bytemuck::cast_slice(&scene.particles.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Pipelines
        let wireframe_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wireframe Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::WIREFRAME_SHADER.into()),
        });

        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PARTICLES_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Backdrop Pipeline Layout"),
            bind_group_layouts: &[&per_frame_bind_group_layout, &per_object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let color_target = wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        };

        let wireframe_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Torus Wireframe Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &wireframe_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &POSITION_ATTRIBUTES,
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &wireframe_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(color_target.clone())],
            }),
            multiview: None,
            cache: None,
        });

        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Billboard Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &POSITION_ATTRIBUTES,
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(color_target)],
            }),
            multiview: None,
            cache: None,
        });

        log::info!(
            "Backdrop renderer initialized: {} ({})",
            adapter.get_info().name,
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            width,
            height,
            wireframe_pipeline,
            particle_pipeline,
            per_frame_buffer,
            per_frame_bind_group,
            torus_object_buffer,
            torus_bind_group,
            particle_object_buffer,
            particle_bind_group,
            torus_vertex_buffer,
            torus_index_buffer,
            torus_index_count: torus.indices.len() as u32,
            particle_vertex_buffer,
            particle_count: scene.particles.count() as u32,
        })
    }

    /// Resize the surface backing buffer in place. Nothing else is
    /// recreated.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    /// Render one frame of the scene/camera pair onto the surface.
    pub fn render(&mut self, scene: &AmbientScene, camera: &Camera) -> Result<(), String> {
        let frame = PerFrameUniforms {
            view: camera.view().to_cols_array_2d(),
            proj: camera.projection().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.per_frame_buffer, 0, bytemuck::bytes_of(&frame));

        let torus_object = PerObjectUniforms {
            model: scene.torus.model_matrix().to_cols_array_2d(),
            color: accent_rgba(scene::TORUS_OPACITY),
            params: [0.0; 4],
        };
        self.queue.write_buffer(
            &self.torus_object_buffer,
            0,
            bytemuck::bytes_of(&torus_object),
        );

        let particle_object = PerObjectUniforms {
            model: scene.particles.model_matrix().to_cols_array_2d(),
            color: accent_rgba(scene::PARTICLE_OPACITY),
            params: [scene::PARTICLE_SIZE / 2.0, 0.0, 0.0, 0.0],
        };
        self.queue.write_buffer(
            &self.particle_object_buffer,
            0,
            bytemuck::bytes_of(&particle_object),
        );

        let output = self
            .surface
            .get_current_texture()
            .map_err(|e| format!("Surface texture error: {e}"))?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_bind_group(0, &self.per_frame_bind_group, &[]);

            pass.set_pipeline(&self.wireframe_pipeline);
            pass.set_bind_group(1, &self.torus_bind_group, &[]);
            pass.set_vertex_buffer(0, self.torus_vertex_buffer.slice(..));
            pass.set_index_buffer(self.torus_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.torus_index_count, 0, 0..1);

            pass.set_pipeline(&self.particle_pipeline);
            pass.set_bind_group(1, &self.particle_bind_group, &[]);
            pass.set_vertex_buffer(0, self.particle_vertex_buffer.slice(..));
            pass.draw(0..6, 0..self.particle_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl RenderSurface for BackdropRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        BackdropRenderer::resize(self, width, height);
    }

    fn render(&mut self, scene: &AmbientScene, camera: &Camera) -> Result<(), String> {
        BackdropRenderer::render(self, scene, camera)
    }
}

impl Drop for BackdropRenderer {
    fn drop(&mut self) {
        // wgpu resources release with their owners
        log::info!("Backdrop renderer shut down");
    }
}
