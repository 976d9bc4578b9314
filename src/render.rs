use std::mem::size_of;

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use web_sys as web;

use crate::constants::{
    CAMERA_FOV_Y_RADIANS, CAMERA_Z_FAR, CAMERA_Z_NEAR, CLEAR_COLOR, GLOBE_RINGS, GLOBE_SEGMENTS,
    LIGHT_DIRECTION, MARKER_COLOR, MARKER_CONE_HEIGHT, MARKER_CONE_RADIUS, MARKER_CONE_SIDES,
    OCEAN_COLOR, STAR_COUNT, STAR_FIELD_EXTENT,
};
use crate::core::{SceneChoreographer, EARTH_RADIUS};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

struct Mesh {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
}

struct ObjectSlot {
    buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Star-field point cloud. Held in an Option so the handoff can release
/// the buffers while the decorative globe keeps rendering.
struct StarField {
    vertex_buf: wgpu::Buffer,
    count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    mesh_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    globals_buf: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    globe_slot: ObjectSlot,
    marker_slot: ObjectSlot,

    globe_mesh: Mesh,
    marker_mesh: Mesh,
    stars: Option<StarField>,

    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_entry(0)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_entry(0)],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineKind::Mesh,
        );
        let star_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineKind::Stars,
        );

        let globals_buf = create_uniform_buffer(&device, "globals", size_of::<Globals>());
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });
        let globe_slot = create_object_slot(&device, &object_layout, "globe");
        let marker_slot = create_object_slot(&device, &object_layout, "marker");

        let (globe_vertices, globe_indices) =
            build_uv_sphere(EARTH_RADIUS, GLOBE_SEGMENTS, GLOBE_RINGS);
        let globe_mesh = upload_mesh(&device, "globe", &globe_vertices, &globe_indices);
        let (marker_vertices, marker_indices) =
            build_cone(MARKER_CONE_RADIUS, MARKER_CONE_HEIGHT, MARKER_CONE_SIDES);
        let marker_mesh = upload_mesh(&device, "marker", &marker_vertices, &marker_indices);
        let stars = Some(build_star_field(&device));

        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            star_pipeline,
            globals_buf,
            globals_bind_group,
            globe_slot,
            marker_slot,
            globe_mesh,
            marker_mesh,
            stars,
            depth_view,
            width,
            height,
        })
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
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Drop the star-field buffers at handoff; the globe stays as the
    /// decorative background.
    pub fn release_star_field(&mut self) {
        self.stars = None;
    }

    pub fn render(&mut self, scene: &SceneChoreographer) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let cam = scene.camera();
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(CAMERA_FOV_Y_RADIANS, aspect, CAMERA_Z_NEAR, CAMERA_Z_FAR);
        let view_mat = Mat4::look_at_rh(cam.eye, cam.target, Vec3::Y);
        let globals = Globals {
            view_proj: (proj * view_mat).to_cols_array_2d(),
            camera_pos: [cam.eye.x, cam.eye.y, cam.eye.z, 1.0],
            light_dir: [LIGHT_DIRECTION[0], LIGHT_DIRECTION[1], LIGHT_DIRECTION[2], 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        let globe = scene.globe();
        let globe_model = Mat4::from_translation(Vec3::new(0.0, scene.float_offset(), 0.0))
            * Mat4::from_rotation_y(globe.rotation_angle);
        self.queue.write_buffer(
            &self.globe_slot.buf,
            0,
            bytemuck::bytes_of(&ObjectUniforms {
                model: globe_model.to_cols_array_2d(),
                color: OCEAN_COLOR,
                params: [1.0, 0.6, 0.0, 0.0],
            }),
        );

        let draw_marker = globe.marker_visible && globe.marker_scale > 0.0;
        if draw_marker {
            let marker_pos = scene.marker_world_position();
            let outward =
                (marker_pos - Vec3::new(0.0, scene.float_offset(), 0.0)).normalize_or_zero();
            let marker_model = Mat4::from_scale_rotation_translation(
                Vec3::splat(globe.marker_scale),
                Quat::from_rotation_arc(Vec3::Y, outward),
                marker_pos,
            );
            self.queue.write_buffer(
                &self.marker_slot.buf,
                0,
                bytemuck::bytes_of(&ObjectUniforms {
                    model: marker_model.to_cols_array_2d(),
                    color: MARKER_COLOR,
                    params: [0.0, 0.0, 0.0, 0.0],
                }),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: CLEAR_COLOR[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            if let Some(stars) = &self.stars {
                rpass.set_pipeline(&self.star_pipeline);
                // Stars reuse the globe slot's bind group; the star
                // shader entry points ignore the object uniforms.
                rpass.set_bind_group(1, &self.globe_slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, stars.vertex_buf.slice(..));
                rpass.draw(0..stars.count, 0..1);
            }

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(1, &self.globe_slot.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.globe_mesh.vertex_buf.slice(..));
            rpass.set_index_buffer(self.globe_mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.globe_mesh.index_count, 0, 0..1);

            if draw_marker {
                rpass.set_bind_group(1, &self.marker_slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.marker_mesh.vertex_buf.slice(..));
                rpass.set_index_buffer(
                    self.marker_mesh.index_buf.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                rpass.draw_indexed(0..self.marker_mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

enum PipelineKind {
    Mesh,
    Stars,
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, vs, fs, stride, attrs, topology, cull) = match kind {
        PipelineKind::Mesh => (
            "mesh_pipeline",
            "vs_mesh",
            "fs_mesh",
            size_of::<Vertex>() as wgpu::BufferAddress,
            vec![
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        ),
        PipelineKind::Stars => (
            "star_pipeline",
            "vs_star",
            "fs_star",
            12,
            vec![wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
            wgpu::PrimitiveTopology::PointList,
            None,
        ),
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attrs,
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: cull,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_object_slot(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> ObjectSlot {
    let buf = create_uniform_buffer(device, label, size_of::<ObjectUniforms>());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buf.as_entire_binding(),
        }],
    });
    ObjectSlot { buf, bind_group }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_mesh(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u32]) -> Mesh {
    use wgpu::util::DeviceExt;
    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    Mesh {
        vertex_buf,
        index_buf,
        index_count: indices.len() as u32,
    }
}

/// Standard UV sphere; normals point outward so the lambert term works
/// without a texture.
fn build_uv_sphere(radius: f32, segments: u32, rings: u32) -> (Vec<Vertex>, Vec<u32>) {
    use std::f32::consts::PI;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f32 / segments as f32;
            let n = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(Vertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
            });
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Cone with its apex at the origin and base circle at `+height` along
/// Y. The apex is placed on the globe surface, axis aligned with the
/// outward normal.
fn build_cone(radius: f32, height: f32, sides: u32) -> (Vec<Vertex>, Vec<u32>) {
    use std::f32::consts::TAU;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let slope = (radius / height).atan();
    for side in 0..sides {
        let a0 = TAU * side as f32 / sides as f32;
        let a1 = TAU * (side + 1) as f32 / sides as f32;
        let mid = (a0 + a1) * 0.5;
        let n = |angle: f32| {
            Vec3::new(
                angle.cos() * slope.cos(),
                slope.sin(),
                angle.sin() * slope.cos(),
            )
            .to_array()
        };
        let base = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, 0.0, 0.0],
            normal: n(mid),
        });
        vertices.push(Vertex {
            position: [radius * a0.cos(), height, radius * a0.sin()],
            normal: n(a0),
        });
        vertices.push(Vertex {
            position: [radius * a1.cos(), height, radius * a1.sin()],
            normal: n(a1),
        });
        indices.extend_from_slice(&[base, base + 2, base + 1]);
    }
    (vertices, indices)
}

fn build_star_field(device: &wgpu::Device) -> StarField {
    use wgpu::util::DeviceExt;
    let mut rng = rand::thread_rng();
    let half = STAR_FIELD_EXTENT * 0.5;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(STAR_COUNT);
    for _ in 0..STAR_COUNT {
        positions.push([
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        ]);
    }
    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("stars"),
        contents: bytemuck::cast_slice(&positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    StarField {
        vertex_buf,
        count: STAR_COUNT as u32,
    }
}
