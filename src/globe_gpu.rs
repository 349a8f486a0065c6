// globe_gpu.rs — globe 场景的 GPU 侧：管线、缓冲、uniform 上传

use wgpu::util::DeviceExt;

use crate::camera::GlobeCamera;
use crate::scene::{self, GlobeScene};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    misc: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Lights {
    ambient: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    eye: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    pos: [f32; 3],
    normal: [f32; 3],
}

/// 三个物体各自一份 Globals + 绑定组，灯光 uniform 共享。
pub struct GlobeGpu {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,

    sphere_vertex_buf: wgpu::Buffer,
    sphere_index_buf: wgpu::Buffer,
    sphere_index_count: u32,
    line_vertex_buf: wgpu::Buffer,
    line_vertex_count: u32,
    particle_instance_buf: wgpu::Buffer,
    particle_count: u32,

    sphere_globals: wgpu::Buffer,
    wireframe_globals: wgpu::Buffer,
    particle_globals: wgpu::Buffer,
    lights_buf: wgpu::Buffer,

    sphere_bind_group: wgpu::BindGroup,
    wireframe_bind_group: wgpu::BindGroup,
    particle_bind_group: wgpu::BindGroup,
}

fn globals_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<Globals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl GlobeGpu {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene: &GlobeScene,
    ) -> Self {
        // --- 顶点数据 ---
        let mesh_verts: Vec<MeshVertex> = scene
            .sphere
            .positions
            .iter()
            .zip(scene.sphere.normals.iter())
            .map(|(p, n)| MeshVertex { pos: *p, normal: *n })
            .collect();

        let sphere_vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere vertices"),
            contents: bytemuck::cast_slice(&mesh_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere indices"),
            contents: bytemuck::cast_slice(&scene.sphere.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let line_vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wireframe lines"),
            contents: bytemuck::cast_slice(&scene.wireframe_lines),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let particle_instance_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle centers"),
            contents: bytemuck::cast_slice(&scene.particles),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // --- Uniform ---
        let sphere_globals = globals_buffer(device, "sphere globals");
        let wireframe_globals = globals_buffer(device, "wireframe globals");
        let particle_globals = globals_buffer(device, "particle globals");

        let lights_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globe lights"),
            size: std::mem::size_of::<Lights>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globe bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let make_bind_group = |label: &str, globals: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: globals.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lights_buf.as_entire_binding(),
                    },
                ],
            })
        };
        let sphere_bind_group = make_bind_group("sphere bind group", &sphere_globals);
        let wireframe_bind_group = make_bind_group("wireframe bind group", &wireframe_globals);
        let particle_bind_group = make_bind_group("particle bind group", &particle_globals);

        // --- 管线 ---
        let shader = device.create_shader_module(wgpu::include_wgsl!("shader_globe.wgsl"));
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let blend_target = |format| {
            Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })
        };

        let mesh_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                },
                wgpu::VertexAttribute {
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                },
            ],
        };

        let pos_only_layout = |step_mode| wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode,
            attributes: &[wgpu::VertexAttribute {
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
            }],
        };

        let make_pipeline = |label: &str,
                             vs: &str,
                             fs: &str,
                             buffers: &[wgpu::VertexBufferLayout],
                             topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: vs,
                    buffers,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: fs,
                    targets: &[blend_target(surface_format)],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                // 半透明叠加按加入场景的顺序绘制，不需要深度缓冲
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            })
        };

        let mesh_pipeline = make_pipeline(
            "globe mesh pipeline",
            "vs_mesh",
            "fs_mesh",
            &[mesh_vertex_layout],
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = make_pipeline(
            "globe line pipeline",
            "vs_line",
            "fs_line",
            &[pos_only_layout(wgpu::VertexStepMode::Vertex)],
            wgpu::PrimitiveTopology::LineList,
        );
        let point_pipeline = make_pipeline(
            "globe point pipeline",
            "vs_point",
            "fs_point",
            &[pos_only_layout(wgpu::VertexStepMode::Instance)],
            wgpu::PrimitiveTopology::TriangleStrip,
        );

        Self {
            mesh_pipeline,
            line_pipeline,
            point_pipeline,
            sphere_vertex_buf,
            sphere_index_buf,
            sphere_index_count: scene.sphere.indices.len() as u32,
            line_vertex_buf,
            line_vertex_count: scene.wireframe_lines.len() as u32,
            particle_instance_buf,
            particle_count: scene.particles.len() as u32,
            sphere_globals,
            wireframe_globals,
            particle_globals,
            lights_buf,
            sphere_bind_group,
            wireframe_bind_group,
            particle_bind_group,
        }
    }

    /// 每帧上传最新的旋转矩阵与相机参数。
    pub fn prepare(&self, queue: &wgpu::Queue, scene: &GlobeScene, camera: &GlobeCamera) {
        let proj = camera.proj().to_cols_array_2d();
        let view = camera.view().to_cols_array_2d();

        let write = |buf: &wgpu::Buffer, model: glam::Mat4, color: u32, opacity: f32, size: f32| {
            let rgb = scene::rgb(color);
            let g = Globals {
                proj,
                view,
                model: model.to_cols_array_2d(),
                color: [rgb[0], rgb[1], rgb[2], opacity],
                misc: [size, 0.0, 0.0, 0.0],
            };
            queue.write_buffer(buf, 0, bytemuck::bytes_of(&g));
        };

        write(
            &self.sphere_globals,
            scene.sphere_model(),
            scene::SPHERE_COLOR,
            scene::SPHERE_OPACITY,
            0.0,
        );
        write(
            &self.wireframe_globals,
            scene.wireframe_model(),
            scene::WIREFRAME_COLOR,
            scene::WIREFRAME_OPACITY,
            0.0,
        );
        write(
            &self.particle_globals,
            scene.particles_model(),
            scene::PARTICLE_COLOR,
            scene::PARTICLE_OPACITY,
            scene::PARTICLE_SIZE,
        );

        let ambient = scene.ambient;
        let point = scene.point_light;
        let eye = camera.eye();
        let lights = Lights {
            ambient: [
                ambient.color[0],
                ambient.color[1],
                ambient.color[2],
                ambient.intensity,
            ],
            light_pos: [point.position.x, point.position.y, point.position.z, 1.0],
            light_color: [point.color[0], point.color[1], point.color[2], point.intensity],
            eye: [eye.x, eye.y, eye.z, 1.0],
        };
        queue.write_buffer(&self.lights_buf, 0, bytemuck::bytes_of(&lights));
    }

    /// 按加入场景的顺序绘制：球体、线框、粒子。
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        rpass.set_pipeline(&self.mesh_pipeline);
        rpass.set_bind_group(0, &self.sphere_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.sphere_vertex_buf.slice(..));
        rpass.set_index_buffer(self.sphere_index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.sphere_index_count, 0, 0..1);

        rpass.set_pipeline(&self.line_pipeline);
        rpass.set_bind_group(0, &self.wireframe_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.line_vertex_buf.slice(..));
        rpass.draw(0..self.line_vertex_count, 0..1);

        rpass.set_pipeline(&self.point_pipeline);
        rpass.set_bind_group(0, &self.particle_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.particle_instance_buf.slice(..));
        rpass.draw(0..4, 0..self.particle_count);
    }
}
