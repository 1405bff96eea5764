//! Debug Line Renderer
//!
//! Uploads a [`DrawList`] to the GPU and draws it with two small pipelines, one
//! for line segments and one for points. Vertices are already in world space,
//! so the only per-frame state is the view-projection matrix.
//!
//! Image blits are drawn last as window-space textured quads, on top of the
//! lines, using the window size set with
//! [`set_viewport_size`](DebugLineRenderer::set_viewport_size).
//!
//! Vertex buffers grow on demand and are reused across frames.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, SquareMatrix};
use log::debug;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, TextureFormat};

use super::blit_texture::{texture_bind_group_layout, BlitTexture, BlitVertex, ViewportUniform};
use crate::gfx::canvas::{ColorVertex, DrawList};
use crate::wgpu_utils::{uniform_binding, UniformBuffer};

/// Smallest vertex buffer allocated, in vertices.
const MIN_VERTEX_CAPACITY: u64 = 1024;

/// View-projection uniform. MUST match `ViewUniform` in `debug_lines.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for ViewUniform {
    fn from(m: Matrix4<f32>) -> Self {
        Self { view_proj: m.into() }
    }
}

/// Pipeline settings for the debug renderer.
#[derive(Debug, Clone, Copy)]
pub struct DebugRendererConfig {
    /// Depth attachment format of the pass the renderer draws into, if any.
    pub depth_format: Option<TextureFormat>,
    /// Whether debug geometry is hidden behind scene geometry.
    pub depth_test: bool,
}

impl Default for DebugRendererConfig {
    fn default() -> Self {
        Self {
            depth_format: Some(TextureFormat::Depth32Float),
            depth_test: true,
        }
    }
}

/// Number of vertex slots to allocate for `needed` vertices.
fn grown_capacity(needed: u64) -> u64 {
    needed.next_power_of_two().max(MIN_VERTEX_CAPACITY)
}

struct VertexStream {
    label: &'static str,
    buffer: Option<Buffer>,
    capacity: u64,
    count: u32,
}

impl VertexStream {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            count: 0,
        }
    }

    fn upload(&mut self, device: &Device, queue: &Queue, vertices: &[ColorVertex]) {
        self.count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        let needed = vertices.len() as u64;
        if self.buffer.is_none() || needed > self.capacity {
            let capacity = grown_capacity(needed);
            debug!("{}: allocating room for {} vertices", self.label, capacity);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity * std::mem::size_of::<ColorVertex>() as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
        }
    }

    fn draw<'a>(&'a self, render_pass: &mut RenderPass<'a>, pipeline: &'a RenderPipeline) {
        let Some(buffer) = &self.buffer else {
            return;
        };
        if self.count == 0 {
            return;
        }
        let bytes = self.count as u64 * std::mem::size_of::<ColorVertex>() as u64;
        render_pass.set_pipeline(pipeline);
        render_pass.set_vertex_buffer(0, buffer.slice(..bytes));
        render_pass.draw(0..self.count, 0..1);
    }
}

/// Draws recorded debug geometry.
pub struct DebugLineRenderer {
    line_pipeline: RenderPipeline,
    point_pipeline: RenderPipeline,
    view_uniform: UniformBuffer<ViewUniform>,
    bind_group: BindGroup,
    lines: VertexStream,
    points: VertexStream,
    blit_pipeline: RenderPipeline,
    viewport_uniform: UniformBuffer<ViewportUniform>,
    viewport_bind_group: BindGroup,
    texture_layout: BindGroupLayout,
    blits: Vec<BlitTexture>,
    enabled: bool,
}

impl DebugLineRenderer {
    pub fn new(device: &Device, surface_format: TextureFormat, config: DebugRendererConfig) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Debug Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/debug_lines.wgsl").into()),
        });

        let view_uniform = UniformBuffer::new_with_data(device, &ViewUniform::from(Matrix4::identity()));

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Debug Line View Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: uniform_binding(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Debug Line View Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_uniform.binding_resource(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Debug Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let line_pipeline = Self::create_pipeline(
            device,
            &layout,
            &shader,
            surface_format,
            &config,
            wgpu::PrimitiveTopology::LineList,
            "Debug Line Pipeline",
        );
        let point_pipeline = Self::create_pipeline(
            device,
            &layout,
            &shader,
            surface_format,
            &config,
            wgpu::PrimitiveTopology::PointList,
            "Debug Point Pipeline",
        );

        let viewport_uniform = UniformBuffer::new_with_data(device, &ViewportUniform::new(1, 1));
        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Image Blit Viewport Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: uniform_binding(),
                count: None,
            }],
        });
        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Image Blit Viewport Bind Group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_uniform.binding_resource(),
            }],
        });
        let texture_layout = texture_bind_group_layout(device);
        let blit_pipeline =
            Self::create_blit_pipeline(device, &viewport_layout, &texture_layout, surface_format, &config);

        Self {
            line_pipeline,
            point_pipeline,
            view_uniform,
            bind_group,
            lines: VertexStream::new("Debug Line Vertex Buffer"),
            points: VertexStream::new("Debug Point Vertex Buffer"),
            blit_pipeline,
            viewport_uniform,
            viewport_bind_group,
            texture_layout,
            blits: Vec::new(),
            enabled: true,
        }
    }

    fn create_blit_pipeline(
        device: &Device,
        viewport_layout: &BindGroupLayout,
        texture_layout: &BindGroupLayout,
        surface_format: TextureFormat,
        config: &DebugRendererConfig,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Image Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/image_blit.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Image Blit Pipeline Layout"),
            bind_group_layouts: &[viewport_layout, texture_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Image Blit Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[BlitVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Blits are overlays: never depth tested, never written to depth.
            depth_stencil: config.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: TextureFormat,
        config: &DebugRendererConfig,
        topology: wgpu::PrimitiveTopology,
        label: &str,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[ColorVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: config.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: false,
                depth_compare: if config.depth_test {
                    wgpu::CompareFunction::LessEqual
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Sets the camera used for the next render.
    pub fn set_view_projection(&mut self, queue: &Queue, view_proj: Matrix4<f32>) {
        self.view_uniform.update_content(queue, view_proj.into());
    }

    /// Sets the window size, in pixels, that blit origins are measured in.
    pub fn set_viewport_size(&mut self, queue: &Queue, width: u32, height: u32) {
        self.viewport_uniform
            .update_content(queue, ViewportUniform::new(width, height));
    }

    /// Replaces the GPU copy of the debug geometry with `list`.
    pub fn upload(&mut self, device: &Device, queue: &Queue, list: &DrawList) {
        if list.is_empty() {
            debug!("uploading empty draw list");
        }
        self.lines.upload(device, queue, list.line_vertices());
        self.points.upload(device, queue, list.point_vertices());

        self.blits = list
            .images()
            .iter()
            .enumerate()
            .filter_map(|(i, image)| {
                let blit = BlitTexture::from_image(
                    device,
                    queue,
                    &self.texture_layout,
                    image,
                    &format!("Image Blit {}", i),
                );
                if blit.is_none() {
                    debug!("skipping empty {}x{} image blit", image.width, image.height);
                }
                blit
            })
            .collect();
    }

    /// Records draw commands into `render_pass`.
    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        if !self.enabled {
            return;
        }
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        self.lines.draw(render_pass, &self.line_pipeline);
        self.points.draw(render_pass, &self.point_pipeline);

        if self.blits.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.blit_pipeline);
        render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);
        for blit in &self.blits {
            render_pass.set_bind_group(1, &blit.bind_group, &[]);
            render_pass.set_vertex_buffer(0, blit.quad.slice(..));
            render_pass.draw(0..4, 0..1);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Segments in the last upload.
    pub fn line_count(&self) -> u32 {
        self.lines.count / 2
    }

    /// Points in the last upload.
    pub fn point_count(&self) -> u32 {
        self.points.count
    }

    /// Image blits in the last upload.
    pub fn blit_count(&self) -> usize {
        self.blits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_uniform_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0f32, 2.0, 3.0));
        let uniform = ViewUniform::from(m);
        assert_eq!(uniform.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<ViewUniform>(), 64);
    }

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = ColorVertex::desc();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(1), MIN_VERTEX_CAPACITY);
        assert_eq!(grown_capacity(1024), 1024);
        assert_eq!(grown_capacity(1025), 2048);
        assert_eq!(grown_capacity(5000), 8192);
    }
}
