//! Image blit textures
//!
//! Turns an [`ImageBlit`] recorded by a canvas into a sampled GPU texture plus
//! the window-space quad it is drawn on. The pixels were scaled by the canvas'
//! pixel transfer scale at record time, so the upload is a plain copy.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::gfx::canvas::ImageBlit;

/// Window size uniform. MUST match `Viewport` in `image_blit.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    _padding: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            _padding: [0.0; 2],
        }
    }
}

/// Corner of a blit quad, positioned in window pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BlitVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl BlitVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BlitVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Triangle-strip quad covering `image` in window coordinates (origin at the
/// lower left, y up). The first pixel row is the bottom row of the quad.
pub fn blit_quad(image: &ImageBlit) -> [BlitVertex; 4] {
    let [x0, y0] = image.origin;
    let x1 = x0 + image.width as f32;
    let y1 = y0 + image.height as f32;
    [
        BlitVertex {
            position: [x0, y0],
            tex_coords: [0.0, 0.0],
        },
        BlitVertex {
            position: [x1, y0],
            tex_coords: [1.0, 0.0],
        },
        BlitVertex {
            position: [x0, y1],
            tex_coords: [0.0, 1.0],
        },
        BlitVertex {
            position: [x1, y1],
            tex_coords: [1.0, 1.0],
        },
    ]
}

/// Layout of the per-image bind group: texture at binding 0, sampler at 1.
pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Image Blit Texture Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// GPU resources for one blitted image.
pub struct BlitTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub quad: wgpu::Buffer,
}

impl BlitTexture {
    /// Uploads `image` as an `Rgba8Unorm` texture with nearest filtering.
    ///
    /// Returns `None` for images with a zero dimension, which wgpu cannot
    /// allocate and which would cover no pixels anyway.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &ImageBlit,
        label: &str,
    ) -> Option<Self> {
        if image.width == 0 || image.height == 0 {
            return None;
        }

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Quad", label)),
            contents: bytemuck::cast_slice(&blit_quad(image)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Some(Self {
            texture,
            view,
            sampler,
            bind_group,
            quad,
        })
    }
}
