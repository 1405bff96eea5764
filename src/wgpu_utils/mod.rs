//! WGPU utility functions and helpers
//!
//! Small typed wrappers around buffers used by the debug renderer.

pub mod uniform_buffer;

pub use uniform_buffer::UniformBuffer;

/// Binding type for a plain uniform buffer.
pub fn uniform_binding() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
    }
}
