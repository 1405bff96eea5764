// src/gfx/rendering/mod.rs
//! GPU side of the debug drawing
//!
//! Uploads recorded draw lists and image blits and records draw commands.

pub mod blit_texture;
pub mod debug_renderer;

pub use blit_texture::{blit_quad, BlitTexture, BlitVertex, ViewportUniform};
pub use debug_renderer::{DebugLineRenderer, DebugRendererConfig, ViewUniform};
