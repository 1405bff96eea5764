//! # Immediate-Mode Canvas
//!
//! [`Canvas`] records debug geometry the way a fixed-function immediate-mode
//! context would draw it: `begin`, a run of vertices, `end`, with a current
//! color and a model-view matrix stack. Nothing is sent to the GPU here. The
//! recorded [`DrawList`] is handed to a renderer afterwards.
//!
//! ## Usage
//!
//! ```
//! use fiducials_draw::gfx::canvas::{Canvas, Topology};
//! use fiducials_draw::gfx::color::Color;
//!
//! let mut canvas = Canvas::new();
//! canvas.set_color(Color::YELLOW);
//! canvas.begin(Topology::LineLoop).unwrap();
//! canvas.vertex2(0.0, 0.0).unwrap();
//! canvas.vertex2(1.0, 0.0).unwrap();
//! canvas.vertex2(1.0, 1.0).unwrap();
//! canvas.end().unwrap();
//!
//! let list = canvas.finish().unwrap();
//! assert_eq!(list.line_count(), 3);
//! ```
//!
//! Each canvas owns its own state, including the pixel transfer scale, so two
//! canvases (one per window, say) never affect each other.

pub mod draw_list;
pub mod frame;
pub mod vertex;

pub use draw_list::{DrawList, ImageBlit, Topology};
pub use frame::FrameGuard;
pub use vertex::ColorVertex;

use crate::error::{DrawError, Result};
use crate::gfx::color::Color;
use crate::gfx::style::DrawStyle;
use crate::math::RigidTransform;
use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};
use log::{debug, trace, warn};

struct OpenBatch {
    topology: Topology,
    vertices: Vec<ColorVertex>,
}

/// Records immediate-mode style draw calls into a [`DrawList`].
pub struct Canvas {
    style: DrawStyle,
    color: Color,
    model_view: Matrix4<f64>,
    stack: Vec<Matrix4<f64>>,
    open: Option<OpenBatch>,
    pixel_transfer_scale: f32,
    list: DrawList,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_style(DrawStyle::default())
    }

    pub fn with_style(style: DrawStyle) -> Self {
        Self {
            color: style.default_color,
            style,
            model_view: Matrix4::identity(),
            stack: Vec::new(),
            open: None,
            pixel_transfer_scale: 1.0,
            list: DrawList::new(),
        }
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: DrawStyle) {
        self.style = style;
    }

    /// Color captured by subsequent vertices.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Current model-view matrix.
    pub fn model_view(&self) -> Matrix4<f64> {
        self.model_view
    }

    /// Number of frames currently pushed.
    pub fn frame_depth(&self) -> usize {
        self.stack.len()
    }

    /// Starts a batch of vertices.
    pub fn begin(&mut self, topology: Topology) -> Result<()> {
        if self.open.is_some() {
            return Err(DrawError::PrimitiveState("begin called inside an open primitive"));
        }
        self.open = Some(OpenBatch {
            topology,
            vertices: Vec::new(),
        });
        Ok(())
    }

    /// Adds a vertex on the local `z = 0` plane.
    pub fn vertex2(&mut self, x: f64, y: f64) -> Result<()> {
        self.vertex3(x, y, 0.0)
    }

    /// Adds a vertex, transformed by the current model-view matrix.
    pub fn vertex3(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let world = self.model_view * Vector4::new(x, y, z, 1.0);
        let vertex = ColorVertex::new(
            [world.x as f32, world.y as f32, world.z as f32],
            self.color.to_array(),
        );
        let batch = self
            .open
            .as_mut()
            .ok_or(DrawError::PrimitiveState("vertex outside begin/end"))?;
        batch.vertices.push(vertex);
        Ok(())
    }

    pub fn vertex(&mut self, p: Vector3<f64>) -> Result<()> {
        self.vertex3(p.x, p.y, p.z)
    }

    /// Closes the current batch and records it.
    pub fn end(&mut self) -> Result<()> {
        let batch = self
            .open
            .take()
            .ok_or(DrawError::PrimitiveState("end without begin"))?;
        if batch.topology == Topology::Lines && batch.vertices.len() % 2 != 0 {
            return Err(DrawError::PrimitiveState("odd number of vertices in a line batch"));
        }
        trace!(
            "recorded {:?} batch with {} vertices",
            batch.topology,
            batch.vertices.len()
        );
        self.list.push_batch(batch.topology, &batch.vertices);
        Ok(())
    }

    /// Records a single segment between two local 2D points.
    pub fn line2(&mut self, a: Vector2<f64>, b: Vector2<f64>) -> Result<()> {
        self.begin(Topology::Lines)?;
        self.vertex2(a.x, a.y)?;
        self.vertex2(b.x, b.y)?;
        self.end()
    }

    /// Records a single segment between two local 3D points.
    pub fn line3(&mut self, a: Vector3<f64>, b: Vector3<f64>) -> Result<()> {
        self.begin(Topology::Lines)?;
        self.vertex(a)?;
        self.vertex(b)?;
        self.end()
    }

    /// Pushes the current transform and multiplies `pose` into it.
    ///
    /// The previous transform is restored when the returned guard is dropped.
    pub fn push_frame(&mut self, pose: &RigidTransform) -> FrameGuard<'_> {
        let depth = self.stack.len();
        self.stack.push(self.model_view);
        self.model_view = self.model_view * pose.to_matrix4();
        FrameGuard::new(self, depth)
    }

    /// Runs `f` with `pose` pushed. The frame is popped even if `f` fails.
    pub fn with_frame<T, F>(&mut self, pose: &RigidTransform, f: F) -> Result<T>
    where
        F: FnOnce(&mut Canvas) -> Result<T>,
    {
        let mut frame = self.push_frame(pose);
        f(&mut *frame)
    }

    fn pop_frame(&mut self, depth: usize) {
        if self.stack.len() != depth + 1 {
            warn!(
                "frame at depth {} released with {} frames pushed",
                depth,
                self.stack.len()
            );
        }
        if let Some(saved) = self.stack.get(depth).copied() {
            self.model_view = saved;
            self.stack.truncate(depth);
        }
    }

    /// Scale applied to the RGB channels of subsequent image blits.
    pub fn pixel_transfer_scale(&self) -> f32 {
        self.pixel_transfer_scale
    }

    /// Sets the RGB scale used by every later [`blit_image`](Self::blit_image)
    /// until it is changed again.
    pub fn set_pixel_transfer_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(DrawError::parameter("pixel_transfer_scale", scale as f64));
        }
        self.pixel_transfer_scale = scale;
        Ok(())
    }

    /// Records an RGBA8 image at a window raster position.
    ///
    /// RGB channels are multiplied by the pixel transfer scale and saturated.
    /// Alpha is copied unchanged.
    pub fn blit_image(&mut self, origin: [f32; 2], width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(DrawError::ImageTooLarge { width, height })?;
        if rgba.len() != expected {
            return Err(DrawError::ImageSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        let scale = self.pixel_transfer_scale;
        let pixels = if scale == 1.0 {
            rgba.to_vec()
        } else {
            rgba.chunks_exact(4)
                .flat_map(|px| {
                    let s = |c: u8| (c as f32 * scale).round().min(255.0) as u8;
                    [s(px[0]), s(px[1]), s(px[2]), px[3]]
                })
                .collect()
        };

        self.list.images.push(ImageBlit {
            origin,
            width,
            height,
            pixels,
        });
        Ok(())
    }

    /// Recorded geometry so far.
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    /// Takes the recorded geometry, leaving the canvas empty.
    ///
    /// Color, style and pixel transfer scale are kept.
    pub fn finish(&mut self) -> Result<DrawList> {
        if self.open.is_some() {
            return Err(DrawError::PrimitiveState("finish called inside an open primitive"));
        }
        let list = std::mem::take(&mut self.list);
        debug!(
            "canvas finished: {} segments, {} points, {} images",
            list.line_count(),
            list.point_count(),
            list.images().len()
        );
        Ok(list)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Basis3, Deg, Rotation3};

    fn shifted(x: f64) -> RigidTransform {
        RigidTransform::from_translation(Vector3::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_strip_and_loop_expand_to_segments() {
        let mut canvas = Canvas::new();
        for topology in [Topology::LineStrip, Topology::LineLoop] {
            canvas.begin(topology).unwrap();
            for i in 0..4 {
                canvas.vertex2(i as f64, 0.0).unwrap();
            }
            canvas.end().unwrap();
        }
        let list = canvas.finish().unwrap();
        assert_eq!(list.line_count(), 3 + 4);
    }

    #[test]
    fn test_out_of_order_calls_are_rejected() {
        let mut canvas = Canvas::new();
        assert!(matches!(canvas.vertex2(0.0, 0.0), Err(DrawError::PrimitiveState(_))));
        assert!(matches!(canvas.end(), Err(DrawError::PrimitiveState(_))));

        canvas.begin(Topology::Points).unwrap();
        assert!(matches!(canvas.begin(Topology::Lines), Err(DrawError::PrimitiveState(_))));
        assert!(matches!(canvas.finish(), Err(DrawError::PrimitiveState(_))));
        canvas.end().unwrap();

        canvas.begin(Topology::Lines).unwrap();
        canvas.vertex2(0.0, 0.0).unwrap();
        assert!(matches!(canvas.end(), Err(DrawError::PrimitiveState(_))));
        assert!(canvas.finish().unwrap().is_empty());
    }

    #[test]
    fn test_vertices_capture_color_and_transform() {
        let mut canvas = Canvas::new();
        canvas.set_color(Color::GREEN);
        {
            let mut frame = canvas.push_frame(&shifted(2.0));
            frame.begin(Topology::Points).unwrap();
            frame.vertex3(1.0, 1.0, 1.0).unwrap();
            frame.end().unwrap();
        }
        let list = canvas.finish().unwrap();
        assert_eq!(list.point_vertices()[0].position, [3.0, 1.0, 1.0]);
        assert_eq!(list.point_vertices()[0].color, Color::GREEN.to_array());
    }

    #[test]
    fn test_nested_frames_restore_outer_transform() {
        let mut canvas = Canvas::new();
        let before = canvas.model_view();
        {
            let mut outer = canvas.push_frame(&shifted(1.0));
            let outer_mv = outer.model_view();
            {
                let rotated = RigidTransform::from_rotation(Basis3::from_angle_z(Deg(90.0)));
                let inner = outer.push_frame(&rotated);
                assert_eq!(inner.frame_depth(), 2);
            }
            assert_eq!(outer.model_view(), outer_mv);
            assert_eq!(outer.frame_depth(), 1);
        }
        assert_eq!(canvas.model_view(), before);
        assert_eq!(canvas.frame_depth(), 0);
    }

    #[test]
    fn test_with_frame_restores_on_error() {
        let mut canvas = Canvas::new();
        let result: Result<()> = canvas.with_frame(&shifted(5.0), |c| {
            c.with_frame(&shifted(1.0), |c| {
                c.end()?;
                Ok(())
            })
        });
        assert!(result.is_err());
        assert_eq!(canvas.frame_depth(), 0);
        assert_eq!(canvas.model_view(), Matrix4::identity());
    }

    #[test]
    fn test_frames_compose_in_order() {
        let mut canvas = Canvas::new();
        let rotate = RigidTransform::from_rotation(Basis3::from_angle_z(Deg(90.0)));
        canvas
            .with_frame(&shifted(1.0), |c| {
                c.with_frame(&rotate, |c| c.line3(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_x()))
            })
            .unwrap();
        let list = canvas.finish().unwrap();
        let (a, b) = list.segments().next().unwrap();
        assert_abs_diff_eq!(a.position[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.position[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.position[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pixel_transfer_scale_saturates_and_keeps_alpha() {
        let mut canvas = Canvas::new();
        canvas.set_pixel_transfer_scale(2.0).unwrap();
        canvas
            .blit_image([0.0, 0.0], 2, 1, &[10, 100, 200, 50, 0, 128, 255, 255])
            .unwrap();
        canvas.set_pixel_transfer_scale(1.0).unwrap();
        canvas.blit_image([0.0, 0.0], 1, 1, &[1, 2, 3, 4]).unwrap();

        let list = canvas.finish().unwrap();
        assert_eq!(list.images()[0].pixels, vec![20, 200, 255, 50, 0, 255, 255, 255]);
        assert_eq!(list.images()[1].pixels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pixel_transfer_scale_is_per_canvas() {
        let mut a = Canvas::new();
        let b = Canvas::new();
        a.set_pixel_transfer_scale(0.5).unwrap();
        assert_eq!(b.pixel_transfer_scale(), 1.0);
        assert!(a.set_pixel_transfer_scale(-1.0).is_err());
        assert!(a.set_pixel_transfer_scale(f32::NAN).is_err());
        assert_eq!(a.pixel_transfer_scale(), 0.5);
    }

    #[test]
    fn test_blit_rejects_wrong_buffer_size() {
        let mut canvas = Canvas::new();
        assert_eq!(
            canvas.blit_image([0.0, 0.0], 2, 2, &[0; 15]),
            Err(DrawError::ImageSize {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_blit_rejects_dimensions_that_overflow() {
        let mut canvas = Canvas::new();
        assert_eq!(
            canvas.blit_image([0.0, 0.0], u32::MAX, u32::MAX, &[]),
            Err(DrawError::ImageTooLarge {
                width: u32::MAX,
                height: u32::MAX
            })
        );
        assert!(canvas.finish().unwrap().images().is_empty());
    }

    #[test]
    fn test_forgotten_inner_frame_is_unwound_by_outer() {
        let mut canvas = Canvas::new();
        {
            let mut outer = canvas.push_frame(&shifted(1.0));
            std::mem::forget(outer.push_frame(&shifted(2.0)));
            assert_eq!(outer.frame_depth(), 2);
        }
        assert_eq!(canvas.frame_depth(), 0);
        assert_eq!(canvas.model_view(), Matrix4::identity());
    }
}
