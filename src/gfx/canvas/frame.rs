//! # Scoped Frames of Reference
//!
//! [`FrameGuard`] is returned by [`Canvas::push_frame`]. While it is alive,
//! everything drawn through it is expressed in the pushed frame. Dropping it
//! restores the previous model-view matrix, whichever way the scope is left.

use super::Canvas;
use std::ops::{Deref, DerefMut};

/// Restores the canvas transform when dropped.
///
/// The guard mutably borrows the canvas, so nested frames can only be pushed
/// through the guard itself and are always released innermost first.
///
/// ```
/// use cgmath::Vector3;
/// use fiducials_draw::gfx::canvas::Canvas;
/// use fiducials_draw::math::RigidTransform;
///
/// let mut canvas = Canvas::new();
/// {
///     let mut frame = canvas.push_frame(&RigidTransform::from_translation(Vector3::unit_x()));
///     frame.line3(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y()).unwrap();
/// }
/// assert_eq!(canvas.frame_depth(), 0);
/// ```
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct FrameGuard<'a> {
    canvas: &'a mut Canvas,
    depth: usize,
}

impl<'a> FrameGuard<'a> {
    pub(super) fn new(canvas: &'a mut Canvas, depth: usize) -> Self {
        Self { canvas, depth }
    }

    /// Stack depth this guard will restore to.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Deref for FrameGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.canvas.pop_frame(self.depth);
    }
}
