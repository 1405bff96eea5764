//! # Debug Primitives
//!
//! Free functions that record common debug shapes on a [`Canvas`]: rectangles,
//! cross markers, circles, axis gizmos, camera frustums and grids.
//!
//! Every function draws in the canvas' current frame of reference and with its
//! current color, except [`draw_axis`] which colors each axis from the style.

use crate::error::{DrawError, Result};
use crate::gfx::canvas::{Canvas, Topology};
use crate::math::{plane_basis, Plane, RigidTransform};
use cgmath::{Matrix3, Vector2, Vector3};
use std::f64::consts::TAU;

/// Integer pixel rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).abs()
    }
}

fn check_radius(r: f64) -> Result<()> {
    if r.is_finite() && r >= 0.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidRadius(r))
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DrawError::parameter(name, value))
    }
}

/// Outline of `rect` as a closed loop.
pub fn draw_rectangle(canvas: &mut Canvas, rect: &Rect) -> Result<()> {
    let (x1, y1, x2, y2) = (rect.x1 as f64, rect.y1 as f64, rect.x2 as f64, rect.y2 as f64);
    canvas.begin(Topology::LineLoop)?;
    canvas.vertex2(x1, y1)?;
    canvas.vertex2(x2, y1)?;
    canvas.vertex2(x2, y2)?;
    canvas.vertex2(x1, y2)?;
    canvas.end()
}

/// Cross marker centred at `(x, y)`: a vertical and a horizontal segment of
/// half-length `r`.
pub fn draw_cross(canvas: &mut Canvas, x: f64, y: f64, r: f64) -> Result<()> {
    draw_cross_3d(canvas, Vector3::new(x, y, 0.0), r)
}

pub fn draw_cross_2d(canvas: &mut Canvas, p: Vector2<f64>, r: f64) -> Result<()> {
    draw_cross(canvas, p.x, p.y, r)
}

/// Cross marker in the plane `z = p.z`.
pub fn draw_cross_3d(canvas: &mut Canvas, p: Vector3<f64>, r: f64) -> Result<()> {
    check_radius(r)?;
    canvas.begin(Topology::Lines)?;
    canvas.vertex3(p.x, p.y - r, p.z)?;
    canvas.vertex3(p.x, p.y + r, p.z)?;
    canvas.vertex3(p.x - r, p.y, p.z)?;
    canvas.vertex3(p.x + r, p.y, p.z)?;
    canvas.end()
}

/// Circle outline approximated with the style's segment count.
pub fn draw_circle(canvas: &mut Canvas, center: Vector2<f64>, radius: f64) -> Result<()> {
    check_radius(radius)?;
    let segments = canvas.style().circle_segments.max(3);
    canvas.begin(Topology::LineLoop)?;
    for i in 0..segments {
        let angle = TAU * i as f64 / segments as f64;
        canvas.vertex2(center.x + radius * angle.cos(), center.y + radius * angle.sin())?;
    }
    canvas.end()
}

/// Axis gizmo: x, y and z segments of length `length` from the origin.
///
/// Colors come from [`DrawStyle::axis_colors`](crate::gfx::style::DrawStyle);
/// the canvas color is left as it was.
pub fn draw_axis(canvas: &mut Canvas, length: f64) -> Result<()> {
    check_non_negative("axis_length", length)?;
    let previous = canvas.color();
    let colors = canvas.style().axis_colors;
    let axes = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];

    canvas.begin(Topology::Lines)?;
    for (axis, color) in axes.into_iter().zip(colors) {
        canvas.set_color(color);
        canvas.vertex3(0.0, 0.0, 0.0)?;
        canvas.vertex(axis * length)?;
    }
    canvas.set_color(previous);
    canvas.end()
}

/// Image corners back-projected through `k_inv` and scaled, in the order
/// top-left, top-right, bottom-left, bottom-right.
pub fn frustum_corners(k_inv: &Matrix3<f64>, width: u32, height: u32, scale: f64) -> [Vector3<f64>; 4] {
    let (w, h) = (width as f64, height as f64);
    [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)].map(|(u, v)| *k_inv * Vector3::new(u, v, 1.0) * scale)
}

/// Camera frustum at the origin: the optical centre joined to the four image
/// corners, plus the image-plane rectangle.
pub fn draw_frustum(canvas: &mut Canvas, k_inv: &Matrix3<f64>, width: u32, height: u32, scale: f64) -> Result<()> {
    check_non_negative("frustum_scale", scale)?;
    let [tl, tr, bl, br] = frustum_corners(k_inv, width, height, scale);
    let c = Vector3::new(0.0, 0.0, 0.0);

    canvas.begin(Topology::Lines)?;
    for (a, b) in [(c, tl), (c, tr), (c, bl), (c, br), (tl, tr), (tr, br), (br, bl), (bl, tl)] {
        canvas.vertex(a)?;
        canvas.vertex(b)?;
    }
    canvas.end()
}

/// Camera frustum placed at the camera pose `t_wf`.
pub fn draw_frustum_at(
    canvas: &mut Canvas,
    k_inv: &Matrix3<f64>,
    width: u32,
    height: u32,
    t_wf: &RigidTransform,
    scale: f64,
) -> Result<()> {
    canvas.with_frame(t_wf, |c| draw_frustum(c, k_inv, width, height, scale))
}

/// Grid on the local `z = 0` plane: `2 * grid + 1` lines in each direction,
/// `scale` apart, spanning `±grid * scale`.
pub fn draw_z0(canvas: &mut Canvas, scale: f64, grid: u32) -> Result<()> {
    check_non_negative("grid_scale", scale)?;
    let grid = grid as i64;
    let max = grid as f64 * scale;

    canvas.begin(Topology::Lines)?;
    for i in -grid..=grid {
        let d = i as f64 * scale;
        canvas.vertex2(d, -max)?;
        canvas.vertex2(d, max)?;
        canvas.vertex2(-max, d)?;
        canvas.vertex2(max, d)?;
    }
    canvas.end()
}

/// Grid drawn on an arbitrary plane.
pub fn draw_plane(canvas: &mut Canvas, plane: &Plane, scale: f64, grid: u32) -> Result<()> {
    let t_wp = plane_basis(plane)?;
    canvas.with_frame(&t_wp, |c| draw_z0(c, scale, grid))
}

/// Ground grid using the style's grid settings and color.
pub fn draw_grid(canvas: &mut Canvas) -> Result<()> {
    let grid = canvas.style().grid;
    draw_grid_with(canvas, grid.num_lines, grid.line_delta)
}

/// Ground grid with explicit line count and spacing, in the style's grid color.
pub fn draw_grid_with(canvas: &mut Canvas, num_lines: u32, line_delta: f64) -> Result<()> {
    let previous = canvas.color();
    let grid_color = canvas.style().grid.color;
    canvas.set_color(grid_color);
    let result = draw_z0(canvas, line_delta, num_lines);
    canvas.set_color(previous);
    result
}
