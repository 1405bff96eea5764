//! # Draw Style
//!
//! Appearance defaults shared by the drawing primitives. A [`DrawStyle`] lives
//! on each [`Canvas`](crate::gfx::canvas::Canvas) and can be replaced at any time.

use super::color::Color;

/// Default half-length of a cross marker.
pub const DEFAULT_CROSS_RADIUS: f64 = 5.0;

/// Number of segments used to approximate a circle.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 50;

/// Ground grid layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Lines on each side of the origin, per direction.
    pub num_lines: u32,
    /// Distance between neighbouring lines.
    pub line_delta: f64,
    pub color: Color,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            num_lines: 30,
            line_delta: 2.0,
            color: Color::rgb(0.5, 0.5, 0.5),
        }
    }
}

/// Appearance settings for debug geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub cross_radius: f64,
    pub circle_segments: u32,
    /// Colors of the x, y and z axis segments.
    pub axis_colors: [Color; 3],
    pub grid: GridStyle,
    /// Color a new canvas starts with.
    pub default_color: Color,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            cross_radius: DEFAULT_CROSS_RADIUS,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            axis_colors: [Color::RED, Color::GREEN, Color::BLUE],
            grid: GridStyle::default(),
            default_color: Color::WHITE,
        }
    }
}

impl DrawStyle {
    pub fn with_cross_radius(mut self, radius: f64) -> Self {
        self.cross_radius = radius;
        self
    }

    /// Circles need at least three segments to enclose anything.
    pub fn with_circle_segments(mut self, segments: u32) -> Self {
        self.circle_segments = segments.max(3);
        self
    }

    pub fn with_axis_colors(mut self, colors: [Color; 3]) -> Self {
        self.axis_colors = colors;
        self
    }

    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }
}
