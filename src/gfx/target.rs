//! # Fiducial Targets
//!
//! A [`Target`] is a fixed layout of circular markers. Drawing one colors each
//! marker by its identity, spreading hues evenly around the color wheel, so a
//! detection that is mapped to the wrong marker shows up in the wrong color.

use crate::error::{DrawError, Result};
use crate::gfx::canvas::Canvas;
use crate::gfx::color::Color;
use crate::gfx::primitives::draw_circle;
use cgmath::Vector2;
use log::trace;

/// Circular markers at known positions, all with the same radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    circles: Vec<Vector2<f64>>,
    radius: f64,
}

impl Target {
    pub fn new(circles: Vec<Vector2<f64>>, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(DrawError::InvalidRadius(radius));
        }
        Ok(Self { circles, radius })
    }

    /// Regular `rows x cols` grid with `spacing` between marker centres,
    /// numbered row by row starting at the origin.
    pub fn grid(rows: u32, cols: u32, spacing: f64, radius: f64) -> Result<Self> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(DrawError::parameter("spacing", spacing));
        }
        let circles = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Vector2::new(c as f64 * spacing, r as f64 * spacing)))
            .collect();
        Self::new(circles, radius)
    }

    pub fn circles(&self) -> &[Vector2<f64>] {
        &self.circles
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Identity color of marker `index`.
    pub fn marker_color(&self, index: usize, saturation: f64, value: f64) -> Color {
        let hue = index as f64 * 360.0 / self.circles.len().max(1) as f64;
        Color::from_hsv(hue, saturation, value)
    }
}

/// Appearance of a drawn target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetStyle {
    /// Multiplies marker positions and the radius.
    pub scale: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Default for TargetStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            saturation: 1.0,
            value: 1.0,
        }
    }
}

impl TargetStyle {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DrawError::parameter("scale", self.scale));
        }
        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(DrawError::parameter("saturation", self.saturation));
        }
        if !(0.0..=1.0).contains(&self.value) {
            return Err(DrawError::parameter("value", self.value));
        }
        Ok(())
    }
}

fn draw_marker(
    canvas: &mut Canvas,
    target: &Target,
    index: usize,
    offset: Vector2<f64>,
    style: &TargetStyle,
) -> Result<()> {
    canvas.set_color(target.marker_color(index, style.saturation, style.value));
    let center = offset + target.circles[index] * style.scale;
    draw_circle(canvas, center, target.radius * style.scale)
}

/// Draws every marker of `target`, shifted by `offset`, colored by identity.
///
/// The canvas color is restored afterwards.
pub fn draw_target(canvas: &mut Canvas, target: &Target, offset: Vector2<f64>, style: &TargetStyle) -> Result<()> {
    style.validate()?;
    let previous = canvas.color();
    let result = (0..target.len()).try_for_each(|i| draw_marker(canvas, target, i, offset, style));
    canvas.set_color(previous);
    result
}

/// Draws the markers that observations were matched to.
///
/// `map[k]` is the marker identity assigned to observation `k`, or a negative
/// value when the observation was not identified. Unidentified entries are
/// skipped. The whole map is checked before anything is drawn, so an entry
/// naming a marker the target does not have leaves the canvas untouched.
pub fn draw_target_remapped(
    canvas: &mut Canvas,
    map: &[i32],
    target: &Target,
    offset: Vector2<f64>,
    style: &TargetStyle,
) -> Result<()> {
    style.validate()?;
    if let Some((entry, &marker)) = map
        .iter()
        .enumerate()
        .find(|(_, t)| **t >= 0 && **t as usize >= target.len())
    {
        return Err(DrawError::RemapIndexOutOfRange {
            entry,
            marker,
            len: target.len(),
        });
    }

    let previous = canvas.color();
    let mut identified = map.iter().filter(|&&t| t >= 0).map(|&t| t as usize);
    let mut drawn = 0usize;
    let result = identified.try_for_each(|t| {
        drawn += 1;
        draw_marker(canvas, target, t, offset, style)
    });
    canvas.set_color(previous);
    trace!("drew {} of {} remapped markers", drawn, map.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_target() -> Target {
        Target::grid(2, 3, 10.0, 2.0).unwrap()
    }

    #[test]
    fn test_grid_layout() {
        let target = small_target();
        assert_eq!(target.len(), 6);
        assert_eq!(target.circles()[0], Vector2::new(0.0, 0.0));
        assert_eq!(target.circles()[2], Vector2::new(20.0, 0.0));
        assert_eq!(target.circles()[3], Vector2::new(0.0, 10.0));
        assert!(Target::grid(2, 2, 0.0, 1.0).is_err());
        assert!(Target::new(vec![], -1.0).is_err());
    }

    #[test]
    fn test_draws_one_circle_per_marker() {
        let target = small_target();
        let mut canvas = Canvas::new();
        draw_target(&mut canvas, &target, Vector2::new(0.0, 0.0), &TargetStyle::default()).unwrap();
        let segments = canvas.style().circle_segments as usize;
        let list = canvas.finish().unwrap();
        assert_eq!(list.line_count(), target.len() * segments);
    }

    #[test]
    fn test_marker_colors_follow_identity() {
        let target = small_target();
        let mut canvas = Canvas::new();
        draw_target(&mut canvas, &target, Vector2::new(0.0, 0.0), &TargetStyle::default()).unwrap();
        assert_eq!(canvas.color(), Color::WHITE);

        let segments = canvas.style().circle_segments as usize;
        let list = canvas.finish().unwrap();
        let first = list.line_vertices()[0].color;
        let third = list.line_vertices()[2 * 2 * segments].color;
        assert_eq!(first, Color::RED.to_array());
        assert_eq!(third, Color::from_hsv(120.0, 1.0, 1.0).to_array());
    }

    #[test]
    fn test_scale_and_offset_move_markers() {
        let target = Target::new(vec![Vector2::new(1.0, 0.0)], 0.5).unwrap();
        let mut canvas = Canvas::new();
        let style = TargetStyle::default().with_scale(4.0);
        draw_target(&mut canvas, &target, Vector2::new(10.0, 10.0), &style).unwrap();
        let list = canvas.finish().unwrap();
        // First circle vertex sits at angle zero: centre (14, 10) plus radius 2.
        assert_eq!(list.line_vertices()[0].position, [16.0, 10.0, 0.0]);
    }

    #[test]
    fn test_remap_skips_unidentified_observations() {
        let target = small_target();
        let mut canvas = Canvas::new();
        draw_target_remapped(&mut canvas, &[-1, 4, -1, 0], &target, Vector2::new(0.0, 0.0), &TargetStyle::default())
            .unwrap();
        let segments = canvas.style().circle_segments as usize;
        let list = canvas.finish().unwrap();
        assert_eq!(list.line_count(), 2 * segments);
        assert_eq!(
            list.line_vertices()[0].color,
            target.marker_color(4, 1.0, 1.0).to_array()
        );
    }

    #[test]
    fn test_remap_out_of_range_draws_nothing() {
        let target = small_target();
        let mut canvas = Canvas::new();
        let err = draw_target_remapped(&mut canvas, &[0, 6], &target, Vector2::new(0.0, 0.0), &TargetStyle::default());
        assert_eq!(
            err,
            Err(DrawError::RemapIndexOutOfRange {
                entry: 1,
                marker: 6,
                len: 6
            })
        );
        assert!(canvas.finish().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let target = small_target();
        let mut canvas = Canvas::new();
        let origin = Vector2::new(0.0, 0.0);
        assert!(draw_target(&mut canvas, &target, origin, &TargetStyle::default().with_saturation(1.5)).is_err());
        assert!(draw_target(&mut canvas, &target, origin, &TargetStyle::default().with_value(-0.1)).is_err());
        assert!(draw_target(&mut canvas, &target, origin, &TargetStyle::default().with_scale(0.0)).is_err());
    }
}
