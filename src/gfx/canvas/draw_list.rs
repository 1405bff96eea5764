//! # Draw Lists
//!
//! The output of a [`Canvas`](super::Canvas): world-space line segments, points
//! and image blits, ready to be uploaded by the renderer.

use super::vertex::ColorVertex;

/// How the vertices between `begin` and `end` are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Each vertex is a point.
    Points,
    /// Each pair of vertices is a segment.
    Lines,
    /// Consecutive vertices are joined.
    LineStrip,
    /// Consecutive vertices are joined and the last is joined to the first.
    LineLoop,
}

/// An RGBA8 image whose pixels already went through the pixel transfer scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlit {
    /// Raster position of the lower-left corner, in window coordinates.
    pub origin: [f32; 2],
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Geometry recorded by a canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub(crate) lines: Vec<ColorVertex>,
    pub(crate) points: Vec<ColorVertex>,
    pub(crate) images: Vec<ImageBlit>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line segment endpoints, two vertices per segment.
    pub fn line_vertices(&self) -> &[ColorVertex] {
        &self.lines
    }

    pub fn point_vertices(&self) -> &[ColorVertex] {
        &self.points
    }

    pub fn images(&self) -> &[ImageBlit] {
        &self.images
    }

    /// Number of line segments.
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Iterates over segments as `(start, end)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&ColorVertex, &ColorVertex)> {
        self.lines.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.points.is_empty() && self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
        self.images.clear();
    }

    /// Appends everything from `other`.
    pub fn extend(&mut self, other: DrawList) {
        self.lines.extend(other.lines);
        self.points.extend(other.points);
        self.images.extend(other.images);
    }

    /// Converts one closed batch into segments or points.
    pub(crate) fn push_batch(&mut self, topology: Topology, vertices: &[ColorVertex]) {
        match topology {
            Topology::Points => self.points.extend_from_slice(vertices),
            Topology::Lines => self.lines.extend_from_slice(vertices),
            Topology::LineStrip => self.push_strip(vertices),
            Topology::LineLoop => {
                self.push_strip(vertices);
                if let [first, .., last] = vertices {
                    self.lines.push(*last);
                    self.lines.push(*first);
                }
            }
        }
    }

    fn push_strip(&mut self, vertices: &[ColorVertex]) {
        for pair in vertices.windows(2) {
            self.lines.push(pair[0]);
            self.lines.push(pair[1]);
        }
    }
}
