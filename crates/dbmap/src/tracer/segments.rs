use crate::{color::Rgb, formulas::sum_levels, math::vec::Vec3};

use super::control::Interruption;

/// One leg of a ray, from where it started to the face it hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub origin: Vec3,
    pub end: Vec3,
    /// Level on arrival at `end`, in dB
    pub level: f64,
    pub color: Rgb,
    /// Number of reflections before this segment
    pub depth: u32,
    /// Index of the face hit in the mesh
    pub face: usize,
}

/// Everything a trace produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMap {
    /// In order of depth, then of emission
    pub segments: Vec<Segment>,
    /// Rays that left the room without hitting anything
    pub escaped: usize,
    /// Rays emitted by the source
    pub primary: usize,
    /// Rays cast, whether they hit or not
    pub rays_cast: usize,
    /// Set if the trace stopped before its queue was empty
    pub interruption: Option<Interruption>,
}

impl SegmentMap {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.interruption.is_none()
    }

    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().map(|s| s.level)
    }

    /// Energetic sum of every arrival level
    pub fn sum_level(&self) -> f64 {
        sum_levels(self.levels())
    }

    pub fn max_level(&self) -> Option<f64> {
        self.levels().reduce(f64::max)
    }

    pub fn by_depth(&self, depth: u32) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |s| s.depth == depth)
    }

    /// Two opaque vertices per segment, ready to be drawn as a line list
    pub fn vertex_buffer(&self) -> VertexBuffer {
        let vertices = self
            .segments
            .iter()
            .flat_map(|s| {
                let color = s.color.with_alpha(1.0).to_array();
                [
                    LineVertex {
                        position: s.origin.as_vec3().to_array(),
                        color,
                    },
                    LineVertex {
                        position: s.end.as_vec3().to_array(),
                        color,
                    },
                ]
            })
            .collect();
        VertexBuffer(vertices)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer(pub Vec<LineVertex>);

impl VertexBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }
}

impl std::ops::Deref for VertexBuffer {
    type Target = [LineVertex];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
