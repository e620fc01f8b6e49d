//! Subdivided plane mesh data.
//!
//! Planes are built centered on the origin in the XY plane; the frame loop
//! positions them with a per-mesh translation. The grid is subdivided so the
//! vertex shader has interior vertices to displace.

/// Segment count per axis. A flat quad would collapse the wave displacement.
pub const SEGMENTS: u32 = 10;

pub struct PlaneMesh {
    /// x, y, z per vertex, z always 0.
    pub positions: Vec<f32>,
    /// u, v per vertex; v grows upward so (0,0) is the bottom-left corner.
    pub uvs: Vec<f32>,
    /// Triangle list, counter-clockwise.
    pub indices: Vec<u16>,
}

impl PlaneMesh {
    /// Build a `width` × `height` grid with [`SEGMENTS`]² cells. Zero-sized
    /// inputs produce a degenerate but structurally valid mesh.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_segments(width, height, SEGMENTS, SEGMENTS)
    }

    pub fn with_segments(width: f32, height: f32, segs_x: u32, segs_y: u32) -> Self {
        let cols = segs_x + 1;
        let rows = segs_y + 1;
        let mut positions = Vec::with_capacity((cols * rows * 3) as usize);
        let mut uvs = Vec::with_capacity((cols * rows * 2) as usize);

        for row in 0..rows {
            let v = row as f32 / segs_y as f32;
            let y = (v - 0.5) * height;
            for col in 0..cols {
                let u = col as f32 / segs_x as f32;
                let x = (u - 0.5) * width;
                positions.extend_from_slice(&[x, y, 0.0]);
                uvs.extend_from_slice(&[u, v]);
            }
        }

        let mut indices = Vec::with_capacity((segs_x * segs_y * 6) as usize);
        for row in 0..segs_y {
            for col in 0..segs_x {
                let a = (row * cols + col) as u16;
                let b = a + 1;
                let c = a + cols as u16;
                let d = c + 1;
                indices.extend_from_slice(&[a, b, c, b, d, c]);
            }
        }

        Self {
            positions,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}
