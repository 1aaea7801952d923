pub type Position = [f32; 3];
pub type Color = [f32; 4];

pub const VERTEX_COUNT: usize = 3;

pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];

/// Per-vertex colors, uploaded for both triangles.
pub const COLORS: [Color; VERTEX_COUNT] = [RED, GREEN, BLUE];

pub const INDICES: [u32; VERTEX_COUNT] = [0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Position; VERTEX_COUNT],
    pub colors: [Color; VERTEX_COUNT],
}

/// Lower-left and upper-right halves of a square centered on the origin,
/// sharing the diagonal from (-0.5, 0.5) to (0.5, -0.5).
pub const TRIANGLES: [Triangle; 2] = [
    Triangle {
        positions: [[-0.5, 0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, -0.5, 0.0]],
        colors: COLORS,
    },
    Triangle {
        positions: [[-0.5, 0.5, 0.0], [0.5, -0.5, 0.0], [0.5, 0.5, 0.0]],
        colors: COLORS,
    },
];

fn to_bytes(floats: impl IntoIterator<Item = f32>) -> Vec<u8> {
    floats.into_iter().flat_map(f32::to_ne_bytes).collect()
}

impl Triangle {
    pub fn position_bytes(&self) -> Vec<u8> {
        to_bytes(self.positions.iter().flatten().copied())
    }

    pub fn color_bytes(&self) -> Vec<u8> {
        to_bytes(self.colors.iter().flatten().copied())
    }

    pub fn centroid(&self) -> [f32; 2] {
        let [a, b, c] = self.positions;
        [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0]
    }

    /// Barycentric weights of `p` in the xy plane, or `None` outside the
    /// triangle.
    pub fn barycentric(&self, p: [f32; 2]) -> Option<[f32; 3]> {
        let [a, b, c] = self.positions;
        let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let wa = ((b[1] - c[1]) * (p[0] - c[0]) + (c[0] - b[0]) * (p[1] - c[1])) / det;
        let wb = ((c[1] - a[1]) * (p[0] - c[0]) + (a[0] - c[0]) * (p[1] - c[1])) / det;
        let wc = 1.0 - wa - wb;

        let eps = 1e-6;
        if wa < -eps || wb < -eps || wc < -eps {
            None
        } else {
            Some([wa, wb, wc])
        }
    }

    /// The color the rasterizer interpolates at `p` from the vertex colors.
    pub fn interpolate_color(&self, p: [f32; 2]) -> Option<Color> {
        let weights = self.barycentric(p)?;
        let mut color = [0.0; 4];
        for (weight, vertex) in weights.iter().zip(self.colors.iter()) {
            for (channel, value) in color.iter_mut().zip(vertex.iter()) {
                *channel += weight * value;
            }
        }
        Some(color)
    }

    /// `p` moved `t` of the way from vertex `corner` toward the centroid.
    pub fn toward_centroid(&self, corner: usize, t: f32) -> [f32; 2] {
        let [cx, cy] = self.centroid();
        let v = self.positions[corner];
        [v[0] + (cx - v[0]) * t, v[1] + (cy - v[1]) * t]
    }
}
