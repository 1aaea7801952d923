use super::vertex::{Color, Triangle, YELLOW};

/// Shared by both programs: passes `vColor` through as `color`.
pub const VERTEX_SHADER: &str = include_str!("../data/triangle.vert");
pub const INTERPOLATED_FRAGMENT: &str = include_str!("../data/interpolated.frag");
pub const YELLOW_FRAGMENT: &str = include_str!("../data/yellow.frag");

pub const POSITION_ATTRIBUTE: &str = "vPosition";
pub const COLOR_ATTRIBUTE: &str = "vColor";

/// What a fragment shader writes for a covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fragment {
    /// Writes the color interpolated from the vertices.
    Interpolated,
    /// Writes opaque yellow and ignores the vertex colors.
    Yellow,
}

impl Fragment {
    pub fn source(&self) -> &'static str {
        match self {
            Fragment::Interpolated => INTERPOLATED_FRAGMENT,
            Fragment::Yellow => YELLOW_FRAGMENT,
        }
    }

    /// Color this shader produces at `p`, if `p` lies inside `triangle`.
    pub fn shade(&self, triangle: &Triangle, p: [f32; 2]) -> Option<Color> {
        match self {
            Fragment::Interpolated => triangle.interpolate_color(p),
            Fragment::Yellow => triangle.barycentric(p).map(|_| YELLOW),
        }
    }
}
