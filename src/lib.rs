//! Two triangles, two shader programs: one fragment shader interpolates the
//! vertex colors, the other paints solid yellow.

pub mod config;
pub mod renderer;
pub mod snapshot;
pub mod surface;
