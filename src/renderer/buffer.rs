use std::mem;

use super::device::{BufferTarget, Device};
use super::error::BuildError;
use super::vertex::{Triangle, INDICES, VERTEX_COUNT};

const FLOAT: usize = mem::size_of::<f32>();

/// Byte offset of the color block: positions come first.
pub const COLOR_OFFSET: usize = VERTEX_COUNT * 3 * FLOAT;
/// Positions followed by colors.
pub const VERTEX_BUFFER_LEN: usize = VERTEX_COUNT * 7 * FLOAT;

/// Creates a vertex buffer holding the triangle's positions followed by its
/// colors, uploaded as two separate ranges.
pub fn upload_geometry<D: Device>(device: &D, triangle: &Triangle) -> Result<D::Buffer, BuildError> {
    let buffer = device
        .create_buffer()
        .ok_or(BuildError::CreateObject("vertex buffer"))?;

    device.bind_buffer(BufferTarget::Vertices, buffer);
    device.allocate_buffer(BufferTarget::Vertices, VERTEX_BUFFER_LEN);
    device.buffer_sub_data(BufferTarget::Vertices, 0, &triangle.position_bytes());
    device.buffer_sub_data(BufferTarget::Vertices, COLOR_OFFSET, &triangle.color_bytes());

    Ok(buffer)
}

/// Attaches a new index buffer holding `INDICES` to `vertex_array`.
pub fn upload_indices<D: Device>(
    device: &D,
    vertex_array: D::VertexArray,
) -> Result<D::Buffer, BuildError> {
    let buffer = device
        .create_buffer()
        .ok_or(BuildError::CreateObject("index buffer"))?;

    let bytes: Vec<u8> = INDICES.iter().flat_map(|i| i.to_ne_bytes()).collect();
    device.bind_vertex_array(vertex_array);
    device.bind_buffer(BufferTarget::Indices, buffer);
    device.buffer_data(BufferTarget::Indices, &bytes);

    Ok(buffer)
}
