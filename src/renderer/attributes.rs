use super::buffer::COLOR_OFFSET;
use super::device::{BufferTarget, Device};
use super::error::BuildError;
use super::shader::{COLOR_ATTRIBUTE, POSITION_ATTRIBUTE};

/// Points the program's `vPosition` and `vColor` inputs at the layout
/// written by `upload_geometry`.
///
/// A program whose fragment stage ignores the color may have `vColor`
/// optimized away; that attribute is then left disabled.
pub fn bind_attributes<D: Device>(
    device: &D,
    vertex_array: D::VertexArray,
    buffer: D::Buffer,
    program: D::Program,
) -> Result<(), BuildError> {
    let position = device
        .attrib_location(program, POSITION_ATTRIBUTE)
        .ok_or(BuildError::MissingAttribute(POSITION_ATTRIBUTE))?;
    let color = device.attrib_location(program, COLOR_ATTRIBUTE);

    device.bind_vertex_array(vertex_array);
    device.bind_buffer(BufferTarget::Vertices, buffer);

    device.enable_vertex_attrib_array(position);
    device.vertex_attrib_pointer_f32(position, 3, 0, 0);

    match color {
        Some(color) => {
            device.enable_vertex_attrib_array(color);
            device.vertex_attrib_pointer_f32(color, 4, 0, COLOR_OFFSET as u32);
        }
        None => log::debug!(
            "program {:?} has no active `{}`, skipping",
            program,
            COLOR_ATTRIBUTE
        ),
    }

    Ok(())
}
