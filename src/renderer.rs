mod attributes;
mod buffer;
mod device;
mod error;
mod gl;
mod program;
#[cfg(test)]
pub(crate) mod recorder;
pub mod shader;
pub mod vertex;

pub use device::{BufferTarget, Device, Present, ShaderStage};
pub use error::BuildError;
pub use gl::GlDevice;

use attributes::bind_attributes;
use buffer::{upload_geometry, upload_indices};
use program::build_program;
use shader::{Fragment, VERTEX_SHADER};
use vertex::{Triangle, TRIANGLES, VERTEX_COUNT};

/// The two triangles and the fragment shader each one is drawn with.
pub const SCENE: [(Triangle, Fragment); 2] = [
    (TRIANGLES[0], Fragment::Interpolated),
    (TRIANGLES[1], Fragment::Yellow),
];

/// GL objects backing one triangle. Never released explicitly; they live as
/// long as the context.
pub struct Mesh<D: Device> {
    pub program: D::Program,
    pub vertex_array: D::VertexArray,
    pub vertex_buffer: D::Buffer,
    pub index_buffer: D::Buffer,
}

impl<D: Device> Clone for Mesh<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Device> Copy for Mesh<D> {}

pub struct Renderer<D: Device> {
    meshes: [Mesh<D>; 2],
}

impl<D: Device> Renderer<D> {
    /// Compiles both programs and uploads both triangles.
    pub fn new(device: &D) -> Result<Self, BuildError> {
        let first = Self::create_mesh(device, &SCENE[0].0, SCENE[0].1)?;
        let second = Self::create_mesh(device, &SCENE[1].0, SCENE[1].1)?;
        log::debug!("renderer ready: {:?}, {:?}", first.program, second.program);

        Ok(Renderer {
            meshes: [first, second],
        })
    }

    fn create_mesh(
        device: &D,
        triangle: &Triangle,
        fragment: Fragment,
    ) -> Result<Mesh<D>, BuildError> {
        let vertex_array = device
            .create_vertex_array()
            .ok_or(BuildError::CreateObject("vertex array"))?;

        let program = build_program(device, VERTEX_SHADER, fragment.source())?;
        let vertex_buffer = upload_geometry(device, triangle)?;
        bind_attributes(device, vertex_array, vertex_buffer, program)?;
        let index_buffer = upload_indices(device, vertex_array)?;

        log::debug!(
            "uploaded {:?} triangle into vertex array {:?}",
            fragment,
            vertex_array
        );

        Ok(Mesh {
            program,
            vertex_array,
            vertex_buffer,
            index_buffer,
        })
    }

    pub fn meshes(&self) -> &[Mesh<D>; 2] {
        &self.meshes
    }

    /// Maps NDC onto a `width`x`height` framebuffer. Zero sizes (a minimized
    /// window) keep the previous viewport.
    pub fn resize(&self, device: &D, width: u32, height: u32) {
        if width > 0 && height > 0 {
            device.viewport(width, height);
        }
    }

    /// Clears the color buffer and draws both triangles.
    pub fn draw(&self, device: &D) {
        device.clear_color_buffer();
        for mesh in &self.meshes {
            device.use_program(mesh.program);
            device.bind_vertex_array(mesh.vertex_array);
            device.draw_triangles(VERTEX_COUNT as i32);
        }
    }

    /// Draws a frame and presents it.
    pub fn render<P: Present>(&self, device: &D, target: &P) -> Result<(), P::Error> {
        self.draw(device);
        target.present()
    }
}
