use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertices,
    Indices,
}

/// The graphics driver as seen by the renderer.
///
/// Mirrors the handful of GL entry points the demo needs. Object creation
/// returns `None` where the driver hands back the null object. Every method
/// must be called on the thread that owns the current context.
pub trait Device {
    type Shader: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;
    type Buffer: Copy + Debug + PartialEq;
    type VertexArray: Copy + Debug + PartialEq;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn validate_program(&self, program: Self::Program);
    fn program_validate_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Self::Program);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Self::Buffer);
    /// Allocates `size` bytes of static storage without initial contents.
    fn allocate_buffer(&self, target: BufferTarget, size: usize);
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);

    fn create_vertex_array(&self) -> Option<Self::VertexArray>;
    fn bind_vertex_array(&self, vertex_array: Self::VertexArray);
    fn enable_vertex_attrib_array(&self, location: u32);
    /// Describes a float attribute of `components` values, non-normalized.
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: u32);

    fn viewport(&self, width: u32, height: u32);
    fn clear_color_buffer(&self);
    /// Draws `count` indices as triangles from the bound index buffer.
    fn draw_triangles(&self, count: i32);
    /// Reads the bound framebuffer as tightly packed RGBA8, bottom row first.
    fn read_pixels(&self, width: u32, height: u32) -> Vec<u8>;
}

/// Puts a finished frame on screen.
pub trait Present {
    type Error;

    fn present(&self) -> Result<(), Self::Error>;
}
