use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use gleam::gl::{self, GLenum, GLint, GLuint, Gl};

use super::device::{BufferTarget, Device, ShaderStage};

/// `Device` backed by the driver's GL entry points.
///
/// Only valid while the context the functions were loaded from is current
/// on the calling thread.
pub struct GlDevice {
    gl: Rc<dyn Gl>,
}

impl GlDevice {
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = unsafe { gl::GlFns::load_with(loader) };
        GlDevice { gl }
    }

    pub fn log_info(&self) {
        log::info!("GL vendor: {}", self.gl.get_string(gl::VENDOR));
        log::info!("GL renderer: {}", self.gl.get_string(gl::RENDERER));
        log::info!("GL version: {}", self.gl.get_string(gl::VERSION));
        log::debug!(
            "GLSL version: {}",
            self.gl.get_string(gl::SHADING_LANGUAGE_VERSION)
        );
    }

    /// Renders into a `width`x`height` RGBA8 renderbuffer instead of the
    /// default framebuffer, for contexts that have no window. Returns the
    /// framebuffer name, or `None` if the driver rejects the attachment.
    pub fn bind_offscreen_framebuffer(&self, width: u32, height: u32) -> Option<GLuint> {
        let renderbuffer = self.gl.gen_renderbuffers(1).first().copied().and_then(non_null)?;
        self.gl.bind_renderbuffer(gl::RENDERBUFFER, renderbuffer);
        self.gl.renderbuffer_storage(
            gl::RENDERBUFFER,
            gl::RGBA8,
            width as GLint,
            height as GLint,
        );

        let framebuffer = self.gl.gen_framebuffers(1).first().copied().and_then(non_null)?;
        self.gl.bind_framebuffer(gl::FRAMEBUFFER, framebuffer);
        self.gl.framebuffer_renderbuffer(
            gl::FRAMEBUFFER,
            gl::COLOR_ATTACHMENT0,
            gl::RENDERBUFFER,
            renderbuffer,
        );
        if self.gl.check_frame_buffer_status(gl::FRAMEBUFFER) != gl::FRAMEBUFFER_COMPLETE {
            return None;
        }

        self.viewport(width, height);
        Some(framebuffer)
    }

    fn shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut result = [0];
        unsafe { self.gl.get_shader_iv(shader, pname, &mut result) };
        result[0]
    }

    fn program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut result = [0];
        unsafe { self.gl.get_program_iv(program, pname, &mut result) };
        result[0]
    }
}

fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Vertices => gl::ARRAY_BUFFER,
        BufferTarget::Indices => gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn non_null(name: GLuint) -> Option<GLuint> {
    if name == 0 {
        None
    } else {
        Some(name)
    }
}

impl Device for GlDevice {
    type Shader = GLuint;
    type Program = GLuint;
    type Buffer = GLuint;
    type VertexArray = GLuint;

    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint> {
        non_null(self.gl.create_shader(stage_enum(stage)))
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        self.gl.shader_source(shader, &[source.as_bytes()]);
    }

    fn compile_shader(&self, shader: GLuint) {
        self.gl.compile_shader(shader);
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        self.shader_iv(shader, gl::COMPILE_STATUS) != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        self.gl.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: GLuint) {
        self.gl.delete_shader(shader);
    }

    fn create_program(&self) -> Option<GLuint> {
        non_null(self.gl.create_program())
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.gl.attach_shader(program, shader);
    }

    fn link_program(&self, program: GLuint) {
        self.gl.link_program(program);
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        self.program_iv(program, gl::LINK_STATUS) != 0
    }

    fn validate_program(&self, program: GLuint) {
        self.gl.validate_program(program);
    }

    fn program_validate_status(&self, program: GLuint) -> bool {
        self.program_iv(program, gl::VALIDATE_STATUS) != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        self.gl.get_program_info_log(program)
    }

    fn use_program(&self, program: GLuint) {
        self.gl.use_program(program);
    }

    fn attrib_location(&self, program: GLuint, name: &str) -> Option<u32> {
        let location = self.gl.get_attrib_location(program, name);
        if location < 0 {
            None
        } else {
            Some(location as u32)
        }
    }

    fn create_buffer(&self) -> Option<GLuint> {
        self.gl.gen_buffers(1).first().copied().and_then(non_null)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint) {
        self.gl.bind_buffer(target_enum(target), buffer);
    }

    fn allocate_buffer(&self, target: BufferTarget, size: usize) {
        self.gl.buffer_data_untyped(
            target_enum(target),
            size as isize,
            ptr::null(),
            gl::STATIC_DRAW,
        );
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        self.gl.buffer_sub_data_untyped(
            target_enum(target),
            offset as isize,
            data.len() as isize,
            data.as_ptr() as *const _,
        );
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.gl.buffer_data_untyped(
            target_enum(target),
            data.len() as isize,
            data.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );
    }

    fn create_vertex_array(&self) -> Option<GLuint> {
        self.gl.gen_vertex_arrays(1).first().copied().and_then(non_null)
    }

    fn bind_vertex_array(&self, vertex_array: GLuint) {
        self.gl.bind_vertex_array(vertex_array);
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.gl.enable_vertex_attrib_array(location);
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: u32) {
        self.gl
            .vertex_attrib_pointer(location, components, gl::FLOAT, false, stride, offset);
    }

    fn viewport(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as GLint, height as GLint);
    }

    fn clear_color_buffer(&self) {
        self.gl.clear(gl::COLOR_BUFFER_BIT);
    }

    fn draw_triangles(&self, count: i32) {
        self.gl
            .draw_elements(gl::TRIANGLES, count, gl::UNSIGNED_INT, 0);
    }

    fn read_pixels(&self, width: u32, height: u32) -> Vec<u8> {
        self.gl.pixel_store_i(gl::PACK_ALIGNMENT, 1);
        self.gl.read_pixels(
            0,
            0,
            width as GLint,
            height as GLint,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
        )
    }
}
