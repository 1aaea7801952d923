//! A `Device` that records calls instead of talking to a driver.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::device::{BufferTarget, Device, Present, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    ValidateProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, u32),
    AllocateBuffer(BufferTarget, usize),
    BufferSubData(BufferTarget, usize, usize),
    BufferData(BufferTarget, usize),
    CreateVertexArray(u32),
    BindVertexArray(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        location: u32,
        components: i32,
        stride: i32,
        offset: u32,
    },
    Viewport(u32, u32),
    Clear,
    DrawTriangles(i32),
}

/// Which step the recorder should fail, and with which log.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub create_shader: Option<ShaderStage>,
    pub compile: Option<(ShaderStage, String)>,
    pub create_program: bool,
    pub link: Option<String>,
    pub validate: Option<String>,
    pub create_buffer: bool,
}

#[derive(Default)]
pub struct Recorder {
    pub faults: Faults,
    /// Attribute names that are reported inactive for every program.
    pub inactive_attribs: Vec<&'static str>,
    next_name: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    bound: RefCell<HashMap<BufferTarget, u32>>,
    storage: RefCell<HashMap<u32, Vec<u8>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: Faults) -> Self {
        Recorder {
            faults,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Contents of a buffer as uploaded so far.
    pub fn buffer_contents(&self, buffer: u32) -> Vec<u8> {
        self.storage
            .borrow()
            .get(&buffer)
            .cloned()
            .unwrap_or_default()
    }

    pub fn shader_source_of(&self, shader: u32) -> Option<String> {
        self.shader_sources.borrow().get(&shader).cloned()
    }

    fn name(&self) -> u32 {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn bound_buffer(&self, target: BufferTarget) -> u32 {
        *self
            .bound
            .borrow()
            .get(&target)
            .expect("no buffer bound to target")
    }
}

impl Device for Recorder {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        if self.faults.create_shader == Some(stage) {
            return None;
        }
        let name = self.name();
        self.shader_stages.borrow_mut().insert(name, stage);
        self.record(Call::CreateShader(stage, name));
        Some(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.shader_sources
            .borrow_mut()
            .insert(shader, source.to_owned());
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let stage = self.shader_stages.borrow()[&shader];
        !matches!(&self.faults.compile, Some((failing, _)) if *failing == stage)
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.faults
            .compile
            .as_ref()
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Option<u32> {
        if self.faults.create_program {
            return None;
        }
        let name = self.name();
        self.record(Call::CreateProgram(name));
        Some(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.faults.link.is_none()
    }

    fn validate_program(&self, program: u32) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_validate_status(&self, _program: u32) -> bool {
        self.faults.validate.is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.faults
            .link
            .clone()
            .or_else(|| self.faults.validate.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        if self.inactive_attribs.contains(&name) {
            return None;
        }
        match name {
            "vPosition" => Some(0),
            "vColor" => Some(1),
            _ => None,
        }
    }

    fn create_buffer(&self) -> Option<u32> {
        if self.faults.create_buffer {
            return None;
        }
        let name = self.name();
        self.record(Call::CreateBuffer(name));
        Some(name)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.bound.borrow_mut().insert(target, buffer);
        self.record(Call::BindBuffer(target, buffer));
    }

    fn allocate_buffer(&self, target: BufferTarget, size: usize) {
        let buffer = self.bound_buffer(target);
        self.storage.borrow_mut().insert(buffer, vec![0; size]);
        self.record(Call::AllocateBuffer(target, size));
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        let buffer = self.bound_buffer(target);
        let mut storage = self.storage.borrow_mut();
        let bytes = storage.get_mut(&buffer).expect("buffer has no storage");
        bytes[offset..offset + data.len()].copy_from_slice(data);
        self.record(Call::BufferSubData(target, offset, data.len()));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        let buffer = self.bound_buffer(target);
        self.storage.borrow_mut().insert(buffer, data.to_vec());
        self.record(Call::BufferData(target, data.len()));
    }

    fn create_vertex_array(&self) -> Option<u32> {
        let name = self.name();
        self.record(Call::CreateVertexArray(name));
        Some(name)
    }

    fn bind_vertex_array(&self, vertex_array: u32) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: u32) {
        self.record(Call::VertexAttribPointer {
            location,
            components,
            stride,
            offset,
        });
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_triangles(&self, count: i32) {
        self.record(Call::DrawTriangles(count));
    }

    fn read_pixels(&self, width: u32, height: u32) -> Vec<u8> {
        vec![0; (width * height * 4) as usize]
    }
}

/// Counts presented frames.
#[derive(Default)]
pub struct FrameCounter {
    pub presented: Cell<usize>,
}

impl Present for FrameCounter {
    type Error = std::convert::Infallible;

    fn present(&self) -> Result<(), Self::Error> {
        self.presented.set(self.presented.get() + 1);
        Ok(())
    }
}
