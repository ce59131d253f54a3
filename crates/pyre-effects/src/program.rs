//! Shader program backends
//!
//! [`RecordedProgram`] keeps a log of uniform writes; [`UniformBlock`] packs
//! the uniforms of a class into a std140-style buffer ready for upload.

use crate::shader::{ShaderClass, ShaderProgram, UniformLocation};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded `set_uniform_float` call
#[derive(Debug, Clone, PartialEq)]
pub struct UniformWrite {
    pub uniform: String,
    pub location: UniformLocation,
    pub values: Vec<f32>,
}

/// A program that knows a fixed set of uniforms and records every write
pub struct RecordedProgram {
    names: Vec<String>,
    writes: Rc<RefCell<Vec<UniformWrite>>>,
}

impl RecordedProgram {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            writes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A program declaring exactly the uniforms of `class`
    pub fn for_class(class: &ShaderClass) -> Self {
        Self::new(class.uniform_names())
    }

    /// Shared view of the write log, still readable after the program is boxed
    pub fn writes_handle(&self) -> Rc<RefCell<Vec<UniformWrite>>> {
        self.writes.clone()
    }
}

impl ShaderProgram for RecordedProgram {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn set_uniform_float(&mut self, location: UniformLocation, components: usize, values: &[f32]) {
        let uniform = self
            .names
            .get(location.0 as usize)
            .cloned()
            .unwrap_or_default();
        let n = components.min(values.len());
        self.writes.borrow_mut().push(UniformWrite {
            uniform,
            location,
            values: values[..n].to_vec(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    name: String,
    /// Offset in floats
    offset: usize,
    components: usize,
}

/// Uniforms packed into one block of `f32`s.
///
/// Scalars are 4-byte aligned, `vec2` 8-byte aligned, `vec3`/`vec4` 16-byte
/// aligned; the block size is a multiple of 16 bytes.
pub struct UniformBlock {
    slots: Vec<Slot>,
    data: Vec<f32>,
}

impl UniformBlock {
    pub fn new<'a>(layout: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let mut slots = Vec::new();
        let mut cursor = 0usize;
        for (name, components) in layout {
            let align = match components {
                0 | 1 => 1,
                2 => 2,
                _ => 4,
            };
            let offset = cursor.next_multiple_of(align);
            slots.push(Slot {
                name: name.to_string(),
                offset,
                components,
            });
            cursor = offset + components;
        }
        let size = cursor.next_multiple_of(4);
        Self {
            slots,
            data: vec![0.0; size],
        }
    }

    /// Layout the uniforms of `class` in binding order
    pub fn for_class(class: &ShaderClass) -> Self {
        Self::new(
            class
                .bindings
                .iter()
                .map(|b| (b.uniform.as_str(), b.source.components())),
        )
    }

    /// Offset of a uniform in bytes
    pub fn byte_offset(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.offset * std::mem::size_of::<f32>())
    }

    pub fn size_in_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl ShaderProgram for UniformBlock {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.slots
            .iter()
            .position(|s| s.name == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn set_uniform_float(&mut self, location: UniformLocation, components: usize, values: &[f32]) {
        let Some(slot) = self.slots.get(location.0 as usize) else {
            return;
        };
        let n = components.min(slot.components).min(values.len());
        self.data[slot.offset..slot.offset + n].copy_from_slice(&values[..n]);
    }

    fn uniform_bytes(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

/// Upload of packed uniforms to the GPU
#[cfg(feature = "gpu")]
pub mod gpu {
    use crate::shader::EffectShader;

    /// Create a uniform buffer large enough for the shader's packed uniforms
    pub fn create_uniform_buffer(device: &wgpu::Device, shader: &EffectShader) -> Option<wgpu::Buffer> {
        let bytes = shader.program().uniform_bytes()?;
        Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform Buffer", shader.class().name)),
            size: bytes.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    /// Write the shader's packed uniforms into `buffer`; returns false for
    /// programs without a packed representation
    pub fn upload(queue: &wgpu::Queue, buffer: &wgpu::Buffer, shader: &EffectShader) -> bool {
        match shader.program().uniform_bytes() {
            Some(bytes) => {
                queue.write_buffer(buffer, 0, bytes);
                true
            }
            None => false,
        }
    }
}
