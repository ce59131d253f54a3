//! Uniform binding protocol
//!
//! An effect describes its shader as a [`ShaderClass`]: an ordered list of
//! uniforms, each fed from one settings key. An [`EffectShader`] is one
//! animation's instance of that class on top of a host [`ShaderProgram`].
//! Uniform locations are resolved when the instance is created; values are
//! read from the store and pushed once, when the animation begins.

use pyre_core::{PyreError, Result};
use pyre_settings::SettingsStore;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Opaque handle of a uniform inside a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// The host side of a shader: uniform lookup and float uploads
pub trait ShaderProgram {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    /// Write `components` floats from `values` to the uniform at `location`
    fn set_uniform_float(&mut self, location: UniformLocation, components: usize, values: &[f32]);

    /// Packed uniform data, for programs backed by a buffer
    fn uniform_bytes(&self) -> Option<&[u8]> {
        None
    }
}

/// Where a uniform's value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformSource {
    /// Color string key, uploaded as 4 floats
    Color(String),
    /// Boolean key, uploaded as `0.0` or `1.0`
    Boolean(String),
    Double(String),
    Int(String),
}

impl UniformSource {
    pub fn key(&self) -> &str {
        match self {
            Self::Color(k) | Self::Boolean(k) | Self::Double(k) | Self::Int(k) => k,
        }
    }

    pub fn components(&self) -> usize {
        match self {
            Self::Color(_) => 4,
            _ => 1,
        }
    }

    /// Read the current value of the key as uniform floats
    pub fn sample(&self, settings: &SettingsStore) -> Result<Vec<f32>> {
        Ok(match self {
            Self::Color(key) => settings.get_color(key)?.to_array().to_vec(),
            Self::Boolean(key) => vec![if settings.get_boolean(key)? { 1.0 } else { 0.0 }],
            Self::Double(key) => vec![settings.get_double(key)? as f32],
            Self::Int(key) => vec![settings.get_int(key)? as f32],
        })
    }
}

/// One uniform and the key feeding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBinding {
    pub uniform: String,
    pub source: UniformSource,
}

impl UniformBinding {
    pub fn new(uniform: impl Into<String>, source: UniformSource) -> Self {
        Self {
            uniform: uniform.into(),
            source,
        }
    }
}

/// The structural definition of an effect's shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderClass {
    pub name: String,
    pub bindings: Vec<UniformBinding>,
}

impl ShaderClass {
    pub fn new(name: impl Into<String>, bindings: Vec<UniformBinding>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }

    pub fn uniform_names(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.uniform.as_str()).collect()
    }

    pub fn binding(&self, uniform: &str) -> Option<&UniformBinding> {
        self.bindings.iter().find(|b| b.uniform == uniform)
    }
}

/// Defines an effect's [`ShaderClass`] on first use and creates instances of it
pub struct ShaderFactory {
    class: OnceLock<Arc<ShaderClass>>,
    define: fn() -> ShaderClass,
}

impl ShaderFactory {
    pub const fn new(define: fn() -> ShaderClass) -> Self {
        Self {
            class: OnceLock::new(),
            define,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.class.get().is_some()
    }

    pub fn class(&self) -> Arc<ShaderClass> {
        self.class
            .get_or_init(|| {
                let class = (self.define)();
                info!(
                    class = class.name.as_str(),
                    uniforms = class.bindings.len(),
                    "registered shader class"
                );
                Arc::new(class)
            })
            .clone()
    }

    pub fn create(&self, program: Box<dyn ShaderProgram>) -> Result<EffectShader> {
        EffectShader::new(self.class(), program)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderState {
    Constructed,
    Begun { for_opening: bool },
}

/// One animation's shader instance
pub struct EffectShader {
    class: Arc<ShaderClass>,
    program: Box<dyn ShaderProgram>,
    locations: Vec<UniformLocation>,
    state: ShaderState,
}

impl EffectShader {
    /// Resolve every uniform of `class` in `program`
    pub fn new(class: Arc<ShaderClass>, program: Box<dyn ShaderProgram>) -> Result<Self> {
        let locations = class
            .bindings
            .iter()
            .map(|b| {
                program
                    .uniform_location(&b.uniform)
                    .ok_or_else(|| PyreError::UniformNotFound {
                        effect: class.name.clone(),
                        uniform: b.uniform.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            class,
            program,
            locations,
            state: ShaderState::Constructed,
        })
    }

    pub fn class(&self) -> &ShaderClass {
        &self.class
    }

    pub fn state(&self) -> ShaderState {
        self.state
    }

    pub fn location(&self, uniform: &str) -> Option<UniformLocation> {
        self.class
            .bindings
            .iter()
            .position(|b| b.uniform == uniform)
            .map(|i| self.locations[i])
    }

    pub fn program(&self) -> &dyn ShaderProgram {
        self.program.as_ref()
    }

    pub fn into_program(self) -> Box<dyn ShaderProgram> {
        self.program
    }

    /// Push the current settings to every uniform.
    ///
    /// All values are read before the first write, so a failing key leaves
    /// the program untouched. Settings changes after this call are not seen
    /// by this instance.
    pub fn begin_animation(&mut self, settings: &SettingsStore, for_opening: bool) -> Result<()> {
        if let ShaderState::Begun { .. } = self.state {
            return Err(PyreError::ShaderAlreadyBegun(self.class.name.clone()));
        }
        let values = self
            .class
            .bindings
            .iter()
            .map(|b| b.source.sample(settings))
            .collect::<Result<Vec<_>>>()?;

        for (location, v) in self.locations.iter().zip(&values) {
            self.program.set_uniform_float(*location, v.len(), v);
        }
        self.state = ShaderState::Begun { for_opening };
        debug!(
            class = self.class.name.as_str(),
            for_opening,
            uniforms = values.len(),
            "began animation"
        );
        Ok(())
    }
}
