use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, Result};
use crate::util::{capture_errors, VALIDATION};

/// Resolves a shader id to WGSL text.
pub trait ShaderLoader {
    fn load(&self, id: &str) -> Result<Cow<'static, str>>;
}

/// Reads `<root>/<id>.wgsl`.
#[derive(Debug, Clone)]
pub struct DirShaderLoader {
    root: PathBuf,
}

impl DirShaderLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.wgsl"))
    }
}

impl ShaderLoader for DirShaderLoader {
    fn load(&self, id: &str) -> Result<Cow<'static, str>> {
        let path = self.path_for(id);
        let text = std::fs::read_to_string(&path).map_err(|source| RenderError::ShaderUnavailable {
            id: id.to_owned(),
            source,
        })?;
        log::debug!("loaded shader `{id}` from {}", path.display());
        Ok(Cow::Owned(text))
    }
}

/// Serves WGSL sources embedded with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct StaticShaderLoader {
    sources: HashMap<&'static str, &'static str>,
}

impl StaticShaderLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &'static str, wgsl: &'static str) -> Self {
        self.sources.insert(id, wgsl);
        self
    }

    pub fn insert(&mut self, id: &'static str, wgsl: &'static str) {
        self.sources.insert(id, wgsl);
    }
}

impl ShaderLoader for StaticShaderLoader {
    fn load(&self, id: &str) -> Result<Cow<'static, str>> {
        self.sources
            .get(id)
            .map(|wgsl| Cow::Borrowed(*wgsl))
            .ok_or_else(|| RenderError::ShaderUnavailable {
                id: id.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no embedded source with this id"),
            })
    }
}

/// Shader lookup handed to drawables during initialization.
pub struct ShaderSource {
    loader: Box<dyn ShaderLoader>,
}

impl ShaderSource {
    pub fn new(loader: impl ShaderLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
        }
    }

    pub fn load(&self, id: &str) -> Result<Cow<'static, str>> {
        self.loader.load(id)
    }

    /// Loads `id` and compiles it into a shader module labelled with the id.
    ///
    /// WGSL the device rejects is reported as `ShaderRejected`.
    pub fn module(&self, device: &wgpu::Device, id: &str) -> Result<wgpu::ShaderModule> {
        let wgsl = self.load(id)?;
        let (module, rejected) = capture_errors(device, VALIDATION, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(id),
                source: wgpu::ShaderSource::Wgsl(wgsl),
            })
        });

        match rejected {
            Some(source) => Err(RenderError::ShaderRejected {
                id: id.to_owned(),
                source,
            }),
            None => Ok(module),
        }
    }
}

impl std::fmt::Debug for ShaderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderSource").finish_non_exhaustive()
    }
}
