use crate::scene::InitStage;
use crate::targets::TargetKind;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures surfaced by the renderer core.
///
/// Startup variants (`UnsupportedPlatform`, `DeviceAcquisitionFailed`) are fatal.
/// `ResourceAllocationFailed` only costs the current frame.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("device acquisition failed: {0}")]
    DeviceAcquisitionFailed(String),

    #[error("failed to allocate {kind} target at {width}x{height}: {reason}")]
    ResourceAllocationFailed {
        kind: TargetKind,
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("drawable `{drawable}` failed during {stage}")]
    PipelineBuildFailed {
        drawable: String,
        stage: InitStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("shader `{id}` unavailable")]
    ShaderUnavailable {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("shader `{id}` rejected by the device")]
    ShaderRejected {
        id: String,
        #[source]
        source: wgpu::Error,
    },
}

impl RenderError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(msg.into())
    }

    pub fn device(msg: impl Into<String>) -> Self {
        Self::DeviceAcquisitionFailed(msg.into())
    }

    /// Returns `true` for errors that only invalidate the current frame.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ResourceAllocationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(RenderError::unsupported("x").to_string().contains("unsupported platform:"));
        assert!(RenderError::device("x").to_string().contains("device acquisition failed:"));

        let alloc = RenderError::ResourceAllocationFailed {
            kind: TargetKind::Depth,
            width: 8,
            height: 4,
            reason: "oom".into(),
        };
        assert_eq!(alloc.to_string(), "failed to allocate depth target at 8x4: oom");
    }

    #[test]
    fn only_allocation_failures_are_transient() {
        let alloc = RenderError::ResourceAllocationFailed {
            kind: TargetKind::Color,
            width: 1,
            height: 1,
            reason: String::new(),
        };
        assert!(alloc.is_transient());
        assert!(!RenderError::device("gone").is_transient());
        assert!(!RenderError::SurfaceUnavailable("oom".into()).is_transient());
    }

    #[test]
    fn pipeline_failure_keeps_source() {
        let err = RenderError::PipelineBuildFailed {
            drawable: "triangle".into(),
            stage: InitStage::Pipeline,
            source: anyhow::anyhow!("bad entry point"),
        };
        assert_eq!(err.to_string(), "drawable `triangle` failed during pipeline");
        let src = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(src.as_deref(), Some("bad entry point"));
    }
}
