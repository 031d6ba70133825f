//! Error types shared by the scene core and the WebGL layer.

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(String),
    #[error("{field} must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} needs at least one segment")]
    NoSegments { field: &'static str },
    #[error("camera near plane ({near}) must be closer than far plane ({far})")]
    DepthRange { near: f32, far: f32 },
    #[error("camera position and target coincide at {position:?}")]
    CameraAtTarget { position: [f32; 3] },
    #[error("camera looks along its up axis ({direction:?})")]
    CameraAlongUp { direction: [f32; 3] },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failures while bringing up or driving the view in a browser.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("WebGL2 not supported")]
    WebGlUnsupported,
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link program: {0}")]
    ProgramLink(String),
    #[error("failed to create {0}")]
    Resource(&'static str),
    #[error("texture {path}: {reason}")]
    Texture { path: String, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_field_names() {
        let err = ConfigError::NonPositive {
            field: "camera.frustum_size",
            value: 0.0,
        };
        assert!(err.to_string().contains("camera.frustum_size"));

        let view: ViewError = err.into();
        assert!(matches!(view, ViewError::Config(_)));
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::Parse(_)));
    }
}
