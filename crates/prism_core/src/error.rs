use thiserror::Error;

/// Errors raised while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transform of surface '{surface}' is singular")]
    SingularTransform { surface: String },

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Camera eye, gaze and up do not span a basis")]
    DegenerateCamera,

    #[error("Projection frustum has zero extent")]
    EmptyFrustum,
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
