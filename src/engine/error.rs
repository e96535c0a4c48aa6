use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{stage} shader compile error: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("{program} shader program link error: {log}")]
    ShaderLink { program: String, log: String },

    #[error("OpenGL call failed: {0}")]
    Gl(String),

    #[error("window or GL context setup failed: {0}")]
    Context(String),

    #[error("failed to encode frame: {0}")]
    Capture(#[from] gif::EncodingError),

    #[error("{width}x{height} is too large for a GIF frame")]
    FrameDimensions { width: u32, height: u32 },

    #[error("captured frame is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
