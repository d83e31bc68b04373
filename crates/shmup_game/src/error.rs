use shmup_render::{GpuError, TextureError};

/// Everything that can stop the game from starting. None of these are retried:
/// the error is logged and the process exits with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window could not be created: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("renderer could not be created: {0}")]
    Gpu(#[from] GpuError),
    #[error("failed to read asset '{path}': {source}")]
    AssetRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("texture could not be created: {0}")]
    Texture(#[from] TextureError),
    #[error("sprite sheet '{path}' does not match its atlas: {reason}")]
    AtlasMismatch { path: String, reason: String },
}
