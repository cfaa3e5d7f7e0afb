//! Render error types.

/// Errors that can occur while rendering or writing a sky image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Width or height is zero.
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// A render worker thread could not be started.
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// Failed to create the output directory.
    #[error("failed to create output directory: {0}")]
    CreateDir(#[source] std::io::Error),

    /// Failed to encode or write the image.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
