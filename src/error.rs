use thiserror::Error;

/// Failures that abort a render. No partial image is ever produced alongside one of these.
#[derive(Error, Debug)]
pub enum PanelError {
    /// The calendar feed could not be retrieved
    #[error("feed fetch error: {0}")]
    FeedFetch(String),

    /// A drawing resource (font, canvas) is unavailable
    #[error("render resource error: {0}")]
    RenderResource(String),

    /// The finished raster could not be encoded
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PanelError>;
