// One error type for the whole editor.
// Every variant states *where* things went wrong.
use image::{ImageError, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The source bytes could not be decoded; no session is opened.
    #[error("Image decode error: {0}")]
    Decode(#[source] ImageError),
    /// A session needs at least one pixel.
    #[error("Cannot edit an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    /// Encoding the final cutout failed; the session stays open.
    #[error("Image encode error: {0}")]
    Encode(#[source] ImageError),
    /// Export format cannot carry an alpha channel.
    #[error("Export format {0:?} does not keep transparency")]
    UnsupportedFormat(ImageFormat),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Creating or updating the window failed (front-end only).
    #[error("Window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, Error>;
