//! Cutout: brush-based alpha mask editor for clothing photos.
//!
//! Open an [`Editor`] on a decoded photo, feed it pointer events, then
//! [`Editor::confirm`] to get a PNG with a transparent background or
//! [`Editor::cancel`] to throw the session away.

pub mod composite;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod gamma;
pub mod history;
pub mod mask;
pub mod stroke;
pub mod types;
pub mod viewport;

pub use config::EditorConfig;
pub use editor::{Editor, Gesture, PointerEvent};
pub use error::{Error, Result};
pub use export::Cutout;
pub use mask::Mask;
pub use types::{BrushMode, Tool, WorkingImage};
pub use viewport::Viewport;
