// Encoding the finished cutout for whoever opened the editor.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Formats we hand back. All of them keep the alpha channel.
pub fn keeps_alpha(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Tiff | ImageFormat::WebP)
}

/// The encoded result of a confirmed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cutout {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl Cutout {
    /// `data:image/png;base64,...`, the form the closet store keeps images in.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.to_mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Encode a composited RGBA image.
pub fn encode(pixels: &RgbaImage, format: ImageFormat) -> Result<Cutout> {
    if !keeps_alpha(format) {
        return Err(Error::UnsupportedFormat(format));
    }

    let mut bytes = Vec::new();
    pixels.write_to(&mut Cursor::new(&mut bytes), format).map_err(Error::Encode)?;

    Ok(Cutout { width: pixels.width(), height: pixels.height(), format, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 7, if x < 3 { 0 } else { 255 }]))
    }

    #[test]
    fn png_keeps_transparency() {
        let cutout = encode(&sample(), ImageFormat::Png).unwrap();
        assert_eq!((cutout.width, cutout.height), (6, 4));
        let decoded = image::load_from_memory(&cutout.bytes).unwrap().to_rgba8();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn formats_without_alpha_are_refused() {
        let err = encode(&sample(), ImageFormat::Jpeg).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ImageFormat::Jpeg)));
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let cutout = encode(&sample(), ImageFormat::Png).unwrap();
        let url = cutout.to_data_url();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
        let payload = url.split_once(',').map(|(_, b64)| b64).unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), cutout.bytes);
    }
}
