//! PNG decoding and encoding for sprite sheets.
//!
//! Sheets are normalized to 8-bit RGBA on load so slicing only ever deals
//! with one pixel layout.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

/// The eight-byte PNG signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Unsupported color type: {0:?}")]
    UnsupportedColorType(ColorType),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// A decoded sheet in 8-bit RGBA, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SheetImage {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA value at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Sets the RGBA value at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Fills a rectangle with one color.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        for py in y..(y + height).min(self.height) {
            for px in x..(x + width).min(self.width) {
                self.set_pixel(px, py, rgba);
            }
        }
    }

    /// Returns true if every pixel in the rectangle has zero alpha.
    pub fn is_transparent(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        (y..(y + height).min(self.height))
            .all(|py| (x..(x + width).min(self.width)).all(|px| self.pixel(px, py)[3] == 0))
    }
}

/// Returns true if `bytes` starts with the PNG signature.
pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Reads only the header and returns `(width, height)`.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), PngError> {
    let decoder = Decoder::new(bytes);
    let reader = decoder.read_info()?;
    let info = reader.info();
    Ok((info.width, info.height))
}

/// Decodes a PNG into 8-bit RGBA.
pub fn decode_rgba(bytes: &[u8]) -> Result<SheetImage, PngError> {
    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());

    let pixels = match info.color_type {
        ColorType::Rgba => buffer,
        ColorType::Rgb => buffer
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => buffer
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buffer.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        other => return Err(PngError::UnsupportedColorType(other)),
    };

    let expected = info.width as usize * info.height as usize * 4;
    if pixels.len() != expected {
        return Err(PngError::InvalidDimensions(format!(
            "decoded {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            info.width,
            info.height
        )));
    }

    Ok(SheetImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Encodes an image as an 8-bit RGBA PNG.
pub fn write_rgba_to_writer<W: Write>(image: &SheetImage, writer: W) -> Result<(), PngError> {
    if image.width == 0 || image.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{}",
            image.width, image.height
        )));
    }

    let mut encoder = Encoder::new(writer, image.width, image.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&image.pixels)?;

    Ok(())
}

/// Encodes an image as PNG bytes.
pub fn write_rgba_to_vec(image: &SheetImage) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(image, &mut data)?;
    Ok(data)
}
