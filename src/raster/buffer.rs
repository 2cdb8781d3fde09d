use crate::foundation::error::{GifError, GifResult};

/// Palette indices, one byte per pixel, row-major.
pub type IndexBuffer = Vec<u8>;

/// A flat, row-major buffer of packed RGBA pixels (see [`crate::pack_rgba`]).
///
/// The stride of a `PixelBuffer` is always its `width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels (row stride).
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` packed pixels.
    pub pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Wrap packed pixels, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> GifResult<Self> {
        let expected = pixel_len(width, height)?;
        if pixels.len() != expected {
            return Err(GifError::validation(format!(
                "pixel buffer of {width}x{height} expects {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Buffer with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: u32) -> GifResult<Self> {
        let len = pixel_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![px; len],
        })
    }

    /// Build from tightly packed straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> GifResult<Self> {
        let expected = pixel_len(width, height)?
            .checked_mul(4)
            .ok_or_else(|| GifError::range("rgba8 byte length overflow"))?;
        if bytes.len() != expected {
            return Err(GifError::validation(format!(
                "rgba8 buffer of {width}x{height} expects {expected} bytes, got {}",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Unpack into straight-alpha RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_le_bytes()).collect()
    }

    /// Copy pixels out of an [`image::RgbaImage`].
    pub fn from_rgba_image(img: &image::RgbaImage) -> GifResult<Self> {
        Self::from_rgba8(img.width(), img.height(), img.as_raw())
    }

    /// Copy pixels into a new [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> GifResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .ok_or_else(|| GifError::validation("pixel buffer does not match its dimensions"))
    }

    /// Pixel at `(x, y)`, or `None` when outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Return `true` when both buffers have the same dimensions.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

pub(crate) fn pixel_len(width: u32, height: u32) -> GifResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| GifError::range(format!("{width}x{height} buffer size overflow")))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
