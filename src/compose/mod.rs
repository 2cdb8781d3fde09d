//! Layer compositing, the renderer side of a capture.
//!
//! The session never rasterizes anything itself: it asks a [`Compositor`] for one flat buffer
//! per captured tick. [`SourceOverCompositor`] is the built-in CPU implementation.

use crate::foundation::core::{BoundingBox, Rgb8, alpha_of, pack_rgba};
use crate::foundation::error::{GifError, GifResult};
use crate::foundation::math::{div_alpha_u8, mul_div255_u8};
use crate::raster::buffer::{PixelBuffer, pixel_len};

/// Produces a flat RGBA buffer from a stack of layers, restricted to a crop rectangle.
pub trait Compositor {
    /// Flatten `layers` (bottom first) and return the `crop` region of the result.
    fn compose(&mut self, layers: &[PixelBuffer], crop: BoundingBox) -> GifResult<PixelBuffer>;
}

/// Straight-alpha source-over compositing on the CPU, optionally over an opaque background.
#[derive(Clone, Debug, Default)]
pub struct SourceOverCompositor {
    background: Option<Rgb8>,
}

impl SourceOverCompositor {
    /// Compositor that starts every frame from full transparency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compositor that fills every frame with `background` before drawing layers.
    pub fn with_background(background: Rgb8) -> Self {
        Self {
            background: Some(background),
        }
    }
}

type PremulRgba8 = [u8; 4];

fn premultiply(px: u32) -> PremulRgba8 {
    let [r, g, b, a] = px.to_le_bytes();
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

fn unpremultiply(p: PremulRgba8) -> u32 {
    let a = p[3];
    if a == 0 {
        return 0;
    }
    pack_rgba(
        div_alpha_u8(p[0], a),
        div_alpha_u8(p[1], a),
        div_alpha_u8(p[2], a),
        a,
    )
}

fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

impl Compositor for SourceOverCompositor {
    fn compose(&mut self, layers: &[PixelBuffer], crop: BoundingBox) -> GifResult<PixelBuffer> {
        let first = layers
            .first()
            .ok_or_else(|| GifError::validation("compose requires at least one layer"))?;
        if crop.is_empty() {
            return Err(GifError::validation("compose crop box has zero area"));
        }
        if let Some(odd) = layers.iter().find(|l| !l.same_shape(first)) {
            return Err(GifError::validation(format!(
                "layer sizes differ ({}x{} vs {}x{})",
                odd.width, odd.height, first.width, first.height
            )));
        }
        if layers
            .iter()
            .any(|l| l.pixels.len() != (l.width as usize) * (l.height as usize))
        {
            return Err(GifError::validation("layer pixel count does not match its size"));
        }
        if !crop.fits_within(first.width, first.height) {
            return Err(GifError::range(format!(
                "crop box {}x{} at ({},{}) exceeds {}x{} layers",
                crop.width, crop.height, crop.x, crop.y, first.width, first.height
            )));
        }

        let base = match self.background {
            Some(bg) => premultiply(pack_rgba(bg.r, bg.g, bg.b, 255)),
            None => [0; 4],
        };
        let stride = first.width as usize;
        let mut pixels = Vec::with_capacity(pixel_len(crop.width, crop.height)?);
        for y in crop.y as usize..crop.bottom() as usize {
            for x in crop.x as usize..crop.right() as usize {
                let i = y * stride + x;
                let acc = layers
                    .iter()
                    .map(|l| l.pixels[i])
                    .filter(|&px| alpha_of(px) != 0)
                    .fold(base, |dst, px| over(dst, premultiply(px)));
                pixels.push(unpremultiply(acc));
            }
        }
        PixelBuffer::new(crop.width, crop.height, pixels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compose.rs"]
mod tests;
