//! Nearest-neighbor resampling of index buffers and the box mapping used at finalize time.

use crate::foundation::core::{BoundingBox, Canvas};
use crate::foundation::error::{GifError, GifResult};
use crate::raster::buffer::pixel_len;

/// Resample `src` (`src_w x src_h`) to `dst_w x dst_h` with nearest-neighbor lookup.
///
/// Destination pixel `(j, i)` reads source pixel `(floor(j*src_w/dst_w), floor(i*src_h/dst_h))`.
/// Integer arithmetic keeps every source index below `src_w*src_h`.
pub fn scale_to<T: Copy>(
    src: &[T],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> GifResult<Vec<T>> {
    let src_len = pixel_len(src_w, src_h)?;
    if src.len() != src_len {
        return Err(GifError::validation(format!(
            "scale_to source of {src_w}x{src_h} expects {src_len} elements, got {}",
            src.len()
        )));
    }
    let dst_len = pixel_len(dst_w, dst_h)?;
    if dst_len == 0 {
        return Ok(Vec::new());
    }
    if src_len == 0 {
        return Err(GifError::validation(format!(
            "cannot scale an empty {src_w}x{src_h} buffer to {dst_w}x{dst_h}"
        )));
    }

    let (sw, sh) = (u64::from(src_w), u64::from(src_h));
    let (dw, dh) = (u64::from(dst_w), u64::from(dst_h));
    let cols: Vec<usize> = (0..dw).map(|j| (j * sw / dw) as usize).collect();

    let mut out = Vec::with_capacity(dst_len);
    for i in 0..dh {
        let row = (i * sh / dh) as usize * src_w as usize;
        out.extend(cols.iter().map(|&px| src[row + px]));
    }
    Ok(out)
}

/// Maps a record's box from capture space into output space.
///
/// The session applies one scaler to every record with the same `from`/`to` pair.
pub trait BoxScaler {
    /// Map `bbox` (relative to `from`) into `to`. The result is non-empty and fits `to`.
    fn scale_box(&self, bbox: BoundingBox, from: Canvas, to: Canvas) -> BoundingBox;
}

/// One global factor per axis; positions and sizes are each floored independently.
///
/// Boxes that vary in size or position under a non-integer factor can drift by a pixel
/// relative to their neighbors. Use [`EdgeAlignedScale`] when that matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformScale;

/// Maps both edges of a box through the global factor, so abutting boxes stay abutting.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeAlignedScale;

fn scale_coord(v: u32, from: u32, to: u32) -> u32 {
    if from == 0 {
        return 0;
    }
    (u64::from(v) * u64::from(to) / u64::from(from)) as u32
}

fn clamp_span(start: u32, len: u32, limit: u32) -> (u32, u32) {
    let limit = limit.max(1);
    let start = start.min(limit - 1);
    (start, len.max(1).min(limit - start))
}

impl BoxScaler for UniformScale {
    fn scale_box(&self, bbox: BoundingBox, from: Canvas, to: Canvas) -> BoundingBox {
        let (x, width) = clamp_span(
            scale_coord(bbox.x, from.width, to.width),
            scale_coord(bbox.width, from.width, to.width),
            to.width,
        );
        let (y, height) = clamp_span(
            scale_coord(bbox.y, from.height, to.height),
            scale_coord(bbox.height, from.height, to.height),
            to.height,
        );
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }
}

impl BoxScaler for EdgeAlignedScale {
    fn scale_box(&self, bbox: BoundingBox, from: Canvas, to: Canvas) -> BoundingBox {
        let x0 = scale_coord(bbox.x, from.width, to.width);
        let x1 = scale_coord(bbox.right(), from.width, to.width);
        let y0 = scale_coord(bbox.y, from.height, to.height);
        let y1 = scale_coord(bbox.bottom(), from.height, to.height);
        let (x, width) = clamp_span(x0, x1.saturating_sub(x0), to.width);
        let (y, height) = clamp_span(y0, y1.saturating_sub(y0), to.height);
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/scale.rs"]
mod tests;
