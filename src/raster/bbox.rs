//! Minimal bounding boxes over row-major index space.
//!
//! [`find_box`] is predicate-driven so the same scan serves both "pixel differs between two
//! buffers" ([`diff_box`]) and "pixel is not fully transparent" ([`content_box`]).

use crate::foundation::core::{BoundingBox, alpha_of};
use crate::foundation::error::{GifError, GifResult};
use crate::raster::buffer::PixelBuffer;

/// Smallest box containing every index `i` in `0..width*height` for which `pred(i)` holds.
///
/// Returns `None` when nothing matches (the EMPTY box). Never calls `pred` outside
/// `[0, width*height)`.
pub fn find_box(width: u32, height: u32, pred: impl Fn(usize) -> bool) -> Option<BoundingBox> {
    let w = width as usize;
    let len = w.checked_mul(height as usize)?;
    if len == 0 {
        return None;
    }

    let first = (0..len).find(|&i| pred(i))?;
    let last = (first..len).rev().find(|&i| pred(i))?;
    let top = first / w;
    let bottom = last / w;

    let column_hit = |x: usize| (top..=bottom).any(|y| pred(y * w + x));
    // `first` bounds the left edge from above and `last` bounds the right edge from below.
    let left = (0..=first % w).find(|&x| column_hit(x))?;
    let right = (last % w..w).rev().find(|&x| column_hit(x))?;

    Some(BoundingBox {
        x: left as u32,
        y: top as u32,
        width: (right - left + 1) as u32,
        height: (bottom - top + 1) as u32,
    })
}

/// Box enclosing every pixel that differs between `a` and `b`.
pub fn diff_box(a: &PixelBuffer, b: &PixelBuffer) -> GifResult<Option<BoundingBox>> {
    if !a.same_shape(b) {
        return Err(GifError::validation(format!(
            "diff_box expects same-shaped buffers ({}x{} vs {}x{})",
            a.width, a.height, b.width, b.height
        )));
    }
    Ok(find_box(a.width, a.height, |i| a.pixels.get(i) != b.pixels.get(i)))
}

/// Content box: the extent of every pixel whose alpha is non-zero.
pub fn content_box(buf: &PixelBuffer) -> Option<BoundingBox> {
    find_box(buf.width, buf.height, |i| {
        buf.pixels.get(i).is_some_and(|&px| alpha_of(px) != 0)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bbox.rs"]
mod tests;
