//! Sub-rectangle copies between flat row-major buffers.
//!
//! Both helpers are generic over the element type, so the same code moves packed pixels
//! (`u32`) and palette indices (`u8`). Out-of-bounds rectangles are range errors, never clamped.

use crate::foundation::core::BoundingBox;
use crate::foundation::error::{GifError, GifResult};

fn rows_of(len: usize, stride: u32, what: &str) -> GifResult<usize> {
    if stride == 0 {
        return Err(GifError::range(format!("{what} stride must be > 0")));
    }
    let stride = stride as usize;
    if !len.is_multiple_of(stride) {
        return Err(GifError::range(format!(
            "{what} length {len} is not a multiple of stride {stride}"
        )));
    }
    Ok(len / stride)
}

/// Copy the rectangle `bbox` out of `buf` (row width `stride`) into a new buffer of
/// `bbox.width * bbox.height` elements.
pub fn crop<T: Copy>(buf: &[T], stride: u32, bbox: BoundingBox) -> GifResult<Vec<T>> {
    if bbox.is_empty() {
        return Ok(Vec::new());
    }
    let rows = rows_of(buf.len(), stride, "crop source")?;
    if !bbox.fits_within(stride, rows as u32) {
        return Err(GifError::range(format!(
            "crop box {}x{} at ({},{}) exceeds {}x{} buffer",
            bbox.width, bbox.height, bbox.x, bbox.y, stride, rows
        )));
    }

    let (stride, bw) = (stride as usize, bbox.width as usize);
    let mut out = Vec::with_capacity(bbox.area());
    for y in bbox.y as usize..bbox.bottom() as usize {
        let start = y * stride + bbox.x as usize;
        out.extend_from_slice(&buf[start..start + bw]);
    }
    Ok(out)
}

/// Write `src` (row width `src_stride`) into `dst` (row width `dst_stride`) with its top-left
/// corner at `(x, y)`.
pub fn place<T: Copy>(
    src: &[T],
    src_stride: u32,
    dst: &mut [T],
    dst_stride: u32,
    x: u32,
    y: u32,
) -> GifResult<()> {
    if src.is_empty() {
        return Ok(());
    }
    let src_rows = rows_of(src.len(), src_stride, "place source")?;
    let dst_rows = rows_of(dst.len(), dst_stride, "place target")?;
    let target = BoundingBox {
        x,
        y,
        width: src_stride,
        height: src_rows as u32,
    };
    if !target.fits_within(dst_stride, dst_rows as u32) {
        return Err(GifError::range(format!(
            "placing {}x{} at ({x},{y}) exceeds {dst_stride}x{dst_rows} target",
            src_stride, src_rows
        )));
    }

    let (sw, dw) = (src_stride as usize, dst_stride as usize);
    for (row, line) in src.chunks_exact(sw).enumerate() {
        let start = (y as usize + row) * dw + x as usize;
        dst[start..start + sw].copy_from_slice(line);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/region.rs"]
mod tests;
