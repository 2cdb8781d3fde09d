use std::collections::HashMap;

use crate::foundation::core::{Rgb8, alpha_of, rgb_of};
use crate::foundation::error::{GifError, GifResult};
use crate::quantize::{MAX_PALETTE_COLORS, Quantizer};

/// Palette of the exact colors seen while sampling, in first-seen order.
///
/// Suited to flat artwork with few colors. Fully transparent pixels never enter the palette and
/// reduce to no-match; colors that were never sampled reduce to their nearest palette entry.
#[derive(Clone, Debug, Default)]
pub struct ExactQuantizer {
    colors: Vec<Rgb8>,
    lookup: HashMap<Rgb8, u8>,
    overflowed: bool,
    built: bool,
}

impl ExactQuantizer {
    /// Create an empty quantizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct colors sampled so far (capped just past the palette limit).
    pub fn distinct_colors(&self) -> usize {
        self.colors.len() + usize::from(self.overflowed)
    }

    fn nearest(&self, color: Rgb8) -> Option<u8> {
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| c.dist2(color))
            .map(|(i, _)| i as u8)
    }
}

impl Quantizer for ExactQuantizer {
    fn sample(&mut self, pixels: &[u32]) -> GifResult<()> {
        if self.built {
            return Err(GifError::quantize("cannot sample after the palette was built"));
        }
        for &px in pixels {
            if alpha_of(px) == 0 {
                continue;
            }
            let color = rgb_of(px);
            if self.lookup.contains_key(&color) {
                continue;
            }
            if self.colors.len() == MAX_PALETTE_COLORS {
                self.overflowed = true;
                continue;
            }
            self.lookup.insert(color, self.colors.len() as u8);
            self.colors.push(color);
        }
        Ok(())
    }

    fn build_palette(&mut self) -> GifResult<Vec<Rgb8>> {
        if self.overflowed {
            return Err(GifError::quantize(format!(
                "more than {MAX_PALETTE_COLORS} distinct colors sampled; use a reducing quantizer"
            )));
        }
        self.built = true;
        tracing::debug!(colors = self.colors.len(), "exact palette built");
        Ok(self.colors.clone())
    }

    fn reduce(&self, pixels: &[u32]) -> GifResult<Vec<Option<u8>>> {
        if !self.built {
            return Err(GifError::quantize("reduce called before build_palette"));
        }
        Ok(pixels
            .iter()
            .map(|&px| {
                if alpha_of(px) == 0 {
                    return None;
                }
                let color = rgb_of(px);
                self.lookup
                    .get(&color)
                    .copied()
                    .or_else(|| self.nearest(color))
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/exact.rs"]
mod tests;
