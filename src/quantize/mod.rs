//! Palette construction, the color-reduction side of a capture.
//!
//! The session owns one [`Quantizer`] value for its whole lifetime: sampled pixels flow into it
//! during capture, and at finalize it builds the palette once and maps every recorded region
//! to palette indices.

pub(crate) mod exact;

use crate::foundation::core::Rgb8;
use crate::foundation::error::GifResult;

/// Largest palette a quantizer may return; the session reserves one more slot for transparency.
pub const MAX_PALETTE_COLORS: usize = 255;

/// Builds a bounded palette from sampled pixels and maps pixels onto it.
pub trait Quantizer {
    /// Feed a population of packed pixels (see [`crate::pack_rgba`]).
    fn sample(&mut self, pixels: &[u32]) -> GifResult<()>;

    /// Build the palette from everything sampled so far. Called once, after sampling ends.
    fn build_palette(&mut self) -> GifResult<Vec<Rgb8>>;

    /// Map each pixel to an index into the built palette, or `None` when it has no match
    /// (fully transparent or background). The output has the input's length.
    fn reduce(&self, pixels: &[u32]) -> GifResult<Vec<Option<u8>>>;
}
