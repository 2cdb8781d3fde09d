use crate::foundation::core::{Disposal, Rgb8};
use crate::foundation::error::{GifError, GifResult};

/// One indexed frame ready for the container, positioned in output space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Left offset in the output canvas.
    pub x: u32,
    /// Top offset in the output canvas.
    pub y: u32,
    /// Frame width.
    pub width: u32,
    /// Frame height.
    pub height: u32,
    /// `width * height` palette indices.
    pub indices: Vec<u8>,
    /// Display time in 1/100 s ticks.
    pub delay: u16,
    /// What the player does with this frame before drawing the next.
    pub disposal: Disposal,
    /// Palette slot that renders as transparent.
    pub transparent_index: u8,
}

/// Container-level options handed to a [`ContainerEncoder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    /// Logical screen width.
    pub width: u32,
    /// Logical screen height.
    pub height: u32,
    /// `None` plays once; `Some(0)` loops forever; `Some(n)` loops `n` times.
    pub loop_count: Option<u16>,
    /// Palette slot of the background color.
    pub background_index: u8,
}

/// Serializes indexed frames plus a global palette into an animated-image container.
///
/// Ordering contract: `frames` are in display order and the palette length is a power of two.
pub trait ContainerEncoder {
    /// Encode the whole animation and return the container bytes.
    fn encode(
        &mut self,
        frames: &[EncodedFrame],
        palette: &[Rgb8],
        opts: &EncodeOpts,
    ) -> GifResult<Vec<u8>>;
}

/// Encoder that records its input instead of writing bytes, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    frames: Vec<EncodedFrame>,
    palette: Vec<Rgb8>,
    opts: Option<EncodeOpts>,
}

impl InMemoryEncoder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames from the last `encode` call.
    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    /// Palette from the last `encode` call.
    pub fn palette(&self) -> &[Rgb8] {
        &self.palette
    }

    /// Options from the last `encode` call, if any.
    pub fn opts(&self) -> Option<&EncodeOpts> {
        self.opts.as_ref()
    }
}

impl ContainerEncoder for InMemoryEncoder {
    fn encode(
        &mut self,
        frames: &[EncodedFrame],
        palette: &[Rgb8],
        opts: &EncodeOpts,
    ) -> GifResult<Vec<u8>> {
        if !palette.len().is_power_of_two() {
            return Err(GifError::encode(format!(
                "palette length {} is not a power of two",
                palette.len()
            )));
        }
        for (i, f) in frames.iter().enumerate() {
            if f.indices.len() != (f.width as usize) * (f.height as usize) {
                return Err(GifError::encode(format!(
                    "frame {i}: {} indices for a {}x{} frame",
                    f.indices.len(),
                    f.width,
                    f.height
                )));
            }
        }
        self.frames = frames.to_vec();
        self.palette = palette.to_vec();
        self.opts = Some(opts.clone());
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/container.rs"]
mod tests;
