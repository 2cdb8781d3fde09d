use std::borrow::Cow;

use crate::compose::Compositor;
use crate::diff::differ::{DiffOutcome, FrameDiffer};
use crate::encode::container::{ContainerEncoder, EncodeOpts, EncodedFrame};
use crate::foundation::core::{BoundingBox, Canvas, Disposal, Rgb8};
use crate::foundation::error::{GifError, GifResult};
use crate::quantize::{MAX_PALETTE_COLORS, Quantizer};
use crate::raster::buffer::{IndexBuffer, PixelBuffer};
use crate::raster::region::crop;
use crate::raster::scale::{BoxScaler, UniformScale, scale_to};
use crate::session::opts::CaptureOpts;

/// Palette slot reserved for transparency and the background color.
pub const TRANSPARENT_INDEX: u8 = 0;

/// Lifecycle of a [`CaptureSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting frames.
    Capturing,
    /// `finalize` started; frames are no longer accepted. A failed finalize stays here.
    Finalizing,
    /// The container was produced.
    Done,
}

/// One recorded region of the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRecord {
    /// Region relative to the capture area; [`BoundingBox::EMPTY`] for a blank sprite frame.
    pub bbox: BoundingBox,
    /// `bbox.width * bbox.height` pixels (a sparse delta in scene mode).
    pub data: Vec<u32>,
    /// Display time in ticks; grows when identical frames are coalesced into this one.
    pub delay: u16,
    /// Disposal for the encoded frame.
    pub disposal: Disposal,
    /// Palette indices for `data`, filled in by `finalize`.
    pub palette_indices: Option<IndexBuffer>,
}

/// What happened to a frame handed to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new record was appended at `index`.
    Recorded {
        /// Position in [`CaptureSession::frames`].
        index: usize,
    },
    /// Nothing changed; the delay was added to the record at `into`.
    Coalesced {
        /// Position of the record that absorbed the delay.
        into: usize,
    },
}

/// Capture counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Frames handed to the session.
    pub frames_offered: u64,
    /// Frames that produced a record.
    pub frames_recorded: u64,
    /// Frames folded into the previous record.
    pub frames_coalesced: u64,
    /// Frames passed to the quantizer for sampling.
    pub samples_taken: u32,
    /// Pixels retained across all records.
    pub retained_pixels: u64,
}

/// Owns the timeline of a recording: differencing on the way in, palette mapping, rescaling and
/// container handoff on the way out.
///
/// Frames must arrive in capture order. The first accepted frame fixes the capture region.
pub struct CaptureSession<Q> {
    opts: CaptureOpts,
    state: SessionState,
    differ: FrameDiffer,
    quantizer: Q,
    scaler: Box<dyn BoxScaler>,
    source: Option<Canvas>,
    crop: Option<BoundingBox>,
    frames: Vec<FrameRecord>,
    palette: Option<Vec<Rgb8>>,
    tail_delay: u16,
    stats: CaptureStats,
}

impl<Q: Quantizer> CaptureSession<Q> {
    /// Create a session; `opts` are validated here.
    pub fn new(opts: CaptureOpts, quantizer: Q) -> GifResult<Self> {
        opts.validate()?;
        Ok(Self {
            differ: FrameDiffer::new(opts.diff_mode),
            opts,
            state: SessionState::Capturing,
            quantizer,
            scaler: Box::new(UniformScale),
            source: None,
            crop: None,
            frames: Vec::new(),
            palette: None,
            tail_delay: 0,
            stats: CaptureStats::default(),
        })
    }

    /// Replace the box mapping applied at finalize (default [`UniformScale`]).
    pub fn with_scaler(mut self, scaler: impl BoxScaler + 'static) -> Self {
        self.scaler = Box::new(scaler);
        self
    }

    /// Options the session was built with.
    pub fn opts(&self) -> &CaptureOpts {
        &self.opts
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Recorded frames, in capture order.
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Capture region, fixed by the first accepted frame.
    pub fn crop_box(&self) -> Option<BoundingBox> {
        self.crop
    }

    /// Global palette (slot 0 reserved, padded to a power of two) once finalize built it.
    pub fn palette(&self) -> Option<&[Rgb8]> {
        self.palette.as_deref()
    }

    /// Capture counters.
    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    /// Borrow the quantizer.
    pub fn quantizer(&self) -> &Q {
        &self.quantizer
    }

    /// Record a fully rendered frame. `delay` defaults to the configured frame delay.
    #[tracing::instrument(skip(self, frame), fields(width = frame.width, height = frame.height))]
    pub fn add_frame(&mut self, frame: &PixelBuffer, delay: Option<u16>) -> GifResult<AddOutcome> {
        self.ensure_capturing()?;
        let source = Canvas::new(frame.width, frame.height);
        let region = self.resolve_region(source)?;

        let cropped = if region == BoundingBox::full(source.width, source.height) {
            Cow::Borrowed(frame)
        } else {
            let pixels = crop(&frame.pixels, frame.width, region)?;
            Cow::Owned(PixelBuffer::new(region.width, region.height, pixels)?)
        };
        self.accept(source, region, &cropped, delay)
    }

    /// Composite `layers` (bottom first) through `compositor` and record the result.
    #[tracing::instrument(skip(self, compositor, layers), fields(layers = layers.len()))]
    pub fn capture_layers(
        &mut self,
        compositor: &mut dyn Compositor,
        layers: &[PixelBuffer],
        delay: Option<u16>,
    ) -> GifResult<AddOutcome> {
        self.ensure_capturing()?;
        let first = layers
            .first()
            .ok_or_else(|| GifError::validation("capture_layers requires at least one layer"))?;
        let source = Canvas::new(first.width, first.height);
        let region = self.resolve_region(source)?;

        let composed = compositor.compose(layers, region)?;
        if composed.width != region.width || composed.height != region.height {
            return Err(GifError::validation(format!(
                "compositor returned {}x{} for a {}x{} crop",
                composed.width, composed.height, region.width, region.height
            )));
        }
        self.accept(source, region, &composed, delay)
    }

    fn ensure_capturing(&self) -> GifResult<()> {
        if self.state != SessionState::Capturing {
            return Err(GifError::state(format!(
                "frames cannot be added once finalize has started (state {:?})",
                self.state
            )));
        }
        Ok(())
    }

    fn resolve_region(&self, source: Canvas) -> GifResult<BoundingBox> {
        if let (Some(expected), Some(region)) = (self.source, self.crop) {
            if expected != source {
                return Err(GifError::validation(format!(
                    "frame is {}x{} but the session captures {}x{} frames",
                    source.width, source.height, expected.width, expected.height
                )));
            }
            return Ok(region);
        }

        if source.width == 0 || source.height == 0 {
            return Err(GifError::validation("frame has zero area"));
        }
        let region = self
            .opts
            .crop_box
            .unwrap_or(BoundingBox::full(source.width, source.height));
        if region.is_empty() {
            return Err(GifError::validation("crop box has zero area"));
        }
        if !region.fits_within(source.width, source.height) {
            return Err(GifError::range(format!(
                "crop box {}x{} at ({},{}) exceeds {}x{} frame",
                region.width, region.height, region.x, region.y, source.width, source.height
            )));
        }
        Ok(region)
    }

    fn accept(
        &mut self,
        source: Canvas,
        region: BoundingBox,
        frame: &PixelBuffer,
        delay: Option<u16>,
    ) -> GifResult<AddOutcome> {
        let delay = delay.unwrap_or(self.opts.frame_delay);
        let outcome = self.differ.diff(frame)?;
        self.stats.frames_offered += 1;
        if self.crop.is_none() {
            tracing::debug!(?region, "capture region fixed by first frame");
            self.source = Some(source);
            self.crop = Some(region);
        }

        let diff = match outcome {
            DiffOutcome::Unchanged => {
                let into = self.frames.len().checked_sub(1).ok_or_else(|| {
                    GifError::state("unchanged frame reported before any record exists")
                })?;
                let last = &mut self.frames[into];
                last.delay = last.delay.saturating_add(delay);
                self.tail_delay = delay;
                self.stats.frames_coalesced += 1;
                tracing::debug!(into, total_delay = last.delay, "static frame coalesced");
                return Ok(AddOutcome::Coalesced { into });
            }
            DiffOutcome::Changed(diff) => diff,
        };

        // The differ already advanced its stage, so the record must land before anything else
        // can fail.
        let index = self.frames.len();
        self.stats.frames_recorded += 1;
        self.stats.retained_pixels += diff.data.len() as u64;
        self.tail_delay = delay;
        self.frames.push(FrameRecord {
            bbox: diff.bbox,
            data: diff.data,
            delay,
            disposal: diff.disposal,
            palette_indices: None,
        });

        if index.is_multiple_of(self.opts.sample_interval as usize)
            && self.stats.samples_taken < self.opts.sample_budget
        {
            self.quantizer.sample(&frame.pixels)?;
            self.stats.samples_taken += 1;
            tracing::trace!(index, samples = self.stats.samples_taken, "frame sampled");
        }
        Ok(AddOutcome::Recorded { index })
    }

    /// Build the palette, index and rescale every record, and hand the result to `encoder`.
    ///
    /// Valid once, from [`SessionState::Capturing`]. On failure the session stays in
    /// [`SessionState::Finalizing`] and cannot be resumed.
    #[tracing::instrument(skip(self, encoder), fields(frames = self.frames.len()))]
    pub fn finalize(&mut self, encoder: &mut dyn ContainerEncoder) -> GifResult<Vec<u8>> {
        if self.state != SessionState::Capturing {
            return Err(GifError::state(format!(
                "finalize can only run once (state {:?})",
                self.state
            )));
        }
        if self.frames.is_empty() {
            return Err(GifError::validation("finalize requires at least one frame"));
        }
        let region = self
            .crop
            .ok_or_else(|| GifError::state("capture region was never fixed"))?;
        self.state = SessionState::Finalizing;

        let (palette, color_count) = self.build_global_palette()?;
        self.index_records(color_count)?;
        let frames = self.scale_records(region)?;

        let opts = EncodeOpts {
            width: self.opts.width,
            height: self.opts.height,
            loop_count: self.opts.loop_count,
            background_index: TRANSPARENT_INDEX,
        };
        let bytes = encoder.encode(&frames, &palette, &opts)?;
        tracing::debug!(
            frames = frames.len(),
            palette = palette.len(),
            bytes = bytes.len(),
            "container encoded"
        );
        self.palette = Some(palette);
        self.state = SessionState::Done;
        Ok(bytes)
    }

    /// Returns the padded palette and the number of colors the quantizer produced.
    fn build_global_palette(&mut self) -> GifResult<(Vec<Rgb8>, usize)> {
        let colors = self.quantizer.build_palette()?;
        if colors.len() > MAX_PALETTE_COLORS {
            return Err(GifError::quantize(format!(
                "quantizer returned {} colors (max {MAX_PALETTE_COLORS})",
                colors.len()
            )));
        }

        let color_count = colors.len();
        let mut palette = Vec::with_capacity(color_count + 1);
        palette.push(self.opts.background.unwrap_or(Rgb8::BLACK));
        palette.extend(colors);
        let padded = palette.len().next_power_of_two().max(2);
        palette.resize(padded, Rgb8::BLACK);
        Ok((palette, color_count))
    }

    fn index_records(&mut self, color_count: usize) -> GifResult<()> {
        for (i, rec) in self.frames.iter_mut().enumerate() {
            let reduced = self.quantizer.reduce(&rec.data)?;
            if reduced.len() != rec.data.len() {
                return Err(GifError::quantize(format!(
                    "record {i}: reduce returned {} indices for {} pixels",
                    reduced.len(),
                    rec.data.len()
                )));
            }
            let indices = reduced
                .into_iter()
                .map(|slot| match slot {
                    None => Ok(TRANSPARENT_INDEX),
                    Some(idx) if usize::from(idx) < color_count => Ok(idx + 1),
                    Some(idx) => Err(GifError::quantize(format!(
                        "record {i}: palette index {idx} out of range for {color_count} colors"
                    ))),
                })
                .collect::<GifResult<IndexBuffer>>()?;
            rec.palette_indices = Some(indices);
        }
        Ok(())
    }

    fn scale_records(&self, region: BoundingBox) -> GifResult<Vec<EncodedFrame>> {
        let from = Canvas::new(region.width, region.height);
        let to = Canvas::new(self.opts.width, self.opts.height);
        let last = self.frames.len() - 1;

        let mut out = Vec::with_capacity(self.frames.len());
        for (i, rec) in self.frames.iter().enumerate() {
            let delay = if i == last {
                rec.delay
                    .saturating_sub(self.tail_delay)
                    .saturating_add(self.opts.effective_loop_delay())
            } else {
                rec.delay
            };

            if rec.bbox.is_empty() {
                out.push(EncodedFrame {
                    x: 0,
                    y: 0,
                    width: 1,
                    height: 1,
                    indices: vec![TRANSPARENT_INDEX],
                    delay,
                    disposal: rec.disposal,
                    transparent_index: TRANSPARENT_INDEX,
                });
                continue;
            }

            let indices = rec.palette_indices.as_deref().ok_or_else(|| {
                GifError::state(format!("record {i} has no palette indices"))
            })?;
            let target = self.scaler.scale_box(rec.bbox, from, to);
            let indices = scale_to(
                indices,
                rec.bbox.width,
                rec.bbox.height,
                target.width,
                target.height,
            )?;
            out.push(EncodedFrame {
                x: target.x,
                y: target.y,
                width: target.width,
                height: target.height,
                indices,
                delay,
                disposal: rec.disposal,
                transparent_index: TRANSPARENT_INDEX,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture_session.rs"]
mod tests;
