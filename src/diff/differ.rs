use crate::foundation::core::{BoundingBox, DiffMode, Disposal};
use crate::foundation::error::{GifError, GifResult};
use crate::raster::bbox::{content_box, diff_box};
use crate::raster::buffer::PixelBuffer;
use crate::raster::region::{crop, place};

/// Pixel value written for unchanged positions of a sparse delta.
pub const UNCHANGED: u32 = 0;

/// The region of a frame that must be transmitted, and how a player disposes of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameDiff {
    /// Region relative to the capture area. [`BoundingBox::EMPTY`] for a blank sprite frame.
    pub bbox: BoundingBox,
    /// `bbox.width * bbox.height` pixels.
    pub data: Vec<u32>,
    /// Disposal for the encoded frame.
    pub disposal: Disposal,
}

/// Result of feeding one frame to a [`FrameDiffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Nothing changed against the stage; the frame should be folded into the previous one.
    Unchanged,
    /// A region to record.
    Changed(FrameDiff),
}

/// Computes the minimal changed region of each new frame.
///
/// In [`DiffMode::Scene`] the differ exclusively owns the stage (the merged state of every frame
/// seen so far) and updates it in place. The other modes keep no state between calls. Every
/// returned buffer is freshly allocated.
#[derive(Clone, Debug)]
pub struct FrameDiffer {
    mode: DiffMode,
    stage: Option<PixelBuffer>,
}

impl FrameDiffer {
    /// Create a differ for `mode`.
    pub fn new(mode: DiffMode) -> Self {
        Self { mode, stage: None }
    }

    /// Mode fixed at construction.
    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// `true` once a scene-mode baseline exists.
    pub fn has_stage(&self) -> bool {
        self.stage.is_some()
    }

    /// Diff `frame` (already cropped to the capture area) against the previous state.
    pub fn diff(&mut self, frame: &PixelBuffer) -> GifResult<DiffOutcome> {
        let expected = (frame.width as usize) * (frame.height as usize);
        if frame.pixels.len() != expected || expected == 0 {
            return Err(GifError::validation(format!(
                "frame of {}x{} carries {} pixels",
                frame.width,
                frame.height,
                frame.pixels.len()
            )));
        }

        match self.mode {
            DiffMode::Full => Ok(DiffOutcome::Changed(whole_frame(frame))),
            DiffMode::Scene => self.diff_scene(frame),
            DiffMode::Sprite => diff_sprite(frame).map(DiffOutcome::Changed),
        }
    }

    fn diff_scene(&mut self, frame: &PixelBuffer) -> GifResult<DiffOutcome> {
        let Some(stage) = self.stage.as_mut() else {
            self.stage = Some(frame.clone());
            return Ok(DiffOutcome::Changed(whole_frame(frame)));
        };

        let Some(bbox) = diff_box(stage, frame)? else {
            return Ok(DiffOutcome::Unchanged);
        };

        let fresh = crop(&frame.pixels, frame.width, bbox)?;
        let old = crop(&stage.pixels, stage.width, bbox)?;
        let data = old
            .iter()
            .zip(&fresh)
            .map(|(&o, &f)| if o == f { UNCHANGED } else { f })
            .collect();
        // Merge so the next diff compares against the combined state.
        place(&fresh, bbox.width, &mut stage.pixels, stage.width, bbox.x, bbox.y)?;

        Ok(DiffOutcome::Changed(FrameDiff {
            bbox,
            data,
            disposal: Disposal::LeaveInPlace,
        }))
    }
}

fn whole_frame(frame: &PixelBuffer) -> FrameDiff {
    FrameDiff {
        bbox: BoundingBox::full(frame.width, frame.height),
        data: frame.pixels.clone(),
        disposal: Disposal::LeaveInPlace,
    }
}

fn diff_sprite(frame: &PixelBuffer) -> GifResult<FrameDiff> {
    let (bbox, data) = match content_box(frame) {
        Some(bbox) => (bbox, crop(&frame.pixels, frame.width, bbox)?),
        None => (BoundingBox::EMPTY, Vec::new()),
    };
    Ok(FrameDiff {
        bbox,
        data,
        disposal: Disposal::RestoreBackground,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/diff/differ.rs"]
mod tests;
