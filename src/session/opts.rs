use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{BoundingBox, DiffMode, Rgb8};
use crate::foundation::error::{GifError, GifResult};

fn default_frame_delay() -> u16 {
    2
}

fn default_sample_interval() -> u32 {
    1
}

fn default_sample_budget() -> u32 {
    30
}

/// Construction-time configuration of a [`crate::CaptureSession`].
///
/// Only `width` and `height` are required; the JSON form uses the same field names and
/// `diff_mode` as its numeric code (`0` full, `1` scene, `2` sprite).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureOpts {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Differencing strategy.
    #[serde(default)]
    pub diff_mode: DiffMode,
    /// Capture region within each frame; defaults to the first frame's full size.
    #[serde(default)]
    pub crop_box: Option<BoundingBox>,
    /// Background color, stored in the reserved palette slot 0.
    #[serde(default)]
    pub background: Option<Rgb8>,
    /// `None` plays once, `Some(0)` loops forever.
    #[serde(default)]
    pub loop_count: Option<u16>,
    /// Default per-frame delay in 1/100 s ticks.
    #[serde(default = "default_frame_delay")]
    pub frame_delay: u16,
    /// Delay of the final frame before the animation loops; defaults to `frame_delay`.
    #[serde(default)]
    pub loop_delay: Option<u16>,
    /// Sample every n-th recorded frame for the palette.
    #[serde(default = "default_sample_interval")]
    pub sample_interval: u32,
    /// Upper bound on sampled frames.
    #[serde(default = "default_sample_budget")]
    pub sample_budget: u32,
}

impl CaptureOpts {
    /// Options for a `width x height` output with every other field at its default.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            diff_mode: DiffMode::default(),
            crop_box: None,
            background: None,
            loop_count: None,
            frame_delay: default_frame_delay(),
            loop_delay: None,
            sample_interval: default_sample_interval(),
            sample_budget: default_sample_budget(),
        }
    }

    /// Delay used for the last frame.
    pub fn effective_loop_delay(&self) -> u16 {
        self.loop_delay.unwrap_or(self.frame_delay)
    }

    /// Check the options for values the session cannot work with.
    pub fn validate(&self) -> GifResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GifError::validation(format!(
                "output size must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if let Some(crop) = self.crop_box
            && crop.is_empty()
        {
            return Err(GifError::validation("crop_box must have a non-zero area"));
        }
        if self.sample_interval == 0 {
            return Err(GifError::validation("sample_interval must be >= 1"));
        }
        Ok(())
    }

    /// Parse and validate options from a JSON string.
    pub fn from_json_str(s: &str) -> GifResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| GifError::serde(format!("parse capture options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse and validate options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GifResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GifError::validation(format!("open capture options '{}': {e}", path.display()))
        })?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| GifError::serde(format!("parse capture options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> GifResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GifError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
