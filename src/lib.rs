//! deltagif records a sequence of rendered frames and hands them to an animated-image encoder,
//! transmitting only what changed between consecutive frames.
//!
//! # Pipeline overview
//!
//! 1. **Compose** (optional): flatten layers into one RGBA buffer with a [`Compositor`]
//! 2. **Diff**: [`FrameDiffer`] finds the minimal rectangle to re-transmit (full frame, sparse
//!    delta against a persistent stage, or the non-transparent content box)
//! 3. **Record**: [`CaptureSession`] keeps one [`FrameRecord`] per changed frame, folds static
//!    runs into the previous record's delay, and samples pixels for the palette
//! 4. **Finalize**: the session builds a palette through its [`Quantizer`], maps every record to
//!    indices, rescales them to the output size and calls a [`ContainerEncoder`]
//!
//! Color reduction and container bitstream writing live behind the [`Quantizer`] and
//! [`ContainerEncoder`] traits; this crate ships [`ExactQuantizer`] and [`InMemoryEncoder`] for
//! small palettes and tests.
//!
//! Pixels are packed straight-alpha RGBA in one `u32` (see [`pack_rgba`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod diff;
mod encode;
mod foundation;
mod quantize;
mod raster;
mod session;

pub use compose::{Compositor, SourceOverCompositor};
pub use diff::differ::{DiffOutcome, FrameDiff, FrameDiffer, UNCHANGED};
pub use encode::container::{ContainerEncoder, EncodeOpts, EncodedFrame, InMemoryEncoder};
pub use foundation::core::{
    BoundingBox, Canvas, DiffMode, Disposal, Rgb8, alpha_of, pack_rgba, rgb_of,
};
pub use foundation::error::{GifError, GifResult};
pub use quantize::exact::ExactQuantizer;
pub use quantize::{MAX_PALETTE_COLORS, Quantizer};
pub use raster::bbox::{content_box, diff_box, find_box};
pub use raster::buffer::{IndexBuffer, PixelBuffer};
pub use raster::region::{crop, place};
pub use raster::scale::{BoxScaler, EdgeAlignedScale, UniformScale, scale_to};
pub use session::capture_session::{
    AddOutcome, CaptureSession, CaptureStats, FrameRecord, SessionState, TRANSPARENT_INDEX,
};
pub use session::opts::CaptureOpts;
