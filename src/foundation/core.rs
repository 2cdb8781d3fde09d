use crate::foundation::error::{GifError, GifResult};

/// Axis-aligned integer rectangle, relative to its parent buffer.
///
/// A box is either non-degenerate (`width > 0 && height > 0`) or the distinguished
/// [`BoundingBox::EMPTY`] value, which marks "no pixel matched".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BoundingBox {
    /// The "nothing matched" box.
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a validated, non-empty box.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> GifResult<Self> {
        if width == 0 || height == 0 {
            return Err(GifError::validation(format!(
                "bounding box {width}x{height} at ({x},{y}) has zero area"
            )));
        }
        if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
            return Err(GifError::range("bounding box edges overflow u32"));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Box covering a whole `width x height` buffer.
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// `true` for a zero-area box.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Return `true` when pixel `(px, py)` lies inside the box.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Return `true` when the box lies inside a `width x height` parent.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        match (self.x.checked_add(self.width), self.y.checked_add(self.height)) {
            (Some(r), Some(b)) => r <= width && b <= height,
            _ => false,
        }
    }
}

/// Pixel dimensions of a buffer or output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Opaque RGB color, as stored in a palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black, used for palette padding.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub(crate) fn dist2(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// Pack straight-alpha RGBA8 channels into one pixel word.
///
/// The layout matches an RGBA8 byte stream read as little-endian `u32`s: red in the low byte,
/// alpha in the high byte.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Alpha channel of a packed pixel.
pub const fn alpha_of(px: u32) -> u8 {
    (px >> 24) as u8
}

/// Color channels of a packed pixel, alpha dropped.
pub const fn rgb_of(px: u32) -> Rgb8 {
    let [r, g, b, _] = px.to_le_bytes();
    Rgb8 { r, g, b }
}

/// How a player treats a frame's pixels before drawing the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Disposal {
    /// Clear the frame's rectangle back to the background.
    RestoreBackground,
    /// Keep the frame's pixels; the next frame draws on top.
    LeaveInPlace,
}

impl Disposal {
    /// GIF graphic-control disposal method code.
    pub fn code(self) -> u8 {
        match self {
            Self::LeaveInPlace => 1,
            Self::RestoreBackground => 2,
        }
    }
}

/// Frame differencing strategy, fixed for a session's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DiffMode {
    /// Every frame is transmitted whole.
    Full,
    /// Sparse deltas against a persistent stage.
    #[default]
    Scene,
    /// Independent content boxes over a restored background.
    Sprite,
}

impl TryFrom<u8> for DiffMode {
    type Error = GifError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Full),
            1 => Ok(Self::Scene),
            2 => Ok(Self::Sprite),
            other => Err(GifError::validation(format!(
                "diff mode must be 0, 1 or 2 (got {other})"
            ))),
        }
    }
}

impl From<DiffMode> for u8 {
    fn from(mode: DiffMode) -> Self {
        match mode {
            DiffMode::Full => 0,
            DiffMode::Scene => 1,
            DiffMode::Sprite => 2,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
