//! Pixel buffers and the pure operations over them.

pub(crate) mod bbox;
pub(crate) mod buffer;
pub(crate) mod region;
pub(crate) mod scale;
