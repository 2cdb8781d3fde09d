//! Frame differencing: which rectangle of a new frame must be re-transmitted.

pub(crate) mod differ;
