//! The capture timeline and its finalize pipeline.

pub(crate) mod capture_session;
pub(crate) mod opts;
