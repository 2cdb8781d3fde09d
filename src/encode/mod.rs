//! Container encoding collaborators.
//!
//! The session hands finished, indexed frames to a [`ContainerEncoder`](container::ContainerEncoder)
//! and never writes container bytes itself.

pub(crate) mod container;
