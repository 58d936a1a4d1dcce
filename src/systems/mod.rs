//! Engine systems.
//!
//! Submodules overview
//! - [`render`] – draw pass, sprite transform builder and recording canvas
//! - [`scheduler`] – fixed-rate tick loop with deferred registration

pub mod render;
pub mod scheduler;
