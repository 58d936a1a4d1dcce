//! Data objects owned by entity kinds and instances.
//!
//! Components hold state and know how to advance it by one tick; they never
//! reach for the scheduler or render set themselves.
//!
//! Submodules overview:
//! - [`animation`] – frame sequence shared by every instance of a kind
//! - [`curve`] – immutable composable scalar curves
//! - [`replica`] – per-instance view of a shared animated sprite
//! - [`sampler`] – curve evaluated one tick at a time
//! - [`sprite`] – sprite sheet template and its base matrix
//! - [`timer`] – tick-based countdown with fractional carry
//! - [`zindex`] – render layer

pub mod animation;
pub mod curve;
pub mod replica;
pub mod sampler;
pub mod sprite;
pub mod timer;
pub mod zindex;
