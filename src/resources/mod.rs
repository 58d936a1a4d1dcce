//! Long-lived state shared across a running game.
//!
//! Overview
//! - `gameconfig` – per-kind settings loaded from INI
//! - `renderset` – drawables grouped by layer
//! - `staticdata` – one shared static data value per entity kind
//! - `worldtime` – fixed frame rate and frame counter
pub mod gameconfig;
pub mod renderset;
pub mod staticdata;
pub mod worldtime;
