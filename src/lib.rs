//! Replica engine library.
//!
//! A headless core for 2D tower-defence style entities. Every entity kind
//! keeps one static data value shared by all of its instances (animation
//! sequence, curves, cycle timers), ticked once per frame; instances draw the
//! shared animation through replicated sprites with their own transform.
//!
//! - [`components`] – curves, samplers, timers, sprites and replicas
//! - [`entities`] – concrete enemy kinds
//! - [`events`] – heal effect messages leaving the core
//! - [`game`] – host facade: spawn, remove, tick, draw
//! - [`resources`] – settings, render set, static data registry, world time
//! - [`systems`] – tick scheduler and render pass

pub mod components;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
