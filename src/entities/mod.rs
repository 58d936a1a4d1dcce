//! Entity kinds built on the shared static data pattern.
//!
//! Every kind splits its state in two:
//! - **static data**, one per kind, created lazily on the first spawn,
//!   registered with the tick scheduler, and shared by reference with every
//!   instance (animation sequences, curves, timers);
//! - **instances**, one per spawn, owning their position, a replicated sprite,
//!   and a handle to the kind's static data.
//!
//! Kinds:
//! - [`healer`] – periodically stops, spins and pulses, then emits heal effects
//! - [`flyer`] – animation-only kind that faces its direction of travel

pub mod enemy;
pub mod flyer;
pub mod healer;

use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;

use crate::components::replica::SpriteTransformation;
use crate::systems::render::Drawable;
use crate::systems::scheduler::TickListener;

/// Identity of a spawned instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// A spawned entity instance.
pub trait Entity: TickListener + SpriteTransformation {
    fn id(&self) -> EntityId;

    /// Name of the kind, also the settings section it reads.
    fn entity_name(&self) -> &'static str;

    fn position(&self) -> Vec2;

    /// Drawable added to the render set on init and removed on clean.
    fn visual(&self) -> Rc<dyn Drawable>;
}
