//! Heal effect notifications.
//!
//! When a healer kind finishes a healing cycle, every healer instance sends a
//! [`HealEffect`] to the effect collaborator through a crossbeam channel. The
//! collaborator (out of this crate) heals enemies in range and reports who it
//! healed back to the kind with
//! [`HealerStatic::record_healed`](crate::entities::healer::HealerStatic::record_healed),
//! so that one target is healed at most once per cycle.
//!
//! Everything in the message is a value: the already-healed targets are the
//! targets recorded during the cycle that just completed, copied out before the
//! kind cleared its set.

use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec2;
use serde::Serialize;
use smallvec::SmallVec;

use crate::entities::EntityId;

/// Request to spawn one heal effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealEffect {
    /// Instance that emitted the effect.
    pub source: EntityId,
    /// Where the effect starts.
    pub origin: Vec2,
    /// Fraction of health restored.
    pub amount: f32,
    pub radius: f32,
    /// Targets healed during the completed cycle, sorted by id.
    pub already_healed: SmallVec<[EntityId; 8]>,
}

/// Create the effect channel. The sender half is cloned into every healer.
pub fn heal_channel() -> (Sender<HealEffect>, Receiver<HealEffect>) {
    unbounded::<HealEffect>()
}
