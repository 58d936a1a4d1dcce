//! Per-instance movement shared by every enemy kind.
//!
//! Path following is not part of this crate; enemies travel in a straight line
//! along their direction. Kinds decide the effective speed each tick (a
//! healer stands still while its kind is healing).

use glam::Vec2;

use crate::entities::EntityId;
use crate::resources::worldtime::TARGET_FRAME_RATE;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    id: EntityId,
    position: Vec2,
    direction: Vec2,
    base_speed: f32,
}

impl Enemy {
    /// `direction` is normalised; a zero vector leaves the enemy parked.
    pub fn new(id: EntityId, position: Vec2, direction: Vec2, base_speed: f32) -> Self {
        Enemy {
            id,
            position,
            direction: direction.normalize_or_zero(),
            base_speed,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize_or_zero();
    }

    /// Speed in world units per second as configured for the kind.
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Move one tick at `speed` units per second.
    pub fn advance(&mut self, speed: f32) {
        self.position += self.direction * (speed / TARGET_FRAME_RATE as f32);
    }

    /// Angle of travel in degrees, `None` when parked.
    pub fn heading_degrees(&self) -> Option<f32> {
        if self.direction == Vec2::ZERO {
            None
        } else {
            Some(self.direction.y.atan2(self.direction.x).to_degrees())
        }
    }
}
