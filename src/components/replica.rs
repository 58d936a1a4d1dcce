//! Per-instance views of a shared animated sprite.
//!
//! Many instances of one entity kind show the same animation at the same
//! frame, but each sits at its own position with its own rotation and scale.
//! A [`ReplicatedSprite`] reads the frame from the kind's shared
//! [`AnimatedSprite`] and asks its owner, through
//! [`SpriteTransformation::draw`], for the spatial transform to apply.
//!
//! The owner is held weakly: an instance owns its replica, so a strong
//! reference back would keep both alive forever.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;

use crate::components::animation::AnimatedSprite;
use crate::components::zindex::ZIndex;
use crate::systems::render::{Canvas, Drawable, SpriteTransform, SpriteTransformer};

/// Contributes a spatial transform when a replica is drawn.
///
/// Implementors issue `translate`, `rotate`, `scale` in that order. They must
/// not touch shared animation state.
pub trait SpriteTransformation {
    fn draw(&self, transformer: &mut dyn SpriteTransformer);
}

pub struct ReplicatedSprite {
    reference: Rc<AnimatedSprite>,
    listener: Weak<RefCell<dyn SpriteTransformation>>,
}

impl ReplicatedSprite {
    pub fn new(
        reference: Rc<AnimatedSprite>,
        listener: Weak<RefCell<dyn SpriteTransformation>>,
    ) -> Self {
        ReplicatedSprite {
            reference,
            listener,
        }
    }

    /// Frame currently showing on the shared sequence.
    pub fn current_frame(&self) -> usize {
        self.reference.current_frame()
    }

    pub fn reference(&self) -> &Rc<AnimatedSprite> {
        &self.reference
    }
}

impl Drawable for ReplicatedSprite {
    fn layer(&self) -> ZIndex {
        self.reference.layer()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(listener) = self.listener.upgrade() else {
            return;
        };
        let Ok(listener) = listener.try_borrow() else {
            warn!("replicated sprite skipped: owner is being mutated during draw");
            return;
        };
        let mut transform = SpriteTransform::new();
        listener.draw(&mut transform);
        canvas.draw_sprite(
            self.reference.layer(),
            self.reference.template(),
            self.reference.current_frame(),
            &transform,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::SpriteTemplate;
    use crate::systems::render::{RecordingCanvas, TransformOp};
    use glam::Vec2;

    struct Spot {
        position: Vec2,
        degrees: f32,
    }

    impl SpriteTransformation for Spot {
        fn draw(&self, transformer: &mut dyn SpriteTransformer) {
            transformer.translate(self.position);
            transformer.rotate(self.degrees);
        }
    }

    fn reference() -> Rc<AnimatedSprite> {
        Rc::new(AnimatedSprite::new(
            Rc::new(SpriteTemplate::new("spot", 3)),
            ZIndex::ENEMY,
        ))
    }

    #[test]
    fn replica_draws_shared_frame_with_owner_transform() {
        let shared = reference();
        shared.tick();
        let owner = Rc::new(RefCell::new(Spot {
            position: Vec2::new(2.0, 3.0),
            degrees: 45.0,
        }));
        let weak: Weak<RefCell<dyn SpriteTransformation>> = Rc::downgrade(&owner) as _;
        let replica = ReplicatedSprite::new(shared.clone(), weak);

        let mut canvas = RecordingCanvas::new();
        replica.draw(&mut canvas);

        assert_eq!(canvas.records.len(), 1);
        let record = &canvas.records[0];
        assert_eq!(record.frame, 1);
        assert_eq!(record.tex_key, "spot");
        assert_eq!(
            record.ops,
            vec![
                TransformOp::Translate { x: 2.0, y: 3.0 },
                TransformOp::Rotate { degrees: 45.0 },
            ]
        );
        assert_eq!(shared.current_frame(), 1);
    }

    #[test]
    fn replica_of_dropped_owner_draws_nothing() {
        let owner = Rc::new(RefCell::new(Spot {
            position: Vec2::ZERO,
            degrees: 0.0,
        }));
        let weak: Weak<RefCell<dyn SpriteTransformation>> = Rc::downgrade(&owner) as _;
        let replica = ReplicatedSprite::new(reference(), weak);
        drop(owner);

        let mut canvas = RecordingCanvas::new();
        replica.draw(&mut canvas);
        assert!(canvas.records.is_empty());
    }
}
