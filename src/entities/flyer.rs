//! Flyer enemy kind.
//!
//! Flyers only animate and travel. The kind's static data advances a
//! forward-backward wing sequence; each instance faces its direction of travel.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use log::info;

use crate::components::animation::{AnimatedSprite, SequenceMode};
use crate::components::replica::{ReplicatedSprite, SpriteTransformation};
use crate::components::sprite::SpriteTemplate;
use crate::components::zindex::ZIndex;
use crate::entities::enemy::Enemy;
use crate::entities::{Entity, EntityId};
use crate::error::{ConfigError, GameResult};
use crate::resources::gameconfig::EntitySettings;
use crate::resources::renderset::RenderSet;
use crate::systems::render::{Drawable, SpriteTransformer};
use crate::systems::scheduler::{TickContext, TickListener, TickScheduler};

pub const ENTITY_NAME: &str = "flyer";

const SPRITE_FRAMES: usize = 6;
const SPRITE_SIZE: f32 = 0.9;
/// The sheet is drawn facing up; travel angles are measured from +x.
const SPRITE_ROTATION: f32 = -90.0;

/// State shared by every flyer instance.
#[derive(Debug)]
pub struct FlyerStatic {
    reference_sprite: Rc<AnimatedSprite>,
}

impl Default for FlyerStatic {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyerStatic {
    pub fn new() -> Self {
        let template = SpriteTemplate::new(ENTITY_NAME, SPRITE_FRAMES).with_matrix(
            SPRITE_SIZE,
            SPRITE_SIZE,
            None,
            Some(SPRITE_ROTATION),
        );
        let reference_sprite = AnimatedSprite::new(Rc::new(template), ZIndex::ENEMY)
            .with_sequence(SequenceMode::ForwardBackward)
            .with_frequency(1.0);
        FlyerStatic {
            reference_sprite: Rc::new(reference_sprite),
        }
    }

    /// Register new static data with the scheduler and add its shared sprite
    /// to the render set.
    pub fn create(
        scheduler: &mut TickScheduler,
        render_set: &mut RenderSet,
    ) -> GameResult<Rc<RefCell<Self>>> {
        let data = Rc::new(RefCell::new(Self::new()));
        let listener = scheduler.add(data.clone())?;
        let sprite: Rc<dyn Drawable> = data.borrow().reference_sprite.clone();
        render_set.add(sprite);
        info!("flyer: static data ready as {listener}");
        Ok(data)
    }

    pub fn reference_sprite(&self) -> &Rc<AnimatedSprite> {
        &self.reference_sprite
    }
}

impl TickListener for FlyerStatic {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) {
        self.reference_sprite.tick();
    }
}

/// One flyer on the field.
pub struct Flyer {
    enemy: Enemy,
    /// Degrees, kept from the last non-zero heading.
    angle: f32,
    static_data: Rc<RefCell<FlyerStatic>>,
    sprite: Rc<ReplicatedSprite>,
}

impl Flyer {
    pub fn spawn(
        id: EntityId,
        position: Vec2,
        direction: Vec2,
        settings: &EntitySettings,
        static_data: Rc<RefCell<FlyerStatic>>,
    ) -> Result<Rc<RefCell<Self>>, ConfigError> {
        let speed = settings.get_float("speed")?;
        let reference = static_data.borrow().reference_sprite().clone();
        let enemy = Enemy::new(id, position, direction, speed);
        let angle = enemy.heading_degrees().unwrap_or(0.0);
        Ok(Rc::new_cyclic(|me: &Weak<RefCell<Flyer>>| {
            let listener: Weak<RefCell<dyn SpriteTransformation>> = me.clone();
            RefCell::new(Flyer {
                enemy,
                angle,
                static_data,
                sprite: Rc::new(ReplicatedSprite::new(reference, listener)),
            })
        }))
    }

    /// Change course; the sprite turns to match.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.enemy.set_direction(direction);
        if let Some(angle) = self.enemy.heading_degrees() {
            self.angle = angle;
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn static_data(&self) -> &Rc<RefCell<FlyerStatic>> {
        &self.static_data
    }

    pub fn sprite(&self) -> &Rc<ReplicatedSprite> {
        &self.sprite
    }
}

impl TickListener for Flyer {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) {
        let speed = self.enemy.base_speed();
        self.enemy.advance(speed);
    }
}

impl SpriteTransformation for Flyer {
    fn draw(&self, transformer: &mut dyn SpriteTransformer) {
        transformer.translate(self.enemy.position());
        transformer.rotate(self.angle);
    }
}

impl Entity for Flyer {
    fn id(&self) -> EntityId {
        self.enemy.id()
    }

    fn entity_name(&self) -> &'static str {
        ENTITY_NAME
    }

    fn position(&self) -> Vec2 {
        self.enemy.position()
    }

    fn visual(&self) -> Rc<dyn Drawable> {
        self.sprite.clone()
    }
}
