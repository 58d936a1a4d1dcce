//! Healer enemy kind.
//!
//! All healers on the field heal in lockstep. Their shared [`HealerStatic`]
//! runs a two-state cycle:
//!
//! - `Idle` until the heal interval timer elapses, then `Healing`.
//! - While `Healing`, two sampled curves are stepped once per tick: the
//!   rotation curve is *added* to the kind's angle, the scale curve
//!   *replaces* the kind's scale. Healers do not move.
//! - Once the samplers have covered `healDuration` seconds of ticks the cycle
//!   completes: the healed set is cleared, angle and scale are reset, the
//!   samplers rewind, and for exactly that tick the kind signals that effects
//!   should be dropped. The healed set is snapshotted before it is cleared.
//!   Every healer instance then sends a
//!   [`HealEffect`](crate::events::heal::HealEffect).
//!
//! Within one tick the kind runs in this order: advance the shared animation,
//! tick the interval timer (a fire while already healing is ignored), then,
//! when healing, either complete the cycle or step the curves. The curves are
//! not stepped on the tick that starts a cycle, so a fresh cycle shows angle
//! `0` and scale `1`. A zero or negative duration completes the cycle on the
//! tick that starts it.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::{Rc, Weak};

use crossbeam_channel::Sender;
use glam::Vec2;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::animation::{AnimatedSprite, SequenceMode};
use crate::components::curve::Curve;
use crate::components::replica::{ReplicatedSprite, SpriteTransformation};
use crate::components::sampler::SampledCurve;
use crate::components::sprite::SpriteTemplate;
use crate::components::timer::TickTimer;
use crate::components::zindex::ZIndex;
use crate::entities::enemy::Enemy;
use crate::entities::{Entity, EntityId};
use crate::error::{ConfigError, GameResult};
use crate::events::heal::HealEffect;
use crate::resources::gameconfig::EntitySettings;
use crate::resources::renderset::RenderSet;
use crate::resources::worldtime::{TARGET_FRAME_RATE, seconds_to_ticks};
use crate::systems::render::{Drawable, SpriteTransformer};
use crate::systems::scheduler::{TickContext, TickListener, TickScheduler};

pub const ENTITY_NAME: &str = "healer";

const ANIMATION_TICKS_PER_FRAME: f32 = 1.5;
const SPRITE_FRAMES: usize = 4;
const SPRITE_SIZE: f32 = 0.9;
/// Peak scale reached in the middle of the pulse.
const HEAL_SCALE_FACTOR: f32 = 2.0;
/// Peak spin in turns per second.
const HEAL_ROTATION: f32 = 2.5;
/// Share of the heal duration covered by one half-period of the curves.
const HEAL_CURVE_SPAN: f32 = 0.66;

/// Tuning values of the healer kind, read once from settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealerConfig {
    /// Ticks between the starts of two healing cycles.
    pub heal_interval: f32,
    /// Seconds a healing cycle lasts.
    pub heal_duration: f32,
    pub heal_amount: f32,
    pub heal_radius: f32,
}

impl HealerConfig {
    /// Read `healInterval` and `healDuration` (seconds), `healAmount` and
    /// `healRadius`.
    pub fn from_settings(settings: &EntitySettings) -> Result<Self, ConfigError> {
        Ok(HealerConfig {
            heal_interval: seconds_to_ticks(settings.get_float("healInterval")?),
            heal_duration: settings.get_float("healDuration")?,
            heal_amount: settings.get_float("healAmount")?,
            heal_radius: settings.get_float("healRadius")?,
        })
    }

    /// Ticks after which a healing cycle completes.
    pub fn completion_ticks(&self) -> f32 {
        seconds_to_ticks(self.heal_duration)
    }

    fn curve_stretch(&self) -> f32 {
        self.completion_ticks() * HEAL_CURVE_SPAN / PI
    }

    /// Scale over one cycle: a single sine pulse from 1 up to
    /// [`HEAL_SCALE_FACTOR`] and back, flat afterwards, negated.
    pub fn scale_curve(&self) -> Curve {
        Curve::sine()
            .join(Curve::constant(0.0), PI)
            .multiply(HEAL_SCALE_FACTOR - 1.0)
            .offset(1.0)
            .stretch(self.curve_stretch())
            .invert()
    }

    /// Rotation increment per tick over one cycle, in degrees: still for the
    /// first quarter period, then a sine spin.
    pub fn rotate_curve(&self) -> Curve {
        Curve::constant(0.0)
            .join(Curve::sine(), PI / 2.0)
            .multiply(HEAL_ROTATION / TARGET_FRAME_RATE as f32 * 360.0)
            .stretch(self.curve_stretch())
    }
}

/// Phase of the shared healing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealPhase {
    Idle,
    Healing,
}

/// State shared by every healer instance.
#[derive(Debug)]
pub struct HealerStatic {
    config: HealerConfig,
    phase: HealPhase,
    drop_effect: bool,
    angle: f32,
    scale: f32,
    heal_timer: TickTimer,
    healed: FxHashSet<EntityId>,
    cycle_healed: SmallVec<[EntityId; 8]>,
    scale_sampler: SampledCurve,
    rotate_sampler: SampledCurve,
    reference_sprite: Rc<AnimatedSprite>,
}

impl HealerStatic {
    pub fn new(config: HealerConfig) -> Self {
        if config.heal_duration <= 0.0 {
            warn!(
                "healer: healDuration {} is not positive, cycles complete immediately",
                config.heal_duration
            );
        }
        if config.heal_interval <= 0.0 {
            warn!(
                "healer: healInterval of {} ticks is not positive, a cycle starts every tick",
                config.heal_interval
            );
        }

        let template = SpriteTemplate::new(ENTITY_NAME, SPRITE_FRAMES).with_matrix(
            SPRITE_SIZE,
            SPRITE_SIZE,
            None,
            None,
        );
        let reference_sprite = AnimatedSprite::new(Rc::new(template), ZIndex::ENEMY)
            .with_sequence(SequenceMode::Forward)
            .with_frequency(ANIMATION_TICKS_PER_FRAME);

        HealerStatic {
            phase: HealPhase::Idle,
            drop_effect: false,
            angle: 0.0,
            scale: 1.0,
            heal_timer: TickTimer::interval(config.heal_interval),
            healed: FxHashSet::default(),
            cycle_healed: SmallVec::new(),
            scale_sampler: config.scale_curve().sample(),
            rotate_sampler: config.rotate_curve().sample(),
            reference_sprite: Rc::new(reference_sprite),
            config,
        }
    }

    /// Build the kind's static data from settings, register it with the
    /// scheduler and add its shared sprite to the render set.
    pub fn create(
        settings: &EntitySettings,
        scheduler: &mut TickScheduler,
        render_set: &mut RenderSet,
    ) -> GameResult<Rc<RefCell<Self>>> {
        let config = HealerConfig::from_settings(settings)?;
        let data = Rc::new(RefCell::new(Self::new(config)));
        let listener = scheduler.add(data.clone())?;
        let sprite: Rc<dyn Drawable> = data.borrow().reference_sprite.clone();
        render_set.add(sprite);
        info!(
            "healer: static data ready as {listener} (interval {} ticks, duration {}s)",
            config.heal_interval, config.heal_duration
        );
        Ok(data)
    }

    /// Advance the healing cycle by one tick.
    pub fn update(&mut self) {
        self.reference_sprite.tick();
        self.drop_effect = false;

        let mut entered = false;
        if self.heal_timer.tick() && self.phase == HealPhase::Idle {
            debug!("healer: healing started");
            self.phase = HealPhase::Healing;
            entered = true;
        }

        if self.phase != HealPhase::Healing {
            return;
        }

        if self.scale_sampler.position() >= self.config.completion_ticks() {
            self.finish_cycle();
        } else if !entered {
            self.rotate_sampler.step();
            self.scale_sampler.step();
            self.angle += self.rotate_sampler.value();
            self.scale = self.scale_sampler.value();
        }
    }

    fn finish_cycle(&mut self) {
        debug!(
            "healer: healing finished after {} ticks, {} healed",
            self.scale_sampler.position(),
            self.healed.len()
        );
        self.cycle_healed = self.healed.drain().collect();
        self.cycle_healed.sort_unstable();
        self.drop_effect = true;
        self.phase = HealPhase::Idle;
        self.angle = 0.0;
        self.scale = 1.0;
        self.rotate_sampler.reset();
        self.scale_sampler.reset();
    }

    pub fn config(&self) -> &HealerConfig {
        &self.config
    }

    pub fn phase(&self) -> HealPhase {
        self.phase
    }

    pub fn is_healing(&self) -> bool {
        self.phase == HealPhase::Healing
    }

    /// `true` only on the tick a healing cycle completes.
    pub fn drop_effect(&self) -> bool {
        self.drop_effect
    }

    /// Accumulated rotation in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Ticks sampled in the current cycle.
    pub fn cycle_position(&self) -> f32 {
        self.scale_sampler.position()
    }

    pub fn reference_sprite(&self) -> &Rc<AnimatedSprite> {
        &self.reference_sprite
    }

    /// Note that `target` was healed. Returns `false` if it was already healed
    /// since the last cycle completed.
    pub fn record_healed(&mut self, target: EntityId) -> bool {
        self.healed.insert(target)
    }

    pub fn was_healed(&self, target: EntityId) -> bool {
        self.healed.contains(&target)
    }

    /// Targets healed during the most recently completed cycle, sorted by id.
    pub fn healed_snapshot(&self) -> SmallVec<[EntityId; 8]> {
        self.cycle_healed.clone()
    }
}

impl TickListener for HealerStatic {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) {
        self.update();
    }
}

/// One healer on the field.
pub struct Healer {
    enemy: Enemy,
    static_data: Rc<RefCell<HealerStatic>>,
    sprite: Rc<ReplicatedSprite>,
    effects: Sender<HealEffect>,
}

impl Healer {
    /// Create an instance reading `speed` from settings. The caller registers
    /// it with the scheduler and adds [`Entity::visual`] to the render set.
    pub fn spawn(
        id: EntityId,
        position: Vec2,
        direction: Vec2,
        settings: &EntitySettings,
        static_data: Rc<RefCell<HealerStatic>>,
        effects: Sender<HealEffect>,
    ) -> Result<Rc<RefCell<Self>>, ConfigError> {
        let speed = settings.get_float("speed")?;
        let reference = static_data.borrow().reference_sprite().clone();
        Ok(Rc::new_cyclic(|me: &Weak<RefCell<Healer>>| {
            let listener: Weak<RefCell<dyn SpriteTransformation>> = me.clone();
            RefCell::new(Healer {
                enemy: Enemy::new(id, position, direction, speed),
                static_data,
                sprite: Rc::new(ReplicatedSprite::new(reference, listener)),
                effects,
            })
        }))
    }

    /// Zero while the kind is healing.
    pub fn speed(&self) -> f32 {
        if self.static_data.borrow().is_healing() {
            0.0
        } else {
            self.enemy.base_speed()
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn static_data(&self) -> &Rc<RefCell<HealerStatic>> {
        &self.static_data
    }

    pub fn sprite(&self) -> &Rc<ReplicatedSprite> {
        &self.sprite
    }
}

impl TickListener for Healer {
    fn tick(&mut self, _ctx: &mut TickContext<'_>) {
        let speed = self.speed();
        self.enemy.advance(speed);

        let data = self.static_data.borrow();
        if data.drop_effect() {
            let effect = HealEffect {
                source: self.enemy.id(),
                origin: self.enemy.position(),
                amount: data.config().heal_amount,
                radius: data.config().heal_radius,
                already_healed: data.healed_snapshot(),
            };
            if self.effects.send(effect).is_err() {
                warn!("healer {}: effect receiver is gone, heal dropped", self.enemy.id());
            }
        }
    }
}

impl SpriteTransformation for Healer {
    fn draw(&self, transformer: &mut dyn SpriteTransformer) {
        let data = self.static_data.borrow();
        transformer.translate(self.enemy.position());
        transformer.rotate(data.angle());
        transformer.scale(data.scale());
    }
}

impl Entity for Healer {
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
