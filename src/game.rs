//! Host facade.
//!
//! [`Game`] owns everything one running field needs: the tick scheduler, the
//! render set, the per-kind static data registry, the loaded settings and the
//! sending half of the heal effect channel. Hosts spawn and remove instances
//! through it, advance it one fixed tick at a time and draw it onto any
//! [`Canvas`].
//!
//! # Lifecycle
//!
//! - The first spawn of a kind creates its static data, registers it with the
//!   scheduler and adds its shared sprite to the render set. Static data then
//!   lives as long as the game.
//! - Every spawn registers the instance with the scheduler (after its kind's
//!   static data, so the kind is always ticked first) and adds its replicated
//!   sprite to the render set.
//! - [`Game::remove`] unregisters the instance and drops its sprite.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;
use log::{debug, info};

use crate::entities::flyer::{self, Flyer, FlyerStatic};
use crate::entities::healer::{self, Healer, HealerStatic};
use crate::entities::{Entity, EntityId};
use crate::error::{GameError, GameResult};
use crate::events::heal::{HealEffect, heal_channel};
use crate::resources::gameconfig::GameSettings;
use crate::resources::renderset::RenderSet;
use crate::resources::staticdata::StaticDataRegistry;
use crate::systems::render::{Canvas, Drawable, render_pass};
use crate::systems::scheduler::{ListenerId, TickScheduler};

struct Spawned {
    entity: Rc<RefCell<dyn Entity>>,
    listener: ListenerId,
    visual: Rc<dyn Drawable>,
}

pub struct Game {
    scheduler: TickScheduler,
    render_set: RenderSet,
    static_data: StaticDataRegistry,
    settings: GameSettings,
    effects: Sender<HealEffect>,
    entities: BTreeMap<EntityId, Spawned>,
    next_id: u64,
}

impl Game {
    /// Create an empty field. The receiver gets every heal effect emitted.
    pub fn new(settings: GameSettings) -> (Self, Receiver<HealEffect>) {
        let (effects, receiver) = heal_channel();
        let game = Game {
            scheduler: TickScheduler::new(),
            render_set: RenderSet::new(),
            static_data: StaticDataRegistry::new(),
            settings,
            effects,
            entities: BTreeMap::new(),
            next_id: 1,
        };
        (game, receiver)
    }

    /// Healer static data, created on first use.
    pub fn healer_static(&mut self) -> GameResult<Rc<RefCell<HealerStatic>>> {
        self.static_data.get_or_try_init(healer::ENTITY_NAME, || {
            let settings = self.settings.entity(healer::ENTITY_NAME)?;
            HealerStatic::create(settings, &mut self.scheduler, &mut self.render_set)
        })
    }

    /// Flyer static data, created on first use.
    pub fn flyer_static(&mut self) -> GameResult<Rc<RefCell<FlyerStatic>>> {
        self.static_data.get_or_try_init(flyer::ENTITY_NAME, || {
            FlyerStatic::create(&mut self.scheduler, &mut self.render_set)
        })
    }

    pub fn spawn_healer(&mut self, position: Vec2, direction: Vec2) -> GameResult<EntityId> {
        let data = self.healer_static()?;
        let settings = self.settings.entity(healer::ENTITY_NAME)?;
        let id = EntityId(self.next_id);
        let healer = Healer::spawn(
            id,
            position,
            direction,
            settings,
            data,
            self.effects.clone(),
        )?;
        self.init_entity(healer)
    }

    pub fn spawn_flyer(&mut self, position: Vec2, direction: Vec2) -> GameResult<EntityId> {
        let data = self.flyer_static()?;
        let settings = self.settings.entity(flyer::ENTITY_NAME)?;
        let id = EntityId(self.next_id);
        let flyer = Flyer::spawn(id, position, direction, settings, data)?;
        self.init_entity(flyer)
    }

    /// Register a freshly built instance with the scheduler and render set.
    /// An id that is already on the field is rejected.
    pub fn init_entity<E>(&mut self, entity: Rc<RefCell<E>>) -> GameResult<EntityId>
    where
        E: Entity + 'static,
    {
        let (id, visual, name) = {
            let entity = entity.borrow();
            (entity.id(), entity.visual(), entity.entity_name())
        };
        if self.entities.contains_key(&id) {
            return Err(GameError::DuplicateEntity(id));
        }
        let listener = self.scheduler.add(entity.clone())?;
        self.render_set.add(visual.clone());
        self.next_id = self.next_id.max(id.0 + 1);
        self.entities.insert(
            id,
            Spawned {
                entity,
                listener,
                visual,
            },
        );
        debug!("{name} {id} spawned as {listener}");
        Ok(id)
    }

    /// Unregister an instance and drop its sprite. Kind static data stays.
    pub fn remove(&mut self, id: EntityId) -> GameResult<()> {
        let spawned = self.entities.get(&id).ok_or(GameError::UnknownEntity(id))?;
        self.scheduler.remove(spawned.listener)?;
        self.render_set.remove(&spawned.visual);
        self.entities.remove(&id);
        debug!("{id} removed");
        Ok(())
    }

    /// Advance the field by one fixed tick.
    pub fn tick(&mut self) {
        self.scheduler.tick();
    }

    pub fn run(&mut self, ticks: u64) {
        self.scheduler.run(ticks);
        info!("ran {ticks} ticks, {} entities on the field", self.entities.len());
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        render_pass(&self.render_set, canvas);
    }

    pub fn entity(&self, id: EntityId) -> Option<Rc<RefCell<dyn Entity>>> {
        self.entities.get(&id).map(|spawned| spawned.entity.clone())
    }

    /// Spawned instances in id order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Instances whose position lies within `radius` of `origin`, in id order.
    pub fn entities_within(&self, origin: Vec2, radius: f32) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, spawned)| spawned.entity.borrow().position().distance(origin) <= radius)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn frame_count(&self) -> u64 {
        self.scheduler.frame_count()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn render_set(&self) -> &RenderSet {
        &self.render_set
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }
}
