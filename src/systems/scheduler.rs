//! Fixed-rate tick scheduler.
//!
//! The [`TickScheduler`] keeps an ordered list of [`TickListener`]s and, once
//! per frame, ticks each of them exactly once in registration order. Entity
//! kinds register their static data here when it is created; entity
//! instances register themselves on spawn.
//!
//! # Mutation during a frame
//!
//! Listeners receive a [`TickContext`] that queues [`TickContext::add`] and
//! [`TickContext::remove`] requests. Both are applied after the last listener
//! of the frame has ticked:
//!
//! - a listener added mid-frame is first ticked on the next frame;
//! - a listener removed mid-frame finishes its current tick (and still gets
//!   its turn this frame if it comes later in the order), then is never
//!   ticked again.
//!
//! # Re-entrancy
//!
//! [`TickScheduler::tick`] takes `&mut self`, so a listener cannot start
//! another pass while one is running. A host that shares the scheduler
//! through a `RefCell` gets a borrow panic instead of a nested pass.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::error::SchedulerError;
use crate::resources::worldtime::WorldTime;

/// Anything that advances once per simulation tick.
pub trait TickListener {
    fn tick(&mut self, ctx: &mut TickContext<'_>);
}

/// Shared handle to a tick listener.
pub type SharedListener = Rc<RefCell<dyn TickListener>>;

/// Handle returned on registration, used to remove a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

struct Entry {
    id: ListenerId,
    listener: SharedListener,
}

enum TickCommand {
    Add(Entry),
    Remove(ListenerId),
}

fn same_listener(a: &SharedListener, b: &SharedListener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Per-frame view handed to every listener.
pub struct TickContext<'a> {
    time: &'a WorldTime,
    listeners: &'a [Entry],
    pending: &'a mut Vec<TickCommand>,
    next_id: &'a mut u64,
}

impl TickContext<'_> {
    /// Frame counter at the start of this frame.
    pub fn time(&self) -> &WorldTime {
        self.time
    }

    /// Queue a listener to be registered once this frame ends.
    pub fn add(&mut self, listener: SharedListener) -> Result<ListenerId, SchedulerError> {
        if let Some(id) = self.lookup(&listener) {
            return Err(SchedulerError::AlreadyRegistered(id));
        }
        let id = ListenerId(*self.next_id);
        *self.next_id += 1;
        trace!("queued {id} for registration");
        self.pending.push(TickCommand::Add(Entry { id, listener }));
        Ok(id)
    }

    /// Queue a listener to be unregistered once this frame ends.
    pub fn remove(&mut self, id: ListenerId) -> Result<(), SchedulerError> {
        let already_queued = self
            .pending
            .iter()
            .any(|cmd| matches!(cmd, TickCommand::Remove(queued) if *queued == id));
        let known = self.listeners.iter().any(|e| e.id == id)
            || self
                .pending
                .iter()
                .any(|cmd| matches!(cmd, TickCommand::Add(e) if e.id == id));
        if already_queued || !known {
            return Err(SchedulerError::NotRegistered(id));
        }
        trace!("queued {id} for removal");
        self.pending.push(TickCommand::Remove(id));
        Ok(())
    }

    fn lookup(&self, listener: &SharedListener) -> Option<ListenerId> {
        let removed = |id: ListenerId| {
            self.pending
                .iter()
                .any(|cmd| matches!(cmd, TickCommand::Remove(queued) if *queued == id))
        };
        self.listeners
            .iter()
            .chain(self.pending.iter().filter_map(|cmd| match cmd {
                TickCommand::Add(e) => Some(e),
                TickCommand::Remove(_) => None,
            }))
            .find(|e| same_listener(&e.listener, listener) && !removed(e.id))
            .map(|e| e.id)
    }
}

/// Ordered collection of tick listeners driven once per frame.
#[derive(Default)]
pub struct TickScheduler {
    listeners: Vec<Entry>,
    pending: Vec<TickCommand>,
    next_id: u64,
    time: WorldTime,
}

impl fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickScheduler")
            .field("frame_count", &self.time.frame_count)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener at the end of the order.
    pub fn add(&mut self, listener: SharedListener) -> Result<ListenerId, SchedulerError> {
        if let Some(existing) = self
            .listeners
            .iter()
            .find(|e| same_listener(&e.listener, &listener))
        {
            return Err(SchedulerError::AlreadyRegistered(existing.id));
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        debug!("registered {id}");
        self.listeners.push(Entry { id, listener });
        Ok(id)
    }

    /// Unregister a listener, handing it back.
    pub fn remove(&mut self, id: ListenerId) -> Result<SharedListener, SchedulerError> {
        let index = self
            .listeners
            .iter()
            .position(|e| e.id == id)
            .ok_or(SchedulerError::NotRegistered(id))?;
        debug!("unregistered {id}");
        Ok(self.listeners.remove(index).listener)
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|e| e.id == id)
    }

    /// Registered ids in tick order.
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    pub fn frame_count(&self) -> u64 {
        self.time.frame_count
    }

    /// Run one frame: tick every listener once, in order, then apply the
    /// adds and removes they queued.
    pub fn tick(&mut self) {
        {
            let mut ctx = TickContext {
                time: &self.time,
                listeners: &self.listeners,
                pending: &mut self.pending,
                next_id: &mut self.next_id,
            };
            for entry in &self.listeners {
                entry.listener.borrow_mut().tick(&mut ctx);
            }
        }

        for command in std::mem::take(&mut self.pending) {
            match command {
                TickCommand::Add(entry) => {
                    debug!("registered {} after frame {}", entry.id, self.time.frame_count);
                    self.listeners.push(entry);
                }
                TickCommand::Remove(id) => {
                    if let Some(index) = self.listeners.iter().position(|e| e.id == id) {
                        debug!("unregistered {id} after frame {}", self.time.frame_count);
                        self.listeners.remove(index);
                    }
                }
            }
        }
        self.time.frame_count += 1;
    }

    /// Run `frames` frames back to back.
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.tick();
        }
    }
}
