//! Registry of per-kind static data.
//!
//! Each entity kind keeps exactly one static data value, created lazily the
//! first time an instance of the kind is spawned and kept for the life of the
//! game. The registry stores them type-erased under the kind name; lookups
//! downcast back to the concrete type.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{GameError, GameResult};

/// Map of entity kind names to their shared static data.
#[derive(Default)]
pub struct StaticDataRegistry {
    map: FxHashMap<&'static str, Rc<dyn Any>>,
}

impl StaticDataRegistry {
    pub fn new() -> Self {
        StaticDataRegistry {
            map: FxHashMap::default(),
        }
    }

    /// Static data registered for `kind`, if any. Fails if the entry holds a
    /// different type than `T`.
    pub fn get<T: 'static>(&self, kind: &'static str) -> GameResult<Option<Rc<RefCell<T>>>> {
        match self.map.get(kind) {
            None => Ok(None),
            Some(entry) => Rc::clone(entry)
                .downcast::<RefCell<T>>()
                .map(Some)
                .map_err(|_| GameError::StaticDataType { kind }),
        }
    }

    /// Static data for `kind`, running `init` to create it on first use.
    ///
    /// A failing `init` leaves the registry untouched, so the next call tries
    /// again.
    pub fn get_or_try_init<T, F>(
        &mut self,
        kind: &'static str,
        init: F,
    ) -> GameResult<Rc<RefCell<T>>>
    where
        T: 'static,
        F: FnOnce() -> GameResult<Rc<RefCell<T>>>,
    {
        if let Some(existing) = self.get::<T>(kind)? {
            return Ok(existing);
        }
        let created = init()?;
        let entry: Rc<dyn Any> = created.clone();
        self.map.insert(kind, entry);
        debug!("static data for {kind:?} registered");
        Ok(created)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.map.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_runs_once_per_kind() {
        let mut registry = StaticDataRegistry::new();
        let mut calls = 0;
        for _ in 0..3 {
            let data = registry
                .get_or_try_init("counter", || {
                    calls += 1;
                    Ok(Rc::new(RefCell::new(41_u32)))
                })
                .unwrap();
            *data.borrow_mut() += 1;
        }
        assert_eq!(calls, 1);
        let data = registry.get::<u32>("counter").unwrap().unwrap();
        assert_eq!(*data.borrow(), 44);
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut registry = StaticDataRegistry::new();
        registry
            .get_or_try_init("kind", || Ok(Rc::new(RefCell::new(1.0_f32))))
            .unwrap();
        assert!(matches!(
            registry.get::<String>("kind"),
            Err(GameError::StaticDataType { kind: "kind" })
        ));
    }

    #[test]
    fn failed_init_is_not_cached() {
        let mut registry = StaticDataRegistry::new();
        let failed = registry.get_or_try_init::<u8, _>("kind", || {
            Err(GameError::UnknownEntity(crate::entities::EntityId(0)))
        });
        assert!(failed.is_err());
        assert!(!registry.contains("kind"));
        assert!(registry.get::<u8>("kind").unwrap().is_none());
    }
}
