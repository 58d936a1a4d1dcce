//! Render collector.
//!
//! Holds everything that should be drawn, grouped by [`ZIndex`]. Within a
//! layer the insertion order is the draw order. Entity instances add their
//! replicated sprite on init and remove it on clean; an entity kind adds its
//! shared animated sprite once when its static data is created.

use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;

use crate::components::zindex::ZIndex;
use crate::systems::render::Drawable;

#[derive(Default)]
pub struct RenderSet {
    layers: BTreeMap<ZIndex, Vec<Rc<dyn Drawable>>>,
}

fn same_drawable(a: &Rc<dyn Drawable>, b: &Rc<dyn Drawable>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl RenderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drawable at the end of its layer. Returns `false` if it is
    /// already present.
    pub fn add(&mut self, drawable: Rc<dyn Drawable>) -> bool {
        if self.contains(&drawable) {
            return false;
        }
        let layer = drawable.layer();
        debug!("render set: add drawable on layer {}", layer.0);
        self.layers.entry(layer).or_default().push(drawable);
        true
    }

    /// Remove a drawable. Returns `false` if it was not present.
    pub fn remove(&mut self, drawable: &Rc<dyn Drawable>) -> bool {
        let layer = drawable.layer();
        let Some(list) = self.layers.get_mut(&layer) else {
            return false;
        };
        let Some(index) = list.iter().position(|d| same_drawable(d, drawable)) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.layers.remove(&layer);
        }
        debug!("render set: removed drawable from layer {}", layer.0);
        true
    }

    pub fn contains(&self, drawable: &Rc<dyn Drawable>) -> bool {
        self.layers
            .get(&drawable.layer())
            .is_some_and(|list| list.iter().any(|d| same_drawable(d, drawable)))
    }

    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Drawables in draw order: ascending layer, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Drawable>> {
        self.layers.values().flatten()
    }
}
