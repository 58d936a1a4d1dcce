//! Render layers.
//!
//! The [`ZIndex`] of a drawable decides which layer it is drawn on. Layers are
//! drawn in ascending order; inside one layer, drawables keep the order in
//! which they were added to the [`RenderSet`](crate::resources::renderset::RenderSet).

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const BACKGROUND: ZIndex = ZIndex(0);
    pub const SHOT: ZIndex = ZIndex(10);
    pub const ENEMY: ZIndex = ZIndex(20);
    pub const TOWER: ZIndex = ZIndex(30);
    pub const EFFECT: ZIndex = ZIndex(40);
}
