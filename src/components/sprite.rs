use std::sync::Arc;

use glam::{Affine2, Vec2};

/// Sprite sheet description shared by every sprite of an entity kind.
///
/// The texture is identified by key only; decoding and uploading images is up
/// to the renderer. `width`/`height` are the size in world units, `origin` is
/// the pivot in unit sprite coordinates (`0.5, 0.5` is the centre) and
/// `rotation` is a fixed extra rotation in degrees baked into every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTemplate {
    pub tex_key: Arc<str>,
    pub frame_count: usize,
    pub width: f32,
    pub height: f32,
    pub origin: Vec2,
    pub rotation: f32,
}

impl SpriteTemplate {
    pub fn new(tex_key: impl Into<Arc<str>>, frame_count: usize) -> Self {
        SpriteTemplate {
            tex_key: tex_key.into(),
            frame_count: frame_count.max(1),
            width: 1.0,
            height: 1.0,
            origin: Vec2::splat(0.5),
            rotation: 0.0,
        }
    }

    /// Set size, and optionally pivot and base rotation. `None` keeps the centre
    /// pivot and no rotation.
    pub fn with_matrix(
        mut self,
        width: f32,
        height: f32,
        origin: Option<Vec2>,
        rotation: Option<f32>,
    ) -> Self {
        self.width = width;
        self.height = height;
        self.origin = origin.unwrap_or(Vec2::splat(0.5));
        self.rotation = rotation.unwrap_or(0.0);
        self
    }

    /// Maps the unit sprite square into the entity's local space.
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_scale(Vec2::new(self.width, self.height))
            * Affine2::from_translation(-self.origin)
    }
}
