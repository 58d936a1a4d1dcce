//! Draw pass and the sprite transform protocol.
//!
//! The engine does not rasterise anything. A draw pass walks the
//! [`RenderSet`] and hands every [`Drawable`] a [`Canvas`]. Replicated sprites
//! ask their owner for a spatial transform through a [`SpriteTransformer`],
//! then submit the shared sheet's current frame with that transform.
//!
//! Transform operations are applied in the order they are issued and compose
//! like a canvas matrix stack: `translate`, then `rotate`, then `scale` yields
//! `T * R * S`, so points are scaled first and translated last.
//!
//! Draws must run after all ticks of a frame have completed; nothing here
//! mutates animation state.

use arrayvec::ArrayVec;
use glam::{Affine2, Vec2};
use log::warn;
use serde::Serialize;

use crate::components::sprite::SpriteTemplate;
use crate::components::zindex::ZIndex;
use crate::resources::renderset::RenderSet;

/// Anything the render set can draw.
pub trait Drawable {
    fn layer(&self) -> ZIndex;

    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Destination of a draw pass.
pub trait Canvas {
    /// Draw `frame` of `template` on `layer` with the per-instance `transform`.
    fn draw_sprite(
        &mut self,
        layer: ZIndex,
        template: &SpriteTemplate,
        frame: usize,
        transform: &SpriteTransform,
    );
}

/// Receives an instance's spatial transform at draw time.
pub trait SpriteTransformer {
    fn translate(&mut self, position: Vec2);

    /// Rotate by `degrees`.
    fn rotate(&mut self, degrees: f32);

    fn scale(&mut self, factor: f32);
}

/// One recorded transform operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    Translate { x: f32, y: f32 },
    Rotate { degrees: f32 },
    Scale { factor: f32 },
}

/// Most operations an instance is expected to issue per draw.
pub const MAX_TRANSFORM_OPS: usize = 8;

/// [`SpriteTransformer`] that records operations and composes a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTransform {
    ops: ArrayVec<TransformOp, MAX_TRANSFORM_OPS>,
    matrix: Affine2,
}

impl Default for SpriteTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteTransform {
    pub fn new() -> Self {
        SpriteTransform {
            ops: ArrayVec::new(),
            matrix: Affine2::IDENTITY,
        }
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Composition of every operation issued so far.
    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    fn push(&mut self, op: TransformOp, step: Affine2) {
        self.matrix = self.matrix * step;
        if self.ops.try_push(op).is_err() {
            warn!("sprite transform dropped op record {op:?}: more than {MAX_TRANSFORM_OPS} ops");
        }
    }
}

impl SpriteTransformer for SpriteTransform {
    fn translate(&mut self, position: Vec2) {
        self.push(
            TransformOp::Translate {
                x: position.x,
                y: position.y,
            },
            Affine2::from_translation(position),
        );
    }

    fn rotate(&mut self, degrees: f32) {
        self.push(
            TransformOp::Rotate { degrees },
            Affine2::from_angle(degrees.to_radians()),
        );
    }

    fn scale(&mut self, factor: f32) {
        self.push(
            TransformOp::Scale { factor },
            Affine2::from_scale(Vec2::splat(factor)),
        );
    }
}

/// What a [`RecordingCanvas`] captured for one sprite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRecord {
    pub tex_key: String,
    pub frame: usize,
    pub layer: i32,
    pub ops: Vec<TransformOp>,
    /// Where the instance transform puts the sprite's pivot.
    pub pivot: Vec2,
    /// Instance transform followed by the template's own matrix.
    pub matrix: Affine2,
}

/// Headless canvas collecting [`DrawRecord`]s.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub records: Vec<DrawRecord>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_sprite(
        &mut self,
        layer: ZIndex,
        template: &SpriteTemplate,
        frame: usize,
        transform: &SpriteTransform,
    ) {
        self.records.push(DrawRecord {
            tex_key: template.tex_key.to_string(),
            frame,
            layer: layer.0,
            ops: transform.ops().to_vec(),
            pivot: transform.matrix().transform_point2(Vec2::ZERO),
            matrix: transform.matrix() * template.matrix(),
        });
    }
}

/// Draw every registered drawable, layer by layer in insertion order.
pub fn render_pass(render_set: &RenderSet, canvas: &mut dyn Canvas) {
    for drawable in render_set.iter() {
        drawable.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn transform_records_ops_in_issue_order() {
        let mut t = SpriteTransform::new();
        t.translate(Vec2::new(3.0, 4.0));
        t.rotate(90.0);
        t.scale(2.0);
        assert_eq!(
            t.ops(),
            &[
                TransformOp::Translate { x: 3.0, y: 4.0 },
                TransformOp::Rotate { degrees: 90.0 },
                TransformOp::Scale { factor: 2.0 },
            ]
        );
    }

    #[test]
    fn translate_rotate_scale_scales_first_translates_last() {
        let mut t = SpriteTransform::new();
        t.translate(Vec2::new(10.0, 0.0));
        t.rotate(90.0);
        t.scale(2.0);
        // (1, 0) -> scale (2, 0) -> rotate (0, 2) -> translate (10, 2)
        let p = t.matrix().transform_point2(Vec2::X);
        assert!(vec_approx_eq(p, Vec2::new(10.0, 2.0)));
    }

    #[test]
    fn excess_ops_still_compose() {
        let mut t = SpriteTransform::new();
        for _ in 0..MAX_TRANSFORM_OPS + 2 {
            t.translate(Vec2::X);
        }
        assert_eq!(t.ops().len(), MAX_TRANSFORM_OPS);
        let p = t.matrix().transform_point2(Vec2::ZERO);
        assert!(vec_approx_eq(p, Vec2::new((MAX_TRANSFORM_OPS + 2) as f32, 0.0)));
    }

    #[test]
    fn recording_canvas_appends_template_matrix() {
        let template = SpriteTemplate::new("dot", 1).with_matrix(2.0, 2.0, None, None);
        let mut t = SpriteTransform::new();
        t.translate(Vec2::new(5.0, 5.0));
        let mut canvas = RecordingCanvas::new();
        canvas.draw_sprite(ZIndex::ENEMY, &template, 0, &t);
        let record = &canvas.records[0];
        assert_eq!(record.layer, ZIndex::ENEMY.0);
        assert!(vec_approx_eq(record.pivot, Vec2::new(5.0, 5.0)));
        // Unit-square corner sits half the sprite size up-left of the pivot.
        assert!(vec_approx_eq(
            record.matrix.transform_point2(Vec2::ZERO),
            Vec2::new(4.0, 4.0)
        ));
        // Centre of the unit square lands on the instance position.
        assert!(vec_approx_eq(
            record.matrix.transform_point2(Vec2::splat(0.5)),
            Vec2::new(5.0, 5.0)
        ));
    }
}
