//! Shared animated sprite sequences.
//!
//! An [`AnimatedSprite`] is the authoritative playback state of one sprite
//! sheet: the frame order and the cursor into it. It is owned by an entity
//! kind's static data and advanced once per tick from there. Instances never
//! own one; they draw through a
//! [`ReplicatedSprite`](crate::components::replica::ReplicatedSprite) that
//! reads the current frame from the shared sequence.
//!
//! The shared sprite is also added to the render set when the kind is set up,
//! but it has no transformation of its own and draws nothing.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::components::sprite::SpriteTemplate;
use crate::components::timer::TickTimer;
use crate::components::zindex::ZIndex;
use crate::systems::render::{Canvas, Drawable};

/// Order in which the frames of a sheet are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceMode {
    /// `0, 1, .., n-1`, then wrap.
    Forward,
    /// `0, 1, .., n-1, n-2, .., 1`, then wrap.
    ForwardBackward,
}

impl SequenceMode {
    fn frames(self, frame_count: usize) -> SmallVec<[usize; 16]> {
        let mut frames: SmallVec<[usize; 16]> = (0..frame_count).collect();
        if self == SequenceMode::ForwardBackward && frame_count > 2 {
            frames.extend((1..frame_count - 1).rev());
        }
        frames
    }
}

#[derive(Debug)]
struct Playback {
    cursor: usize,
    timer: TickTimer,
}

/// Frame sequence advanced once per tick, shared by all instances of a kind.
#[derive(Debug)]
pub struct AnimatedSprite {
    template: Rc<SpriteTemplate>,
    layer: ZIndex,
    frames: SmallVec<[usize; 16]>,
    playback: RefCell<Playback>,
}

impl AnimatedSprite {
    /// Forward sequence advancing one frame per tick.
    pub fn new(template: Rc<SpriteTemplate>, layer: ZIndex) -> Self {
        let frames = SequenceMode::Forward.frames(template.frame_count);
        AnimatedSprite {
            template,
            layer,
            frames,
            playback: RefCell::new(Playback {
                cursor: 0,
                timer: TickTimer::interval(1.0),
            }),
        }
    }

    pub fn with_sequence(mut self, mode: SequenceMode) -> Self {
        self.frames = mode.frames(self.template.frame_count);
        self.playback.get_mut().cursor = 0;
        self
    }

    /// Number of ticks (possibly fractional) each frame stays on screen.
    pub fn with_frequency(mut self, ticks_per_frame: f32) -> Self {
        self.playback.get_mut().timer = TickTimer::interval(ticks_per_frame);
        self
    }

    /// Advance playback by one tick.
    pub fn tick(&self) {
        let mut playback = self.playback.borrow_mut();
        if playback.timer.tick() {
            playback.cursor = (playback.cursor + 1) % self.frames.len();
        }
    }

    /// Index into the sprite sheet of the frame currently showing.
    pub fn current_frame(&self) -> usize {
        let cursor = self.playback.borrow().cursor;
        self.frames.get(cursor).copied().unwrap_or(0)
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn template(&self) -> &SpriteTemplate {
        &self.template
    }

    pub fn layer(&self) -> ZIndex {
        self.layer
    }
}

impl Drawable for AnimatedSprite {
    fn layer(&self) -> ZIndex {
        self.layer
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(frames: usize) -> AnimatedSprite {
        AnimatedSprite::new(Rc::new(SpriteTemplate::new("test", frames)), ZIndex::ENEMY)
    }

    #[test]
    fn forward_sequence_wraps() {
        let anim = sprite(3);
        let mut seen = vec![anim.current_frame()];
        for _ in 0..4 {
            anim.tick();
            seen.push(anim.current_frame());
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn forward_backward_sequence_bounces() {
        let anim = sprite(4).with_sequence(SequenceMode::ForwardBackward);
        assert_eq!(anim.frames(), &[0, 1, 2, 3, 2, 1]);
        let two = sprite(2).with_sequence(SequenceMode::ForwardBackward);
        assert_eq!(two.frames(), &[0, 1]);
    }

    #[test]
    fn frequency_holds_frames_for_several_ticks() {
        let anim = sprite(4).with_frequency(3.0);
        let mut seen = Vec::new();
        for _ in 0..7 {
            anim.tick();
            seen.push(anim.current_frame());
        }
        assert_eq!(seen, vec![0, 0, 1, 1, 1, 2, 2]);
    }
}
