use glam::Vec2;

use crate::cat::animation::{SpriteFrame, SpriteSet};
use crate::cat::state::{BehaviorState, StateKind};
use crate::cat::Cat;
use crate::toy::Toy;

/// Reaction text sits this far right of and above the cat's origin.
const REACTION_OFFSET: Vec2 = Vec2::new(40.0, -10.0);

/// Everything a renderer needs to draw the cat this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatInstance<'a> {
    /// Top-left corner of the sprite.
    pub position: Vec2,
    pub facing_right: bool,
    /// Draw the sprite flipped horizontally.
    pub mirrored: bool,
    pub state: StateKind,
    pub sprite: SpriteSet,
    /// Index into `sprite`, already wrapped.
    pub frame: usize,
    pub rows: SpriteFrame,
    pub reaction: Option<ReactionInstance<'a>>,
}

/// Speech bubble text and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionInstance<'a> {
    pub position: Vec2,
    pub text: &'a str,
}

/// A toy glyph at a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyInstance {
    pub position: Vec2,
    pub glyph: char,
}

impl<'a> CatInstance<'a> {
    /// Pick the sprite frame and reaction overlay for the cat's current pose.
    pub fn from_cat(cat: &'a Cat, heart_threshold: u32) -> Self {
        let sprite = cat.sprite_set(heart_threshold);
        let frame = cat.frame_index() % sprite.frame_count();

        // A sitting cat reacts through the heart sprite, not the bubble.
        let sitting = matches!(cat.state(), BehaviorState::Sitting { .. });
        let reaction = cat
            .reaction()
            .filter(|_| !sitting)
            .map(|r| ReactionInstance {
                position: cat.pos() + REACTION_OFFSET,
                text: r.text.as_str(),
            });

        Self {
            position: cat.pos(),
            facing_right: cat.facing_right(),
            mirrored: cat.mirrored(),
            state: cat.kind(),
            sprite,
            frame,
            rows: sprite.frame(frame),
            reaction,
        }
    }
}

impl From<&Toy> for ToyInstance {
    fn from(toy: &Toy) -> Self {
        Self {
            position: toy.pos,
            glyph: toy.glyph,
        }
    }
}
