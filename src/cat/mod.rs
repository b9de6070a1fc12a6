pub mod animation;
pub mod state;

use glam::Vec2;

use crate::config::SimConfig;
use crate::viewport::Viewport;
use animation::{AnimationState, SpriteSet};
use state::{BehaviorState, Senses, StateKind};

/// Things the cat may say when someone drops a toy.
pub const PHRASES: &[&str] = &["meow!", "purrr", "^_^", "murP?"];

/// Short-lived speech bubble, independent of the behavior state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub text: String,
    /// Ticks until the bubble disappears.
    pub remaining: u32,
}

/// The one simulated cat. Created with the simulation and never despawned.
#[derive(Debug, Clone)]
pub struct Cat {
    pos: Vec2,
    state: BehaviorState,
    facing_right: bool,
    animation: AnimationState,
    reaction: Option<Reaction>,
}

impl Cat {
    /// Spawn idle, centered, standing just above the floor.
    pub fn new(viewport: &Viewport, config: &SimConfig) -> Self {
        let start = Vec2::new(viewport.width / 2.0, viewport.height - config.wander_floor_offset);
        Self::at(viewport.cat_bounds(config).clamp(start))
    }

    /// Spawn idle at an exact position.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            state: BehaviorState::Idle,
            facing_right: true,
            animation: AnimationState::default(),
            reaction: None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Walk or hunt destination; `None` while idle, sitting or sleeping.
    pub fn target(&self) -> Option<Vec2> {
        self.state.target()
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn frame_index(&self) -> usize {
        self.animation.frame
    }

    pub fn reaction(&self) -> Option<&Reaction> {
        self.reaction.as_ref()
    }

    /// Force a state. Used by hosts restoring a scene and by tests.
    pub fn set_state(&mut self, state: BehaviorState) {
        self.state = state;
    }

    /// Show `text` above the cat for `ticks` ticks, replacing any current bubble.
    pub fn say(&mut self, text: impl Into<String>, ticks: u32) {
        let text = text.into();
        log::debug!("cat says {text:?}");
        self.reaction = (ticks > 0).then_some(Reaction { text, remaining: ticks });
    }

    /// One tick: transition, per-state motion, reaction countdown, bounds clamp.
    pub fn update(&mut self, senses: &Senses, config: &SimConfig, viewport: &Viewport) {
        let next = state::transition(self.state, senses, config);
        if next.kind() != self.state.kind() {
            log::debug!(
                "cat {} -> {} at ({:.1}, {:.1})",
                self.state.kind().label(),
                next.kind().label(),
                self.pos.x,
                self.pos.y
            );
        }
        self.state = next;

        match self.state {
            BehaviorState::Walking { target } => {
                self.step_toward(target, config.walk_speed, config.walk_frame_period, SpriteSet::Walk)
            }
            BehaviorState::Hunting { target } => {
                self.step_toward(target, config.hunt_speed, config.hunt_frame_period, SpriteSet::Pounce)
            }
            BehaviorState::Idle | BehaviorState::Sitting { .. } | BehaviorState::Sleeping { .. } => {}
        }

        if let Some(reaction) = &mut self.reaction {
            reaction.remaining -= 1;
            if reaction.remaining == 0 {
                self.reaction = None;
            }
        }

        self.clamp_to(viewport, config);
    }

    /// Pull the cat back inside the viewport. Called every tick and on resize.
    pub fn clamp_to(&mut self, viewport: &Viewport, config: &SimConfig) {
        self.pos = viewport.cat_bounds(config).clamp(self.pos);
    }

    fn step_toward(&mut self, target: Vec2, speed: f32, frame_period: u32, set: SpriteSet) {
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * speed;
        if dir.x != 0.0 {
            self.facing_right = dir.x > 0.0;
        }
        self.animation.advance(frame_period, set);
    }

    /// Sprite sequence for the current pose. A sitting cat shows the heart
    /// while the reaction bubble still has more than `heart_threshold` ticks.
    pub fn sprite_set(&self, heart_threshold: u32) -> SpriteSet {
        match self.state {
            BehaviorState::Sitting { .. } => match &self.reaction {
                Some(r) if r.remaining > heart_threshold => SpriteSet::Heart,
                _ => SpriteSet::Sit,
            },
            BehaviorState::Sleeping { .. } => SpriteSet::Sleep,
            BehaviorState::Hunting { .. } => SpriteSet::Pounce,
            BehaviorState::Idle | BehaviorState::Walking { .. } => SpriteSet::Walk,
        }
    }

    /// Whether the sprite is drawn flipped horizontally.
    pub fn mirrored(&self) -> bool {
        !self.facing_right && matches!(self.kind(), StateKind::Walking | StateKind::Hunting)
    }
}

#[cfg(test)]
mod tests {
    use super::state::Rolls;
    use super::*;

    fn setup() -> (SimConfig, Viewport) {
        (SimConfig::default(), Viewport::new(400.0, 200.0))
    }

    fn tick(cat: &mut Cat, pointer: Option<Vec2>, config: &SimConfig, vp: &Viewport) {
        let senses = Senses::new(cat.pos(), pointer, Rolls::quiet(), vp.cat_bounds(config));
        cat.update(&senses, config, vp);
    }

    #[test]
    fn spawns_idle_above_floor() {
        let (config, vp) = setup();
        let cat = Cat::new(&vp, &config);
        assert_eq!(cat.pos(), Vec2::new(200.0, 150.0));
        assert_eq!(cat.kind(), StateKind::Idle);
        assert!(cat.target().is_none());
    }

    #[test]
    fn walks_toward_target_and_faces_it() {
        let (config, vp) = setup();
        let mut cat = Cat::at(Vec2::new(200.0, 150.0));
        cat.set_state(BehaviorState::Walking { target: Vec2::new(20.0, 150.0) });
        tick(&mut cat, None, &config, &vp);
        assert_eq!(cat.pos(), Vec2::new(198.0, 150.0));
        assert!(!cat.facing_right());
        assert!(cat.mirrored());
    }

    #[test]
    fn hunting_is_faster_than_walking() {
        let (config, vp) = setup();
        let mut cat = Cat::at(Vec2::new(100.0, 150.0));
        cat.set_state(BehaviorState::Hunting { target: Vec2::ZERO });
        tick(&mut cat, Some(Vec2::new(150.0, 150.0)), &config, &vp);
        assert_eq!(cat.kind(), StateKind::Hunting);
        assert_eq!(cat.pos(), Vec2::new(103.5, 150.0));
        assert!(cat.facing_right());
    }

    #[test]
    fn vertical_motion_keeps_facing() {
        let (config, vp) = setup();
        let mut cat = Cat::at(Vec2::new(100.0, 150.0));
        cat.facing_right = false;
        cat.set_state(BehaviorState::Walking { target: Vec2::new(100.0, 20.0) });
        tick(&mut cat, None, &config, &vp);
        assert!(!cat.facing_right());
    }

    #[test]
    fn resting_cat_does_not_move() {
        let (config, vp) = setup();
        let mut cat = Cat::at(Vec2::new(100.0, 150.0));
        cat.set_state(BehaviorState::Sitting { remaining: 10 });
        tick(&mut cat, None, &config, &vp);
        assert_eq!(cat.pos(), Vec2::new(100.0, 150.0));
        assert_eq!(cat.state(), BehaviorState::Sitting { remaining: 9 });
        assert!(!cat.mirrored());
    }

    #[test]
    fn position_is_clamped_every_tick() {
        let (config, vp) = setup();
        let mut cat = Cat::at(Vec2::new(350.0, 5.0));
        tick(&mut cat, None, &config, &vp);
        assert_eq!(cat.pos(), Vec2::new(300.0, 10.0));
    }

    #[test]
    fn reaction_expires() {
        let (config, vp) = setup();
        let mut cat = Cat::new(&vp, &config);
        cat.say("meow!", 2);
        tick(&mut cat, None, &config, &vp);
        assert_eq!(cat.reaction().map(|r| r.remaining), Some(1));
        tick(&mut cat, None, &config, &vp);
        assert!(cat.reaction().is_none());
    }

    #[test]
    fn heart_plays_only_early_in_reaction() {
        let (config, _) = setup();
        let mut cat = Cat::at(Vec2::new(100.0, 150.0));
        cat.set_state(BehaviorState::Sitting { remaining: 100 });
        cat.say("purrr", 90);
        assert_eq!(cat.sprite_set(config.heart_threshold), SpriteSet::Heart);
        cat.say("purrr", 30);
        assert_eq!(cat.sprite_set(config.heart_threshold), SpriteSet::Sit);
    }

    #[test]
    fn pose_selects_sprite() {
        let mut cat = Cat::at(Vec2::ZERO);
        assert_eq!(cat.sprite_set(30), SpriteSet::Walk);
        cat.set_state(BehaviorState::Hunting { target: Vec2::ZERO });
        assert_eq!(cat.sprite_set(30), SpriteSet::Pounce);
        cat.set_state(BehaviorState::Sleeping { remaining: 3 });
        assert_eq!(cat.sprite_set(30), SpriteSet::Sleep);
    }
}
