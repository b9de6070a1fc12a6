use glam::Vec2;

use crate::config::SimConfig;
use crate::viewport::{Bounds, Viewport};

/// Current behavior state. Exactly one is active; per-state data lives in the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorState {
    /// Standing still, waiting for something interesting.
    Idle,
    /// Walking toward a fixed point (the pointer when noticed, or a random floor spot).
    Walking { target: Vec2 },
    /// Chasing the live pointer at hunting speed.
    Hunting { target: Vec2 },
    /// Sitting down; gets up when `remaining` runs out.
    Sitting { remaining: u32 },
    /// Napping; wakes when `remaining` runs out.
    Sleeping { remaining: u32 },
}

/// Fieldless mirror of [`BehaviorState`] for logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StateKind {
    Idle,
    Walking,
    Hunting,
    Sitting,
    Sleeping,
}

impl BehaviorState {
    pub fn kind(&self) -> StateKind {
        match self {
            BehaviorState::Idle => StateKind::Idle,
            BehaviorState::Walking { .. } => StateKind::Walking,
            BehaviorState::Hunting { .. } => StateKind::Hunting,
            BehaviorState::Sitting { .. } => StateKind::Sitting,
            BehaviorState::Sleeping { .. } => StateKind::Sleeping,
        }
    }

    /// Where the cat is heading, if it is heading anywhere.
    pub fn target(&self) -> Option<Vec2> {
        match *self {
            BehaviorState::Walking { target } | BehaviorState::Hunting { target } => Some(target),
            _ => None,
        }
    }

    /// Dwell ticks left in Sitting/Sleeping.
    pub fn remaining(&self) -> Option<u32> {
        match *self {
            BehaviorState::Sitting { remaining } | BehaviorState::Sleeping { remaining } => {
                Some(remaining)
            }
            _ => None,
        }
    }
}

impl StateKind {
    pub fn label(self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Walking => "walk",
            StateKind::Hunting => "hunt",
            StateKind::Sitting => "sit",
            StateKind::Sleeping => "sleep",
        }
    }
}

/// Random draws for one tick. Drawn up front so [`transition`] stays pure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rolls {
    /// Compared against `wander_chance` while idle.
    pub wander: f32,
    /// Compared against `sit_chance` on arrival and `doze_chance` when a sit ends.
    pub settle: f32,
    /// Random floor point used if the cat wanders off.
    pub wander_target: Vec2,
    pub sit_ticks: u32,
    pub sleep_ticks: u32,
}

impl Rolls {
    pub fn draw(rng: &mut fastrand::Rng, config: &SimConfig, viewport: &Viewport) -> Self {
        let min_x = config.wander_min_x;
        let max_x = (viewport.width - config.wander_right_inset).max(min_x);
        Self {
            wander: rng.f32(),
            settle: rng.f32(),
            wander_target: Vec2::new(
                min_x + rng.f32() * (max_x - min_x),
                viewport.height - config.wander_floor_offset,
            ),
            sit_ticks: config.sit_ticks.sample(rng),
            sleep_ticks: config.sleep_ticks.sample(rng),
        }
    }

    /// Rolls that never trigger a random transition.
    pub fn quiet() -> Self {
        Self {
            wander: 1.0,
            settle: 1.0,
            wander_target: Vec2::ZERO,
            sit_ticks: 1,
            sleep_ticks: 1,
        }
    }
}

/// Everything the cat perceives at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Senses {
    pub pos: Vec2,
    /// `None` until the host reports a pointer.
    pub pointer: Option<Vec2>,
    pub rolls: Rolls,
    /// Box the cat's position is clamped into. Walk targets are pulled inside
    /// it so the cat can always reach them.
    pub bounds: Bounds,
}

impl Senses {
    pub fn new(pos: Vec2, pointer: Option<Vec2>, rolls: Rolls, bounds: Bounds) -> Self {
        Self {
            pos,
            pointer,
            rolls,
            bounds,
        }
    }

    /// Distance to the pointer, infinite when there is none.
    pub fn pointer_distance(&self) -> f32 {
        self.pointer.map_or(f32::INFINITY, |p| p.distance(self.pos))
    }

    /// The pointer, if it is strictly closer than `radius`.
    fn pointer_within(&self, radius: f32) -> Option<Vec2> {
        self.pointer.filter(|p| p.distance(self.pos) < radius)
    }
}

/// Next state from the current state and this tick's senses.
///
/// Total over every state: always returns a state, possibly the same one
/// with its dwell timer decremented.
pub fn transition(state: BehaviorState, senses: &Senses, config: &SimConfig) -> BehaviorState {
    let rolls = &senses.rolls;
    match state {
        BehaviorState::Idle => {
            if let Some(pointer) = senses.pointer_within(config.notice_radius) {
                BehaviorState::Walking { target: senses.bounds.clamp(pointer) }
            } else if rolls.wander < config.wander_chance {
                BehaviorState::Walking { target: senses.bounds.clamp(rolls.wander_target) }
            } else {
                BehaviorState::Idle
            }
        }
        BehaviorState::Walking { target } => {
            // Tight radius wins over arrival so the cat never sits down next to the pointer.
            if let Some(pointer) = senses.pointer_within(config.chase_radius) {
                BehaviorState::Hunting { target: pointer }
            } else if senses.pos.distance(target) < config.arrive_epsilon {
                if rolls.settle < config.sit_chance {
                    BehaviorState::Sitting { remaining: rolls.sit_ticks }
                } else {
                    BehaviorState::Idle
                }
            } else {
                BehaviorState::Walking { target }
            }
        }
        BehaviorState::Hunting { .. } => match senses.pointer {
            Some(pointer) if senses.pointer_distance() <= config.release_radius => {
                BehaviorState::Hunting { target: pointer }
            }
            _ => BehaviorState::Idle,
        },
        BehaviorState::Sitting { remaining } => {
            if senses.pointer_within(config.wake_radius).is_some() {
                return BehaviorState::Idle;
            }
            match remaining.saturating_sub(1) {
                0 if rolls.settle < config.doze_chance => {
                    BehaviorState::Sleeping { remaining: rolls.sleep_ticks }
                }
                0 => BehaviorState::Idle,
                left => BehaviorState::Sitting { remaining: left },
            }
        }
        BehaviorState::Sleeping { remaining } => {
            if senses.pointer_within(config.wake_radius).is_some() {
                return BehaviorState::Idle;
            }
            match remaining.saturating_sub(1) {
                0 => BehaviorState::Idle,
                left => BehaviorState::Sleeping { remaining: left },
            }
        }
    }
}
