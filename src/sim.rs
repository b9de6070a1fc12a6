use glam::Vec2;

use crate::cat::state::{Rolls, Senses};
use crate::cat::{Cat, PHRASES};
use crate::config::SimConfig;
use crate::input::TickInput;
use crate::render::instance::{CatInstance, ToyInstance};
use crate::render::Frame;
use crate::scene::Scenery;
use crate::theme::Theme;
use crate::toy::{Toy, Toys};
use crate::viewport::Viewport;

/// Owns the cat, the toys and the viewport, and advances them one tick at a time.
pub struct Simulation {
    config: SimConfig,
    viewport: Viewport,
    scenery: Scenery,
    cat: Cat,
    toys: Toys,
    /// Last pointer position reported by the host.
    pointer: Option<Vec2>,
    rng: fastrand::Rng,
    tick_count: u64,
}

impl Simulation {
    /// New simulation with an entropy-seeded RNG.
    pub fn new(config: SimConfig, width: f32) -> Self {
        Self::with_rng(config, width, fastrand::Rng::new())
    }

    /// New simulation with a fixed seed, for reproducible runs.
    pub fn with_seed(config: SimConfig, width: f32, seed: u64) -> Self {
        Self::with_rng(config, width, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(config: SimConfig, width: f32, rng: fastrand::Rng) -> Self {
        let viewport = Viewport::new(width, config.viewport_height);
        let cat = Cat::new(&viewport, &config);
        log::info!(
            "Simulation started: {}x{} viewport, cat at ({:.0}, {:.0})",
            viewport.width,
            viewport.height,
            cat.pos().x,
            cat.pos().y
        );
        Self {
            scenery: Scenery::layout(&viewport),
            config,
            viewport,
            cat,
            toys: Toys::new(),
            pointer: None,
            rng,
            tick_count: 0,
        }
    }

    /// Run one tick: apply queued input, update the cat, then step and cull toys.
    pub fn tick(&mut self, input: TickInput) {
        if let Some(width) = input.resize {
            self.resize(width);
        }
        if input.pointer.is_some() {
            self.pointer = input.pointer;
        }
        for pos in input.clicks {
            self.click(pos);
        }

        let rolls = Rolls::draw(&mut self.rng, &self.config, &self.viewport);
        let bounds = self.viewport.cat_bounds(&self.config);
        let senses = Senses::new(self.cat.pos(), self.pointer, rolls, bounds);
        self.cat.update(&senses, &self.config, &self.viewport);

        let floor_y = self.viewport.toy_floor(&self.config);
        self.toys.update(&self.config, floor_y, self.viewport.width);

        self.tick_count += 1;
    }

    /// Tick with no new input; the last known pointer still applies.
    pub fn step(&mut self) {
        self.tick(TickInput::default());
    }

    /// Spawn a toy where the user clicked; sometimes the cat comments on it.
    /// Clicks outside the viewport are ignored and return `false`.
    pub fn click(&mut self, pos: Vec2) -> bool {
        if !self.viewport.contains(pos) {
            log::trace!("click at ({:.1}, {:.1}) outside viewport", pos.x, pos.y);
            return false;
        }
        self.toys.spawn(pos, &self.config, &mut self.rng);
        if self.rng.f32() < self.config.reaction_chance {
            let phrase = PHRASES[self.rng.usize(0..PHRASES.len())];
            self.cat.say(phrase, self.config.reaction_ticks);
        }
        true
    }

    /// Update the last known pointer position; `None` means the pointer left.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Follow the container width. Height stays fixed.
    pub fn resize(&mut self, width: f32) {
        let viewport = Viewport::new(width, self.config.viewport_height);
        if viewport == self.viewport {
            return;
        }
        log::info!("Viewport resized: {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.scenery = Scenery::layout(&viewport);
        self.cat.clamp_to(&self.viewport, &self.config);
    }

    /// Drawable description of the current state.
    pub fn frame(&self, theme: Theme) -> Frame<'_> {
        Frame {
            palette: theme.palette(),
            cat: CatInstance::from_cat(&self.cat, self.config.heart_threshold),
            toys: self.toys.iter().map(ToyInstance::from).collect(),
            scenery: &self.scenery,
        }
    }

    /// Drop a fully specified toy, bypassing the click randomization.
    pub fn add_toy(&mut self, toy: Toy) {
        self.toys.push(toy);
    }

    pub fn cat(&self) -> &Cat {
        &self.cat
    }

    pub fn cat_mut(&mut self) -> &mut Cat {
        &mut self.cat
    }

    pub fn toys(&self) -> &Toys {
        &self.toys
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cat::state::{BehaviorState, StateKind};

    fn sim() -> Simulation {
        Simulation::with_seed(SimConfig::default(), 400.0, 11)
    }

    fn pointer_at(x: f32, y: f32) -> TickInput {
        TickInput {
            pointer: Some(Vec2::new(x, y)),
            ..TickInput::default()
        }
    }

    #[test]
    fn nearby_pointer_starts_walk() {
        let mut sim = sim();
        assert_eq!(sim.cat().pos(), Vec2::new(200.0, 150.0));
        sim.tick(pointer_at(210.0, 150.0));
        assert_eq!(sim.cat().kind(), StateKind::Walking);
        assert_eq!(sim.cat().target(), Some(Vec2::new(210.0, 150.0)));
    }

    #[test]
    fn chase_then_release() {
        let mut sim = sim();
        sim.cat_mut().set_state(BehaviorState::Walking { target: Vec2::new(50.0, 150.0) });
        sim.tick(pointer_at(240.0, 150.0));
        assert_eq!(sim.cat().kind(), StateKind::Hunting);

        sim.tick(pointer_at(20.0, 20.0));
        // 20,20 is > 200 units from a cat near (200, 150).
        assert_eq!(sim.cat().kind(), StateKind::Idle);
    }

    #[test]
    fn click_spawns_one_toy() {
        let mut sim = sim();
        assert!(sim.click(Vec2::new(50.0, 50.0)));
        assert_eq!(sim.toys().len(), 1);
        let toy = sim.toys().iter().next().unwrap();
        assert_eq!(toy.pos, Vec2::new(50.0, 50.0));
        assert_eq!(toy.life, sim.config().toy_lifetime);
    }

    #[test]
    fn click_outside_is_ignored() {
        let mut sim = sim();
        assert!(!sim.click(Vec2::new(450.0, 50.0)));
        assert!(!sim.click(Vec2::new(-1.0, 50.0)));
        assert!(sim.toys().is_empty());
    }

    #[test]
    fn clicks_sometimes_make_the_cat_talk() {
        let config = SimConfig {
            reaction_chance: 1.0,
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_seed(config, 400.0, 3);
        sim.click(Vec2::new(50.0, 50.0));
        let reaction = sim.cat().reaction().unwrap();
        assert!(PHRASES.contains(&reaction.text.as_str()));
        assert_eq!(reaction.remaining, 90);

        let config = SimConfig {
            reaction_chance: 0.0,
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_seed(config, 400.0, 3);
        sim.click(Vec2::new(50.0, 50.0));
        assert!(sim.cat().reaction().is_none());
    }

    #[test]
    fn toy_lives_exactly_its_lifetime() {
        let config = SimConfig {
            toy_lifetime: 5,
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_seed(config, 400.0, 5);
        sim.click(Vec2::new(100.0, 50.0));
        for _ in 0..4 {
            sim.step();
            assert_eq!(sim.toys().len(), 1);
        }
        sim.step();
        assert!(sim.toys().is_empty());
    }

    #[test]
    fn queued_clicks_spawn_at_tick_start() {
        let mut sim = sim();
        sim.tick(TickInput {
            clicks: vec![Vec2::new(30.0, 30.0), Vec2::new(60.0, 30.0)],
            ..TickInput::default()
        });
        assert_eq!(sim.toys().len(), 2);
        assert!(sim.toys().iter().all(|t| t.life == sim.config().toy_lifetime - 1));
    }

    #[test]
    fn resize_clamps_cat_and_relayouts_scenery() {
        let mut sim = Simulation::with_seed(SimConfig::default(), 800.0, 1);
        assert_eq!(sim.cat().pos().x, 400.0);
        sim.tick(TickInput {
            resize: Some(300.0),
            ..TickInput::default()
        });
        assert_eq!(sim.viewport().width, 300.0);
        assert_eq!(sim.viewport().height, 200.0);
        assert!(sim.cat().pos().x <= 200.0);
        assert_eq!(sim.scenery().floor.x1, 300.0);
    }

    #[test]
    fn frame_lists_everything() {
        let mut sim = sim();
        sim.click(Vec2::new(50.0, 50.0));
        sim.click(Vec2::new(80.0, 40.0));
        let frame = sim.frame(Theme::Dark);
        assert_eq!(frame.toys.len(), 2);
        assert_eq!(frame.cat.position, sim.cat().pos());
        assert_eq!(frame.palette, Theme::Dark.palette());
        assert_eq!(frame.scenery.blocks.len(), 3);
    }

    #[test]
    fn walk_toward_pointer_near_the_edge_arrives() {
        let mut sim = sim();
        // Notice radius reaches past the cat's right clamp at x = 300.
        sim.tick(pointer_at(345.0, 150.0));
        assert_eq!(sim.cat().target(), Some(Vec2::new(300.0, 150.0)));

        sim.tick(pointer_at(0.0, 10.0));
        let mut ticks = 0;
        while sim.cat().kind() == StateKind::Walking {
            sim.step();
            ticks += 1;
            assert!(ticks < 200, "cat stuck walking at {:?}", sim.cat().pos());
        }
        assert!(matches!(sim.cat().kind(), StateKind::Sitting | StateKind::Idle));
    }

    #[test]
    fn wandering_in_a_narrow_viewport_never_wedges() {
        // Narrower than wander_min_x + cat_width, so raw wander targets sit outside the clamp.
        let mut sim = Simulation::with_seed(SimConfig::default(), 120.0, 9);
        let mut walks = 0;
        let mut streak = 0;
        for _ in 0..5000 {
            sim.step();
            if sim.cat().kind() == StateKind::Walking {
                if streak == 0 {
                    walks += 1;
                }
                streak += 1;
                assert!(streak < 50, "cat stuck walking toward {:?}", sim.cat().target());
            } else {
                streak = 0;
            }
        }
        assert!(walks > 1);
    }

    #[test]
    fn pointer_persists_between_ticks() {
        let mut sim = sim();
        sim.tick(pointer_at(500.0, 0.0));
        sim.step();
        assert_eq!(sim.pointer(), Some(Vec2::new(500.0, 0.0)));
        assert_eq!(sim.tick_count(), 2);
    }
}
