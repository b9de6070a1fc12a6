use glam::Vec2;

use crate::config::SimConfig;

/// Glyphs a spawned toy may be drawn with.
pub const GLYPHS: &[char] = &['*', 'o', '+', '@'];

/// A single bouncing toy with a fixed lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub glyph: char,
    /// Ticks left; the toy is culled once this reaches zero.
    pub life: u32,
}

impl Toy {
    pub fn new(pos: Vec2, vel: Vec2, glyph: char, life: u32) -> Self {
        Self { pos, vel, glyph, life }
    }

    /// Euler step: gravity, move, bounce off the floor and side walls, age.
    ///
    /// Floor bounces lose energy; wall bounces keep the horizontal speed.
    pub fn update(&mut self, gravity: f32, damping: f32, floor_y: f32, width: f32) {
        self.vel.y += gravity;
        self.pos += self.vel;

        if self.pos.y >= floor_y {
            self.pos.y = floor_y;
            self.vel.y = -self.vel.y.abs() * damping;
        }

        // Reflect only while moving outward so a toy past the edge can't jitter in place.
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        }
        if self.pos.x >= width {
            self.pos.x = width;
            self.vel.x = -self.vel.x.abs();
        }

        self.life = self.life.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.life == 0
    }
}

/// All live toys.
#[derive(Debug, Default)]
pub struct Toys {
    pub toys: Vec<Toy>,
}

impl Toys {
    pub fn new() -> Self {
        Self { toys: Vec::new() }
    }

    /// Drop a new toy at `pos` with a random glyph and a random initial push.
    pub fn spawn(&mut self, pos: Vec2, config: &SimConfig, rng: &mut fastrand::Rng) -> &Toy {
        let speed = config.toy_spawn_speed;
        let vel = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * speed,
            (rng.f32() * 2.0 - 1.0) * speed,
        );
        let glyph = GLYPHS[rng.usize(0..GLYPHS.len())];
        log::debug!("toy {glyph:?} spawned at ({:.1}, {:.1})", pos.x, pos.y);
        self.push(Toy::new(pos, vel, glyph, config.toy_lifetime))
    }

    /// Add a fully specified toy.
    pub fn push(&mut self, toy: Toy) -> &Toy {
        self.toys.push(toy);
        &self.toys[self.toys.len() - 1]
    }

    /// Step every toy, then remove the expired ones.
    pub fn update(&mut self, config: &SimConfig, floor_y: f32, width: f32) {
        // Reverse so removal never skips an unvisited toy; `remove` keeps draw order.
        for i in (0..self.toys.len()).rev() {
            let toy = &mut self.toys[i];
            toy.update(config.gravity, config.bounce_damping, floor_y, width);
            if toy.expired() {
                self.toys.remove(i);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toy> {
        self.toys.iter()
    }
}
