use glam::Vec2;

use crate::config::SimConfig;

/// Drawable area in viewport units. Height is fixed; width follows the host container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned box the cat's position is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether a point lies strictly inside the viewport (edges excluded).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }

    /// Where the cat may stand: `[0, width - cat_width] x [margin_top, height - margin_bottom]`.
    /// Collapses to the minimum corner when the viewport is smaller than the cat.
    pub fn cat_bounds(&self, config: &SimConfig) -> Bounds {
        let min = Vec2::new(0.0, config.margin_top);
        let max = Vec2::new(
            (self.width - config.cat_width).max(min.x),
            (self.height - config.margin_bottom).max(min.y),
        );
        Bounds { min, max }
    }

    /// The line toys bounce on.
    pub fn toy_floor(&self, config: &SimConfig) -> f32 {
        self.height - config.toy_floor_offset
    }
}
