use glam::Vec2;

use crate::viewport::Viewport;

/// Width below which the door moves left to leave the cat room.
const NARROW_WIDTH: f32 = 400.0;
/// Floor line sits this far above the bottom edge.
const FLOOR_OFFSET: f32 = 20.0;

/// One row of a decorative text block, `dy` below the block origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneryRow {
    pub dy: f32,
    pub text: &'static str,
}

/// Fixed-position decoration drawn behind the cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneryBlock {
    pub name: &'static str,
    pub origin: Vec2,
    pub rows: &'static [SceneryRow],
}

/// Horizontal floor line spanning the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLine {
    pub y: f32,
    pub x0: f32,
    pub x1: f32,
}

/// All static scenery for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenery {
    pub blocks: [SceneryBlock; 3],
    pub floor: FloorLine,
}

const DOOR: &[SceneryRow] = &[
    SceneryRow { dy: 0.0, text: " _________ " },
    SceneryRow { dy: 12.0, text: "|         |" },
    SceneryRow { dy: 36.0, text: "|      O  |" },
    SceneryRow { dy: 84.0, text: "|_________|" },
];

const PLANT: &[SceneryRow] = &[
    SceneryRow { dy: 0.0, text: "  _w_  " },
    SceneryRow { dy: 36.0, text: " [___] " },
];

const MOUSE_HOLE: &[SceneryRow] = &[
    SceneryRow { dy: 15.0, text: "  _---_  " },
    SceneryRow { dy: 27.0, text: " (     ) " },
];

impl Scenery {
    /// Lay out the door, plant, mouse hole and floor for a viewport.
    pub fn layout(viewport: &Viewport) -> Self {
        let w = viewport.width;
        let h = viewport.height;
        let door_x = w * if w < NARROW_WIDTH { 0.6 } else { 0.75 };

        Self {
            blocks: [
                SceneryBlock {
                    name: "door",
                    origin: Vec2::new(door_x, h - 110.0),
                    rows: DOOR,
                },
                SceneryBlock {
                    name: "plant",
                    origin: Vec2::new(w * 0.08, h - 75.0),
                    rows: PLANT,
                },
                SceneryBlock {
                    name: "mouse_hole",
                    origin: Vec2::new(w * 0.45, h - 50.0),
                    rows: MOUSE_HOLE,
                },
            ],
            floor: FloorLine {
                y: h - FLOOR_OFFSET,
                x0: 0.0,
                x1: w,
            },
        }
    }
}
