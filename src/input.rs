use glam::Vec2;

/// Input gathered between two ticks, consumed at the start of the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest pointer position, if the host has reported one since the last tick.
    pub pointer: Option<Vec2>,
    /// Click/tap positions in arrival order.
    pub clicks: Vec<Vec2>,
    /// Latest container width, if it changed.
    pub resize: Option<f32>,
}

/// Collects host input as it happens. Drained once per tick.
pub struct InputQueue {
    pointer: Option<Vec2>,
    pointer_dirty: bool,
    clicks: Vec<Vec2>,
    resize: Option<f32>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pointer: None,
            pointer_dirty: false,
            clicks: Vec::with_capacity(4),
            resize: None,
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.pointer_dirty = true;
    }

    /// A discrete click/tap event.
    pub fn clicked(&mut self, pos: Vec2) {
        self.pointer_moved(pos);
        self.clicks.push(pos);
    }

    /// Container width changed. Only the latest width is kept.
    pub fn resized(&mut self, width: f32) {
        self.resize = Some(width);
    }

    /// Take everything gathered since the last tick.
    pub fn drain(&mut self) -> TickInput {
        let pointer = if self.pointer_dirty { self.pointer } else { None };
        self.pointer_dirty = false;
        TickInput {
            pointer,
            clicks: std::mem::take(&mut self.clicks),
            resize: self.resize.take(),
        }
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
