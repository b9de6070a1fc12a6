pub mod ascii;
pub mod instance;

use crate::scene::Scenery;
use crate::theme::Palette;
use self::instance::{CatInstance, ToyInstance};

/// Drawable description of one tick, handed to whatever paints the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub palette: Palette,
    pub cat: CatInstance<'a>,
    pub toys: Vec<ToyInstance>,
    pub scenery: &'a Scenery,
}

/// Anything that can paint a [`Frame`].
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
}

impl FrameSink for ascii::AsciiCanvas {
    fn present(&mut self, frame: &Frame<'_>) {
        self.draw(frame);
    }
}
