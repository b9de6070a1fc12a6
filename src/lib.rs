//! DeskCat - a single ASCII cat living in a strip of screen.
//!
//! Core modules:
//! - `cat`: the cat, its behavior state machine, sprites and speech bubble
//! - `toy`: bouncing toys spawned by clicks
//! - `sim`: per-tick orchestration of cat, toys, input and viewport
//! - `render`: drawable frame description and a terminal rasterizer
//! - `config`: data-driven tunables

pub mod cat;
pub mod config;
pub mod input;
pub mod render;
pub mod scene;
pub mod sim;
pub mod theme;
pub mod toy;
pub mod viewport;

pub use config::{ConfigError, SimConfig};
pub use sim::Simulation;
pub use theme::Theme;
