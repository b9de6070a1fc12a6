use std::fmt::Write as _;

use glam::Vec2;

use super::Frame;
use crate::theme::Palette;

/// Viewport units per character column.
pub const CELL_W: f32 = 8.0;
/// Viewport units per text row.
pub const CELL_H: f32 = 12.0;

/// Which palette entry a cell is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Empty,
    Scenery,
    Floor,
    Ink,
}

/// Character grid a [`Frame`] is rasterized into.
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<(char, Layer)>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![(' ', Layer::Empty); cols * rows],
        }
    }

    /// Canvas covering a viewport of the given size.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self::new(
            (width / CELL_W).ceil().max(1.0) as usize,
            (height / CELL_H).ceil().max(1.0) as usize,
        )
    }

    pub fn clear(&mut self) {
        self.cells.fill((' ', Layer::Empty));
    }

    /// Paint a frame back to front: scenery, floor, toys, cat, reaction.
    pub fn draw(&mut self, frame: &Frame<'_>) {
        self.clear();

        for block in &frame.scenery.blocks {
            for row in block.rows {
                self.text(block.origin + Vec2::new(0.0, row.dy), row.text, Layer::Scenery);
            }
        }

        let floor = frame.scenery.floor;
        let row = cell_row(floor.y);
        for col in cell_col(floor.x0)..cell_col(floor.x1) {
            self.put(col, row, '_', Layer::Floor);
        }

        for toy in &frame.toys {
            self.put(cell_col(toy.position.x), cell_row(toy.position.y), toy.glyph, Layer::Ink);
        }

        let cat = &frame.cat;
        let width = cat.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let col = cell_col(cat.position.x);
        let row = cell_row(cat.position.y);
        for (i, line) in cat.rows.iter().enumerate() {
            let line = if cat.mirrored {
                mirror(line, width)
            } else {
                (*line).to_string()
            };
            self.text_at(col, row + i as i64, &line, Layer::Ink);
        }

        if let Some(reaction) = cat.reaction {
            self.text(reaction.position, reaction.text, Layer::Ink);
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, layer: Layer) {
        self.text_at(cell_col(pos.x), cell_row(pos.y), text, layer);
    }

    /// Leading and trailing spaces are transparent; interior spaces occlude.
    fn text_at(&mut self, col: i64, row: i64, text: &str, layer: Layer) {
        let chars: Vec<char> = text.chars().collect();
        let Some(first) = chars.iter().position(|&c| c != ' ') else {
            return;
        };
        let last = chars.iter().rposition(|&c| c != ' ').unwrap_or(first);
        for (i, &ch) in chars.iter().enumerate().take(last + 1).skip(first) {
            self.put(col + i as i64, row, ch, layer);
        }
    }

    fn put(&mut self, col: i64, row: i64, ch: char, layer: Layer) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = (ch, layer);
    }

    /// Plain text, one line per row.
    pub fn to_plain(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter().map(|(ch, _)| *ch));
            out.push('\n');
        }
        out
    }

    /// Text with 24-bit ANSI colors taken from the palette.
    pub fn to_ansi(&self, palette: &Palette) -> String {
        let mut out = String::with_capacity((self.cols * 4 + 16) * self.rows);
        let bg = rgb(palette.background);
        for row in self.cells.chunks(self.cols) {
            let _ = write!(out, "\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2);
            let mut current = None;
            for &(ch, layer) in row {
                let color = match layer {
                    Layer::Empty | Layer::Ink => palette.ink,
                    Layer::Scenery => palette.scenery,
                    Layer::Floor => palette.floor,
                };
                if current != Some(color) {
                    let (r, g, b) = rgb(color);
                    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
                    current = Some(color);
                }
                out.push(ch);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }
}

fn cell_col(x: f32) -> i64 {
    (x / CELL_W).floor() as i64
}

fn cell_row(y: f32) -> i64 {
    (y / CELL_H).floor() as i64
}

fn rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 24) as u8, (color >> 16) as u8, (color >> 8) as u8)
}

/// Flip a sprite row left-to-right, padding to `width` so rows stay aligned.
fn mirror(line: &str, width: usize) -> String {
    let len = line.chars().count();
    let padded = line.chars().chain(std::iter::repeat(' ').take(width.saturating_sub(len)));
    let mut chars: Vec<char> = padded.map(mirror_char).collect();
    chars.reverse();
    chars.into_iter().collect()
}

fn mirror_char(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '<' => '>',
        '>' => '<',
        '/' => '\\',
        '\\' => '/',
        '[' => ']',
        ']' => '[',
        other => other,
    }
}
