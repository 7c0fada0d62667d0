//! Matrix rain overlay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use termfolio_types::input::InputEvent;

use crate::mode::{Mode, Overlay, OverlaySignal};
use crate::view::{Style, ViewLine};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Chance per frame that a drop below the bottom edge restarts at the top.
const RESET_CHANCE: f64 = 0.025;

/// Drops start between this many rows above the screen and the top edge.
const START_SPREAD: i32 = 100;

/// Intensity lost by every trail cell per frame.
const FADE_STEP: u8 = 18;

/// Cells dimmer than this are erased.
const MIN_VISIBLE: u8 = 24;

pub const MATRIX_FOOTER: &str = "Press ESC to exit Matrix";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    glyph: char,
    intensity: u8,
}

pub struct MatrixRain {
    width: u16,
    height: u16,
    frame_ms: u32,
    /// Current row of each column's drop; negative is above the screen.
    drops: Vec<i32>,
    /// Row-major `width * height` trail buffer.
    cells: Vec<Cell>,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(width: u16, height: u16, frame_ms: u32) -> Self {
        Self::with_rng(width, height, frame_ms, StdRng::from_os_rng())
    }

    pub fn seeded(width: u16, height: u16, frame_ms: u32, seed: u64) -> Self {
        Self::with_rng(width, height, frame_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u16, height: u16, frame_ms: u32, rng: StdRng) -> Self {
        let mut rain = Self {
            width: 0,
            height: 0,
            frame_ms,
            drops: Vec::new(),
            cells: Vec::new(),
            rng,
        };
        rain.rebuild(width, height);
        rain
    }

    /// One drop per column at a random row above the screen; trails wiped.
    fn rebuild(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.drops = (0..width)
            .map(|_| -self.rng.random_range(0..START_SPREAD))
            .collect();
        self.cells = vec![Cell::default(); usize::from(width) * usize::from(height)];
    }

    pub fn drops(&self) -> &[i32] {
        &self.drops
    }

    fn frame(&mut self) {
        for cell in &mut self.cells {
            cell.intensity = cell.intensity.saturating_sub(FADE_STEP);
            if cell.intensity < MIN_VISIBLE {
                *cell = Cell::default();
            }
        }

        let height = i32::from(self.height);
        for col in 0..self.drops.len() {
            let row = self.drops[col];
            if (0..height).contains(&row) {
                let glyph = char::from(GLYPHS[self.rng.random_range(0..GLYPHS.len())]);
                let intensity = self.rng.random_range(128..=255);
                let idx = row as usize * usize::from(self.width) + col;
                self.cells[idx] = Cell { glyph, intensity };
            }
            if row >= height && self.rng.random_bool(RESET_CHANCE) {
                self.drops[col] = 0;
            } else {
                self.drops[col] += 1;
            }
        }
    }
}

impl Overlay for MatrixRain {
    fn mode(&self) -> Mode {
        Mode::Matrix
    }

    fn frame_ms(&self) -> u32 {
        self.frame_ms
    }

    fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame();
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> OverlaySignal {
        if event.is_escape() {
            OverlaySignal::Exit
        } else {
            OverlaySignal::Continue
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            self.rebuild(width, height);
        }
    }

    fn render(&self, width: u16, height: u16) -> Vec<ViewLine> {
        let mut lines: Vec<ViewLine> = (0..height)
            .map(|y| {
                let mut line = ViewLine::empty();
                if y >= self.height {
                    return line;
                }
                let start = usize::from(y) * usize::from(self.width);
                let row = &self.cells[start..start + usize::from(self.width.min(width))];
                for cell in row {
                    if cell.intensity == 0 {
                        line.push(" ", Style::Normal);
                    } else {
                        line.push(cell.glyph.to_string(), Style::Glow(cell.intensity));
                    }
                }
                line
            })
            .collect();
        if let Some(last) = lines.last_mut() {
            *last = ViewLine::plain(MATRIX_FOOTER, Style::Normal).centered(width);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_types::input::Key;

    #[test]
    fn one_drop_per_column_above_screen() {
        let rain = MatrixRain::seeded(30, 10, 50, 1);
        assert_eq!(rain.drops().len(), 30);
        assert!(rain.drops().iter().all(|&d| (-START_SPREAD..=0).contains(&d)));
    }

    #[test]
    fn drops_fall_one_row_per_frame() {
        let mut rain = MatrixRain::seeded(5, 10, 50, 2);
        let before = rain.drops().to_vec();
        rain.tick(3);
        for (b, a) in before.iter().zip(rain.drops()) {
            assert_eq!(*a, b + 3);
        }
    }

    #[test]
    fn visible_drop_draws_glyph() {
        let mut rain = MatrixRain::seeded(1, 5, 50, 3);
        rain.drops = vec![2];
        rain.frame();
        let cell = rain.cells[2];
        assert!(GLYPHS.contains(&(cell.glyph as u8)));
        assert!(cell.intensity >= 128);
    }

    #[test]
    fn trails_fade_out() {
        let mut rain = MatrixRain::seeded(1, 5, 50, 4);
        rain.drops = vec![0];
        rain.frame();
        rain.drops = vec![-1000];
        rain.tick(20);
        assert!(rain.cells.iter().all(|c| c.intensity == 0));
    }

    #[test]
    fn drops_below_screen_eventually_reset() {
        let mut rain = MatrixRain::seeded(4, 3, 50, 5);
        rain.drops = vec![10; 4];
        rain.tick(2000);
        assert!(rain.drops().iter().all(|&d| d < 2000));
    }

    #[test]
    fn resize_rebuilds_columns() {
        let mut rain = MatrixRain::seeded(10, 5, 50, 6);
        rain.resize(20, 8);
        assert_eq!(rain.drops().len(), 20);
        assert_eq!(rain.cells.len(), 160);
    }

    #[test]
    fn escape_exits() {
        let mut rain = MatrixRain::seeded(10, 5, 50, 7);
        assert_eq!(rain.handle_input(&InputEvent::TextInput('x')), OverlaySignal::Continue);
        assert_eq!(rain.handle_input(&InputEvent::KeyPress(Key::Escape)), OverlaySignal::Exit);
    }

    #[test]
    fn render_has_footer() {
        let rain = MatrixRain::seeded(40, 6, 50, 8);
        let lines = rain.render(40, 6);
        assert_eq!(lines.len(), 6);
        assert!(lines[5].text().contains(MATRIX_FOOTER));
    }
}
