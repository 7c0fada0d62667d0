//! Snake game overlay.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use termfolio_types::input::{InputEvent, Key};

use crate::mode::{Mode, Overlay, OverlaySignal};
use crate::view::{Style, ViewLine};

/// Random draws tried before scanning the board for a free cell.
const MAX_FOOD_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    Over,
    /// The snake fills the board.
    Won,
}

pub struct SnakeGame {
    grid: i32,
    speed_ms: u32,
    /// Head first.
    snake: VecDeque<Pos>,
    /// Direction of the last completed move.
    direction: Direction,
    /// Direction for the next move.
    pending: Direction,
    food: Option<Pos>,
    score: u32,
    state: GameState,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(grid_size: u16, speed_ms: u32) -> Self {
        Self::with_rng(grid_size, speed_ms, StdRng::from_os_rng())
    }

    /// A game with a fixed seed, for reproducible play.
    pub fn seeded(grid_size: u16, speed_ms: u32, seed: u64) -> Self {
        Self::with_rng(grid_size, speed_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid_size: u16, speed_ms: u32, rng: StdRng) -> Self {
        let mut game = Self {
            grid: i32::from(grid_size.max(4)),
            speed_ms,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            food: None,
            score: 0,
            state: GameState::Running,
            rng,
        };
        game.reset();
        game
    }

    /// Snake in the middle heading right, food three quarters across.
    fn reset(&mut self) {
        let mid = self.grid / 2;
        self.snake = VecDeque::from([Pos::new(mid, mid)]);
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.food = Some(Pos::new(self.grid * 3 / 4, mid));
        self.score = 0;
        self.state = GameState::Running;
    }

    pub fn snake(&self) -> &VecDeque<Pos> {
        &self.snake
    }

    pub fn food(&self) -> Option<Pos> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    fn in_bounds(&self, p: Pos) -> bool {
        (0..self.grid).contains(&p.x) && (0..self.grid).contains(&p.y)
    }

    /// Queue a turn. Reversing onto the snake's own neck is ignored.
    pub fn turn(&mut self, dir: Direction) {
        if self.state == GameState::Running && dir != self.direction.opposite() {
            self.pending = dir;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            other => other,
        };
    }

    /// Start over. Only allowed once the game has ended.
    pub fn restart(&mut self) {
        if matches!(self.state, GameState::Over | GameState::Won) {
            self.reset();
        }
    }

    /// Advance one move.
    pub fn step(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.direction = self.pending;
        let (dx, dy) = self.direction.offset();
        let Some(&head) = self.snake.front() else {
            return;
        };
        let next = Pos::new(head.x + dx, head.y + dy);
        let eating = self.food == Some(next);

        // The tail moves out of the way unless the snake grows.
        let body_len = if eating { self.snake.len() } else { self.snake.len() - 1 };
        let hits_self = self.snake.iter().take(body_len).any(|&p| p == next);
        if !self.in_bounds(next) || hits_self {
            log::debug!("Snake crashed at ({}, {}) with score {}", next.x, next.y, self.score);
            self.state = GameState::Over;
            return;
        }

        self.snake.push_front(next);
        if eating {
            self.score += 1;
            self.food = self.place_food();
            if self.food.is_none() {
                self.state = GameState::Won;
            }
        } else {
            self.snake.pop_back();
        }
    }

    /// Pick a free cell: bounded random draws, then a row-major scan.
    /// `None` when the snake covers the board.
    fn place_food(&mut self) -> Option<Pos> {
        for _ in 0..MAX_FOOD_ATTEMPTS {
            let p = Pos::new(
                self.rng.random_range(0..self.grid),
                self.rng.random_range(0..self.grid),
            );
            if !self.snake.contains(&p) {
                return Some(p);
            }
        }
        log::debug!("Food placement fell back to a board scan");
        (0..self.grid)
            .flat_map(|y| (0..self.grid).map(move |x| Pos::new(x, y)))
            .find(|p| !self.snake.contains(p))
    }

    fn cell(&self, p: Pos) -> (&'static str, Style) {
        if self.snake.front() == Some(&p) {
            ("██", Style::Accent)
        } else if self.snake.contains(&p) {
            ("██", Style::Normal)
        } else if self.food == Some(p) {
            ("◆◆", Style::Error)
        } else {
            ("  ", Style::Normal)
        }
    }
}

impl Overlay for SnakeGame {
    fn mode(&self) -> Mode {
        Mode::Snake
    }

    fn frame_ms(&self) -> u32 {
        self.speed_ms
    }

    fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step();
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> OverlaySignal {
        match event {
            InputEvent::KeyPress(Key::Escape) => return OverlaySignal::Exit,
            InputEvent::KeyPress(Key::Up) => self.turn(Direction::Up),
            InputEvent::KeyPress(Key::Down) => self.turn(Direction::Down),
            InputEvent::KeyPress(Key::Left) => self.turn(Direction::Left),
            InputEvent::KeyPress(Key::Right) => self.turn(Direction::Right),
            InputEvent::TextInput('p' | 'P') => self.toggle_pause(),
            InputEvent::TextInput('r' | 'R') => self.restart(),
            _ => {},
        }
        OverlaySignal::Continue
    }

    fn resize(&mut self, _width: u16, _height: u16) {}

    fn render(&self, width: u16, height: u16) -> Vec<ViewLine> {
        let grid = self.grid as usize;
        let mut lines = Vec::with_capacity(grid + 8);
        lines.push(ViewLine::plain(format!("Score: {}", self.score), Style::Heading));
        lines.push(ViewLine::plain(format!("┌{}┐", "─".repeat(grid * 2)), Style::Faint));
        for y in 0..self.grid {
            let mut row = ViewLine::plain("│", Style::Faint);
            for x in 0..self.grid {
                let (glyph, style) = self.cell(Pos::new(x, y));
                row.push(glyph, style);
            }
            row.push("│", Style::Faint);
            lines.push(row);
        }
        lines.push(ViewLine::plain(format!("└{}┘", "─".repeat(grid * 2)), Style::Faint));
        match self.state {
            GameState::Over => {
                lines.push(ViewLine::plain("Game Over! Press R to restart", Style::Error));
            },
            GameState::Won => {
                lines.push(ViewLine::plain("You win! Press R to play again", Style::Success));
            },
            GameState::Paused => {
                lines.push(ViewLine::plain("Paused - Press P to resume", Style::Warning));
            },
            GameState::Running => lines.push(ViewLine::empty()),
        }
        lines.push(ViewLine::plain(
            "Controls: Arrow keys to move, P to pause, R to restart, ESC to exit",
            Style::Dim,
        ));

        let height = usize::from(height);
        let top = height.saturating_sub(lines.len()) / 2;
        let mut out: Vec<ViewLine> = vec![ViewLine::empty(); top];
        out.extend(lines.into_iter().map(|l| l.centered(width)));
        out.resize(height, ViewLine::empty());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> SnakeGame {
        SnakeGame::seeded(20, 100, 7)
    }

    #[test]
    fn initial_layout() {
        let g = game();
        assert_eq!(g.snake().iter().copied().collect::<Vec<_>>(), vec![Pos::new(10, 10)]);
        assert_eq!(g.food(), Some(Pos::new(15, 10)));
        assert_eq!(g.state(), GameState::Running);
        assert_eq!(g.frame_ms(), 100);
    }

    #[test]
    fn moves_right_by_default() {
        let mut g = game();
        g.step();
        assert_eq!(g.snake()[0], Pos::new(11, 10));
        assert_eq!(g.snake().len(), 1);
    }

    #[test]
    fn eats_and_grows() {
        let mut g = game();
        g.tick(5);
        assert_eq!(g.score(), 1);
        assert_eq!(g.snake().len(), 2);
        let food = g.food().unwrap();
        assert!(!g.snake().contains(&food));
    }

    #[test]
    fn reversal_ignored() {
        let mut g = game();
        g.turn(Direction::Left);
        g.step();
        assert_eq!(g.snake()[0], Pos::new(11, 10));
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        let mut g = game();
        g.turn(Direction::Up);
        // Left would reverse the last completed move.
        g.turn(Direction::Left);
        g.step();
        assert_eq!(g.snake()[0], Pos::new(10, 9));
        g.turn(Direction::Down);
        g.step();
        assert_eq!(g.snake()[0], Pos::new(10, 8));
    }

    #[test]
    fn wall_ends_game() {
        let mut g = game();
        g.turn(Direction::Up);
        g.tick(10);
        assert_eq!(g.snake()[0], Pos::new(10, 0));
        assert_eq!(g.state(), GameState::Running);
        g.step();
        assert_eq!(g.state(), GameState::Over);
        g.step();
        assert_eq!(g.snake()[0], Pos::new(10, 0));
    }

    #[test]
    fn self_collision_ends_game() {
        let mut g = game();
        g.snake = VecDeque::from([
            Pos::new(5, 5),
            Pos::new(6, 5),
            Pos::new(6, 6),
            Pos::new(5, 6),
            Pos::new(4, 6),
        ]);
        g.direction = Direction::Left;
        g.pending = Direction::Down;
        g.step();
        assert_eq!(g.state(), GameState::Over);
    }

    #[test]
    fn moving_into_vacated_tail_is_allowed() {
        let mut g = game();
        g.food = Some(Pos::new(0, 0));
        g.snake = VecDeque::from([
            Pos::new(5, 5),
            Pos::new(6, 5),
            Pos::new(6, 6),
            Pos::new(5, 6),
        ]);
        g.direction = Direction::Left;
        g.pending = Direction::Down;
        g.step();
        assert_eq!(g.state(), GameState::Running);
        assert_eq!(g.snake()[0], Pos::new(5, 6));
    }

    #[test]
    fn pause_and_restart() {
        let mut g = game();
        g.toggle_pause();
        g.step();
        assert_eq!(g.snake()[0], Pos::new(10, 10));
        g.restart();
        assert_eq!(g.state(), GameState::Paused);
        g.toggle_pause();
        g.turn(Direction::Up);
        g.tick(11);
        assert_eq!(g.state(), GameState::Over);
        g.restart();
        assert_eq!(g.state(), GameState::Running);
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().len(), 1);
    }

    #[test]
    fn food_placement_terminates_on_crowded_board() {
        let mut g = SnakeGame::seeded(4, 100, 1);
        let free = Pos::new(3, 3);
        g.snake = (0..4)
            .flat_map(|y| (0..4).map(move |x| Pos::new(x, y)))
            .filter(|p| *p != free)
            .collect();
        assert_eq!(g.place_food(), Some(free));
        g.snake.push_back(free);
        assert_eq!(g.place_food(), None);
    }

    #[test]
    fn filling_board_wins() {
        let mut g = SnakeGame::seeded(4, 100, 3);
        // Every cell but (3, 0) and (2, 0) is body; head at (2, 0) eats at (3, 0).
        g.snake = VecDeque::from([Pos::new(2, 0)]);
        for y in 1..4 {
            for x in 0..4 {
                g.snake.push_back(Pos::new(x, y));
            }
        }
        g.snake.push_back(Pos::new(0, 0));
        g.snake.push_back(Pos::new(1, 0));
        g.food = Some(Pos::new(3, 0));
        g.direction = Direction::Right;
        g.pending = Direction::Right;
        g.step();
        assert_eq!(g.state(), GameState::Won);
        assert_eq!(g.food(), None);
    }

    #[test]
    fn keys_drive_game() {
        let mut g = game();
        assert_eq!(g.handle_input(&InputEvent::TextInput('p')), OverlaySignal::Continue);
        assert_eq!(g.state(), GameState::Paused);
        assert_eq!(g.handle_input(&InputEvent::KeyPress(Key::Escape)), OverlaySignal::Exit);
    }

    #[test]
    fn render_fills_height() {
        let g = game();
        let lines = g.render(80, 40);
        assert_eq!(lines.len(), 40);
        let text: String = lines.iter().map(ViewLine::text).collect::<Vec<_>>().join("\n");
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Controls:"));
    }
}
