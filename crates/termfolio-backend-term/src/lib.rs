//! crossterm backend for termfolio.
//!
//! Implements `InputBackend` over crossterm events and draws a
//! [`Screen`] with true-color escapes. Raw mode and the alternate screen
//! are held by [`TerminalGuard`] and released when it drops, or from a
//! panic hook through [`restore_terminal`].

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthChar;

use termfolio_core::view::{Screen, Style};
use termfolio_skin::ThemeTokens;
use termfolio_types::backend::{Color, InputBackend};
use termfolio_types::error::Result;
use termfolio_types::input::{InputEvent, Key};

/// Raw mode plus alternate screen for as long as it lives.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        log::debug!("Terminal in raw mode");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave the alternate screen and raw mode. Safe to call more than once.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// crossterm rendering and input backend.
pub struct TermBackend {
    out: Stdout,
    _guard: TerminalGuard,
}

impl TermBackend {
    /// Take over the terminal.
    pub fn new() -> Result<Self> {
        let guard = TerminalGuard::enter()?;
        let (w, h) = terminal::size()?;
        log::info!("crossterm backend initialized: {w}x{h}");
        Ok(Self {
            out: io::stdout(),
            _guard: guard,
        })
    }

    /// Terminal size in columns and rows.
    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn draw(&mut self, screen: &Screen, tokens: &ThemeTokens) -> Result<()> {
        draw_to(&mut self.out, screen, tokens)?;
        Ok(())
    }
}

impl InputBackend for TermBackend {
    fn poll_events(&mut self, timeout_ms: u32) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        let mut timeout = Duration::from_millis(u64::from(timeout_ms));
        // Block for the first event, then drain whatever else is queued.
        while event::poll(timeout)? {
            if let Some(e) = map_event(event::read()?) {
                events.push(e);
            }
            timeout = Duration::ZERO;
        }
        Ok(events)
    }
}

/// Map a crossterm event to a termfolio input event.
fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputEvent::Interrupt),
            KeyCode::Char('d') => Some(InputEvent::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(InputEvent::TextInput(c)),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Enter => Some(InputEvent::KeyPress(Key::Enter)),
        KeyCode::Tab => Some(InputEvent::KeyPress(Key::Tab)),
        KeyCode::Esc => Some(InputEvent::KeyPress(Key::Escape)),
        KeyCode::Up => Some(InputEvent::KeyPress(Key::Up)),
        KeyCode::Down => Some(InputEvent::KeyPress(Key::Down)),
        KeyCode::Left => Some(InputEvent::KeyPress(Key::Left)),
        KeyCode::Right => Some(InputEvent::KeyPress(Key::Right)),
        KeyCode::PageUp => Some(InputEvent::KeyPress(Key::PageUp)),
        KeyCode::PageDown => Some(InputEvent::KeyPress(Key::PageDown)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Foreground and background for a style.
fn style_colors(style: Style, tokens: &ThemeTokens) -> (Color, Color) {
    let bg = tokens.background;
    let fg = match style {
        Style::Normal | Style::Heading => tokens.foreground,
        Style::Dim => tokens.dim,
        Style::Faint => tokens.faint,
        Style::Accent | Style::Prompt => tokens.cursor,
        Style::Error => tokens.error,
        Style::Success => tokens.success,
        Style::Warning => tokens.warning,
        Style::Selected => return (tokens.foreground, tokens.selection),
        Style::Glow(level) => tokens.foreground.with_alpha(level).over(bg),
    };
    (fg, bg)
}

/// Longest prefix of `text` that fits in `max` columns, and its width.
fn clip(text: &str, max: usize) -> (&str, usize) {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            return (&text[..i], used);
        }
        used += w;
    }
    (text, used)
}

/// Write a full frame. Every row is painted edge to edge so nothing from
/// the previous frame survives.
pub fn draw_to<W: Write>(out: &mut W, screen: &Screen, tokens: &ThemeTokens) -> io::Result<()> {
    let width = usize::from(screen.width);
    queue!(out, Hide)?;
    for (y, line) in screen.lines.iter().enumerate().take(usize::from(screen.height)) {
        queue!(out, MoveTo(0, y as u16))?;
        let mut used = 0;
        for span in &line.spans {
            if used >= width {
                break;
            }
            let (text, w) = clip(&span.text, width - used);
            let (fg, bg) = style_colors(span.style, tokens);
            queue!(
                out,
                SetForegroundColor(term_color(fg)),
                SetBackgroundColor(term_color(bg)),
                Print(text)
            )?;
            used += w;
        }
        if used < width {
            let (_, bg) = style_colors(line.fill.unwrap_or_default(), tokens);
            queue!(
                out,
                SetBackgroundColor(term_color(bg)),
                Print(" ".repeat(width - used))
            )?;
        }
    }
    queue!(out, ResetColor)?;
    if let Some((x, y)) = screen.cursor {
        queue!(out, MoveTo(x, y), Show)?;
    }
    out.flush()
}
