//! Terminal session: the coordinator behind the portfolio terminal.
//!
//! Owns the command registry, history, input line, suggestion cursor, mode
//! controller, scheduler, and the active theme. Front ends feed it
//! [`InputEvent`]s and elapsed time, then draw [`TerminalSession::render`].

use std::collections::HashMap;

use termfolio_skin::{ActiveTheme, ThemeStore, ThemeTable};
use termfolio_terminal::{
    CommandOutput, CommandRegistry, ContactForm, ContentBlock, Environment, Portfolio,
    Suggestion, SuggestionCursor, Tone, contact_intro, register_builtins, suggest,
};
use termfolio_types::backend::DocumentOpener;
use termfolio_types::config::TermfolioConfig;
use termfolio_types::error::Result;
use termfolio_types::input::{InputEvent, Key};

use crate::history::{HistoryEntry, HistoryStore};
use crate::matrix::MatrixRain;
use crate::mode::{Mode, ModeController};
use crate::scheduler::Scheduler;
use crate::snake::SnakeGame;
use crate::typing::{TypingEffect, TypingSpeed};

/// Viewport used until the front end reports its size.
const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

/// A contact form in progress, tied to the history entry that started it.
pub(crate) struct ActiveForm {
    pub(crate) entry_id: u64,
    pub(crate) form: ContactForm,
}

pub struct TerminalSession {
    pub(crate) config: TermfolioConfig,
    pub(crate) registry: CommandRegistry,
    portfolio: Portfolio,
    themes: ThemeTable,
    theme: ActiveTheme,
    store: Box<dyn ThemeStore>,
    opener: Box<dyn DocumentOpener>,
    pub(crate) history: HistoryStore,
    pub(crate) input: String,
    pub(crate) cursor: SuggestionCursor,
    pub(crate) modes: ModeController,
    scheduler: Scheduler,
    /// Running typing effects, keyed by history entry id. Removed once
    /// complete; an entry without one shows its intro in full.
    pub(crate) typing: HashMap<u64, TypingEffect>,
    welcome_id: Option<u64>,
    pub(crate) contact: Option<ActiveForm>,
    /// Rows scrolled up from the newest output.
    pub(crate) scroll: usize,
    pub(crate) viewport: (u16, u16),
    quit: bool,
}

impl TerminalSession {
    /// Build a session and start typing the welcome message.
    ///
    /// The theme resolves from `explicit_theme`, then the stored preference,
    /// then `config.theme.default`.
    pub fn new(
        config: TermfolioConfig,
        portfolio: Portfolio,
        themes: ThemeTable,
        store: Box<dyn ThemeStore>,
        opener: Box<dyn DocumentOpener>,
        explicit_theme: Option<&str>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, &portfolio, &themes);
        let theme = ActiveTheme::init(&themes, store.as_ref(), explicit_theme, &config.theme.default);

        let mut session = Self {
            config,
            registry,
            portfolio,
            themes,
            theme,
            store,
            opener,
            history: HistoryStore::new(),
            input: String::new(),
            cursor: SuggestionCursor::new(),
            modes: ModeController::new(),
            scheduler: Scheduler::new(),
            typing: HashMap::new(),
            welcome_id: None,
            contact: None,
            scroll: 0,
            viewport: DEFAULT_VIEWPORT,
            quit: false,
        };

        let welcome = ContentBlock::typed(session.config.terminal.welcome.clone());
        let speed = session.welcome_speed();
        session.welcome_id = Some(session.push_entry(String::new(), Some(welcome), speed));

        log::info!(
            "Session started (theme '{}', {} commands)",
            session.theme.name(),
            session.registry.len()
        );
        session
    }

    fn welcome_speed(&self) -> TypingSpeed {
        let t = &self.config.terminal;
        TypingSpeed {
            delay_ms: t.typing_delay_ms,
            interval_ms: t.welcome_interval_ms,
            chars_per_tick: t.chars_per_tick,
        }
    }

    fn intro_speed(&self) -> TypingSpeed {
        let t = &self.config.terminal;
        TypingSpeed {
            delay_ms: t.typing_delay_ms,
            interval_ms: t.intro_interval_ms,
            chars_per_tick: t.chars_per_tick,
        }
    }

    // -- Accessors --

    pub fn entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn theme(&self) -> &ActiveTheme {
        &self.theme
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Last size reported through [`TerminalSession::resize`].
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn contact_form(&self) -> Option<&ContactForm> {
        self.contact.as_ref().map(|a| &a.form)
    }

    /// Whether the history entry's typed intro has been fully revealed.
    pub fn is_typed(&self, entry_id: u64) -> bool {
        !self.typing.contains_key(&entry_id)
    }

    /// The welcome message is done typing.
    pub fn welcome_complete(&self) -> bool {
        self.welcome_id.is_none_or(|id| self.is_typed(id))
    }

    /// Whether the main prompt (or the form prompt) accepts keystrokes.
    pub fn input_ready(&self) -> bool {
        self.modes.is_normal()
            && self.welcome_complete()
            && self.contact.as_ref().is_none_or(|a| self.is_typed(a.entry_id))
    }

    /// Completions for the current input. Empty while the prompt is inert
    /// or a contact form owns the input line.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        if !self.input_ready() || self.contact.is_some() {
            return Vec::new();
        }
        suggest(&self.registry, &self.input)
    }

    pub fn selected_suggestion(&self) -> usize {
        self.cursor.index()
    }

    // -- Store operations --

    fn push_entry(&mut self, input: String, output: Option<ContentBlock>, speed: TypingSpeed) -> u64 {
        let intro = output.as_ref().and_then(|b| b.intro.clone());
        let id = self.history.push(input, output);
        if let Some(text) = intro {
            let mut effect = TypingEffect::new(text, speed);
            effect.mount(&mut self.scheduler);
            if !effect.is_complete() {
                self.typing.insert(id, effect);
            }
        }
        self.scroll = 0;
        id
    }

    /// Append an entry with no output, such as the Ctrl-C echo.
    pub fn append_system_line(&mut self, text: &str) {
        let speed = self.intro_speed();
        self.push_entry(text.to_string(), None, speed);
    }

    /// Empty the scrollback and stop every typing effect.
    pub fn clear(&mut self) {
        for effect in self.typing.values_mut() {
            effect.unmount(&mut self.scheduler);
        }
        self.typing.clear();
        self.history.clear();
        self.scroll = 0;
        log::debug!("Scrollback cleared");
    }

    /// Interpret one line and record the result.
    ///
    /// Returns the appended entry; `None` for blank input and for `clear`,
    /// which empties the store instead.
    pub fn interpret(&mut self, raw: &str) -> Option<&HistoryEntry> {
        if raw.trim().is_empty() {
            return None;
        }
        let result = {
            let env = Environment {
                registry: &self.registry,
                portfolio: &self.portfolio,
                themes: &self.themes,
                active_theme: self.theme.name(),
            };
            self.registry.execute(raw, &env)
        };
        if self.process_command_output(raw, result) {
            self.history.last()
        } else {
            None
        }
    }

    /// Apply a command result. Returns `true` if an entry was appended.
    fn process_command_output(&mut self, raw: &str, result: Result<CommandOutput>) -> bool {
        let speed = self.intro_speed();
        let output = match result {
            Ok(CommandOutput::Content(block)) => Some(block),
            Ok(CommandOutput::None) => None,
            Ok(CommandOutput::Clear) => {
                self.clear();
                return false;
            },
            Ok(CommandOutput::EnterMatrix) => {
                let (w, h) = self.viewport;
                let rain = MatrixRain::new(w, h, self.config.matrix.frame_ms);
                Some(match self.modes.enter(Box::new(rain), &mut self.scheduler) {
                    Ok(()) => ContentBlock::text("Entering the matrix... (press ESC to exit)"),
                    Err(e) => ContentBlock::error(&e.to_string()),
                })
            },
            Ok(CommandOutput::EnterGame) => {
                let game = SnakeGame::new(self.config.game.grid_size, self.config.game.speed_ms);
                Some(match self.modes.enter(Box::new(game), &mut self.scheduler) {
                    Ok(()) => ContentBlock::text("Starting snake... (press ESC to exit)"),
                    Err(e) => ContentBlock::error(&e.to_string()),
                })
            },
            Ok(CommandOutput::OpenDocument { target }) => Some(match self.opener.open(&target) {
                Ok(()) => ContentBlock::text(&format!("Opening resume: {target}")),
                Err(e) => {
                    log::warn!("Could not open {target}: {e}");
                    ContentBlock::new().line(format!("Could not open resume: {e}"), Tone::Warning)
                },
            }),
            Ok(CommandOutput::ThemeSwap { name }) => {
                let applied = self
                    .theme
                    .apply(&self.themes, self.store.as_mut(), &name)
                    .map(|_| ());
                Some(match applied {
                    Ok(()) => ContentBlock::new().line(format!("Theme set to: {name}"), Tone::Success),
                    // The switch happened; only the write failed.
                    Err(e) if self.theme.name() == name => {
                        log::warn!("Could not save theme preference: {e}");
                        ContentBlock::new()
                            .line(format!("Theme set to: {name}"), Tone::Success)
                            .line(format!("Could not save theme preference: {e}"), Tone::Warning)
                    },
                    Err(e) => ContentBlock::error(&e.to_string()),
                })
            },
            Ok(CommandOutput::Contact(form)) => {
                let id = self.push_entry(raw.to_string(), Some(contact_intro()), speed);
                self.contact = Some(ActiveForm { entry_id: id, form });
                return true;
            },
            Err(e) => Some(ContentBlock::error(&e.to_string())),
        };
        self.push_entry(raw.to_string(), output, speed);
        true
    }

    /// Submit a line from the prompt: to the active contact form if there
    /// is one, otherwise to the interpreter.
    pub fn submit(&mut self, raw: &str) {
        self.input.clear();
        self.cursor.reset();
        self.scroll = 0;

        if let Some(active) = &mut self.contact {
            active.form.submit(raw);
            if !active.form.is_active() {
                self.finish_form();
            }
            return;
        }
        self.interpret(raw);
    }

    /// Move a finished form's transcript into the history.
    fn finish_form(&mut self) {
        if let Some(active) = self.contact.take() {
            let speed = self.intro_speed();
            self.push_entry(String::new(), Some(active.form.render()), speed);
        }
    }

    /// Ctrl-C: cancel the form or discard the line being typed.
    fn interrupt(&mut self) {
        if let Some(active) = &mut self.contact {
            active.form.cancel();
            self.input.clear();
            self.finish_form();
            return;
        }
        let echo = format!("{}^C", self.input);
        self.input.clear();
        self.cursor.reset();
        self.append_system_line(&echo);
    }

    // -- Events --

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                self.quit = true;
                return;
            },
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                return;
            },
            _ => {},
        }

        if !self.modes.is_normal() {
            if let Some(mode) = self.modes.handle_input(&event, &mut self.scheduler) {
                self.on_mode_exit(mode);
            }
            return;
        }

        if !self.input_ready() {
            // The form's own cancel works while its intro is still typing.
            if event == InputEvent::Interrupt && self.contact.is_some() {
                self.interrupt();
            }
            return;
        }

        match event {
            InputEvent::TextInput(c) => {
                self.input.push(c);
                self.after_edit();
            },
            InputEvent::Backspace => {
                self.input.pop();
                self.after_edit();
            },
            InputEvent::Interrupt => self.interrupt(),
            InputEvent::KeyPress(Key::Enter) => {
                let line = self.line_to_submit();
                self.submit(&line);
            },
            InputEvent::KeyPress(Key::Tab) => {
                let suggestions = self.suggestions();
                if let [only] = suggestions.as_slice() {
                    self.input = only.completion.clone();
                    self.cursor.reset();
                } else {
                    self.cursor.cycle(suggestions.len());
                }
            },
            InputEvent::KeyPress(Key::Up) => {
                let len = self.suggestions().len();
                self.cursor.up(len);
            },
            InputEvent::KeyPress(Key::Down) => {
                let len = self.suggestions().len();
                self.cursor.down(len);
            },
            InputEvent::KeyPress(Key::PageUp) => self.scroll_by(self.page_rows() as isize),
            InputEvent::KeyPress(Key::PageDown) => self.scroll_by(-(self.page_rows() as isize)),
            _ => {},
        }
    }

    /// The typed line, or the selected completion when the line is still
    /// a partial command. A line that already starts with a command name,
    /// or equals the completion apart from case, is kept as typed.
    fn line_to_submit(&self) -> String {
        let names_command = self
            .input
            .split_whitespace()
            .next()
            .is_some_and(|first| self.registry.get(first).is_some());
        if names_command {
            return self.input.clone();
        }
        match self.cursor.selected(&self.suggestions()) {
            Some(s) if !s.completion.eq_ignore_ascii_case(self.input.trim()) => s.completion.clone(),
            _ => self.input.clone(),
        }
    }

    fn after_edit(&mut self) {
        let len = self.suggestions().len();
        self.cursor.clamp(len);
        self.scroll = 0;
    }

    fn page_rows(&self) -> usize {
        usize::from(self.viewport.1.saturating_sub(2)).max(1)
    }

    fn scroll_by(&mut self, rows: isize) {
        self.scroll = self.scroll.saturating_add_signed(rows);
    }

    fn on_mode_exit(&mut self, mode: Mode) {
        if mode == Mode::Snake && self.config.game.clear_on_exit {
            self.clear();
        }
        self.scroll = 0;
    }

    /// Leave the active overlay, if any, as if it signalled exit.
    pub fn exit_mode(&mut self) {
        if let Some(mode) = self.modes.exit(&mut self.scheduler) {
            self.on_mode_exit(mode);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.modes.resize(width, height);
    }

    /// Advance every timer by `dt_ms` and dispatch the fires.
    pub fn tick(&mut self, dt_ms: u32) {
        for (handle, fires) in self.scheduler.advance(dt_ms) {
            if self.modes.on_fire(handle, fires) {
                continue;
            }
            let Some(id) = self
                .typing
                .iter()
                .find(|(_, t)| t.task() == Some(handle))
                .map(|(id, _)| *id)
            else {
                continue;
            };
            if let Some(effect) = self.typing.get_mut(&id) {
                effect.on_tick(fires, &mut self.scheduler);
                if effect.is_complete() {
                    self.typing.remove(&id);
                }
            }
        }
    }

    /// Reveal every running typing effect at once.
    pub fn finish_typing(&mut self) {
        for effect in self.typing.values_mut() {
            effect.finish(&mut self.scheduler);
        }
        self.typing.clear();
    }
}
