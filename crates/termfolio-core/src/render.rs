//! Frame building.
//!
//! Turns a [`TerminalSession`] into a [`Screen`]. Scrollback is wrapped to
//! the viewport width and anchored so the newest row sits just above the
//! input line. The suggestion panel floats over the scrollback, below the
//! input when it fits there and above it otherwise.

use unicode_width::UnicodeWidthStr;

use termfolio_terminal::contact::FORM_PROMPT;
use termfolio_terminal::suggest::{SUGGESTION_FOOTER, panel_height};
use termfolio_terminal::{ContentBlock, Placement, Suggestion};

use crate::session::TerminalSession;
use crate::typing::TYPING_CURSOR;
use crate::view::{Screen, Style, ViewLine};

/// Wrap `text` into rows of at most `cols` columns, one paragraph per `\n`.
fn wrap_rows(text: &str, indent: usize, cols: usize, style: Style) -> Vec<ViewLine> {
    let avail = cols.saturating_sub(indent).max(1);
    let pad = " ".repeat(indent);
    text.split('\n')
        .flat_map(|para| textwrap::wrap(para, avail))
        .map(|piece| {
            let mut row = ViewLine::empty();
            if indent > 0 {
                row.push(pad.clone(), Style::Normal);
            }
            row.push(piece.into_owned(), style);
            row
        })
        .collect()
}

/// Rows for a content block's lines.
fn block_rows(block: &ContentBlock, cols: usize) -> Vec<ViewLine> {
    block
        .lines
        .iter()
        .flat_map(|line| wrap_rows(&line.text, usize::from(line.indent), cols, line.tone.into()))
        .collect()
}

/// A prompt glyph followed by the typed text.
fn prompt_row(prompt: &str, text: &str) -> ViewLine {
    let mut row = ViewLine::plain(prompt, Style::Prompt);
    row.push(" ", Style::Normal);
    row.push(text, Style::Normal);
    row
}

/// Row index and caret column of the live input line.
struct InputLine {
    row: usize,
    caret: usize,
}

impl TerminalSession {
    /// Build the frame for a `width` x `height` viewport.
    pub fn render(&self, width: u16, height: u16) -> Screen {
        if let Some(lines) = self.modes.render(width, height) {
            return Screen {
                width,
                height,
                lines,
                cursor: None,
            };
        }

        let cols = usize::from(width).max(1);
        let visible = usize::from(height);
        let mut rows = self.scrollback_rows(cols);
        let input = self.live_rows(cols, &mut rows);

        let max_scroll = rows.len().saturating_sub(visible);
        let start = max_scroll - self.scroll.min(max_scroll);
        let end = (start + visible).min(rows.len());
        let mut lines: Vec<ViewLine> = rows.drain(start..end).collect();
        lines.resize(visible, ViewLine::empty());

        let mut cursor = None;
        if let Some(input) = input.filter(|i| (start..end).contains(&i.row)) {
            let row = input.row - start;
            let col = input.caret.min(cols - 1);
            cursor = Some((col as u16, row as u16));
            self.overlay_suggestions(&mut lines, row, cols);
        }

        Screen {
            width,
            height,
            lines,
            cursor,
        }
    }

    fn scrollback_rows(&self, cols: usize) -> Vec<ViewLine> {
        let prompt = self.config.terminal.prompt.as_str();
        let mut rows = Vec::new();
        for entry in self.history.entries() {
            if !entry.input.is_empty() || entry.output.is_none() {
                rows.push(prompt_row(prompt, &entry.input));
            }
            let Some(block) = &entry.output else {
                continue;
            };

            if let Some(intro) = &block.intro {
                let typing = self.typing.get(&entry.id);
                let shown = typing.map_or(intro.as_str(), |t| t.displayed());
                let mut intro_rows = wrap_rows(shown, 0, cols, Style::Normal);
                if typing.is_some() {
                    if let Some(last) = intro_rows.last_mut() {
                        last.push(TYPING_CURSOR.to_string(), Style::Accent);
                    }
                    rows.extend(intro_rows);
                    // Body lines wait for the intro to finish.
                    continue;
                }
                rows.extend(intro_rows);
            }
            rows.extend(block_rows(block, cols));
            rows.push(ViewLine::empty());
        }
        rows
    }

    /// Append the input area. Returns where the caret sits, if anywhere.
    fn live_rows(&self, cols: usize, rows: &mut Vec<ViewLine>) -> Option<InputLine> {
        if let Some(active) = &self.contact {
            if !self.is_typed(active.entry_id) {
                return None;
            }
            let transcript = active.form.render();
            rows.extend(block_rows(&transcript, cols));
            if let Some(question) = active.form.prompt() {
                rows.extend(wrap_rows(question, 0, cols, Style::Dim));
            }
            rows.push(prompt_row(FORM_PROMPT, &self.input));
            return Some(InputLine {
                row: rows.len() - 1,
                caret: FORM_PROMPT.width() + 1 + self.input.width(),
            });
        }

        if !self.input_ready() {
            return None;
        }
        let prompt = self.config.terminal.prompt.as_str();
        rows.push(prompt_row(prompt, &self.input));
        Some(InputLine {
            row: rows.len() - 1,
            caret: prompt.width() + 1 + self.input.width(),
        })
    }

    /// Float the suggestion panel next to the input row on screen.
    fn overlay_suggestions(&self, lines: &mut [ViewLine], input_row: usize, cols: usize) {
        let items = self.suggestions();
        if items.is_empty() {
            return;
        }
        let max_rows = self.config.terminal.max_suggestions.max(1);
        let panel = self.suggestion_panel(&items, max_rows, cols);
        let height = lines.len();
        let above = input_row as u16;
        let below = (height - 1 - input_row) as u16;

        match Placement::decide(above, below, panel_height(items.len(), max_rows)) {
            Placement::Below => {
                for (row, line) in (input_row + 1..height).zip(panel) {
                    lines[row] = line;
                }
            },
            Placement::Above => {
                let skip = panel.len().saturating_sub(input_row);
                let first = input_row.saturating_sub(panel.len());
                for (row, line) in (first..input_row).zip(panel.into_iter().skip(skip)) {
                    lines[row] = line;
                }
            },
        }
    }

    /// Up to `max_rows` suggestions, scrolled to keep the selection in view,
    /// then the key hint.
    fn suggestion_panel(&self, items: &[Suggestion], max_rows: usize, cols: usize) -> Vec<ViewLine> {
        let shown = items.len().min(max_rows);
        let selected = self.cursor.index().min(items.len() - 1);
        let first = (selected + 1).saturating_sub(shown);
        let name_width = items.iter().map(|s| s.completion.width()).max().unwrap_or(0);

        let mut panel: Vec<ViewLine> = items[first..first + shown]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let is_selected = first + i == selected;
                let (name_style, desc_style) = if is_selected {
                    (Style::Selected, Style::Selected)
                } else {
                    (Style::Accent, Style::Dim)
                };
                let pad = name_width - s.completion.width();
                let mut row = ViewLine::plain(
                    format!("  {}{}  ", s.completion, " ".repeat(pad)),
                    name_style,
                );
                let room = cols.saturating_sub(row.width());
                let desc: String = textwrap::wrap(&s.description, room.max(1))
                    .into_iter()
                    .next()
                    .map(|c| c.into_owned())
                    .unwrap_or_default();
                row.push(desc, desc_style);
                if is_selected {
                    row.fill = Some(Style::Selected);
                }
                row
            })
            .collect();
        panel.push(ViewLine::plain(format!("  {SUGGESTION_FOOTER}"), Style::Faint));
        panel
    }
}
