//! Backend-neutral view model.
//!
//! The session renders into a [`Screen`]: exactly `height` lines of styled
//! spans plus an optional caret position. Backends only translate styles to
//! colors and print.

use unicode_width::UnicodeWidthStr;

use termfolio_terminal::Tone;

/// Semantic style of a span. Backends resolve it against the theme tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    Heading,
    Dim,
    Faint,
    Accent,
    Error,
    Success,
    Warning,
    /// The prompt glyph.
    Prompt,
    /// Text on the selection highlight.
    Selected,
    /// Foreground blended toward the background; 255 is full foreground.
    Glow(u8),
}

impl From<Tone> for Style {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Normal => Self::Normal,
            Tone::Heading => Self::Heading,
            Tone::Dim => Self::Dim,
            Tone::Accent => Self::Accent,
            Tone::Error => Self::Error,
            Tone::Success => Self::Success,
            Tone::Warning => Self::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLine {
    pub spans: Vec<Span>,
    /// Style for the unused rest of the row (selection highlight).
    pub fill: Option<Style>,
}

impl ViewLine {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::new(text, style)],
            fill: None,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        self.spans.push(Span::new(text, style));
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    /// Concatenated text of every span.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Left-pad so the line is centered in `width` columns.
    pub fn centered(mut self, width: u16) -> Self {
        let pad = usize::from(width).saturating_sub(self.width()) / 2;
        if pad > 0 {
            self.spans.insert(0, Span::new(" ".repeat(pad), Style::Normal));
        }
        self
    }
}

/// A full frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
    pub lines: Vec<ViewLine>,
    /// Caret position `(column, row)`, when the input line is visible.
    pub cursor: Option<(u16, u16)>,
}

impl Screen {
    /// All rows as plain text, one per line.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(ViewLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
