//! Displayable content blocks produced by command handlers.
//!
//! A block is an optional typed intro followed by styled lines. The intro is
//! revealed by the session's typing effect; the lines appear once it is done.

/// Semantic styling of a line. Backends map tones to theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Heading,
    Dim,
    Accent,
    Error,
    Success,
    Warning,
}

/// One styled output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub text: String,
    pub tone: Tone,
    /// Leading indentation in columns.
    pub indent: u16,
}

impl ContentLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            indent: 0,
        }
    }

    pub fn indented(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }
}

/// Output of a single command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBlock {
    /// Text revealed character by character before `lines` are shown.
    pub intro: Option<String>,
    pub lines: Vec<ContentLine>,
}

impl ContentBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block of normal-toned lines, one per `\n`-separated segment.
    pub fn text(text: &str) -> Self {
        Self::new().push_text(text, Tone::Normal)
    }

    /// A single error-toned block.
    pub fn error(text: &str) -> Self {
        Self::new().push_text(text, Tone::Error)
    }

    /// A block whose whole body is typed out.
    pub fn typed(intro: impl Into<String>) -> Self {
        Self {
            intro: Some(intro.into()),
            lines: Vec::new(),
        }
    }

    /// Set the typed intro.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    /// Append one line.
    pub fn line(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.lines.push(ContentLine::new(text, tone));
        self
    }

    /// Append one line with indentation.
    pub fn indented(mut self, text: impl Into<String>, tone: Tone, indent: u16) -> Self {
        self.lines.push(ContentLine::new(text, tone).indented(indent));
        self
    }

    /// Append an empty spacer line.
    pub fn blank(self) -> Self {
        self.line("", Tone::Normal)
    }

    /// Append every `\n`-separated segment of `text` as its own line.
    pub fn push_text(mut self, text: &str, tone: Tone) -> Self {
        for segment in text.split('\n') {
            self.lines.push(ContentLine::new(segment, tone));
        }
        self
    }

    /// Append a pre-built line.
    pub fn push(&mut self, line: ContentLine) {
        self.lines.push(line);
    }

    /// Whether any line carries the error tone.
    pub fn is_error(&self) -> bool {
        self.lines.iter().any(|l| l.tone == Tone::Error)
    }

    /// Intro and lines joined by newlines, without styling.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(intro) = &self.intro {
            out.push_str(intro);
        }
        for line in &self.lines {
            if !out.is_empty() {
                out.push('\n');
            }
            for _ in 0..line.indent {
                out.push(' ');
            }
            out.push_str(&line.text);
        }
        out
    }
}
