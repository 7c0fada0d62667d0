//! Terminal command for listing and switching color themes.

use termfolio_skin::ThemeTable;
use termfolio_types::error::Result;

use crate::content::{ContentBlock, Tone};
use crate::interpreter::{Command, CommandOutput, Environment, FlagSpec};

/// `theme [--set <name>]`.
///
/// Without a value the command shows the picker. A known name is returned
/// as a [`CommandOutput::ThemeSwap`] signal; the session applies and
/// persists it.
pub struct ThemeCmd {
    flag: FlagSpec,
}

impl ThemeCmd {
    pub fn new(themes: &ThemeTable) -> Self {
        Self {
            flag: FlagSpec::new("--set", themes.names()),
        }
    }
}

impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }

    fn description(&self) -> &str {
        "Change terminal theme"
    }

    fn flag(&self) -> Option<&FlagSpec> {
        Some(&self.flag)
    }

    fn execute(&self, filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        match filter {
            None => {
                let mut block = ContentBlock::new().line("Available Themes:", Tone::Heading);
                for theme in env.themes.iter() {
                    let marker = if theme.name == env.active_theme { "*" } else { " " };
                    block = block.indented(
                        format!("{marker} {} - {}", theme.name, theme.description),
                        Tone::Normal,
                        2,
                    );
                }
                Ok(CommandOutput::Content(
                    block.blank().line("Usage: theme --set [name]", Tone::Dim),
                ))
            },
            Some(name) => match env.themes.find(name) {
                Some(theme) => Ok(CommandOutput::ThemeSwap {
                    name: theme.name.clone(),
                }),
                None => Ok(CommandOutput::Content(
                    ContentBlock::error(&format!("Theme not found: {name}")).line(
                        format!("Available themes: {}", env.themes.names().join(", ")),
                        Tone::Error,
                    ),
                )),
            },
        }
    }
}
