//! Command trait, registry, and dispatch logic.
//!
//! A line is split on whitespace; the first token names the command and is
//! matched case-insensitively against the registry. A command may declare
//! one flag; the token after it is forwarded verbatim as the handler's
//! filter. Any other tokens are ignored.

use std::collections::HashMap;

use termfolio_skin::ThemeTable;
use termfolio_types::error::{Result, TermfolioError};

use crate::contact::ContactForm;
use crate::content::ContentBlock;
use crate::portfolio::Portfolio;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Content to append to the scrollback.
    Content(ContentBlock),
    /// Command produced no visible output.
    None,
    /// Signal to empty the scrollback instead of appending.
    Clear,
    /// Signal to enter the full-screen matrix rain.
    EnterMatrix,
    /// Signal to enter the full-screen snake game.
    EnterGame,
    /// Signal to open a document outside the terminal.
    OpenDocument {
        /// URL or path of the document.
        target: String,
    },
    /// Signal to switch and persist the active theme.
    ThemeSwap {
        /// Validated theme name.
        name: String,
    },
    /// Signal to start an interactive contact form.
    Contact(ContactForm),
}

/// The one flag a command may declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Flag token, beginning with `--`.
    pub name: String,
    /// Values offered as completions, in display order.
    pub values: Vec<String>,
}

impl FlagSpec {
    pub fn new(name: &str, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        debug_assert!(name.starts_with("--"));
        Self {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `--flag <a|b|c>` as shown by `help`.
    pub fn usage(&self) -> String {
        if self.values.is_empty() {
            format!("{} <value>", self.name)
        } else {
            format!("{} <{}>", self.name, self.values.join("|"))
        }
    }
}

/// Read-only context passed to every command.
pub struct Environment<'a> {
    /// The registry dispatching the command (used by `help`).
    pub registry: &'a CommandRegistry,
    /// Portfolio content.
    pub portfolio: &'a Portfolio,
    /// Available themes.
    pub themes: &'a ThemeTable,
    /// Name of the theme currently applied.
    pub active_theme: &'a str,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types). Lowercase.
    fn name(&self) -> &str;

    /// One-line description for `help` and suggestions.
    fn description(&self) -> &str;

    /// The flag this command recognizes, if any.
    fn flag(&self) -> Option<&FlagSpec> {
        None
    }

    /// Execute the command. `filter` is the token after the declared flag.
    fn execute(&self, filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput>;
}

/// Usage line of a command: `name [--flag <a|b>]`.
pub fn usage(cmd: &dyn Command) -> String {
    match cmd.flag() {
        Some(flag) => format!("{} [{}]", cmd.name(), flag.usage()),
        None => cmd.name().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Lower-cased command token.
    pub name: String,
    /// Remaining tokens, original casing.
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Split a raw line. `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        Some(Self {
            name,
            args: tokens.map(str::to_string).collect(),
        })
    }

    /// The token following `flag`, if both are present.
    ///
    /// Flag names match case-insensitively; the value is returned verbatim.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let pos = self.args.iter().position(|a| a.eq_ignore_ascii_case(flag))?;
        self.args.get(pos + 1).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered registry of available commands with dispatch.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same
    /// name, keeping its position.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_lowercase();
        match self.index.get(&name) {
            Some(&i) => {
                log::debug!("Replacing command '{name}'");
                self.commands[i] = cmd;
            },
            None => {
                self.index.insert(name, self.commands.len());
                self.commands.push(cmd);
            },
        }
    }

    /// Case-insensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        let i = *self.index.get(&name.to_lowercase())?;
        Some(self.commands[i].as_ref())
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parse and execute a command line.
    ///
    /// Blank input yields `CommandOutput::None`. An unregistered command
    /// yields `TermfolioError::UnknownCommand` carrying `line` unchanged.
    pub fn execute(&self, line: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        let Some(parsed) = ParsedLine::parse(line) else {
            return Ok(CommandOutput::None);
        };

        let Some(cmd) = self.get(&parsed.name) else {
            return Err(TermfolioError::UnknownCommand(line.to_string()));
        };

        let filter = cmd.flag().and_then(|flag| parsed.flag_value(&flag.name));
        log::debug!("Dispatching '{}' (filter: {filter:?})", cmd.name());
        cmd.execute(filter, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo {
        flag: FlagSpec,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                flag: FlagSpec::new("--mode", ["fast", "slow"]),
            }
        }
    }

    impl Command for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echo the filter"
        }
        fn flag(&self) -> Option<&FlagSpec> {
            Some(&self.flag)
        }
        fn execute(&self, filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Content(ContentBlock::text(filter.unwrap_or("all"))))
        }
    }

    struct Plain(&'static str, &'static str);

    impl Command for Plain {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            self.1
        }
        fn execute(&self, _filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Content(ContentBlock::text(self.1)))
        }
    }

    fn fixtures() -> (Portfolio, ThemeTable) {
        (Portfolio::builtin().unwrap(), ThemeTable::builtin().unwrap())
    }

    fn run(reg: &CommandRegistry, line: &str) -> Result<CommandOutput> {
        let (portfolio, themes) = fixtures();
        let env = Environment {
            registry: reg,
            portfolio: &portfolio,
            themes: &themes,
            active_theme: "matrix",
        };
        reg.execute(line, &env)
    }

    fn text(out: CommandOutput) -> String {
        match out {
            CommandOutput::Content(block) => block.plain_text(),
            other => panic!("expected Content, got {other:?}"),
        }
    }

    #[test]
    fn parse_splits_and_lowercases_name() {
        let p = ParsedLine::parse("  Skills   --category  Frontend ").unwrap();
        assert_eq!(p.name, "skills");
        assert_eq!(p.args, vec!["--category", "Frontend"]);
    }

    #[test]
    fn parse_blank_is_none() {
        assert!(ParsedLine::parse("   ").is_none());
        assert!(ParsedLine::parse("").is_none());
    }

    #[test]
    fn flag_value_present() {
        let p = ParsedLine::parse("skills --category devops").unwrap();
        assert_eq!(p.flag_value("--category"), Some("devops"));
    }

    #[test]
    fn flag_value_missing_value() {
        let p = ParsedLine::parse("skills --category").unwrap();
        assert_eq!(p.flag_value("--category"), None);
    }

    #[test]
    fn flag_value_flag_case_insensitive() {
        let p = ParsedLine::parse("theme --SET Retro").unwrap();
        assert_eq!(p.flag_value("--set"), Some("Retro"));
    }

    #[test]
    fn flag_value_after_unknown_tokens() {
        let p = ParsedLine::parse("skills --verbose x --category backend").unwrap();
        assert_eq!(p.flag_value("--category"), Some("backend"));
    }

    #[test]
    fn dispatch_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Plain("about", "me")));
        assert_eq!(text(run(&reg, "ABOUT").unwrap()), "me");
    }

    #[test]
    fn unknown_command_echoes_raw_line() {
        let reg = CommandRegistry::new();
        let err = run(&reg, "Foo Bar").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command not found: Foo Bar. Type 'help' for available commands."
        );
    }

    #[test]
    fn no_prefix_dispatch() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Plain("about", "me")));
        assert!(run(&reg, "abo").is_err());
    }

    #[test]
    fn blank_line_is_none() {
        let reg = CommandRegistry::new();
        assert_eq!(run(&reg, "   ").unwrap(), CommandOutput::None);
    }

    #[test]
    fn flag_forwarded_verbatim() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Echo::new()));
        assert_eq!(text(run(&reg, "echo --mode FaSt").unwrap()), "FaSt");
        assert_eq!(text(run(&reg, "echo").unwrap()), "all");
        assert_eq!(text(run(&reg, "echo --mode").unwrap()), "all");
        assert_eq!(text(run(&reg, "echo --other slow").unwrap()), "all");
    }

    #[test]
    fn command_without_flag_gets_no_filter() {
        struct Probe;
        impl Command for Probe {
            fn name(&self) -> &str {
                "probe"
            }
            fn description(&self) -> &str {
                ""
            }
            fn execute(&self, filter: Option<&str>, _: &Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::Content(ContentBlock::text(&format!("{filter:?}"))))
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Probe));
        assert_eq!(text(run(&reg, "probe --set x").unwrap()), "None");
    }

    #[test]
    fn register_replaces_in_place() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Plain("a", "first")));
        reg.register(Box::new(Plain("b", "second")));
        reg.register(Box::new(Plain("a", "replaced")));
        assert_eq!(reg.names(), vec!["a", "b"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("A").unwrap().description(), "replaced");
    }

    #[test]
    fn usage_includes_flag_values() {
        let echo = Echo::new();
        assert_eq!(usage(&echo), "echo [--mode <fast|slow>]");
        assert_eq!(usage(&Plain("about", "me")), "about");
    }
}
