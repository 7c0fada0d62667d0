//! Built-in commands for the portfolio terminal.

use termfolio_skin::ThemeTable;
use termfolio_types::error::Result;

use crate::contact::{CONTACT_INTRO, ContactForm};
use crate::content::{ContentBlock, Tone};
use crate::interpreter::{self, Command, CommandOutput, CommandRegistry, Environment};
use crate::portfolio::Portfolio;
use crate::portfolio_commands::{AboutCmd, ExperienceCmd, ProjectsCmd, SkillsCmd, StatusCmd};
use crate::theme_commands::ThemeCmd;

/// Register every built-in command, in `help` order.
///
/// Flag completions for `skills` and `theme` are taken from `portfolio`
/// and `themes`.
pub fn register_builtins(reg: &mut CommandRegistry, portfolio: &Portfolio, themes: &ThemeTable) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(AboutCmd));
    reg.register(Box::new(SkillsCmd::new(portfolio)));
    reg.register(Box::new(ExperienceCmd::new()));
    reg.register(Box::new(ProjectsCmd));
    reg.register(Box::new(ContactCmd));
    reg.register(Box::new(ThemeCmd::new(themes)));
    reg.register(Box::new(MatrixCmd));
    reg.register(Box::new(GameCmd));
    reg.register(Box::new(CvCmd));
    reg.register(Box::new(StatusCmd));
    reg.register(Box::new(ClearCmd));
    log::debug!("Registered {} built-in commands", reg.len());
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }
    fn execute(&self, _filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        let usages: Vec<(String, &str)> = env
            .registry
            .iter()
            .map(|cmd| (interpreter::usage(cmd), cmd.description()))
            .collect();
        let width = usages.iter().map(|(u, _)| u.chars().count()).max().unwrap_or(0);

        let mut block = ContentBlock::new().line("Available commands:", Tone::Heading);
        for (usage, description) in usages {
            block = block.indented(format!("{usage:<width$}  - {description}"), Tone::Normal, 2);
        }
        Ok(CommandOutput::Content(block))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Get in touch"
    }
    fn execute(&self, _filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Contact(ContactForm::new()))
    }
}

/// Intro block the session shows above an active contact form.
pub fn contact_intro() -> ContentBlock {
    ContentBlock::typed(CONTACT_INTRO)
}

// ---------------------------------------------------------------------------
// matrix / game
// ---------------------------------------------------------------------------

struct MatrixCmd;
impl Command for MatrixCmd {
    fn name(&self) -> &str {
        "matrix"
    }
    fn description(&self) -> &str {
        "Enter the matrix"
    }
    fn execute(&self, _filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::EnterMatrix)
    }
}

struct GameCmd;
impl Command for GameCmd {
    fn name(&self) -> &str {
        "game"
    }
    fn description(&self) -> &str {
        "Play snake game"
    }
    fn execute(&self, _filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::EnterGame)
    }
}

// ---------------------------------------------------------------------------
// cv
// ---------------------------------------------------------------------------

struct CvCmd;
impl Command for CvCmd {
    fn name(&self) -> &str {
        "cv"
    }
    fn description(&self) -> &str {
        "Download my resume"
    }
    fn execute(&self, _filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::OpenDocument {
            target: env.portfolio.resume.path.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear terminal"
    }
    fn execute(&self, _filter: Option<&str>, _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}
