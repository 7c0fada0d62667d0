//! Portfolio content commands: about, skills, experience, projects, status.

use termfolio_types::error::Result;

use crate::content::{ContentBlock, Tone};
use crate::interpreter::{Command, CommandOutput, Environment, FlagSpec};
use crate::portfolio::{Portfolio, Skill};

const PROJECTS_INTRO: &str =
    "Loading project directory...\n\nHere are some of my recent projects:";

/// Width of a skill bar in cells.
const BAR_WIDTH: usize = 20;

/// Employment types offered as `experience --filter` completions.
const EXPERIENCE_TYPES: [&str; 2] = ["fulltime", "contract"];

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

pub struct AboutCmd;

impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "Learn about me"
    }

    fn execute(&self, _filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Content(ContentBlock::typed(
            env.portfolio.about.text.as_str(),
        )))
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

pub struct SkillsCmd {
    flag: FlagSpec,
}

impl SkillsCmd {
    pub fn new(portfolio: &Portfolio) -> Self {
        Self {
            flag: FlagSpec::new("--category", portfolio.category_values()),
        }
    }
}

/// `name  ██████░░░░ 60%`
fn skill_bar(skill: &Skill, name_width: usize) -> String {
    let level = usize::from(skill.level.min(100));
    let filled = (level * BAR_WIDTH + 50) / 100;
    format!(
        "{:<name_width$}  {}{} {:>3}%",
        skill.name,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        level,
    )
}

impl Command for SkillsCmd {
    fn name(&self) -> &str {
        "skills"
    }

    fn description(&self) -> &str {
        "View my technical skills"
    }

    fn flag(&self) -> Option<&FlagSpec> {
        Some(&self.flag)
    }

    fn execute(&self, filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        let portfolio = env.portfolio;
        let all = portfolio.skill_categories();
        let categories: Vec<&str> = match filter {
            Some(wanted) => match all.iter().find(|c| c.eq_ignore_ascii_case(wanted)) {
                Some(category) => vec![*category],
                None => {
                    return Ok(CommandOutput::Content(ContentBlock::error(&format!(
                        "Invalid category: {wanted}. Available categories: {}",
                        portfolio.category_values().join(", ")
                    ))));
                },
            },
            None => all,
        };

        let name_width = portfolio
            .skills
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut block = ContentBlock::new();
        for category in categories {
            block = block.line(category, Tone::Heading);
            for skill in portfolio.skills.iter().filter(|s| s.category == category) {
                block = block.indented(skill_bar(skill, name_width), Tone::Normal, 2);
            }
            block = block.blank();
        }
        let hint = format!(
            "Use \"skills --category [{}]\" to filter skills",
            self.flag.values.join("|")
        );
        Ok(CommandOutput::Content(block.line(hint, Tone::Dim)))
    }
}

// ---------------------------------------------------------------------------
// experience
// ---------------------------------------------------------------------------

pub struct ExperienceCmd {
    flag: FlagSpec,
}

impl ExperienceCmd {
    pub fn new() -> Self {
        Self {
            flag: FlagSpec::new("--filter", EXPERIENCE_TYPES),
        }
    }
}

impl Default for ExperienceCmd {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ExperienceCmd {
    fn name(&self) -> &str {
        "experience"
    }

    fn description(&self) -> &str {
        "View my work experience"
    }

    fn flag(&self) -> Option<&FlagSpec> {
        Some(&self.flag)
    }

    fn execute(&self, filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        let entries: Vec<_> = env
            .portfolio
            .experience
            .iter()
            .filter(|e| filter.is_none_or(|f| e.matches(f)))
            .collect();

        if entries.is_empty() {
            let block = match filter {
                Some(f) => ContentBlock::error(&format!("No experience found for: {f}")),
                None => ContentBlock::error("No experience listed yet"),
            };
            return Ok(CommandOutput::Content(block.line(
                "Try searching by company name or type (fulltime/contract)",
                Tone::Dim,
            )));
        }

        let mut block = ContentBlock::new();
        for exp in entries {
            block = block
                .line(format!("● {}", exp.title), Tone::Heading)
                .indented(format!("{} ({})", exp.company, exp.kind), Tone::Accent, 2)
                .indented(exp.period.as_str(), Tone::Dim, 2);
            for desc in &exp.description {
                block = block.indented(format!("• {desc}"), Tone::Normal, 2);
            }
            if !exp.tech.is_empty() {
                block = block.indented(format!("[{}]", exp.tech.join("] [")), Tone::Dim, 2);
            }
            block = block.blank();
        }
        Ok(CommandOutput::Content(block.line(
            "Use \"experience --filter [company/type]\" to filter experience",
            Tone::Dim,
        )))
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

pub struct ProjectsCmd;

impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }

    fn description(&self) -> &str {
        "View my projects"
    }

    fn execute(&self, _filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        let mut block = ContentBlock::new().with_intro(PROJECTS_INTRO);
        for project in &env.portfolio.projects {
            block = block
                .blank()
                .line(format!("→ {}", project.name), Tone::Heading)
                .indented(project.description.as_str(), Tone::Normal, 4);
            if !project.tech.is_empty() {
                block = block.indented(
                    format!("Tech: {}", project.tech.join(" · ")),
                    Tone::Dim,
                    4,
                );
            }
            if let Some(link) = &project.link {
                block = block.indented(link.as_str(), Tone::Accent, 4);
            }
        }
        Ok(CommandOutput::Content(block))
    }
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

pub struct StatusCmd;

impl Command for StatusCmd {
    fn name(&self) -> &str {
        "status"
    }

    fn description(&self) -> &str {
        "Check my availability"
    }

    fn execute(&self, _filter: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
        let status = &env.portfolio.status;
        let headline = if status.open_to_work {
            ContentBlock::new().line("● Open to Work", Tone::Success)
        } else {
            ContentBlock::new().line("● Not Currently Available", Tone::Error)
        };
        let mut block = headline.indented("Preferred Roles:", Tone::Dim, 2);
        for role in &status.preferred_roles {
            block = block.indented(format!("[{role}]"), Tone::Normal, 4);
        }
        block = block
            .indented(format!("Location: {}", status.location), Tone::Normal, 2)
            .indented(format!("Availability: {}", status.availability), Tone::Normal, 2)
            .blank()
            .indented(format!("Last updated: {}", status.last_updated), Tone::Dim, 2);
        Ok(CommandOutput::Content(block))
    }
}
