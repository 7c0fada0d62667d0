//! Portfolio document: the data the content commands render.
//!
//! The built-in document is embedded from `content/portfolio.toml`. A file
//! on disk with the same shape can replace it.

use std::path::Path;

use serde::Deserialize;

use termfolio_types::error::{Result, TermfolioError};

#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub about: About,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub status: Status,
    pub resume: Resume,
}

#[derive(Debug, Clone, Deserialize)]
pub struct About {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100.
    pub level: u8,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    /// Employment type, e.g. `fulltime` or `contract`.
    pub kind: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
}

impl Experience {
    /// Company substring or exact type match, both case-insensitive.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.company.to_lowercase().contains(&filter) || self.kind.to_lowercase() == filter
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub open_to_work: bool,
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    pub location: String,
    pub availability: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resume {
    /// URL or file path handed to the document opener.
    pub path: String,
}

impl Portfolio {
    /// The embedded portfolio.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(include_str!("../content/portfolio.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(text)?;
        if let Some(skill) = portfolio.skills.iter().find(|s| s.level > 100) {
            return Err(TermfolioError::Content(format!(
                "skill '{}' has level {} (max 100)",
                skill.name, skill.level
            )));
        }
        Ok(portfolio)
    }

    /// Load a portfolio file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let portfolio = Self::from_toml(&text)?;
        log::info!("Loaded portfolio from {}", path.display());
        Ok(portfolio)
    }

    /// Skill categories in order of first appearance.
    pub fn skill_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for skill in &self.skills {
            if !categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&skill.category))
            {
                categories.push(&skill.category);
            }
        }
        categories
    }

    /// Lower-cased category names, the values `skills --category` accepts.
    pub fn category_values(&self) -> Vec<String> {
        self.skill_categories()
            .into_iter()
            .map(str::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_parses() {
        let p = Portfolio::builtin().unwrap();
        assert_eq!(p.skills.len(), 11);
        assert_eq!(p.experience.len(), 1);
        assert_eq!(p.projects.len(), 2);
        assert!(!p.status.open_to_work);
        assert!(p.about.text.starts_with("Hi there!"));
    }

    #[test]
    fn categories_in_order() {
        let p = Portfolio::builtin().unwrap();
        assert_eq!(p.skill_categories(), vec!["Frontend", "Backend", "DevOps"]);
        assert_eq!(p.category_values(), vec!["frontend", "backend", "devops"]);
    }

    #[test]
    fn experience_matching() {
        let p = Portfolio::builtin().unwrap();
        let e = &p.experience[0];
        assert!(e.matches("lg electronics"));
        assert!(e.matches("FULLTIME"));
        assert!(!e.matches("contract"));
        assert!(!e.matches("full"));
    }

    #[test]
    fn level_over_100_rejected() {
        let text = r#"
            [about]
            text = "x"
            [[skills]]
            name = "Rust"
            level = 101
            category = "Backend"
            [status]
            open_to_work = true
            location = "x"
            availability = "x"
            last_updated = "x"
            [resume]
            path = "cv.pdf"
        "#;
        assert!(Portfolio::from_toml(text).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(
            &path,
            "[about]\ntext = \"hello\"\n[status]\nopen_to_work = true\nlocation = \"Earth\"\n\
             availability = \"now\"\nlast_updated = \"today\"\n[resume]\npath = \"cv.pdf\"\n",
        )
        .unwrap();
        let p = Portfolio::load(&path).unwrap();
        assert_eq!(p.about.text, "hello");
        assert!(p.skills.is_empty());
        assert!(p.skill_categories().is_empty());
    }
}
