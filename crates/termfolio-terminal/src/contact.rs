//! Interactive contact form.
//!
//! A three-step prompt sequence (name, email, message). While a form is
//! active the session routes submitted lines to [`ContactForm::submit`]
//! instead of the interpreter, and Ctrl-C to [`ContactForm::cancel`].

use crate::content::{ContentBlock, Tone};

/// Typed intro shown before the first prompt.
pub const CONTACT_INTRO: &str =
    "Initializing contact form...\n\nLet's get in touch! Please follow the prompts below:";

/// Glyph shown in front of the form's input line.
pub const FORM_PROMPT: &str = "→";

const CANCELLED: &str = "Form input cancelled by user (Ctrl+C)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStep {
    Name,
    Email,
    Message,
    Complete,
    Cancelled,
}

impl ContactStep {
    fn prompt(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("Please enter your name:"),
            Self::Email => Some("Enter your email address:"),
            Self::Message => Some("Type your message:"),
            Self::Complete | Self::Cancelled => None,
        }
    }
}

/// Result of feeding one answer to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank answer; nothing changed.
    Ignored,
    /// Answer refused; the same prompt is shown again with a notice.
    Rejected(String),
    /// Moved on to the next prompt.
    Advanced,
    /// Last answer accepted.
    Completed,
}

/// State of one contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    step: ContactStep,
    name: String,
    email: String,
    message: String,
    /// Prompts answered so far, with their answers.
    answered: Vec<(&'static str, String)>,
    notice: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            step: ContactStep::Name,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            answered: Vec::new(),
            notice: None,
        }
    }

    pub fn step(&self) -> ContactStep {
        self.step
    }

    /// Still waiting for input.
    pub fn is_active(&self) -> bool {
        self.step.prompt().is_some()
    }

    /// The question for the current step.
    pub fn prompt(&self) -> Option<&'static str> {
        self.step.prompt()
    }

    /// Feed one submitted line to the current step.
    pub fn submit(&mut self, answer: &str) -> SubmitOutcome {
        let Some(prompt) = self.step.prompt() else {
            return SubmitOutcome::Ignored;
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.notice = None;
        match self.step {
            ContactStep::Name => {
                self.name = answer.to_string();
                self.step = ContactStep::Email;
            },
            ContactStep::Email => {
                if !is_valid_email(answer) {
                    let notice = format!("Invalid email address: {answer}");
                    self.notice = Some(notice.clone());
                    return SubmitOutcome::Rejected(notice);
                }
                self.email = answer.to_string();
                self.step = ContactStep::Message;
            },
            ContactStep::Message => {
                self.message = answer.to_string();
                self.step = ContactStep::Complete;
            },
            ContactStep::Complete | ContactStep::Cancelled => {},
        }
        self.answered.push((prompt, answer.to_string()));

        if self.step == ContactStep::Complete {
            log::info!(
                "Contact form submitted by {} <{}> ({} chars)",
                self.name,
                self.email,
                self.message.chars().count()
            );
            SubmitOutcome::Completed
        } else {
            SubmitOutcome::Advanced
        }
    }

    /// Abort the remaining steps and discard what was entered.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.step = ContactStep::Cancelled;
            self.name.clear();
            self.email.clear();
            self.message.clear();
            self.answered.clear();
            self.notice = None;
            log::debug!("Contact form cancelled");
        }
    }

    /// The form's transcript: answered prompts, any notice, then the
    /// summary or cancellation marker once finished.
    pub fn render(&self) -> ContentBlock {
        let mut block = ContentBlock::new();
        for (prompt, answer) in &self.answered {
            block = block
                .line(*prompt, Tone::Dim)
                .line(format!("{FORM_PROMPT} {answer}"), Tone::Normal);
        }
        if let Some(notice) = &self.notice {
            block = block.line(notice.as_str(), Tone::Warning);
        }
        match self.step {
            ContactStep::Complete => block
                .blank()
                .line("Message received! Summary:", Tone::Success)
                .indented(format!("Name: {}", self.name), Tone::Normal, 4)
                .indented(format!("Email: {}", self.email), Tone::Normal, 4)
                .indented(format!("Message: {}", self.message), Tone::Normal, 4)
                .blank()
                .line("Thanks for reaching out! I'll get back to you soon.", Tone::Normal),
            ContactStep::Cancelled => block.line(CANCELLED, Tone::Warning),
            _ => block,
        }
    }
}

/// Something before `@` and a dot inside the domain part.
fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        assert_eq!(form.submit("Ada"), SubmitOutcome::Advanced);
        assert_eq!(form.submit("ada@example.com"), SubmitOutcome::Advanced);
        assert_eq!(form.submit("Hello there"), SubmitOutcome::Completed);
        form
    }

    #[test]
    fn steps_in_order() {
        let mut form = ContactForm::new();
        assert_eq!(form.prompt(), Some("Please enter your name:"));
        form.submit("Ada");
        assert_eq!(form.prompt(), Some("Enter your email address:"));
        form.submit("ada@example.com");
        assert_eq!(form.prompt(), Some("Type your message:"));
        form.submit("hi");
        assert_eq!(form.step(), ContactStep::Complete);
        assert!(!form.is_active());
        assert_eq!(form.prompt(), None);
    }

    #[test]
    fn blank_answer_ignored() {
        let mut form = ContactForm::new();
        assert_eq!(form.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(form.step(), ContactStep::Name);
    }

    #[test]
    fn invalid_email_reprompts() {
        let mut form = ContactForm::new();
        form.submit("Ada");
        assert!(matches!(form.submit("not-an-email"), SubmitOutcome::Rejected(_)));
        assert_eq!(form.step(), ContactStep::Email);
        assert!(form.render().plain_text().contains("Invalid email address: not-an-email"));
        form.submit("ada@example.com");
        assert!(!form.render().plain_text().contains("Invalid email"));
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn summary_after_completion() {
        let text = filled().render().plain_text();
        assert!(text.contains("Message received! Summary:"));
        assert!(text.contains("Name: Ada"));
        assert!(text.contains("Email: ada@example.com"));
        assert!(text.contains("Message: Hello there"));
        assert!(text.contains("Thanks for reaching out!"));
    }

    #[test]
    fn cancel_discards_data() {
        let mut form = ContactForm::new();
        form.submit("Ada");
        form.cancel();
        assert_eq!(form.step(), ContactStep::Cancelled);
        let block = form.render();
        assert_eq!(block.plain_text(), "Form input cancelled by user (Ctrl+C)");
        assert_eq!(form.submit("more"), SubmitOutcome::Ignored);
    }

    #[test]
    fn cancel_after_completion_is_noop() {
        let mut form = filled();
        form.cancel();
        assert_eq!(form.step(), ContactStep::Complete);
    }
}
