//! Console input behind a trait, so the menu can be driven by a script in tests.

use inquire::{Confirm, InquireError, Text};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Esc or Ctrl-C at a prompt
    #[error("prompt cancelled")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Failed(String),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Self::Cancelled,
            other => Self::Failed(other.to_string()),
        }
    }
}

pub trait Prompter {
    /// Free-form line of input.
    fn text(&mut self, label: &str, help: Option<&str>) -> Result<String, PromptError>;

    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, label: &str) -> Result<bool, PromptError>;

    /// Block until the user acknowledges the last result.
    fn pause(&mut self) -> Result<(), PromptError>;
}

/// Interactive prompts on the terminal
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&mut self, label: &str, help: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = Text::new(label);
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        Ok(prompt.prompt()?)
    }

    fn confirm(&mut self, label: &str) -> Result<bool, PromptError> {
        Ok(Confirm::new(label).with_default(false).prompt()?)
    }

    fn pause(&mut self) -> Result<(), PromptError> {
        Text::new("Press Enter to continue...").prompt()?;
        Ok(())
    }
}
