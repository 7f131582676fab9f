//! Interactive menu loop
//!
//! One resting state, awaiting a choice. Each action collects its fields,
//! calls the store once and reports the outcome, then control returns to
//! the menu. Store errors are printed here and never end the loop.

use std::io::{self, Write};

use studentdb_core::models::{
    parse_enrollment_date, Email, NewStudent, PersonName, StudentId, ValidationError,
};
use studentdb_core::{StudentError, StudentStore};
use thiserror::Error;

use crate::prompt::{PromptError, Prompter};
use crate::render;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("failed to write to console: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Add,
    UpdateEmail,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Add),
            "3" => Some(Self::UpdateEmail),
            "4" => Some(Self::Delete),
            "5" | "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<S, P, W> {
    store: S,
    prompter: P,
    out: W,
}

impl<S, P, W> Menu<S, P, W>
where
    S: StudentStore,
    P: Prompter,
    W: Write,
{
    pub fn new(store: S, prompter: P, out: W) -> Self {
        Self {
            store,
            prompter,
            out,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (S, P, W) {
        (self.store, self.prompter, self.out)
    }

    /// Run until the user exits or cancels at the menu prompt.
    pub async fn run(&mut self) -> Result<(), MenuError> {
        loop {
            self.draw()?;

            let raw = match self.prompter.text("Enter your choice (1-5):", None) {
                Ok(raw) => raw,
                Err(PromptError::Cancelled) => break,
                Err(err) => return Err(err.into()),
            };

            let choice = match MenuChoice::parse(&raw) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "\nExiting application...")?;
                    break;
                }
                Some(choice) => choice,
                None => {
                    writeln!(
                        self.out,
                        "✗ Invalid choice. Please enter a number between 1 and 5."
                    )?;
                    continue;
                }
            };

            tracing::debug!(?choice, "menu action");
            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(MenuError::Prompt(PromptError::Cancelled)) => {
                    writeln!(self.out, "\nAction cancelled.")?;
                }
                Err(err) => return Err(err),
            }

            match self.prompter.pause() {
                Ok(()) => {}
                Err(PromptError::Cancelled) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let rule = render::rule('=', 60);
        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "STUDENT DATABASE MANAGEMENT SYSTEM")?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "1. View all students")?;
        writeln!(self.out, "2. Add a new student")?;
        writeln!(self.out, "3. Update student email")?;
        writeln!(self.out, "4. Delete a student")?;
        writeln!(self.out, "5. Exit")?;
        writeln!(self.out, "{rule}")
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<(), MenuError> {
        match choice {
            MenuChoice::List => self.list().await,
            MenuChoice::Add => self.add().await,
            MenuChoice::UpdateEmail => self.update_email().await,
            MenuChoice::Delete => self.delete().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    async fn list(&mut self) -> Result<(), MenuError> {
        match self.store.list_all().await {
            Ok(students) => render::write_students(&mut self.out, &students)?,
            Err(err) => self.report("Error retrieving students", &err)?,
        }
        Ok(())
    }

    async fn add(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "\n--- Add New Student ---")?;
        let first_name = self.ask("Enter first name:", None, |s| PersonName::new("first name", s))?;
        let last_name = self.ask("Enter last name:", None, |s| PersonName::new("last name", s))?;
        let email = self.ask("Enter email:", None, Email::new)?;
        let enrollment_date = self.ask(
            "Enter enrollment date (YYYY-MM-DD):",
            Some("Leave blank if unknown"),
            parse_enrollment_date,
        )?;

        let student = NewStudent {
            first_name,
            last_name,
            email,
            enrollment_date,
        };

        match self.store.insert(&student).await {
            Ok(id) => writeln!(
                self.out,
                "✓ Successfully added student: {} {} (ID: {})",
                student.first_name.as_str(),
                student.last_name.as_str(),
                id
            )?,
            Err(err) => self.report("Error adding student", &err)?,
        }
        Ok(())
    }

    async fn update_email(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "\n--- Update Student Email ---")?;
        let id = self.ask("Enter student ID:", None, StudentId::parse)?;
        let new_email = self.ask("Enter new email:", None, Email::new)?;

        match self.store.update_email(id, &new_email).await {
            Ok(change) => {
                writeln!(
                    self.out,
                    "✓ Successfully updated email for {} {}",
                    change.first_name, change.last_name
                )?;
                writeln!(self.out, "  Old email: {}", change.old_email)?;
                writeln!(self.out, "  New email: {}", change.new_email)?;
            }
            Err(err) => self.report("Error updating student email", &err)?,
        }
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), MenuError> {
        writeln!(self.out, "\n--- Delete Student ---")?;
        let id = self.ask("Enter student ID to delete:", None, StudentId::parse)?;

        let confirmed = self
            .prompter
            .confirm(&format!("Are you sure you want to delete student ID {id}?"))?;
        if !confirmed {
            writeln!(self.out, "Deletion cancelled.")?;
            return Ok(());
        }

        match self.store.delete(id).await {
            Ok(student) => writeln!(
                self.out,
                "✓ Successfully deleted student: {} (ID: {}, Email: {})",
                student.full_name(),
                student.student_id,
                student.email
            )?,
            Err(err) => self.report("Error deleting student", &err)?,
        }
        Ok(())
    }

    /// Prompt until `parse` accepts the input.
    fn ask<T>(
        &mut self,
        label: &str,
        help: Option<&str>,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, MenuError> {
        loop {
            let raw = self.prompter.text(label, help)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.out, "✗ Invalid input: {err}. Please try again.")?,
            }
        }
    }

    fn report(&mut self, context: &str, err: &StudentError) -> io::Result<()> {
        if err.is_connection() {
            tracing::warn!(error = %err, "{}", context);
        } else {
            tracing::debug!(error = %err, "{}", context);
        }
        writeln!(self.out, "✗ {context}: {err}")
    }
}
