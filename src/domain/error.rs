//! Validation errors raised by entity constructors and mutators

use std::fmt;

use thiserror::Error;

/// Which kind of entity a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Task => "Task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected input. Never fatal; the caller reports it and re-prompts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} name is required and cannot be empty.")]
    NameRequired(EntityKind),

    #[error("{kind} name must be at most {max} characters.")]
    NameTooLong { kind: EntityKind, max: usize },

    #[error("{kind} description must be at most {max} characters.")]
    DescriptionTooLong { kind: EntityKind, max: usize },

    #[error("Invalid state '{0}'. Valid: TODO, DOING, DONE.")]
    InvalidState(String),

    #[error("Invalid deadline '{input}': {reason}.")]
    InvalidDeadline { input: String, reason: DeadlineProblem },
}

/// Why a deadline was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineProblem {
    /// Not a `YYYY-MM-DD` calendar date
    Malformed,
    /// A real date, but before today (UTC)
    InPast,
}

impl fmt::Display for DeadlineProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineProblem::Malformed => f.write_str("expected a date as YYYY-MM-DD"),
            DeadlineProblem::InPast => f.write_str("deadline cannot be in the past"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ValidationError::NameRequired(EntityKind::Project).to_string(),
            "Project name is required and cannot be empty."
        );
        assert_eq!(
            ValidationError::NameTooLong { kind: EntityKind::Task, max: 30 }.to_string(),
            "Task name must be at most 30 characters."
        );
        assert_eq!(
            ValidationError::InvalidDeadline {
                input: "2020-01-01".to_string(),
                reason: DeadlineProblem::InPast,
            }
            .to_string(),
            "Invalid deadline '2020-01-01': deadline cannot be in the past."
        );
    }
}
