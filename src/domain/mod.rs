//! Domain models for taskboard
//!
//! Contains the core business logic without any I/O concerns.

mod error;
mod id;
mod names;
mod project;
mod task;
mod validate;

pub use error::{DeadlineProblem, EntityKind, ValidationError};
pub use id::{IdError, ProjectId, TaskId};
pub use names::{name_taken_among, Named};
pub use project::{Project, ProjectRecord, ProjectSummary};
pub use task::{Task, TaskRecord, TaskState, TaskSummary};
pub use validate::{today, DATE_FORMAT};
