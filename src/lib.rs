//! taskboard - an interactive, in-memory project and task board
//!
//! Projects own ordered lists of tasks. Each task carries a state
//! (TODO/DOING/DONE) and an optional deadline. Everything lives in memory for
//! the length of one session.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Project, ProjectId, Task, TaskId, TaskState, ValidationError};
pub use storage::{Config, Limits, Store};
