//! Task domain model
//!
//! Tasks are the units of work owned by a project. Every constructor and
//! mutator revalidates its input, so a `Task` value is always valid.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::error::{EntityKind, ValidationError};
use super::id::TaskId;
use super::validate;
use crate::storage::EntityLimits;

/// State of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskState {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskState {
    /// All states, in workflow order
    pub const ALL: [TaskState; 3] = [TaskState::Todo, TaskState::Doing, TaskState::Done];

    /// Canonical upper-case form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Todo => "TODO",
            TaskState::Doing => "DOING",
            TaskState::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        TaskState::ALL
            .into_iter()
            .find(|state| state.as_str() == token)
            .ok_or(ValidationError::InvalidState(token))
    }
}

impl TryFrom<String> for TaskState {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        state.as_str().to_string()
    }
}

/// A task within a project
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    state: TaskState,
    deadline: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a validated task in the `TODO` state
    pub fn new(
        limits: &EntityLimits,
        name: &str,
        description: Option<&str>,
        deadline: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = validate::name(EntityKind::Task, limits, name)?;
        let description = validate::description(EntityKind::Task, limits, description)?;
        let deadline = validate::deadline(deadline, validate::today())?;
        let created_at = validate::now();

        Ok(Self {
            id: TaskId::new(&name, created_at),
            name,
            description,
            state: TaskState::Todo,
            deadline,
            created_at,
        })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, empty when none was given
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the task. Sibling collisions are the caller's concern.
    pub fn rename(&mut self, limits: &EntityLimits, new_name: &str) -> Result<(), ValidationError> {
        self.name = validate::name(EntityKind::Task, limits, new_name)?;
        Ok(())
    }

    /// Replaces the description; `None` clears it
    pub fn set_description(
        &mut self,
        limits: &EntityLimits,
        description: Option<&str>,
    ) -> Result<(), ValidationError> {
        self.description = validate::description(EntityKind::Task, limits, description)?;
        Ok(())
    }

    /// Sets the state from a case-insensitive token
    pub fn set_state(&mut self, token: &str) -> Result<(), ValidationError> {
        self.state = token.parse()?;
        Ok(())
    }

    pub fn set_state_to(&mut self, state: TaskState) {
        self.state = state;
    }

    /// Sets or clears the deadline. Blank input clears it.
    pub fn set_deadline(&mut self, deadline: Option<&str>) -> Result<(), ValidationError> {
        self.deadline = validate::deadline(deadline, validate::today())?;
        Ok(())
    }

    /// Structured view for display
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            state: self.state,
            created_at: self.created_at,
            deadline: self.deadline,
        }
    }

    /// Portable representation for transport or external persistence
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            state: Some(self.state.as_str().to_string()),
            deadline: self.deadline,
            created_at: Some(self.created_at),
        }
    }

    /// Rebuilds a task from a record.
    ///
    /// Name and description are revalidated and the state goes through the
    /// same case-insensitive parser as [`Task::set_state`]. A missing `id` or
    /// `created_at` is freshly generated. The deadline is restored as stored:
    /// it was checked against the date it was set on, not today's.
    pub fn from_record(limits: &EntityLimits, record: TaskRecord) -> Result<Self, ValidationError> {
        let mut task = Self::new(limits, &record.name, Some(&record.description), None)?;
        if let Some(state) = record.state.as_deref() {
            task.set_state(state)?;
        }
        if let Some(id) = record.id {
            task.id = id;
        }
        if let Some(created_at) = record.created_at {
            task.created_at = created_at.trunc_subsecs(0);
        }
        task.deadline = record.deadline;
        Ok(task)
    }
}

/// Read-only view of a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub state: TaskState,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<NaiveDate>,
}

/// Serialized form of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Kept as text so that any casing is accepted on the way in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn limits() -> EntityLimits {
        EntityLimits {
            max_count: 20,
            max_name_len: 30,
            max_description_len: 150,
        }
    }

    fn make_task(name: &str) -> Task {
        Task::new(&limits(), name, None, None).unwrap()
    }

    fn date_offset(days: i64) -> String {
        (validate::today() + Duration::days(days))
            .format(validate::DATE_FORMAT)
            .to_string()
    }

    #[test]
    fn new_task_is_todo_and_trimmed() {
        let task = Task::new(&limits(), "  Draft spec ", Some("first pass"), None).unwrap();

        assert_eq!(task.name(), "Draft spec");
        assert_eq!(task.description(), "first pass");
        assert_eq!(task.state(), TaskState::Todo);
        assert_eq!(task.deadline(), None);
        assert_eq!(task.created_at().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn empty_or_blank_name_is_required() {
        for name in ["", "   "] {
            assert_eq!(
                Task::new(&limits(), name, None, None).unwrap_err(),
                ValidationError::NameRequired(EntityKind::Task)
            );
        }
    }

    #[test]
    fn name_length_boundary() {
        assert!(Task::new(&limits(), &"x".repeat(30), None, None).is_ok());
        assert_eq!(
            Task::new(&limits(), &"x".repeat(31), None, None).unwrap_err(),
            ValidationError::NameTooLong { kind: EntityKind::Task, max: 30 }
        );
    }

    #[test]
    fn description_length_boundary() {
        assert!(Task::new(&limits(), "ok", Some(&"d".repeat(150)), None).is_ok());
        assert_eq!(
            Task::new(&limits(), "ok", Some(&"d".repeat(151)), None).unwrap_err(),
            ValidationError::DescriptionTooLong { kind: EntityKind::Task, max: 150 }
        );
    }

    #[test]
    fn deadline_today_is_accepted_yesterday_is_not() {
        let task = Task::new(&limits(), "ok", None, Some(&date_offset(0))).unwrap();
        assert_eq!(task.deadline(), Some(validate::today()));

        let err = Task::new(&limits(), "ok", None, Some(&date_offset(-1))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDeadline { .. }));
    }

    #[test]
    fn rename_revalidates() {
        let mut task = make_task("Old");

        task.rename(&limits(), "  New ").unwrap();
        assert_eq!(task.name(), "New");

        assert!(task.rename(&limits(), " ").is_err());
        assert_eq!(task.name(), "New");
    }

    #[test]
    fn clearing_description_is_idempotent() {
        let mut task = Task::new(&limits(), "ok", Some("something"), None).unwrap();

        task.set_description(&limits(), None).unwrap();
        let once = task.clone();
        task.set_description(&limits(), None).unwrap();

        assert_eq!(task, once);
        assert_eq!(task.description(), "");
    }

    #[test]
    fn overlong_description_leaves_task_unchanged() {
        let mut task = Task::new(&limits(), "ok", Some("keep"), None).unwrap();
        assert!(task.set_description(&limits(), Some(&"d".repeat(151))).is_err());
        assert_eq!(task.description(), "keep");
    }

    #[test]
    fn state_parsing_is_case_insensitive() {
        let mut task = make_task("ok");

        task.set_state("doing").unwrap();
        assert_eq!(task.state(), TaskState::Doing);

        task.set_state(" Done ").unwrap();
        assert_eq!(task.state(), TaskState::Done);

        assert_eq!(
            task.set_state("finished").unwrap_err(),
            ValidationError::InvalidState("FINISHED".to_string())
        );
        assert_eq!(task.state(), TaskState::Done);
    }

    #[test]
    fn set_deadline_and_clear() {
        let mut task = make_task("ok");

        task.set_deadline(Some("2099-01-01")).unwrap();
        assert_eq!(task.deadline(), NaiveDate::from_ymd_opt(2099, 1, 1));

        assert!(task.set_deadline(Some(&date_offset(-1))).is_err());
        assert_eq!(task.deadline(), NaiveDate::from_ymd_opt(2099, 1, 1));

        task.set_deadline(Some("")).unwrap();
        assert_eq!(task.deadline(), None);

        task.set_deadline(Some("2099-01-01")).unwrap();
        task.set_deadline(None).unwrap();
        assert_eq!(task.deadline(), None);
    }

    #[test]
    fn summary_exposes_fields() {
        let task = Task::new(&limits(), "ok", Some("desc"), Some("2099-01-01")).unwrap();
        let summary = task.summary();

        assert_eq!(&summary.id, task.id());
        assert_eq!(summary.state, TaskState::Todo);
        assert_eq!(summary.deadline, task.deadline());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["state"], "TODO");
        assert_eq!(json["deadline"], "2099-01-01");
    }

    #[test]
    fn record_roundtrip_preserves_everything() {
        let mut task = Task::new(&limits(), "Draft", Some("desc"), Some("2099-01-01")).unwrap();
        task.set_state("DOING").unwrap();

        let json = serde_json::to_string(&task.to_record()).unwrap();
        let record: TaskRecord = serde_json::from_str(&json).unwrap();
        let parsed = Task::from_record(&limits(), record).unwrap();

        assert_eq!(parsed, task);
    }

    #[test]
    fn from_record_fills_missing_fields() {
        let record: TaskRecord = serde_json::from_str(r#"{"name":"Bare"}"#).unwrap();
        let task = Task::from_record(&limits(), record).unwrap();

        assert_eq!(task.name(), "Bare");
        assert_eq!(task.description(), "");
        assert_eq!(task.state(), TaskState::Todo);
        assert!(task.id().to_string().starts_with("t-"));
    }

    #[test]
    fn from_record_accepts_any_state_casing() {
        let record: TaskRecord =
            serde_json::from_str(r#"{"name":"x","state":"doing","created_at":"2025-01-01T10:00:00.750Z"}"#)
                .unwrap();
        let task = Task::from_record(&limits(), record).unwrap();

        assert_eq!(task.state(), TaskState::Doing);
        assert_eq!(task.created_at().to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[test]
    fn from_record_rejects_bad_state_and_names() {
        let bad_state: TaskRecord = serde_json::from_str(r#"{"name":"x","state":"later"}"#).unwrap();
        assert!(matches!(
            Task::from_record(&limits(), bad_state),
            Err(ValidationError::InvalidState(_))
        ));

        let blank: TaskRecord = serde_json::from_str(r#"{"name":"  "}"#).unwrap();
        assert!(Task::from_record(&limits(), blank).is_err());
    }

    #[test]
    fn from_record_keeps_past_deadline() {
        let record: TaskRecord =
            serde_json::from_str(r#"{"name":"x","deadline":"2001-02-03"}"#).unwrap();
        let task = Task::from_record(&limits(), record).unwrap();

        assert_eq!(task.deadline(), NaiveDate::from_ymd_opt(2001, 2, 3));
    }

    #[test]
    fn task_state_serde_uses_canonical_form() {
        assert_eq!(serde_json::to_string(&TaskState::Doing).unwrap(), "\"DOING\"");
        assert_eq!(serde_json::from_str::<TaskState>("\"done\"").unwrap(), TaskState::Done);
        assert!(serde_json::from_str::<TaskState>("\"nope\"").is_err());
    }
}
