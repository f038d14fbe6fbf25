//! Project domain model
//!
//! A project is a validated container that exclusively owns its tasks, in
//! insertion order. Dropping a project drops its tasks.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::error::{EntityKind, ValidationError};
use super::id::{ProjectId, TaskId};
use super::names::name_taken_among;
use super::task::{Task, TaskRecord};
use super::validate;
use crate::storage::{EntityLimits, Limits};

/// A project and its tasks
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    tasks: Vec<Task>,
}

impl Project {
    /// Creates a validated, empty project
    pub fn new(
        limits: &EntityLimits,
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = validate::name(EntityKind::Project, limits, name)?;
        let description = validate::description(EntityKind::Project, limits, description)?;
        let created_at = validate::now();

        Ok(Self {
            id: ProjectId::new(&name, created_at),
            name,
            description,
            created_at,
            tasks: Vec::new(),
        })
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the project. Sibling collisions are the caller's concern.
    pub fn rename(&mut self, limits: &EntityLimits, new_name: &str) -> Result<(), ValidationError> {
        self.name = validate::name(EntityKind::Project, limits, new_name)?;
        Ok(())
    }

    /// Replaces the description; `None` clears it
    pub fn set_description(
        &mut self,
        limits: &EntityLimits,
        description: Option<&str>,
    ) -> Result<(), ValidationError> {
        self.description = validate::description(EntityKind::Project, limits, description)?;
        Ok(())
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Appends a task. Does not check name uniqueness.
    pub fn add_task(&mut self, task: Task) {
        tracing::debug!(project = %self.id, task = %task.id(), "adding task");
        self.tasks.push(task);
    }

    /// Removes the task with the given ID, keeping the order of the rest.
    /// Returns false if no such task exists.
    pub fn remove_task(&mut self, task_id: &TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id() == task_id) {
            Some(index) => {
                self.tasks.remove(index);
                tracing::debug!(project = %self.id, task = %task_id, "removed task");
                true
            }
            None => false,
        }
    }

    pub fn find_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == task_id)
    }

    /// Returns true if another task in this project is called `name`
    pub fn task_name_taken(&self, name: &str, exclude: Option<&TaskId>) -> bool {
        name_taken_among(&self.tasks, name, exclude)
    }

    /// Structured view for display
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            task_count: self.tasks.len(),
            tasks: self.tasks.iter().map(|t| t.id().clone()).collect(),
        }
    }

    /// Portable representation, including nested task records
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: Some(self.created_at),
            tasks: self.tasks.iter().map(Task::to_record).collect(),
        }
    }

    /// Rebuilds a project, reconstructing nested tasks with [`Task::from_record`]
    pub fn from_record(limits: &Limits, record: ProjectRecord) -> Result<Self, ValidationError> {
        Self::from_record_with(&limits.project, record, |task| {
            Task::from_record(&limits.task, task)
        })
    }

    /// Rebuilds a project using `task_factory` for each nested task record.
    ///
    /// Missing `id` or `created_at` are freshly generated.
    pub fn from_record_with<F>(
        limits: &EntityLimits,
        record: ProjectRecord,
        task_factory: F,
    ) -> Result<Self, ValidationError>
    where
        F: FnMut(TaskRecord) -> Result<Task, ValidationError>,
    {
        let mut project = Self::new(limits, &record.name, Some(&record.description))?;
        if let Some(id) = record.id {
            project.id = id;
        }
        if let Some(created_at) = record.created_at {
            project.created_at = created_at.trunc_subsecs(0);
        }
        project.tasks = record
            .tasks
            .into_iter()
            .map(task_factory)
            .collect::<Result<_, _>>()?;
        Ok(project)
    }
}

/// Read-only view of a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub task_count: usize,
    pub tasks: Vec<TaskId>,
}

/// Serialized form of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}
