//! In-memory project registry
//!
//! The store is the sole owner of every project for the lifetime of the
//! session. Nothing is written anywhere.

use crate::domain::{name_taken_among, Project, ProjectId};

/// Projects in insertion order
#[derive(Debug, Default)]
pub struct Store {
    projects: Vec<Project>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a project. Does not check name uniqueness.
    pub fn add(&mut self, project: Project) {
        tracing::debug!(project = %project.id(), name = project.name(), "adding project");
        self.projects.push(project);
    }

    /// Projects in insertion order
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, project_id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == project_id)
    }

    pub fn find_mut(&mut self, project_id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id() == project_id)
    }

    /// Removes a project together with all of its tasks.
    /// Returns false if no such project exists.
    pub fn remove(&mut self, project_id: &ProjectId) -> bool {
        let Some(index) = self.projects.iter().position(|p| p.id() == project_id) else {
            return false;
        };
        let removed = self.projects.remove(index);
        tracing::debug!(
            project = %project_id,
            tasks = removed.tasks().len(),
            "removed project"
        );
        true
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Returns true if another project is called `name`
    pub fn name_taken(&self, name: &str, exclude: Option<&ProjectId>) -> bool {
        name_taken_among(&self.projects, name, exclude)
    }
}
