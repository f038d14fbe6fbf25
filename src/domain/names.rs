//! Sibling name uniqueness
//!
//! Entities do not police their own names against siblings. Callers ask
//! [`name_taken_among`] before creating or renaming.

use super::id::{ProjectId, TaskId};
use super::project::Project;
use super::task::Task;

/// An entity with an identity and a display name
pub trait Named {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
    fn name(&self) -> &str;
}

impl Named for Project {
    type Id = ProjectId;

    fn id(&self) -> &ProjectId {
        Project::id(self)
    }

    fn name(&self) -> &str {
        Project::name(self)
    }
}

impl Named for Task {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        Task::id(self)
    }

    fn name(&self) -> &str {
        Task::name(self)
    }
}

/// Returns true if any sibling other than `exclude` is called exactly `name`.
///
/// Comparison is case-sensitive and untrimmed.
pub fn name_taken_among<'a, T, I>(siblings: I, name: &str, exclude: Option<&T::Id>) -> bool
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    siblings
        .into_iter()
        .any(|sibling| sibling.name() == name && exclude.map_or(true, |id| sibling.id() != id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EntityLimits;

    fn limits() -> EntityLimits {
        EntityLimits {
            max_count: 20,
            max_name_len: 30,
            max_description_len: 150,
        }
    }

    #[test]
    fn exact_match_is_taken() {
        let tasks = vec![
            Task::new(&limits(), "X", None, None).unwrap(),
            Task::new(&limits(), "Y", None, None).unwrap(),
        ];

        assert!(name_taken_among(&tasks, "X", None));
        assert!(!name_taken_among(&tasks, "Z", None));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let tasks = vec![Task::new(&limits(), "Deploy", None, None).unwrap()];

        assert!(!name_taken_among(&tasks, "deploy", None));
    }

    #[test]
    fn excluded_id_does_not_collide_with_itself() {
        let tasks = vec![Task::new(&limits(), "X", None, None).unwrap()];
        let own = tasks[0].id().clone();

        assert!(!name_taken_among(&tasks, "X", Some(&own)));
    }

    #[test]
    fn excluding_one_still_sees_the_others() {
        let projects = vec![
            Project::new(&limits(), "Same", None).unwrap(),
            Project::new(&limits(), "Other", None).unwrap(),
        ];
        let other = projects[1].id().clone();

        assert!(name_taken_among(&projects, "Same", Some(&other)));
    }

    #[test]
    fn empty_collection_never_collides() {
        let tasks: Vec<Task> = Vec::new();
        assert!(!name_taken_among(&tasks, "X", None));
    }
}
