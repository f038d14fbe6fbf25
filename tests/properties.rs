//! Property tests for entity validation, uniqueness and removal

use proptest::prelude::*;

use taskboard::domain::{name_taken_among, EntityKind, Project, Task, ValidationError};
use taskboard::storage::{EntityLimits, Limits, Store};

const MAX_NAME: usize = 30;
const MAX_DESCRIPTION: usize = 150;

fn limits() -> EntityLimits {
    EntityLimits {
        max_count: 20,
        max_name_len: MAX_NAME,
        max_description_len: MAX_DESCRIPTION,
    }
}

/// Names of 1..=MAX_NAME visible characters, optionally padded with spaces
fn padded_name() -> impl Strategy<Value = (String, String)> {
    ("[a-zA-Z0-9][a-zA-Z0-9 _-]{0,28}[a-zA-Z0-9]?", 0..3usize, 0..3usize).prop_map(
        |(core, left, right)| {
            let core = core.trim().to_string();
            let padded = format!("{}{}{}", " ".repeat(left), core, " ".repeat(right));
            (padded, core)
        },
    )
}

proptest! {
    #[test]
    fn valid_task_names_are_trimmed(
        (input, expected) in padded_name(),
        description in "[a-z ]{0,150}",
    ) {
        let task = Task::new(&limits(), &input, Some(&description), None).unwrap();
        prop_assert_eq!(task.name(), expected.as_str());
        prop_assert_eq!(task.description(), description.as_str());
    }

    #[test]
    fn valid_project_names_are_trimmed((input, expected) in padded_name()) {
        let project = Project::new(&limits(), &input, None).unwrap();
        prop_assert_eq!(project.name(), expected.as_str());
    }

    #[test]
    fn whitespace_names_are_required(spaces in "[ \t]{0,10}") {
        prop_assert_eq!(
            Task::new(&limits(), &spaces, None, None).unwrap_err(),
            ValidationError::NameRequired(EntityKind::Task)
        );
    }

    #[test]
    fn overlong_names_are_rejected(extra in 1..20usize) {
        let name = "n".repeat(MAX_NAME + extra);
        prop_assert_eq!(
            Project::new(&limits(), &name, None).unwrap_err(),
            ValidationError::NameTooLong { kind: EntityKind::Project, max: MAX_NAME }
        );
    }

    #[test]
    fn overlong_descriptions_are_rejected(extra in 1..20usize) {
        let description = "d".repeat(MAX_DESCRIPTION + extra);
        let rejected = matches!(
            Task::new(&limits(), "ok", Some(&description), None),
            Err(ValidationError::DescriptionTooLong { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn record_roundtrip_is_exact(
        (input, _) in padded_name(),
        state in prop::sample::select(vec!["todo", "DOING", "Done"]),
        year in 2100..2200i32,
    ) {
        let deadline = format!("{}-03-15", year);
        let mut task = Task::new(&limits(), &input, Some("desc"), Some(&deadline)).unwrap();
        task.set_state(state).unwrap();

        let mut project = Project::new(&limits(), &input, None).unwrap();
        project.add_task(task);

        let json = serde_json::to_string(&project.to_record()).unwrap();
        let parsed = Project::from_record(&Limits::default(), serde_json::from_str(&json).unwrap())
            .unwrap();
        prop_assert_eq!(parsed, project);
    }

    #[test]
    fn remove_task_keeps_order(count in 1..10usize, pick in 0..10usize) {
        let mut project = Project::new(&limits(), "P", None).unwrap();
        for i in 0..count {
            project.add_task(Task::new(&limits(), &format!("t{}", i), None, None).unwrap());
        }
        let before: Vec<String> = project.tasks().iter().map(|t| t.name().to_string()).collect();
        let pick = pick % count;
        let id = project.tasks()[pick].id().clone();

        prop_assert!(project.remove_task(&id));
        let mut expected = before.clone();
        expected.remove(pick);
        let after: Vec<String> = project.tasks().iter().map(|t| t.name().to_string()).collect();
        prop_assert_eq!(after, expected);

        prop_assert!(!project.remove_task(&id));
        prop_assert_eq!(project.tasks().len(), count - 1);
    }

    #[test]
    fn added_name_is_taken_except_for_itself(name in "[a-z]{1,20}") {
        let mut project = Project::new(&limits(), "P", None).unwrap();
        project.add_task(Task::new(&limits(), &name, None, None).unwrap());
        let own = project.tasks()[0].id().clone();

        prop_assert!(name_taken_among(project.tasks(), &name, None));
        prop_assert!(!name_taken_among(project.tasks(), &name, Some(&own)));
    }
}

#[test]
fn removing_unknown_project_leaves_store_unchanged() {
    let mut store = Store::new();
    store.add(Project::new(&limits(), "Launch", None).unwrap());
    let stranger = Project::new(&limits(), "Elsewhere", None).unwrap();

    assert!(!store.remove(stranger.id()));
    assert_eq!(store.list().len(), 1);
}
