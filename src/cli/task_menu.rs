//! Interactive session: the task menu for one project

use std::io::BufRead;

use anyhow::Result;

use super::render;
use super::session::Session;
use crate::domain::{ProjectId, Task, TaskId, TaskState};

enum TaskAction {
    List,
    Create,
    View,
    Edit,
    State,
    Delete,
    Back,
}

impl TaskAction {
    fn parse(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::List),
            "2" => Some(Self::Create),
            "3" => Some(Self::View),
            "4" => Some(Self::Edit),
            "5" => Some(Self::State),
            "6" => Some(Self::Delete),
            "7" => Some(Self::Back),
            _ => None,
        }
    }
}

impl<'a, R: BufRead> Session<'a, R> {
    /// Runs the task menu until the user goes back or input ends
    pub(super) fn run_task_menu(&mut self, project_id: &ProjectId) -> Result<()> {
        loop {
            let Some(project) = self.store.find(project_id) else {
                return Ok(());
            };
            let title = format!("=== Tasks: {} ===", project.name());
            self.output.line(&title);
            self.output.line("1. List tasks");
            self.output.line("2. Create new task");
            self.output.line("3. View task details");
            self.output.line("4. Edit task");
            self.output.line("5. Change task state");
            self.output.line("6. Delete task");
            self.output.line("7. Back to projects");

            let Some(choice) = self.ask("Select an option: ")? else {
                return Ok(());
            };

            match TaskAction::parse(choice.trim()) {
                Some(TaskAction::List) => self.list_tasks(project_id),
                Some(TaskAction::Create) => self.create_task(project_id)?,
                Some(TaskAction::View) => self.view_task(project_id)?,
                Some(TaskAction::Edit) => self.edit_task(project_id)?,
                Some(TaskAction::State) => self.change_task_state(project_id)?,
                Some(TaskAction::Delete) => self.delete_task(project_id)?,
                Some(TaskAction::Back) => return Ok(()),
                None => self.output.error("Invalid option, try again."),
            }
        }
    }

    fn list_tasks(&self, project_id: &ProjectId) {
        let Some(project) = self.store.find(project_id) else {
            return;
        };

        if self.output.is_json() {
            let items: Vec<_> = project.tasks().iter().map(Task::summary).collect();
            self.output.data(&items);
            return;
        }

        self.output.line(&format!("\n--- Tasks in '{}' ---", project.name()));
        if project.tasks().is_empty() {
            self.output.line("No tasks available.");
        } else {
            for (i, task) in project.tasks().iter().enumerate() {
                self.output.line(&render::task_line(i + 1, task));
            }
        }
        self.output.line("--------------------------\n");
    }

    /// Lists tasks and resolves the user's pick by ID or list number
    fn select_task(&mut self, project_id: &ProjectId, verb: &str) -> Result<Option<TaskId>> {
        match self.store.find(project_id) {
            Some(project) if !project.tasks().is_empty() => {}
            _ => {
                self.output.error("No tasks available.");
                return Ok(None);
            }
        }
        if !self.output.is_json() {
            self.list_tasks(project_id);
        }

        let Some(answer) = self.ask(&format!("Enter the task ID or number to {}: ", verb))? else {
            return Ok(None);
        };
        let answer = answer.trim();

        let found = self.store.find(project_id).and_then(|project| {
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 => project.tasks().get(n - 1).map(|t| t.id().clone()),
                _ => answer
                    .parse::<TaskId>()
                    .ok()
                    .filter(|id| project.find_task(id).is_some()),
            }
        });

        if found.is_none() {
            self.output.error("No task found with that ID.");
        }
        Ok(found)
    }

    fn create_task(&mut self, project_id: &ProjectId) -> Result<()> {
        let limits = self.config.limits.task;
        let count = self.project_mut(project_id)?.tasks().len();
        if count >= limits.max_count {
            self.output.error(&format!(
                "Cannot create more than {} tasks in a project.",
                limits.max_count
            ));
            return Ok(());
        }

        let Some(name) = self.ask("Enter task name: ")? else {
            return Ok(());
        };
        let Some(description) = self.ask("Enter task description (optional): ")? else {
            return Ok(());
        };
        let Some(deadline) = self.ask("Enter deadline as YYYY-MM-DD (optional): ")? else {
            return Ok(());
        };

        let project = self.project_mut(project_id)?;
        if project.task_name_taken(name.trim(), None) {
            let message = format!("A task named '{}' already exists in this project.", name.trim());
            self.output.error(&message);
            return Ok(());
        }

        match Task::new(&limits, &name, Some(description.trim()), Some(&deadline)) {
            Ok(task) => {
                if self.output.is_json() {
                    self.output.data(&task.summary());
                } else {
                    self.output
                        .success(&format!("Task '{}' created successfully.\n", task.name()));
                }
                self.output.verbose_ctx("task", &format!("Created {}", task.id()));
                self.project_mut(project_id)?.add_task(task);
            }
            Err(e) => self.output.error(&format!("Error creating task: {}", e)),
        }
        Ok(())
    }

    fn view_task(&mut self, project_id: &ProjectId) -> Result<()> {
        let Some(task_id) = self.select_task(project_id, "view")? else {
            return Ok(());
        };
        let Some(task) = self
            .store
            .find(project_id)
            .and_then(|p| p.find_task(&task_id))
        else {
            return Ok(());
        };

        if self.output.is_json() {
            self.output.data(&task.to_record());
        } else {
            self.output
                .line(&render::task_details(task, self.config.display.width));
        }
        Ok(())
    }

    fn edit_task(&mut self, project_id: &ProjectId) -> Result<()> {
        let Some(task_id) = self.select_task(project_id, "edit")? else {
            return Ok(());
        };

        self.output.line("1. Rename");
        self.output.line("2. Change description");
        self.output.line("3. Change deadline");
        self.output.line("4. Cancel");
        let Some(choice) = self.ask("Select an option: ")? else {
            return Ok(());
        };

        let limits = self.config.limits.task;
        let result = match choice.trim() {
            "1" => {
                let Some(name) = self.ask("Enter new task name: ")? else {
                    return Ok(());
                };
                let project = self.project_mut(project_id)?;
                if project.task_name_taken(name.trim(), Some(&task_id)) {
                    let message =
                        format!("A task named '{}' already exists in this project.", name.trim());
                    self.output.error(&message);
                    return Ok(());
                }
                self.task_mut(project_id, &task_id)?.rename(&limits, &name)
            }
            "2" => {
                let Some(description) =
                    self.ask("Enter new description (leave blank to clear): ")?
                else {
                    return Ok(());
                };
                let description = Some(description.trim()).filter(|d| !d.is_empty());
                self.task_mut(project_id, &task_id)?
                    .set_description(&limits, description)
            }
            "3" => {
                let Some(deadline) =
                    self.ask("Enter new deadline as YYYY-MM-DD (leave blank to clear): ")?
                else {
                    return Ok(());
                };
                self.task_mut(project_id, &task_id)?
                    .set_deadline(Some(&deadline))
            }
            "4" => return Ok(()),
            _ => {
                self.output.error("Invalid option, try again.");
                return Ok(());
            }
        };

        match result {
            Ok(()) => self.report_task_updated(project_id, &task_id),
            Err(e) => self.output.error(&format!("Error updating task: {}", e)),
        }
        Ok(())
    }

    fn change_task_state(&mut self, project_id: &ProjectId) -> Result<()> {
        let Some(task_id) = self.select_task(project_id, "update")? else {
            return Ok(());
        };

        let states: Vec<&str> = TaskState::ALL.iter().map(TaskState::as_str).collect();
        let Some(token) = self.ask(&format!("Enter new state ({}): ", states.join("/")))? else {
            return Ok(());
        };

        let result = self.task_mut(project_id, &task_id)?.set_state(&token);
        match result {
            Ok(()) => self.report_task_updated(project_id, &task_id),
            Err(e) => self.output.error(&format!("Error updating task: {}", e)),
        }
        Ok(())
    }

    fn delete_task(&mut self, project_id: &ProjectId) -> Result<()> {
        let Some(task_id) = self.select_task(project_id, "delete")? else {
            return Ok(());
        };
        let question = match self.store.find(project_id).and_then(|p| p.find_task(&task_id)) {
            Some(task) => format!("Delete task '{}'?", task.name()),
            None => return Ok(()),
        };

        if !self.output.is_json() && !self.confirm(&question)? {
            self.output.line("Cancelled.");
            return Ok(());
        }

        if self.project_mut(project_id)?.remove_task(&task_id) {
            self.output.success(&format!("Task {} deleted.", task_id));
        } else {
            self.output.error("No task found with that ID.");
        }
        Ok(())
    }

    fn report_task_updated(&self, project_id: &ProjectId, task_id: &TaskId) {
        let Some(task) = self
            .store
            .find(project_id)
            .and_then(|p| p.find_task(task_id))
        else {
            return;
        };

        if self.output.is_json() {
            self.output.data(&task.summary());
        } else {
            self.output.success(&format!(
                "Task '{}' updated ({}).",
                task.name(),
                task.state()
            ));
        }
    }

    fn task_mut(&mut self, project_id: &ProjectId, task_id: &TaskId) -> Result<&mut Task> {
        self.project_mut(project_id)?
            .find_task_mut(task_id)
            .ok_or_else(|| anyhow::anyhow!("Task {} disappeared during edit", task_id))
    }
}
