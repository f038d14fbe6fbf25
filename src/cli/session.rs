//! Interactive session: the project menu
//!
//! The session reads one line at a time, calls into the domain and reports
//! what happened. Validation failures are printed and the menu continues.
//! End of input behaves like choosing "Quit".

use std::io::BufRead;

use anyhow::{Context, Result};

use super::output::Output;
use super::render;
use crate::domain::{Project, ProjectId};
use crate::storage::{Config, Store};

/// One interactive run over an in-memory store
pub struct Session<'a, R> {
    input: R,
    pub(super) output: &'a Output,
    pub(super) config: Config,
    pub(super) store: Store,
    eof: bool,
}

enum ProjectAction {
    List,
    Create,
    View,
    Edit,
    Delete,
    Tasks,
    Quit,
}

impl ProjectAction {
    fn parse(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::List),
            "2" => Some(Self::Create),
            "3" => Some(Self::View),
            "4" => Some(Self::Edit),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Tasks),
            "7" => Some(Self::Quit),
            _ => None,
        }
    }
}

impl<'a, R: BufRead> Session<'a, R> {
    pub fn new(input: R, output: &'a Output, config: Config) -> Self {
        Self {
            input,
            output,
            config,
            store: Store::new(),
            eof: false,
        }
    }

    /// Runs the project menu until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu();
            let Some(choice) = self.ask("Select an option: ")? else {
                break;
            };

            match ProjectAction::parse(choice.trim()) {
                Some(ProjectAction::List) => self.list_projects(),
                Some(ProjectAction::Create) => self.create_project()?,
                Some(ProjectAction::View) => self.view_project()?,
                Some(ProjectAction::Edit) => self.edit_project()?,
                Some(ProjectAction::Delete) => self.delete_project()?,
                Some(ProjectAction::Tasks) => self.manage_tasks()?,
                Some(ProjectAction::Quit) => break,
                None => self.output.error("Invalid option, try again."),
            }
        }

        self.output.success("Goodbye!");
        Ok(())
    }

    fn print_menu(&self) {
        self.output.line("=== Project Menu ===");
        self.output.line("1. List projects");
        self.output.line("2. Create new project");
        self.output.line("3. View project details");
        self.output.line("4. Edit project");
        self.output.line("5. Delete project");
        self.output.line("6. Manage tasks");
        self.output.line("7. Quit");
    }

    /// Prompts and reads one line. Returns `None` once input is exhausted.
    pub(super) fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.eof {
            return Ok(None);
        }
        self.output.prompt(prompt);

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            self.eof = true;
            self.output.blank();
            return Ok(None);
        }

        let line = line.trim_end_matches(['\n', '\r']).to_string();
        self.output.verbose_ctx("input", &format!("{:?}", line));
        Ok(Some(line))
    }

    /// Asks a yes/no question; anything but `y`/`yes` is a no
    pub(super) fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/N]: ", question))?;
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    fn list_projects(&self) {
        let projects = self.store.list();

        if self.output.is_json() {
            let items: Vec<_> = projects.iter().map(Project::summary).collect();
            self.output.data(&items);
            return;
        }

        self.output.line("\n--- Projects in Memory ---");
        if projects.is_empty() {
            self.output.line("No projects available.");
        } else {
            for (i, project) in projects.iter().enumerate() {
                self.output.line(&render::project_line(i + 1, project));
            }
        }
        self.output.line("--------------------------\n");
    }

    /// Lists projects and resolves the user's pick by ID or list number
    fn select_project(&mut self, verb: &str) -> Result<Option<ProjectId>> {
        if self.store.is_empty() {
            self.output.error("No projects available.");
            return Ok(None);
        }
        if !self.output.is_json() {
            self.list_projects();
        }

        let Some(answer) = self.ask(&format!("Enter the project ID or number to {}: ", verb))? else {
            return Ok(None);
        };
        let answer = answer.trim();

        let found = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => self.store.list().get(n - 1).map(|p| p.id().clone()),
            _ => answer
                .parse::<ProjectId>()
                .ok()
                .filter(|id| self.store.find(id).is_some()),
        };

        if found.is_none() {
            self.output.error("No project found with that ID.");
        }
        Ok(found)
    }

    fn create_project(&mut self) -> Result<()> {
        let limits = self.config.limits;
        if self.store.len() >= limits.project.max_count {
            self.output.error(&format!(
                "Cannot create more than {} projects.",
                limits.project.max_count
            ));
            return Ok(());
        }

        let Some(name) = self.ask("Enter project name: ")? else {
            return Ok(());
        };
        let Some(description) = self.ask("Enter project description (optional): ")? else {
            return Ok(());
        };

        if self.store.name_taken(name.trim(), None) {
            self.output
                .error(&format!("A project named '{}' already exists.", name.trim()));
            return Ok(());
        }

        match Project::new(&limits.project, &name, Some(description.trim())) {
            Ok(project) => {
                self.output.verbose_ctx("project", &format!("Created {}", project.id()));
                if self.output.is_json() {
                    self.output.data(&project.summary());
                } else {
                    self.output
                        .success(&format!("Project '{}' created successfully.\n", project.name()));
                }
                self.store.add(project);
            }
            Err(e) => self.output.error(&format!("Error creating project: {}", e)),
        }
        Ok(())
    }

    fn view_project(&mut self) -> Result<()> {
        let Some(id) = self.select_project("view")? else {
            return Ok(());
        };
        let Some(project) = self.store.find(&id) else {
            return Ok(());
        };

        if self.output.is_json() {
            self.output.data(&project.to_record());
        } else {
            self.output
                .line(&render::project_details(project, self.config.display.width));
        }
        Ok(())
    }

    fn edit_project(&mut self) -> Result<()> {
        let Some(id) = self.select_project("edit")? else {
            return Ok(());
        };

        self.output.line("1. Rename");
        self.output.line("2. Change description");
        self.output.line("3. Cancel");
        let Some(choice) = self.ask("Select an option: ")? else {
            return Ok(());
        };

        let limits = self.config.limits.project;
        let result = match choice.trim() {
            "1" => {
                let Some(name) = self.ask("Enter new project name: ")? else {
                    return Ok(());
                };
                if self.store.name_taken(name.trim(), Some(&id)) {
                    self.output
                        .error(&format!("A project named '{}' already exists.", name.trim()));
                    return Ok(());
                }
                self.project_mut(&id)?.rename(&limits, &name)
            }
            "2" => {
                let Some(description) =
                    self.ask("Enter new description (leave blank to clear): ")?
                else {
                    return Ok(());
                };
                let description = Some(description.trim()).filter(|d| !d.is_empty());
                self.project_mut(&id)?.set_description(&limits, description)
            }
            "3" => return Ok(()),
            _ => {
                self.output.error("Invalid option, try again.");
                return Ok(());
            }
        };

        match result {
            Ok(()) => {
                if let Some(project) = self.store.find(&id) {
                    if self.output.is_json() {
                        self.output.data(&project.summary());
                    } else {
                        self.output
                            .success(&format!("Project '{}' updated.", project.name()));
                    }
                }
            }
            Err(e) => self.output.error(&format!("Error updating project: {}", e)),
        }
        Ok(())
    }

    fn delete_project(&mut self) -> Result<()> {
        let Some(id) = self.select_project("delete")? else {
            return Ok(());
        };
        let Some(project) = self.store.find(&id) else {
            return Ok(());
        };
        let question = format!(
            "Delete project '{}' and its {} task(s)?",
            project.name(),
            project.tasks().len()
        );

        if !self.output.is_json() && !self.confirm(&question)? {
            self.output.line("Cancelled.");
            return Ok(());
        }

        if self.store.remove(&id) {
            self.output.success(&format!("Project {} deleted.", id));
        } else {
            self.output.error("No project found with that ID.");
        }
        Ok(())
    }

    fn manage_tasks(&mut self) -> Result<()> {
        let Some(id) = self.select_project("manage")? else {
            return Ok(());
        };
        self.run_task_menu(&id)
    }

    /// Looks up a project that was selected earlier in this action
    pub(super) fn project_mut(&mut self, id: &ProjectId) -> Result<&mut Project> {
        self.store
            .find_mut(id)
            .with_context(|| format!("Project {} disappeared during edit", id))
    }
}
