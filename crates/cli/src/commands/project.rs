//! `eduassist project` — Create, list and delete projects.

use std::path::PathBuf;

use eduassist_classroom::{Command, CommandOutput, NewProject};

use super::{CliResult, short};
use crate::ProjectAction;

pub async fn run(data: Option<PathBuf>, action: ProjectAction) -> CliResult {
    let (_, classroom) = super::open(data)?;

    match action {
        ProjectAction::Create {
            class,
            name,
            due,
            description,
        } => {
            let output = classroom
                .dispatch(Command::CreateProject(NewProject {
                    class_id: class,
                    name,
                    due_date: due,
                    description,
                }))
                .await?;
            if let CommandOutput::Project(project) = output {
                println!("✅ Created project \"{}\" ({})", project.name, project.id);
            }
        }
        ProjectAction::List { class } => {
            let summaries = classroom.project_summaries(class.as_deref()).await;
            if summaries.is_empty() {
                println!("No projects yet.");
            }
            for s in summaries {
                let due = s
                    .project
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "no due date".into());
                println!(
                    "{}  {:<32} {:<20} {:<12} {} items",
                    short(&s.project.id),
                    s.project.name,
                    s.class_name.as_deref().unwrap_or("(deleted class)"),
                    due,
                    s.knowledge
                );
            }
        }
        ProjectAction::Delete { id, yes } => {
            classroom
                .dispatch(Command::DeleteProject {
                    project_id: id.clone(),
                    confirmed: yes,
                })
                .await
                .map_err(|e| format!("{e} (pass --yes to confirm)"))?;
            println!("🗑️  Deleted project {id}");
        }
    }

    Ok(())
}
