//! `eduassist class` — Create, list and delete classes.

use std::path::PathBuf;

use eduassist_classroom::{Command, CommandOutput, NewClass};

use super::{CliResult, short};
use crate::ClassAction;

pub async fn run(data: Option<PathBuf>, action: ClassAction) -> CliResult {
    let (_, classroom) = super::open(data)?;

    match action {
        ClassAction::Create {
            name,
            subject,
            grade,
            description,
        } => {
            let output = classroom
                .dispatch(Command::CreateClass(NewClass {
                    name,
                    subject,
                    grade,
                    description,
                }))
                .await?;
            if let CommandOutput::Class(class) = output {
                println!("✅ Created class \"{}\" ({})", class.name, class.id);
                println!("   Join code: {}", class.code);
            }
        }
        ClassAction::List => {
            let summaries = classroom.class_summaries().await;
            if summaries.is_empty() {
                println!("No classes yet.");
            }
            for s in summaries {
                println!(
                    "{}  {:<28} {:<6} {:<14} {} students · {} projects · {} items",
                    short(&s.class.id),
                    s.class.name,
                    s.class.code,
                    s.class.subject,
                    s.students,
                    s.projects,
                    s.knowledge
                );
            }
        }
        ClassAction::Delete { id, yes } => {
            classroom
                .dispatch(Command::DeleteClass {
                    class_id: id.clone(),
                    confirmed: yes,
                })
                .await
                .map_err(|e| format!("{e} (pass --yes to confirm)"))?;
            println!("🗑️  Deleted class {id} with its projects, knowledge and students");
        }
    }

    Ok(())
}
