//! `eduassist student` — Join a class or list students.

use std::path::PathBuf;

use eduassist_classroom::{Command, CommandOutput};

use super::{CliResult, short};
use crate::StudentAction;

pub async fn run(data: Option<PathBuf>, action: StudentAction) -> CliResult {
    let (_, classroom) = super::open(data)?;

    match action {
        StudentAction::Join { name, code } => {
            let output = classroom.dispatch(Command::JoinClass { name, code }).await?;
            if let CommandOutput::Student(student) = output {
                println!("👋 Welcome, {}! You joined {}.", student.name, student.class_name);
                println!("   Student id: {}", student.id);
                println!("   Ask away: eduassist ask --student {}", student.id);
            }
        }
        StudentAction::List { class } => {
            let students = classroom.list_students(class.as_deref()).await;
            if students.is_empty() {
                println!("No students yet.");
            }
            for s in students {
                println!(
                    "{}  {:<24} {:<28} joined {}",
                    short(&s.id),
                    s.name,
                    s.class_name,
                    s.joined_at.format("%Y-%m-%d")
                );
            }
        }
    }

    Ok(())
}
