//! `eduassist history` — Print a stored conversation.

use std::path::PathBuf;

use eduassist_classroom::{Command, CommandOutput};
use eduassist_core::TurnRole;

use super::CliResult;

pub async fn run(data: Option<PathBuf>, student: String, project: Option<String>) -> CliResult {
    let (_, classroom) = super::open(data)?;
    let CommandOutput::History(turns) = classroom
        .dispatch(Command::History {
            student_id: student,
            project_id: project,
        })
        .await?
    else {
        return Err("unexpected output for history".into());
    };

    if turns.is_empty() {
        println!("No messages yet.");
    }
    for turn in turns {
        let who = match turn.role {
            TurnRole::User => "You",
            TurnRole::Assistant => "Assistant",
        };
        println!("[{}] {who} > {}", turn.timestamp.format("%Y-%m-%d %H:%M"), turn.content);
    }

    Ok(())
}
