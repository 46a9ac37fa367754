//! `eduassist knowledge` — Manage the knowledge base.

use std::path::PathBuf;

use eduassist_classroom::{Command, CommandOutput, NewKnowledge};

use super::{CliResult, short};
use crate::KnowledgeAction;

pub async fn run(data: Option<PathBuf>, action: KnowledgeAction) -> CliResult {
    let (_, classroom) = super::open(data)?;

    match action {
        KnowledgeAction::Add {
            class,
            project,
            question,
            answer,
            tags,
        } => {
            let output = classroom
                .dispatch(Command::AddKnowledge(NewKnowledge {
                    class_id: class,
                    project_id: project,
                    question,
                    answer,
                    tags,
                }))
                .await?;
            if let CommandOutput::Knowledge(item) = output {
                println!("✅ Added knowledge item {}", item.id);
            }
        }
        KnowledgeAction::Edit {
            id,
            question,
            answer,
        } => {
            if question.is_none() && answer.is_none() {
                return Err("Nothing to change: pass --question and/or --answer".into());
            }
            classroom
                .dispatch(Command::EditKnowledge {
                    id: id.clone(),
                    question,
                    answer,
                })
                .await?;
            println!("✅ Updated knowledge item {id}");
        }
        KnowledgeAction::Delete { id, yes } => {
            classroom
                .dispatch(Command::DeleteKnowledge {
                    id: id.clone(),
                    confirmed: yes,
                })
                .await
                .map_err(|e| format!("{e} (pass --yes to confirm)"))?;
            println!("🗑️  Deleted knowledge item {id}");
        }
        KnowledgeAction::List {
            class,
            project,
            search,
        } => {
            let items = classroom
                .knowledge_catalog(class.as_deref(), project.as_deref(), search.as_deref())
                .await;
            if items.is_empty() {
                println!("No knowledge items match.");
            }
            for item in items {
                let scope = match &item.project_id {
                    Some(p) => format!("project {}", short(p)),
                    None => "class-wide".to_string(),
                };
                println!("{}  [{}]", short(&item.id), scope);
                println!("    Q: {}", item.question);
                println!("    A: {}", item.answer);
                if !item.tags.is_empty() {
                    println!("    tags: {}", item.tags.join(", "));
                }
            }
        }
    }

    Ok(())
}
