//! `eduassist rules` — Show or replace assistant rules.

use std::path::PathBuf;

use eduassist_classroom::{Command, RuleScope};

use super::CliResult;
use crate::{RuleTarget, RulesAction};

fn scope_of(target: RuleTarget) -> RuleScope {
    match (target.class, target.project) {
        (_, Some(project)) => RuleScope::Project(project),
        (Some(class), None) => RuleScope::Class(class),
        (None, None) => RuleScope::Global,
    }
}

pub async fn run(data: Option<PathBuf>, action: RulesAction) -> CliResult {
    let (_, classroom) = super::open(data)?;

    match action {
        RulesAction::Show { target } => {
            let scope = scope_of(target);
            let text = classroom.rule(&scope).await;
            if text.trim().is_empty() {
                println!("(no {scope:?} rule set)");
            } else {
                println!("{text}");
            }
        }
        RulesAction::Set { target, text } => {
            let scope = scope_of(target);
            classroom
                .dispatch(Command::SetRule {
                    scope: scope.clone(),
                    text,
                })
                .await?;
            println!("✅ Rules saved ({scope:?})");
        }
    }

    Ok(())
}
