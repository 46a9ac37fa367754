//! Context composer — the prompt handed to the remote assistant.
//!
//! The output text is a stable contract: golden tests compare it byte for
//! byte. Blocks appear in fixed order:
//!
//! 1. Role preamble naming the class
//! 2. `GLOBAL RULES` (when set)
//! 3. `CLASS RULES` (when set for the class)
//! 4. `PROJECT RULES` (when a project is given and has a rule)
//! 5. `KNOWLEDGE BASE` with one `Q:`/`A:` pair per candidate
//! 6. The instruction to prefer the knowledge base
//! 7. The student's question
//!
//! Composition is deterministic and never trims its inputs.

use eduassist_core::{KnowledgeItem, RuleSet};
use std::fmt::Write;

const INSTRUCTION: &str = "IMPORTANT: Base your answer primarily on the knowledge base above. If the information isn't available, politely tell the student to ask their teacher.";

pub fn compose(
    class_name: &str,
    rules: &RuleSet,
    class_id: &str,
    project_id: Option<&str>,
    candidates: &[KnowledgeItem],
    question: &str,
) -> String {
    let mut context = format!("You are an AI teaching assistant for \"{class_name}\".\n\n");

    // Rules in order of specificity
    if let Some(global) = rules.global_rule() {
        let _ = write!(context, "GLOBAL RULES:\n{global}\n\n");
    }
    if let Some(class_rule) = rules.class_rule(class_id) {
        let _ = write!(context, "CLASS RULES:\n{class_rule}\n\n");
    }
    if let Some(project_rule) = project_id.and_then(|p| rules.project_rule(p)) {
        let _ = write!(context, "PROJECT RULES:\n{project_rule}\n\n");
    }

    if !candidates.is_empty() {
        context.push_str("KNOWLEDGE BASE:\n");
        for item in candidates {
            let _ = write!(context, "Q: {}\nA: {}\n\n", item.question, item.answer);
        }
    }

    let _ = write!(
        context,
        "{INSTRUCTION}\n\nStudent's Question: {question}\n\nProvide a helpful, friendly response:"
    );
    context
}
