//! Fallback matcher — the local answer when the remote assistant fails.
//!
//! A candidate is accepted when at least two of its question's whitespace
//! tokens appear in the student's question, or when its whole question does.
//! The first accepted candidate wins; there is no ranking by overlap.

use eduassist_core::KnowledgeItem;

/// Reply when nothing matched and the student asked about a deadline.
pub const DUE_DATE_DEFLECTION: &str = "I don't have specific information about due dates for this. Please check with your teacher or look for announcements in class materials.";

/// Reply when nothing matched and the student asked how to hand work in.
pub const SUBMISSION_DEFLECTION: &str = "I don't have submission instructions in my knowledge base. Please ask your teacher for the specific submission process.";

/// Reply when nothing matched at all.
pub const GENERIC_DEFLECTION: &str = "I don't have information about that in my knowledge base. Please ask your teacher for help with this question!";

const MIN_TOKEN_OVERLAP: usize = 2;

/// The first candidate whose question matches `question`, if any.
pub fn find_match<'a>(question: &str, candidates: &'a [KnowledgeItem]) -> Option<&'a KnowledgeItem> {
    let input = question.to_lowercase();
    candidates.iter().find(|item| {
        // A blank question would be contained in every input
        if item.question.trim().is_empty() {
            return false;
        }
        let stored = item.question.to_lowercase();
        let overlap = stored
            .split_whitespace()
            .filter(|token| input.contains(token))
            .count();
        overlap >= MIN_TOKEN_OVERLAP || input.contains(&stored)
    })
}

/// Answer `question` from `candidates` without the remote assistant.
///
/// Returns the matched answer verbatim, or one of the canned deflections.
pub fn fallback_reply(question: &str, candidates: &[KnowledgeItem]) -> String {
    if let Some(item) = find_match(question, candidates) {
        return item.answer.clone();
    }

    let input = question.to_lowercase();
    if input.contains("due") || input.contains("deadline") {
        DUE_DATE_DEFLECTION.to_string()
    } else if input.contains("submit") || input.contains("turn in") {
        SUBMISSION_DEFLECTION.to_string()
    } else {
        GENERIC_DEFLECTION.to_string()
    }
}
