//! Knowledge filter — which items are visible where.
//!
//! Two call sites need different project semantics and must stay distinct:
//!
//! - [`FilterMode::Contextual`] feeds the assistant. Inside a project the
//!   student also sees class-wide items (no project).
//! - [`FilterMode::Scoped`] feeds catalog browsing. Inside a project only
//!   that project's items are listed.
//!
//! All functions preserve insertion order and return a subset of the input.

use eduassist_core::KnowledgeItem;

/// How a project restricts the visible knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Exact project match.
    Scoped,
    /// Project match, or no project at all.
    Contextual,
}

/// Most items shown in the quick info panel.
const QUICK_INFO_LIMIT: usize = 5;

/// Select the items of `class_id`, optionally narrowed by project and query.
///
/// An empty query is ignored.
pub fn filter(
    knowledge: &[KnowledgeItem],
    class_id: &str,
    project_id: Option<&str>,
    query: Option<&str>,
    mode: FilterMode,
) -> Vec<KnowledgeItem> {
    let query = normalized_query(query);
    knowledge
        .iter()
        .filter(|k| k.class_id == class_id)
        .filter(|k| project_visible(k, project_id, mode))
        .filter(|k| query.as_deref().is_none_or(|q| matches_query(k, q)))
        .cloned()
        .collect()
}

/// The teacher catalog. Unlike [`filter`], the class restriction is optional
/// so the catalog can list every class at once. Projects match strictly.
pub fn catalog(
    knowledge: &[KnowledgeItem],
    class_id: Option<&str>,
    project_id: Option<&str>,
    query: Option<&str>,
) -> Vec<KnowledgeItem> {
    let query = normalized_query(query);
    knowledge
        .iter()
        .filter(|k| class_id.is_none_or(|c| k.class_id == c))
        .filter(|k| project_visible(k, project_id, FilterMode::Scoped))
        .filter(|k| query.as_deref().is_none_or(|q| matches_query(k, q)))
        .cloned()
        .collect()
}

/// Items worth pinning for a student: deadlines and submission details.
///
/// Scoped filter, then questions mentioning `due`, `deadline` or `submit`,
/// first five.
pub fn quick_info(
    knowledge: &[KnowledgeItem],
    class_id: &str,
    project_id: Option<&str>,
) -> Vec<KnowledgeItem> {
    filter(knowledge, class_id, project_id, None, FilterMode::Scoped)
        .into_iter()
        .filter(|k| {
            let q = k.question.to_lowercase();
            q.contains("due") || q.contains("deadline") || q.contains("submit")
        })
        .take(QUICK_INFO_LIMIT)
        .collect()
}

fn project_visible(item: &KnowledgeItem, project_id: Option<&str>, mode: FilterMode) -> bool {
    let Some(project_id) = project_id else {
        return true;
    };
    match mode {
        FilterMode::Scoped => item.in_project(project_id),
        FilterMode::Contextual => item.in_project(project_id) || item.is_class_wide(),
    }
}

fn normalized_query(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_lowercase)
}

/// `needle` must already be lower-cased.
fn matches_query(item: &KnowledgeItem, needle: &str) -> bool {
    item.question.to_lowercase().contains(needle)
        || item.answer.to_lowercase().contains(needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
