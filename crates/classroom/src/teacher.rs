//! Teacher actions: classes, projects, knowledge and rules.
//!
//! Each action validates first and mutates only when validation passes.
//! Destructive actions take an explicit `confirmed` flag and refuse to run
//! without it.

use chrono::NaiveDate;
use eduassist_assistant::ledger;
use eduassist_core::knowledge::parse_tags;
use eduassist_core::{
    ActivityEntry, ActivityKind, Class, ClassroomError, KnowledgeItem, Project, Student,
};
use tracing::info;

use crate::classroom::Classroom;

/// Input for [`Classroom::create_class`]. Name and subject are required.
#[derive(Debug, Clone, Default)]
pub struct NewClass {
    pub name: String,
    pub subject: String,
    pub grade: String,
    pub description: String,
}

/// Input for [`Classroom::create_project`]. Class and name are required.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub class_id: String,
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

/// Input for [`Classroom::add_knowledge`]. Class, question and answer are
/// required. `tags` is the raw comma-separated list.
#[derive(Debug, Clone, Default)]
pub struct NewKnowledge {
    pub class_id: String,
    pub project_id: Option<String>,
    pub question: String,
    pub answer: String,
    pub tags: String,
}

/// Which rule a [`Classroom::set_rule`] call replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleScope {
    Global,
    Class(String),
    Project(String),
}

fn required(fields: &[(&str, &str)]) -> Result<(), ClassroomError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ClassroomError::Validation(missing.join(", ")))
    }
}

fn confirm(confirmed: bool, action: String) -> Result<(), ClassroomError> {
    if confirmed {
        Ok(())
    } else {
        Err(ClassroomError::ConfirmationRequired { action })
    }
}

impl Classroom {
    // ── Classes ──────────────────────────────────────────────────────────

    pub async fn create_class(&self, input: NewClass) -> Result<Class, ClassroomError> {
        required(&[("name", input.name.as_str()), ("subject", input.subject.as_str())])?;

        let mut store = self.data.write().await;
        let class = Class {
            id: self.ids.new_id(),
            name: input.name.trim().to_string(),
            subject: input.subject.trim().to_string(),
            grade: input.grade.trim().to_string(),
            description: input.description.trim().to_string(),
            code: self.unique_class_code(&store),
            created_at: self.clock.now(),
        };
        store.classes.push(class.clone());
        self.persist(&store);

        info!(class_id = %class.id, code = %class.code, "Class created");
        Ok(class)
    }

    /// Delete a class with its projects, knowledge, students, rules and
    /// conversations.
    pub async fn delete_class(&self, class_id: &str, confirmed: bool) -> Result<(), ClassroomError> {
        let mut store = self.data.write().await;
        let class = store
            .class(class_id)
            .ok_or_else(|| ClassroomError::not_found("Class", class_id))?;
        confirm(confirmed, format!("delete class \"{}\"", class.name))?;

        let project_ids: Vec<String> = store.projects_in(class_id).map(|p| p.id.clone()).collect();

        store.classes.retain(|c| c.id != class_id);
        store.projects.retain(|p| p.class_id != class_id);
        store.knowledge.retain(|k| k.class_id != class_id);
        store.students.retain(|s| s.class_id != class_id);
        store.rules.classes.remove(class_id);
        for project_id in &project_ids {
            store.rules.projects.remove(project_id);
        }
        store.conversations.retain(|key, _| key.class_id != class_id);
        self.persist(&store);

        info!(class_id, projects = project_ids.len(), "Class deleted");
        Ok(())
    }

    pub async fn list_classes(&self) -> Vec<Class> {
        self.data.read().await.classes.clone()
    }

    // ── Projects ─────────────────────────────────────────────────────────

    pub async fn create_project(&self, input: NewProject) -> Result<Project, ClassroomError> {
        required(&[("class", input.class_id.as_str()), ("name", input.name.as_str())])?;

        let mut store = self.data.write().await;
        if store.class(&input.class_id).is_none() {
            return Err(ClassroomError::not_found("Class", input.class_id));
        }

        let now = self.clock.now();
        let project = Project {
            id: self.ids.new_id(),
            class_id: input.class_id,
            name: input.name.trim().to_string(),
            due_date: input.due_date,
            description: input.description.trim().to_string(),
            created_at: now,
        };
        store.projects.push(project.clone());
        ledger::record_activity(
            &mut store,
            ActivityEntry {
                kind: ActivityKind::ProjectCreated {
                    project_name: project.name.clone(),
                },
                class_id: project.class_id.clone(),
                timestamp: now,
            },
            self.activity_cap,
        );
        self.persist(&store);

        info!(project_id = %project.id, class_id = %project.class_id, "Project created");
        Ok(project)
    }

    /// Delete a project. Its knowledge items stay with the class but lose
    /// their project linkage.
    pub async fn delete_project(
        &self,
        project_id: &str,
        confirmed: bool,
    ) -> Result<(), ClassroomError> {
        let mut store = self.data.write().await;
        let project = store
            .project(project_id)
            .ok_or_else(|| ClassroomError::not_found("Project", project_id))?;
        confirm(confirmed, format!("delete project \"{}\"", project.name))?;

        let mut unlinked = 0;
        for item in store.knowledge.iter_mut().filter(|k| k.in_project(project_id)) {
            item.project_id = None;
            unlinked += 1;
        }
        store.projects.retain(|p| p.id != project_id);
        store.rules.projects.remove(project_id);
        self.persist(&store);

        info!(project_id, unlinked, "Project deleted");
        Ok(())
    }

    /// Projects, optionally restricted to one class.
    pub async fn list_projects(&self, class_id: Option<&str>) -> Vec<Project> {
        let store = self.data.read().await;
        store
            .projects
            .iter()
            .filter(|p| class_id.is_none_or(|c| p.class_id == c))
            .cloned()
            .collect()
    }

    // ── Knowledge ────────────────────────────────────────────────────────

    pub async fn add_knowledge(&self, input: NewKnowledge) -> Result<KnowledgeItem, ClassroomError> {
        required(&[
            ("class", input.class_id.as_str()),
            ("question", input.question.as_str()),
            ("answer", input.answer.as_str()),
        ])?;

        let mut store = self.data.write().await;
        if store.class(&input.class_id).is_none() {
            return Err(ClassroomError::not_found("Class", input.class_id));
        }
        let project_id = input.project_id.filter(|p| !p.is_empty());
        if let Some(project_id) = &project_id {
            match store.project(project_id) {
                Some(p) if p.class_id == input.class_id => {}
                _ => return Err(ClassroomError::not_found("Project", project_id.as_str())),
            }
        }

        let now = self.clock.now();
        let item = KnowledgeItem {
            id: self.ids.new_id(),
            class_id: input.class_id,
            project_id,
            question: input.question.trim().to_string(),
            answer: input.answer.trim().to_string(),
            tags: parse_tags(&input.tags),
            created_at: now,
        };
        store.knowledge.push(item.clone());
        ledger::record_activity(
            &mut store,
            ActivityEntry {
                kind: ActivityKind::KnowledgeAdded,
                class_id: item.class_id.clone(),
                timestamp: now,
            },
            self.activity_cap,
        );
        self.persist(&store);

        info!(knowledge_id = %item.id, class_id = %item.class_id, "Knowledge added");
        Ok(item)
    }

    /// Replace the question and/or answer of an item in place. `None` keeps
    /// the current value.
    pub async fn edit_knowledge(
        &self,
        id: &str,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> Result<KnowledgeItem, ClassroomError> {
        let mut store = self.data.write().await;
        let current = store
            .knowledge_item(id)
            .ok_or_else(|| ClassroomError::not_found("Knowledge item", id))?;

        let question = question.unwrap_or(current.question.as_str()).trim().to_string();
        let answer = answer.unwrap_or(current.answer.as_str()).trim().to_string();
        required(&[("question", question.as_str()), ("answer", answer.as_str())])?;

        let edited = {
            let item = store
                .knowledge_item_mut(id)
                .ok_or_else(|| ClassroomError::not_found("Knowledge item", id))?;
            item.question = question;
            item.answer = answer;
            item.clone()
        };
        self.persist(&store);

        info!(knowledge_id = id, "Knowledge updated");
        Ok(edited)
    }

    pub async fn delete_knowledge(&self, id: &str, confirmed: bool) -> Result<(), ClassroomError> {
        let mut store = self.data.write().await;
        if store.knowledge_item(id).is_none() {
            return Err(ClassroomError::not_found("Knowledge item", id));
        }
        confirm(confirmed, "delete this knowledge item".to_string())?;

        store.knowledge.retain(|k| k.id != id);
        self.persist(&store);

        info!(knowledge_id = id, "Knowledge deleted");
        Ok(())
    }

    /// The teacher catalog: optional class and project, optional search.
    pub async fn knowledge_catalog(
        &self,
        class_id: Option<&str>,
        project_id: Option<&str>,
        query: Option<&str>,
    ) -> Vec<KnowledgeItem> {
        let store = self.data.read().await;
        eduassist_assistant::catalog(&store.knowledge, class_id, project_id, query)
    }

    // ── Rules ────────────────────────────────────────────────────────────

    /// Replace one rule. An empty text clears the override.
    pub async fn set_rule(&self, scope: RuleScope, text: &str) -> Result<(), ClassroomError> {
        let mut store = self.data.write().await;
        match &scope {
            RuleScope::Global => store.rules.global = text.to_string(),
            RuleScope::Class(class_id) => {
                if store.class(class_id).is_none() {
                    return Err(ClassroomError::not_found("Class", class_id.as_str()));
                }
                store.rules.classes.insert(class_id.clone(), text.to_string());
            }
            RuleScope::Project(project_id) => {
                if store.project(project_id).is_none() {
                    return Err(ClassroomError::not_found("Project", project_id.as_str()));
                }
                store
                    .rules
                    .projects
                    .insert(project_id.clone(), text.to_string());
            }
        }
        self.persist(&store);

        info!(scope = ?scope, "Rules saved");
        Ok(())
    }

    /// The stored rule text for `scope`, empty when unset.
    pub async fn rule(&self, scope: &RuleScope) -> String {
        let store = self.data.read().await;
        let text = match scope {
            RuleScope::Global => store.rules.global_rule(),
            RuleScope::Class(id) => store.rules.class_rule(id),
            RuleScope::Project(id) => store.rules.project_rule(id),
        };
        text.unwrap_or_default().to_string()
    }

    // ── Students ─────────────────────────────────────────────────────────

    /// Students, optionally restricted to one class.
    pub async fn list_students(&self, class_id: Option<&str>) -> Vec<Student> {
        let store = self.data.read().await;
        store
            .students
            .iter()
            .filter(|s| class_id.is_none_or(|c| s.class_id == c))
            .cloned()
            .collect()
    }
}
