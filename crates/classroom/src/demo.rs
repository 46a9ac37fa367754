//! The demo class seeded into an empty data tree.

use chrono::NaiveDate;
use eduassist_core::{Class, Clock, DataStore, IdSource, KnowledgeItem, Project};

/// Join code of the demo class.
pub const DEMO_CLASS_CODE: &str = "DEMO42";

/// Add the AP Biology demo class, its research paper project, three
/// knowledge items and a full set of rules.
pub fn seed(store: &mut DataStore, clock: &dyn Clock, ids: &dyn IdSource) {
    let now = clock.now();

    let class = Class {
        id: ids.new_id(),
        name: "AP Biology".into(),
        subject: "Biology".into(),
        grade: "11th Grade".into(),
        description:
            "Advanced Placement Biology course covering molecular biology, genetics, and ecology"
                .into(),
        code: DEMO_CLASS_CODE.into(),
        created_at: now,
    };

    let project = Project {
        id: ids.new_id(),
        class_id: class.id.clone(),
        name: "Cell Structure Research Paper".into(),
        due_date: NaiveDate::from_ymd_opt(2026, 3, 15),
        description: "Research paper on eukaryotic cell structures and organelle functions"
            .into(),
        created_at: now,
    };

    let item = |project_id: Option<&str>, question: &str, answer: &str, tags: &[&str]| {
        KnowledgeItem {
            id: ids.new_id(),
            class_id: class.id.clone(),
            project_id: project_id.map(String::from),
            question: question.into(),
            answer: answer.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: now,
        }
    };

    store.knowledge.extend([
        item(
            Some(&project.id),
            "When is the research paper due?",
            "The cell structure research paper is due on March 15, 2026 at 11:59 PM. Submit via Google Classroom.",
            &["deadline", "assignment"],
        ),
        item(
            None,
            "What are the office hours?",
            "Office hours are Monday and Wednesday 3:00-4:00 PM in Room 201. You can also schedule appointments via email.",
            &["office hours", "help"],
        ),
        item(
            Some(&project.id),
            "How long should the research paper be?",
            "The research paper should be 5-7 pages, double-spaced, using APA format with at least 5 scholarly sources.",
            &["requirements", "assignment"],
        ),
    ]);

    store.rules.global = "Always be encouraging and supportive. Guide students to think critically rather than giving direct answers. If a student seems frustrated, remind them help is available during office hours.".into();
    store.rules.classes.insert(
        class.id.clone(),
        "Focus on helping students understand biological concepts deeply. Encourage them to make connections between different topics. Reference the textbook chapters when appropriate.".into(),
    );
    store.rules.projects.insert(
        project.id.clone(),
        "For the research paper, guide students on research methodology and source evaluation. Don't write content for them, but help them organize their thoughts and understand the grading rubric.".into(),
    );

    store.classes.push(class);
    store.projects.push(project);
}
