//! Read-only views for dashboards: totals, overview feed, per-class and
//! per-project summaries, and relative timestamps.

use chrono::{DateTime, Utc};
use eduassist_assistant::ledger;
use eduassist_core::{Class, DataStore, Project};

use crate::classroom::Classroom;

const RECENT_CLASSES: usize = 3;
const RECENT_ACTIVITY: usize = 5;

/// Totals across the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassStats {
    pub classes: usize,
    pub projects: usize,
    pub knowledge: usize,
    pub students: usize,
}

impl ClassStats {
    pub fn of(store: &DataStore) -> Self {
        Self {
            classes: store.classes.len(),
            projects: store.projects.len(),
            knowledge: store.knowledge.len(),
            students: store.students.len(),
        }
    }
}

/// A class with its member counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub class: Class,
    pub students: usize,
    pub projects: usize,
    pub knowledge: usize,
}

impl ClassSummary {
    fn of(store: &DataStore, class: &Class) -> Self {
        Self {
            class: class.clone(),
            students: store.students_in(&class.id).count(),
            projects: store.projects_in(&class.id).count(),
            knowledge: store
                .knowledge
                .iter()
                .filter(|k| k.class_id == class.id)
                .count(),
        }
    }
}

/// A project with its owning class name and linked knowledge count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub project: Project,
    /// `None` when the owning class no longer exists
    pub class_name: Option<String>,
    pub knowledge: usize,
}

/// One line of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLine {
    pub text: String,
    pub when: String,
}

/// The teacher's landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub stats: ClassStats,
    /// Last three classes created, newest first
    pub recent_classes: Vec<ClassSummary>,
    /// Last five activity entries, newest first
    pub recent_activity: Vec<ActivityLine>,
}

/// Format `at` relative to `now`: "Just now", "N min ago", "N hours ago",
/// or the calendar date for anything a day or older.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if elapsed.num_seconds() < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

impl Classroom {
    pub async fn stats(&self) -> ClassStats {
        ClassStats::of(&*self.data.read().await)
    }

    pub async fn overview(&self) -> Overview {
        let store = self.data.read().await;
        let now = self.clock.now();

        let recent_classes = store
            .classes
            .iter()
            .rev()
            .take(RECENT_CLASSES)
            .map(|c| ClassSummary::of(&store, c))
            .collect();

        let recent_activity = ledger::recent_activity(&store, RECENT_ACTIVITY)
            .into_iter()
            .map(|entry| ActivityLine {
                text: entry.describe(),
                when: format_relative(entry.timestamp, now),
            })
            .collect();

        Overview {
            stats: ClassStats::of(&store),
            recent_classes,
            recent_activity,
        }
    }

    /// Every class with its counts, in creation order.
    pub async fn class_summaries(&self) -> Vec<ClassSummary> {
        let store = self.data.read().await;
        store
            .classes
            .iter()
            .map(|c| ClassSummary::of(&store, c))
            .collect()
    }

    /// Projects with class names and knowledge counts, optionally for one class.
    pub async fn project_summaries(&self, class_id: Option<&str>) -> Vec<ProjectSummary> {
        let store = self.data.read().await;
        store
            .projects
            .iter()
            .filter(|p| class_id.is_none_or(|c| p.class_id == c))
            .map(|p| ProjectSummary {
                project: p.clone(),
                class_name: store.class(&p.class_id).map(|c| c.name.clone()),
                knowledge: store.knowledge.iter().filter(|k| k.in_project(&p.id)).count(),
            })
            .collect()
    }

    /// Current time from the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teacher::{NewClass, NewKnowledge};
    use crate::test_helpers::{SequentialIds, fixed_clock};
    use chrono::{Duration, TimeZone};
    use eduassist_store::InMemoryStore;
    use std::sync::Arc;

    #[test]
    fn relative_formatting_thresholds() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now - Duration::seconds(59), now), "Just now");
        assert_eq!(format_relative(now - Duration::seconds(60), now), "1 min ago");
        assert_eq!(format_relative(now - Duration::minutes(59), now), "59 min ago");
        assert_eq!(format_relative(now - Duration::minutes(60), now), "1 hours ago");
        assert_eq!(format_relative(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(format_relative(now - Duration::hours(24), now), "2026-02-28");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now + Duration::minutes(5), now), "Just now");
    }

    #[tokio::test]
    async fn overview_lists_newest_first() {
        let clock = fixed_clock();
        let classroom = Classroom::builder(Arc::new(InMemoryStore::new()))
            .with_clock(clock.clone())
            .with_ids(Arc::new(SequentialIds::default()))
            .open()
            .unwrap();

        let mut classes = Vec::new();
        for name in ["One", "Two", "Three", "Four"] {
            classes.push(
                classroom
                    .create_class(NewClass {
                        name: name.into(),
                        subject: "Science".into(),
                        ..NewClass::default()
                    })
                    .await
                    .unwrap(),
            );
        }
        classroom.join_class("Ada", &classes[3].code).await.unwrap();
        clock.advance(Duration::minutes(5));
        classroom
            .add_knowledge(NewKnowledge {
                class_id: classes[3].id.clone(),
                question: "q".into(),
                answer: "a".into(),
                ..NewKnowledge::default()
            })
            .await
            .unwrap();
        clock.advance(Duration::minutes(10));

        let overview = classroom.overview().await;
        assert_eq!(
            overview.stats,
            ClassStats {
                classes: 4,
                projects: 0,
                knowledge: 1,
                students: 1
            }
        );
        let names: Vec<_> = overview
            .recent_classes
            .iter()
            .map(|s| s.class.name.as_str())
            .collect();
        assert_eq!(names, vec!["Four", "Three", "Two"]);
        assert_eq!(overview.recent_classes[0].students, 1);

        assert_eq!(
            overview.recent_activity,
            vec![
                ActivityLine {
                    text: "New knowledge item added".into(),
                    when: "10 min ago".into(),
                },
                ActivityLine {
                    text: "Ada joined the class".into(),
                    when: "15 min ago".into(),
                },
            ]
        );
    }
}
