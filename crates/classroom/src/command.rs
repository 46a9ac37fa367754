//! Actions as values.
//!
//! Front ends build a [`Command`] and hand it to [`Classroom::dispatch`]
//! instead of calling methods by name. Destructive commands carry their
//! confirmation explicitly.

use eduassist_assistant::ChatReply;
use eduassist_core::{
    Class, ConversationTurn, Error, KnowledgeItem, Project, Student,
};

use crate::classroom::Classroom;
use crate::teacher::{NewClass, NewKnowledge, NewProject, RuleScope};
use crate::views::{ClassStats, Overview};

#[derive(Debug, Clone)]
pub enum Command {
    CreateClass(NewClass),
    DeleteClass { class_id: String, confirmed: bool },
    CreateProject(NewProject),
    DeleteProject { project_id: String, confirmed: bool },
    AddKnowledge(NewKnowledge),
    EditKnowledge {
        id: String,
        question: Option<String>,
        answer: Option<String>,
    },
    DeleteKnowledge { id: String, confirmed: bool },
    SetRule { scope: RuleScope, text: String },
    JoinClass { name: String, code: String },
    SendMessage {
        student_id: String,
        project_id: Option<String>,
        question: String,
    },
    History {
        student_id: String,
        project_id: Option<String>,
    },
    Stats,
    Overview,
}

impl Command {
    /// Whether the command changes the data tree.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::History { .. } | Self::Stats | Self::Overview)
    }
}

#[derive(Debug, Clone)]
pub enum CommandOutput {
    Class(Class),
    Project(Project),
    Knowledge(KnowledgeItem),
    Student(Student),
    Reply(ChatReply),
    History(Vec<ConversationTurn>),
    Stats(ClassStats),
    Overview(Overview),
    Done,
}

impl Classroom {
    /// Run one command.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutput, Error> {
        let output = match command {
            Command::CreateClass(input) => CommandOutput::Class(self.create_class(input).await?),
            Command::DeleteClass {
                class_id,
                confirmed,
            } => {
                self.delete_class(&class_id, confirmed).await?;
                CommandOutput::Done
            }
            Command::CreateProject(input) => {
                CommandOutput::Project(self.create_project(input).await?)
            }
            Command::DeleteProject {
                project_id,
                confirmed,
            } => {
                self.delete_project(&project_id, confirmed).await?;
                CommandOutput::Done
            }
            Command::AddKnowledge(input) => {
                CommandOutput::Knowledge(self.add_knowledge(input).await?)
            }
            Command::EditKnowledge {
                id,
                question,
                answer,
            } => CommandOutput::Knowledge(
                self.edit_knowledge(&id, question.as_deref(), answer.as_deref())
                    .await?,
            ),
            Command::DeleteKnowledge { id, confirmed } => {
                self.delete_knowledge(&id, confirmed).await?;
                CommandOutput::Done
            }
            Command::SetRule { scope, text } => {
                self.set_rule(scope, &text).await?;
                CommandOutput::Done
            }
            Command::JoinClass { name, code } => {
                CommandOutput::Student(self.join_class(&name, &code).await?)
            }
            Command::SendMessage {
                student_id,
                project_id,
                question,
            } => CommandOutput::Reply(
                self.send_message(&student_id, project_id.as_deref(), &question)
                    .await?,
            ),
            Command::History {
                student_id,
                project_id,
            } => CommandOutput::History(self.history(&student_id, project_id.as_deref()).await?),
            Command::Stats => CommandOutput::Stats(self.stats().await),
            Command::Overview => CommandOutput::Overview(self.overview().await),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SequentialIds, fixed_clock};
    use eduassist_assistant::GENERIC_DEFLECTION;
    use eduassist_core::{ChatError, ClassroomError};
    use eduassist_store::InMemoryStore;
    use std::sync::Arc;

    fn classroom() -> Classroom {
        Classroom::builder(Arc::new(InMemoryStore::new()))
            .with_clock(fixed_clock())
            .with_ids(Arc::new(SequentialIds::default()))
            .open()
            .unwrap()
    }

    #[tokio::test]
    async fn commands_drive_a_full_session() {
        let classroom = classroom();

        let CommandOutput::Class(class) = classroom
            .dispatch(Command::CreateClass(NewClass {
                name: "Chemistry".into(),
                subject: "Science".into(),
                ..NewClass::default()
            }))
            .await
            .unwrap()
        else {
            panic!("expected a class");
        };

        let CommandOutput::Student(student) = classroom
            .dispatch(Command::JoinClass {
                name: "Grace".into(),
                code: class.code.clone(),
            })
            .await
            .unwrap()
        else {
            panic!("expected a student");
        };

        let CommandOutput::Reply(reply) = classroom
            .dispatch(Command::SendMessage {
                student_id: student.id.clone(),
                project_id: None,
                question: "What's the homework?".into(),
            })
            .await
            .unwrap()
        else {
            panic!("expected a reply");
        };
        assert_eq!(reply.text, GENERIC_DEFLECTION);

        let CommandOutput::History(turns) = classroom
            .dispatch(Command::History {
                student_id: student.id,
                project_id: None,
            })
            .await
            .unwrap()
        else {
            panic!("expected history");
        };
        assert_eq!(turns.len(), 2);
    }

    #[tokio::test]
    async fn errors_keep_their_context() {
        let classroom = classroom();

        let err = classroom
            .dispatch(Command::DeleteClass {
                class_id: "ghost".into(),
                confirmed: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Classroom(ClassroomError::NotFound { kind: "Class", .. })
        ));
        assert_eq!(err.to_string(), "Class not found: ghost");

        let err = classroom
            .dispatch(Command::SendMessage {
                student_id: "ghost".into(),
                project_id: None,
                question: "  ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Chat(ChatError::EmptyQuestion)));
    }

    #[test]
    fn read_only_commands_are_not_mutating() {
        assert!(!Command::Overview.is_mutating());
        assert!(!Command::Stats.is_mutating());
        assert!(
            Command::SetRule {
                scope: RuleScope::Global,
                text: String::new()
            }
            .is_mutating()
        );
    }
}
