//! Student actions: joining a class and chatting with the assistant.

use eduassist_assistant::{ChatReply, PreparedTurn, ledger, quick_info};
use eduassist_core::{
    ActivityEntry, ActivityKind, ChatError, ClassroomError, ConversationKey, ConversationTurn,
    KnowledgeItem, Student,
};
use tracing::{info, warn};

use crate::classroom::Classroom;

impl Classroom {
    /// Join the class with join code `code` as `name`.
    ///
    /// A student is identified by (name, code): joining again with the same
    /// pair returns the existing record and logs nothing.
    pub async fn join_class(&self, name: &str, code: &str) -> Result<Student, ClassroomError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClassroomError::Validation("name".into()));
        }
        let code = code.trim().to_uppercase();

        let mut store = self.data.write().await;
        let class = store
            .class_by_code(&code)
            .cloned()
            .ok_or_else(|| ClassroomError::UnknownClassCode(code.clone()))?;

        if let Some(existing) = store
            .students
            .iter()
            .find(|s| s.name == name && s.class_code == code)
        {
            info!(student_id = %existing.id, class_id = %class.id, "Student rejoined");
            return Ok(existing.clone());
        }

        let now = self.clock.now();
        let student = Student {
            id: self.ids.new_id(),
            name: name.to_string(),
            class_code: code,
            class_id: class.id.clone(),
            class_name: class.name.clone(),
            joined_at: now,
        };
        store.students.push(student.clone());
        ledger::record_activity(
            &mut store,
            ActivityEntry {
                kind: ActivityKind::StudentJoined {
                    student_name: student.name.clone(),
                },
                class_id: class.id,
                timestamp: now,
            },
            self.activity_cap,
        );
        self.persist(&store);

        info!(student_id = %student.id, class_id = %student.class_id, "Student joined");
        Ok(student)
    }

    /// Submit a question and wait for the assistant turn.
    ///
    /// The user turn is appended before the remote call starts. The remote
    /// assistant is asked once; on any failure the fallback matcher answers.
    /// Both turns are then saved together. Only validation problems and a
    /// concurrent submission on the same conversation return an error. If
    /// the class is deleted before the reply arrives, the reply is returned
    /// but not recorded.
    pub async fn send_message(
        &self,
        student_id: &str,
        project_id: Option<&str>,
        question: &str,
    ) -> Result<ChatReply, ChatError> {
        let turn = {
            let store = self.data.read().await;
            PreparedTurn::prepare(&store, student_id, project_id, question)?
        };
        let _guard = self.in_flight.try_acquire(&turn.key)?;

        {
            let mut store = self.data.write().await;
            ledger::append_turn(
                &mut store,
                &turn.key,
                ConversationTurn::user(&turn.question, self.clock.now()),
            );
        }

        let reply = turn
            .respond(self.provider.as_deref(), &self.settings)
            .await;

        let mut store = self.data.write().await;
        // The class may have been deleted while the reply was pending
        if store.student(&turn.key.student_id).is_none()
            || store.class(&turn.key.class_id).is_none()
        {
            warn!(conversation = %turn.key, "Student left during reply, dropping assistant turn");
            return Ok(reply);
        }
        let turns = ledger::append_turn(
            &mut store,
            &turn.key,
            ConversationTurn::assistant(&reply.text, self.clock.now()),
        );
        self.persist(&store);

        info!(conversation = %turn.key, source = %reply.source, turns, "Chat reply recorded");
        Ok(reply)
    }

    /// The stored history of one conversation, oldest first.
    pub async fn history(
        &self,
        student_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<ConversationTurn>, ClassroomError> {
        let store = self.data.read().await;
        let student = store
            .student(student_id)
            .ok_or_else(|| ClassroomError::not_found("Student", student_id))?;
        let key = ConversationKey::new(&student.class_id, &student.id, project_id);
        Ok(store.conversation(&key).to_vec())
    }

    /// Deadline and submission items pinned for a student.
    pub async fn quick_info(
        &self,
        student_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<KnowledgeItem>, ClassroomError> {
        let store = self.data.read().await;
        let student = store
            .student(student_id)
            .ok_or_else(|| ClassroomError::not_found("Student", student_id))?;
        Ok(quick_info(&store.knowledge, &student.class_id, project_id))
    }

    /// Whether a reply is pending on this conversation.
    pub fn is_awaiting_reply(&self, key: &ConversationKey) -> bool {
        self.in_flight.is_busy(key)
    }
}
