//! One chat submission: send guard, remote call, local fallback.
//!
//! A submission moves `Idle → AwaitingResponse → {Responded | Failed}` and
//! back to `Idle`. The remote provider is asked exactly once. Any failure
//! (transport error, timeout, a payload without text, or no provider at all)
//! lands in `Failed`, where the fallback matcher answers from the same
//! candidates that were composed into the prompt. The student always gets a
//! reply.
//!
//! While a submission is awaiting its reply the conversation is held by a
//! [`SendGuard`]; a second submission on the same conversation is rejected
//! with [`ChatError::Busy`] until the guard drops.

use eduassist_config::AssistantConfig;
use eduassist_core::{
    AssistantRequest, ChatError, ClassroomError, ConversationKey, DataStore, KnowledgeItem,
    Provider,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::composer::compose;
use crate::filter::{FilterMode, filter};
use crate::matcher::fallback_reply;

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    AwaitingResponse,
    Responded,
    Failed,
}

/// Which path produced the assistant turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

impl ReplySource {
    /// The terminal state that produced a reply from this source.
    pub fn state(self) -> SubmissionState {
        match self {
            Self::Remote => SubmissionState::Responded,
            Self::Fallback => SubmissionState::Failed,
        }
    }
}

impl std::fmt::Display for ReplySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The assistant turn of a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

/// Model settings for the remote request.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl ChatSettings {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from_config(&AssistantConfig::default())
    }
}

/// Everything a submission needs once the data tree lock is released.
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    pub key: ConversationKey,
    /// The trimmed question
    pub question: String,
    /// Contextual knowledge, shared by the prompt and the fallback matcher
    pub candidates: Vec<KnowledgeItem>,
    /// The composed prompt
    pub context: String,
}

impl PreparedTurn {
    /// Validate a submission against the tree and compose its prompt.
    ///
    /// Nothing is mutated; the caller appends the user turn afterwards.
    pub fn prepare(
        store: &DataStore,
        student_id: &str,
        project_id: Option<&str>,
        question: &str,
    ) -> Result<Self, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let student = store
            .student(student_id)
            .ok_or_else(|| ClassroomError::not_found("Student", student_id))?;

        if let Some(project_id) = project_id {
            match store.project(project_id) {
                Some(p) if p.class_id == student.class_id => {}
                _ => return Err(ClassroomError::not_found("Project", project_id).into()),
            }
        }

        let candidates = filter(
            &store.knowledge,
            &student.class_id,
            project_id,
            None,
            FilterMode::Contextual,
        );
        let context = compose(
            &student.class_name,
            &store.rules,
            &student.class_id,
            project_id,
            &candidates,
            question,
        );

        Ok(Self {
            key: ConversationKey::new(&student.class_id, &student.id, project_id),
            question: question.to_string(),
            candidates,
            context,
        })
    }

    /// Ask the provider once; answer locally on any failure.
    ///
    /// Only an empty reply counts as missing text. Whitespace is shown as is.
    pub async fn respond(
        &self,
        provider: Option<&dyn Provider>,
        settings: &ChatSettings,
    ) -> ChatReply {
        let Some(provider) = provider else {
            debug!(conversation = %self.key, "No provider configured, answering locally");
            return self.fallback();
        };

        debug!(
            conversation = %self.key,
            provider = provider.name(),
            state = ?SubmissionState::AwaitingResponse,
            candidates = self.candidates.len(),
            "Asking remote assistant"
        );

        let request = AssistantRequest::single(
            settings.model.clone(),
            settings.max_tokens,
            self.context.clone(),
        );

        match provider.complete(request).await {
            Ok(response) if !response.text.is_empty() => {
                info!(
                    conversation = %self.key,
                    model = %response.model,
                    state = ?SubmissionState::Responded,
                    "Remote assistant replied"
                );
                ChatReply {
                    text: response.text,
                    source: ReplySource::Remote,
                }
            }
            Ok(_) => {
                warn!(conversation = %self.key, "Remote reply had no text, using fallback");
                self.fallback()
            }
            Err(e) => {
                warn!(conversation = %self.key, error = %e, "Remote assistant failed, using fallback");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> ChatReply {
        ChatReply {
            text: fallback_reply(&self.question, &self.candidates),
            source: ReplySource::Fallback,
        }
    }
}

/// Conversations that currently have a submission awaiting its reply.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<ConversationKey>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for one submission.
    pub fn try_acquire(&self, key: &ConversationKey) -> Result<SendGuard, ChatError> {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if !keys.insert(key.clone()) {
            return Err(ChatError::Busy(key.to_string()));
        }
        Ok(SendGuard {
            keys: Arc::clone(&self.keys),
            key: key.clone(),
        })
    }

    pub fn is_busy(&self, key: &ConversationKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }
}

/// Holds a conversation for the duration of one submission.
/// Released on drop, whatever the outcome.
#[derive(Debug)]
pub struct SendGuard {
    keys: Arc<Mutex<HashSet<ConversationKey>>>,
    key: ConversationKey,
}

impl SendGuard {
    pub fn key(&self) -> &ConversationKey {
        &self.key
    }
}

impl Drop for SendGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{GENERIC_DEFLECTION, SUBMISSION_DEFLECTION};
    use async_trait::async_trait;
    use chrono::Utc;
    use eduassist_core::{Class, Project, ProviderError, ProviderResponse, Student};

    /// Replies with fixed text and records every prompt it receives.
    struct ScriptedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: AssistantRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            self.prompts
                .lock()
                .unwrap()
                .push(request.prompt().unwrap_or_default().to_string());
            Ok(ProviderResponse {
                text: self.reply.clone(),
                model: request.model,
                usage: None,
            })
        }
    }

    /// Always fails, counting attempts.
    struct FailingProvider {
        call_count: Mutex<usize>,
    }

    #[async_trait]
    impl Provider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(
            &self,
            _request: AssistantRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            *self.call_count.lock().unwrap() += 1;
            Err(ProviderError::Network("connection refused".into()))
        }
    }

    fn store() -> DataStore {
        let now = Utc::now();
        let mut store = DataStore::new();
        store.classes.push(Class {
            id: "c1".into(),
            name: "AP Biology".into(),
            subject: "Biology".into(),
            grade: String::new(),
            description: String::new(),
            code: "DEMO42".into(),
            created_at: now,
        });
        store.projects.push(Project {
            id: "p1".into(),
            class_id: "c1".into(),
            name: "Paper".into(),
            due_date: None,
            description: String::new(),
            created_at: now,
        });
        store.students.push(Student {
            id: "s1".into(),
            name: "Ada".into(),
            class_code: "DEMO42".into(),
            class_id: "c1".into(),
            class_name: "AP Biology".into(),
            joined_at: now,
        });
        store.knowledge.push(KnowledgeItem {
            id: "k1".into(),
            class_id: "c1".into(),
            project_id: Some("p1".into()),
            question: "How do I submit the paper?".into(),
            answer: "Upload it to Google Classroom.".into(),
            tags: vec![],
            created_at: now,
        });
        store.knowledge.push(KnowledgeItem {
            id: "k2".into(),
            class_id: "c1".into(),
            project_id: None,
            question: "What are the office hours?".into(),
            answer: "Monday 3-4 PM.".into(),
            tags: vec![],
            created_at: now,
        });
        store
    }

    #[test]
    fn prepare_rejects_blank_question() {
        let err = PreparedTurn::prepare(&store(), "s1", None, "   \n").unwrap_err();
        assert_eq!(err, ChatError::EmptyQuestion);
    }

    #[test]
    fn prepare_rejects_unknown_student_and_project() {
        let s = store();
        assert!(matches!(
            PreparedTurn::prepare(&s, "nobody", None, "hi"),
            Err(ChatError::Lookup(ClassroomError::NotFound { kind: "Student", .. }))
        ));
        assert!(matches!(
            PreparedTurn::prepare(&s, "s1", Some("p9"), "hi"),
            Err(ChatError::Lookup(ClassroomError::NotFound { kind: "Project", .. }))
        ));
    }

    #[test]
    fn prepare_uses_contextual_candidates() {
        let turn = PreparedTurn::prepare(&store(), "s1", Some("p1"), "  hello  ").unwrap();
        assert_eq!(turn.question, "hello");
        assert_eq!(turn.candidates.len(), 2);
        assert_eq!(turn.key, ConversationKey::new("c1", "s1", Some("p1")));
        assert!(turn.context.contains("Q: How do I submit the paper?"));
        assert!(turn.context.ends_with("Student's Question: hello\n\nProvide a helpful, friendly response:"));

        // Outside the project only class-wide items are visible
        let general = PreparedTurn::prepare(&store(), "s1", None, "hello").unwrap();
        assert_eq!(general.candidates.len(), 1);
    }

    #[tokio::test]
    async fn remote_reply_is_used() {
        let provider = ScriptedProvider::new("Great question!");
        let turn = PreparedTurn::prepare(&store(), "s1", None, "hi").unwrap();

        let reply = turn.respond(Some(&provider), &ChatSettings::default()).await;
        assert_eq!(reply.text, "Great question!");
        assert_eq!(reply.source, ReplySource::Remote);
        assert_eq!(reply.source.state(), SubmissionState::Responded);
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.prompts.lock().unwrap()[0], turn.context);
    }

    #[tokio::test]
    async fn failure_falls_back_without_retry() {
        let provider = FailingProvider {
            call_count: Mutex::new(0),
        };
        let turn =
            PreparedTurn::prepare(&store(), "s1", Some("p1"), "how do i submit the paper?").unwrap();

        let reply = turn.respond(Some(&provider), &ChatSettings::default()).await;
        assert_eq!(reply.text, "Upload it to Google Classroom.");
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(*provider.call_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_remote_text_falls_back() {
        let provider = ScriptedProvider::new("");
        let turn = PreparedTurn::prepare(&store(), "s1", None, "Where do I submit?").unwrap();

        let reply = turn.respond(Some(&provider), &ChatSettings::default()).await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.text, SUBMISSION_DEFLECTION);
    }

    #[tokio::test]
    async fn whitespace_remote_text_is_kept() {
        let provider = ScriptedProvider::new("   ");
        let turn = PreparedTurn::prepare(&store(), "s1", None, "Where do I submit?").unwrap();

        let reply = turn.respond(Some(&provider), &ChatSettings::default()).await;
        assert_eq!(reply.source, ReplySource::Remote);
        assert_eq!(reply.text, "   ");
    }

    #[tokio::test]
    async fn no_provider_always_falls_back() {
        let turn = PreparedTurn::prepare(&store(), "s1", None, "Homework tonight?").unwrap();
        let reply = turn.respond(None, &ChatSettings::default()).await;
        assert_eq!(reply.text, GENERIC_DEFLECTION);
        assert_eq!(reply.source.state(), SubmissionState::Failed);
    }

    #[test]
    fn send_guard_blocks_same_conversation_only() {
        let in_flight = InFlight::new();
        let key = ConversationKey::new("c1", "s1", None);
        let other = ConversationKey::new("c1", "s1", Some("p1"));

        let guard = in_flight.try_acquire(&key).unwrap();
        assert!(in_flight.is_busy(&key));
        assert_eq!(
            in_flight.try_acquire(&key).unwrap_err(),
            ChatError::Busy(key.to_string())
        );
        let _other_guard = in_flight.try_acquire(&other).unwrap();

        drop(guard);
        assert!(!in_flight.is_busy(&key));
        assert!(in_flight.try_acquire(&key).is_ok());
    }
}
