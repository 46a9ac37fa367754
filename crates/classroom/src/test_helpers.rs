//! Shared test doubles for classroom tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use eduassist_core::error::ProviderError;
use eduassist_core::provider::{AssistantRequest, Provider, ProviderResponse};
use eduassist_core::{CLASS_CODE_ALPHABET, FixedClock, IdSource};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A clock frozen at 2026-03-01 09:00 UTC.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Predictable ids (`id-1`, `id-2`, ...) and class codes.
///
/// Codes come from the scripted queue first, then from a counter.
#[derive(Default)]
pub struct SequentialIds {
    next_id: Mutex<usize>,
    codes: Mutex<VecDeque<String>>,
    next_code: Mutex<usize>,
}

impl SequentialIds {
    pub fn with_codes(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            ..Self::default()
        }
    }
}

impl IdSource for SequentialIds {
    fn new_id(&self) -> String {
        let mut n = self.next_id.lock().unwrap();
        *n += 1;
        format!("id-{n}")
    }

    fn new_class_code(&self) -> String {
        if let Some(code) = self.codes.lock().unwrap().pop_front() {
            return code;
        }
        let mut n = self.next_code.lock().unwrap();
        let code = format!(
            "TEST{}{}",
            CLASS_CODE_ALPHABET[(*n / CLASS_CODE_ALPHABET.len()) % CLASS_CODE_ALPHABET.len()]
                as char,
            CLASS_CODE_ALPHABET[*n % CLASS_CODE_ALPHABET.len()] as char
        );
        *n += 1;
        code
    }
}

/// Replies with fixed text and records every prompt.
pub struct ScriptedProvider {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
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

/// Always fails with a network error.
pub struct FailingProvider {
    call_count: Mutex<usize>,
}

impl FailingProvider {
    pub fn new() -> Self {
        Self {
            call_count: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
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

/// Waits until released, so a test can observe the in-flight window.
pub struct GatedProvider {
    gate: tokio::sync::Notify,
}

impl GatedProvider {
    pub fn new() -> Self {
        Self {
            gate: tokio::sync::Notify::new(),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Provider for GatedProvider {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(
        &self,
        request: AssistantRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        self.gate.notified().await;
        Ok(ProviderResponse {
            text: "released".into(),
            model: request.model,
            usage: None,
        })
    }
}
