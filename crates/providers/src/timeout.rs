//! Bounded provider calls.
//!
//! Wraps a provider so a single call that runs past its deadline becomes a
//! [`ProviderError::Timeout`]. The chat flow treats that like any other
//! provider failure and answers from the fallback matcher; there is no retry.

use async_trait::async_trait;
use eduassist_core::error::ProviderError;
use eduassist_core::provider::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A provider that gives up on the inner provider after a fixed duration.
pub struct TimeoutProvider {
    name: String,
    inner: Arc<dyn Provider>,
    timeout: Duration,
}

impl TimeoutProvider {
    pub fn new(inner: Arc<dyn Provider>, timeout: Duration) -> Self {
        Self {
            name: format!("{}+timeout", inner.name()),
            inner,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Provider for TimeoutProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: AssistantRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        match tokio::time::timeout(self.timeout, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = %self.inner.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Provider timed out"
                );
                Err(ProviderError::Timeout(format!(
                    "Provider '{}' timed out after {}s",
                    self.inner.name(),
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// A mock provider that always succeeds.
    struct SuccessProvider {
        call_count: Mutex<usize>,
    }

    impl SuccessProvider {
        fn new() -> Self {
            Self {
                call_count: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl Provider for SuccessProvider {
        fn name(&self) -> &str {
            "success"
        }

        async fn complete(
            &self,
            _request: AssistantRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            *self.call_count.lock().unwrap() += 1;
            Ok(ProviderResponse {
                text: "success".into(),
                model: "test-model".into(),
                usage: None,
            })
        }
    }

    /// A mock provider that hangs forever (for timeout testing).
    struct HangingProvider;

    #[async_trait]
    impl Provider for HangingProvider {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn complete(
            &self,
            _request: AssistantRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    fn test_request() -> AssistantRequest {
        AssistantRequest::single("test", 100, "hello")
    }

    #[tokio::test]
    async fn fast_provider_passes_through() {
        let inner = Arc::new(SuccessProvider::new());
        let provider = TimeoutProvider::new(inner.clone(), Duration::from_secs(5));

        let result = provider.complete(test_request()).await.unwrap();
        assert_eq!(result.text, "success");
        assert_eq!(inner.calls(), 1);
        assert_eq!(provider.name(), "success+timeout");
    }

    #[tokio::test]
    async fn hanging_provider_times_out() {
        let provider = TimeoutProvider::new(Arc::new(HangingProvider), Duration::from_millis(50));

        match provider.complete(test_request()).await {
            Err(ProviderError::Timeout(msg)) => assert!(msg.contains("hanging")),
            other => panic!("Expected Timeout, got: {other:?}"),
        }
    }
}
