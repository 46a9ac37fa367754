//! Remote assistant provider implementations for EduAssist.
//!
//! All providers implement the `eduassist_core::Provider` trait.
//! [`build_from_config`] turns the `[assistant]` config section into a ready
//! provider, or `None` when no API key is configured.

pub mod anthropic;
pub mod timeout;

pub use anthropic::AnthropicProvider;
pub use timeout::TimeoutProvider;

use eduassist_config::AppConfig;
use eduassist_core::Provider;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the configured provider.
///
/// Without an API key there is nothing to call, and the chat flow answers
/// every question from the fallback matcher.
pub fn build_from_config(config: &AppConfig) -> Option<Arc<dyn Provider>> {
    let api_key = config.api_key.as_deref()?;

    let mut anthropic = AnthropicProvider::new(api_key);
    if let Some(url) = &config.assistant.api_url {
        anthropic = anthropic.with_base_url(url);
    }
    let provider: Arc<dyn Provider> = Arc::new(anthropic);

    match config.assistant.request_timeout_secs {
        Some(secs) => {
            info!(timeout_secs = secs, "Assistant calls are time-bounded");
            Some(Arc::new(TimeoutProvider::new(
                provider,
                Duration::from_secs(secs),
            )))
        }
        None => Some(provider),
    }
}
