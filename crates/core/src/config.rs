use std::time::Duration;

use crate::provider::Provider;

pub const DEFAULT_PRIMARY_LANGUAGE: &str = "en";
pub const DEFAULT_SECONDARY_LANGUAGE: &str = "hi";
pub const DEFAULT_CHUNK_SIZE: usize = 5000;
pub const DEFAULT_DETECTION_SAMPLE: usize = 100;

/// Bounded retry with a flat pause between attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    /// Overrides the provider's default model
    pub model: Option<String>,
    pub primary_language: String,
    /// Fallback transcript language that gets translated before generation
    pub secondary_language: String,
    pub chunk_size: usize,
    pub detection_sample: usize,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            primary_language: DEFAULT_PRIMARY_LANGUAGE.to_string(),
            secondary_language: DEFAULT_SECONDARY_LANGUAGE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            detection_sample: DEFAULT_DETECTION_SAMPLE,
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl Settings {
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.config().model.to_string())
    }
}
