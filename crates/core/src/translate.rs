use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::Settings,
    error::{Result, TubenotesError},
    types::{TranslationOutcome, TranslationStatus},
};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Returns a language code such as `"hi"` for the sample text.
    async fn detect(&self, sample: &str) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Split into blocks of `size` characters; the last block may be shorter.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

enum Attempt {
    Skipped { detected: String },
    Translated { text: String, chunks: usize },
}

async fn detect_and_translate(
    text: &str,
    detector: &dyn LanguageDetector,
    translator: &dyn Translator,
    settings: &Settings,
) -> Result<Attempt> {
    let sample: String = text.chars().take(settings.detection_sample).collect();
    let detected = detector.detect(&sample).await?;
    if detected != settings.secondary_language {
        return Ok(Attempt::Skipped { detected });
    }

    let chunks = chunk_text(text, settings.chunk_size);
    let mut translated = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        translated.push(
            translator
                .translate(chunk, &settings.secondary_language, &settings.primary_language)
                .await?,
        );
    }

    Ok(Attempt::Translated {
        text: translated.join(" "),
        chunks: chunks.len(),
    })
}

/// Translate secondary-language text into the primary language.
///
/// Detection runs on a short prefix; the whole detect-and-translate step is
/// retried with a fixed pause. When every attempt fails the original text is
/// returned with a [`TranslationStatus::Failed`] status instead of an error.
pub async fn translate_if_needed(
    text: &str,
    detector: &dyn LanguageDetector,
    translator: &dyn Translator,
    settings: &Settings,
) -> TranslationOutcome {
    if text.is_empty() {
        return TranslationOutcome {
            text: String::new(),
            status: TranslationStatus::NotRequested,
        };
    }

    let max_attempts = settings.retry.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match detect_and_translate(text, detector, translator, settings).await {
            Ok(Attempt::Skipped { detected }) => {
                debug!(%detected, "text is not in the secondary language, leaving as is");
                return TranslationOutcome {
                    text: text.to_string(),
                    status: TranslationStatus::Skipped { detected },
                };
            }
            Ok(Attempt::Translated { text, chunks }) => {
                debug!(chunks, attempt, "transcript translated");
                return TranslationOutcome {
                    text,
                    status: TranslationStatus::Translated {
                        chunks,
                        attempts: attempt,
                    },
                };
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "translation attempt failed");
                if attempt >= max_attempts {
                    return TranslationOutcome {
                        text: text.to_string(),
                        status: TranslationStatus::Failed {
                            attempts: attempt,
                            reason: e.to_string(),
                        },
                    };
                }
                tokio::time::sleep(settings.retry.delay).await;
            }
        }
    }
}

/// Detector and translator backed by the public Google Translate endpoint.
pub struct GoogleTranslateClient {
    client: reqwest::Client,
}

impl GoogleTranslateClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<Value> {
        let response = self
            .client
            .post(TRANSLATE_URL)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TubenotesError::TranslationFailed {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl LanguageDetector for GoogleTranslateClient {
    async fn detect(&self, sample: &str) -> Result<String> {
        let response = self.request(sample, "auto", "en").await?;
        parse_detected_language(&response)
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let response = self.request(text, source, target).await?;
        parse_translation(&response)
    }
}

/// Element `[2]` of a gtx response is the detected source language.
pub(crate) fn parse_detected_language(response: &Value) -> Result<String> {
    response[2]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TubenotesError::DetectionFailed {
            reason: format!("no language in response: {}", response),
        })
}

/// Element `[0]` holds `[translated, original, ...]` pairs per sentence.
pub(crate) fn parse_translation(response: &Value) -> Result<String> {
    let sentences = response[0]
        .as_array()
        .ok_or_else(|| TubenotesError::TranslationFailed {
            reason: format!("no sentences in response: {}", response),
        })?;

    Ok(sentences
        .iter()
        .filter_map(|sentence| sentence[0].as_str())
        .collect())
}
