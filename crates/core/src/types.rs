use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// One caption track advertised for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub language_code: String,
    pub language: String,
    pub is_generated: bool,
    pub base_url: String,
}

/// Where the transcript text came from and whether it went through translation.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationStatus {
    /// The track was in the primary language; translation never ran.
    NotRequested,
    /// Detection said the text is not in the secondary language.
    Skipped { detected: String },
    Translated { chunks: usize, attempts: u32 },
    /// Every attempt failed; the text is the untranslated original.
    Failed { attempts: u32, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub text: String,
    pub status: TranslationStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTranscript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    pub text: String,
    pub translation: TranslationStatus,
}

impl ExtractedTranscript {
    /// A user-facing warning when translation fell back to the original text.
    pub fn translation_warning(&self) -> Option<String> {
        match &self.translation {
            TranslationStatus::Failed { attempts, reason } => Some(format!(
                "Translation failed after {} attempts ({}); using the original {} transcript",
                attempts, reason, self.language_code
            )),
            _ => None,
        }
    }
}

/// Result of a notes or question action.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub transcript: ExtractedTranscript,
    pub text: String,
}
