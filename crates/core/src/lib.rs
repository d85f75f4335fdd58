//! Tubenotes Core Library
//!
//! Fetches YouTube transcripts, translates fallback-language transcripts,
//! and asks a hosted LLM for bullet notes or answers about the video.

pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod session;
pub mod transcript;
pub mod translate;
pub mod types;
pub mod video;

// Re-export commonly used items at crate root
pub use config::{RetryPolicy, Settings};
pub use error::{Result, TubenotesError};
pub use format::{format_answer, format_notes, format_timestamp, format_transcript_with_timestamps};
pub use generate::{ChatCompletionsClient, Generator};
pub use pipeline::NotesPipeline;
pub use prompts::{Prompt, QA_PROMPT, SUMMARY_PROMPT};
pub use provider::{Provider, ProviderConfig};
pub use session::{SessionKey, SessionState};
pub use transcript::{TranscriptList, TranscriptSource, YoutubeTranscriptClient, join_segments};
pub use translate::{
    GoogleTranslateClient, LanguageDetector, Translator, chunk_text, translate_if_needed,
};
pub use types::{
    ExtractedTranscript, Generated, Segment, TrackInfo, TranslationOutcome, TranslationStatus,
};
pub use video::{extract_video_id, thumbnail_url};
