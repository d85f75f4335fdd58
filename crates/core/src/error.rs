use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubenotesError {
    #[error("Transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcript found for video {video_id} in languages {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    #[error("Video {video_id} is unplayable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },

    #[error("Transcript fetch failed for {video_id}: {reason}")]
    TranscriptFetchFailed { video_id: String, reason: String },

    #[error("Transcript for video {video_id} is empty")]
    EmptyTranscript { video_id: String },

    #[error("Missing input: {field} is required")]
    MissingInput { field: String },

    #[error("Language detection failed: {reason}")]
    DetectionFailed { reason: String },

    #[error("Translation failed: {reason}")]
    TranslationFailed { reason: String },

    #[error("Content generation failed: {reason}")]
    GenerationFailed { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, TubenotesError>;
