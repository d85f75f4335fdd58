use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    error::{Result, TubenotesError},
    generate::{ChatCompletionsClient, Generator},
    prompts::Prompt,
    transcript::{TranscriptSource, YoutubeTranscriptClient, join_segments},
    translate::{GoogleTranslateClient, LanguageDetector, Translator, translate_if_needed},
    types::{ExtractedTranscript, Generated, Segment, TrackInfo, TranslationStatus},
    video::extract_video_id,
};

/// Link in, notes or an answer out. Each call is an independent
/// fetch, optional translation, and a single generation request.
pub struct NotesPipeline {
    transcripts: Arc<dyn TranscriptSource>,
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    generator: Option<Arc<dyn Generator>>,
    settings: Settings,
}

impl NotesPipeline {
    pub fn new(
        transcripts: Arc<dyn TranscriptSource>,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        generator: Arc<dyn Generator>,
        settings: Settings,
    ) -> Self {
        Self {
            transcripts,
            detector,
            translator,
            generator: Some(generator),
            settings,
        }
    }

    /// Wire the HTTP clients. Fails early when the provider key is missing.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let generator = ChatCompletionsClient::from_settings(&settings)?;
        let transcripts = YoutubeTranscriptClient::new(settings.request_timeout)?;
        let translate = Arc::new(GoogleTranslateClient::new(settings.request_timeout)?);

        Ok(Self::new(
            Arc::new(transcripts),
            translate.clone(),
            translate,
            Arc::new(generator),
            settings,
        ))
    }

    /// Transcript fetching and translation only; generation reports the missing key.
    pub fn without_generator(settings: Settings) -> Result<Self> {
        let transcripts = YoutubeTranscriptClient::new(settings.request_timeout)?;
        let translate = Arc::new(GoogleTranslateClient::new(settings.request_timeout)?);

        Ok(Self {
            transcripts: Arc::new(transcripts),
            detector: translate.clone(),
            translator: translate,
            generator: None,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Manual primary-language track first, then a generated secondary-language one.
    async fn select_track(&self, video_id: &str) -> Result<TrackInfo> {
        let primary = self.settings.primary_language.as_str();
        let secondary = self.settings.secondary_language.as_str();

        let list = self.transcripts.list_transcripts(video_id).await?;
        list.find_manually_created(&[primary])
            .or_else(|| list.find_generated(&[secondary]))
            .cloned()
            .ok_or_else(|| TubenotesError::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: vec![primary.to_string(), secondary.to_string()],
            })
    }

    /// Raw segments of the track `extract_transcript` would use.
    pub async fn segments(&self, link: &str) -> Result<(TrackInfo, Vec<Segment>)> {
        let video_id = require(link, "video link").map(extract_video_id)?;
        let track = self.select_track(&video_id).await?;
        let segments = self.transcripts.fetch_segments(&video_id, &track).await?;
        Ok((track, segments))
    }

    pub async fn extract_transcript(&self, link: &str) -> Result<ExtractedTranscript> {
        let video_id = require(link, "video link").map(extract_video_id)?;
        let track = self.select_track(&video_id).await?;
        info!(
            %video_id,
            language = %track.language_code,
            generated = track.is_generated,
            "transcript track selected"
        );

        let segments = self.transcripts.fetch_segments(&video_id, &track).await?;
        let text = join_segments(&segments);
        debug!(segments = segments.len(), chars = text.chars().count(), "transcript joined");
        if text.is_empty() {
            return Err(TubenotesError::EmptyTranscript { video_id });
        }

        let (text, translation) = if track.language_code == self.settings.secondary_language {
            let outcome = translate_if_needed(
                &text,
                self.detector.as_ref(),
                self.translator.as_ref(),
                &self.settings,
            )
            .await;
            (outcome.text, outcome.status)
        } else {
            (text, TranslationStatus::NotRequested)
        };

        if let TranslationStatus::Failed { attempts, reason } = &translation {
            warn!(%video_id, attempts, %reason, "using untranslated transcript");
        }

        Ok(ExtractedTranscript {
            video_id,
            language_code: track.language_code,
            is_generated: track.is_generated,
            text,
            translation,
        })
    }

    /// One generation call, no retry.
    pub async fn generate(&self, prompt: &Prompt<'_>) -> Result<String> {
        let Some(generator) = &self.generator else {
            return Err(TubenotesError::MissingApiKey {
                env_var: self.settings.provider.config().env_var.to_string(),
            });
        };
        generator.generate(&prompt.render()).await
    }

    pub async fn summarize_transcript(&self, transcript: ExtractedTranscript) -> Result<Generated> {
        let text = self
            .generate(&Prompt::Summary {
                transcript: &transcript.text,
            })
            .await?;
        Ok(Generated { transcript, text })
    }

    pub async fn answer_from_transcript(
        &self,
        transcript: ExtractedTranscript,
        question: &str,
    ) -> Result<Generated> {
        let question = require(question, "question")?;
        let text = self
            .generate(&Prompt::Question {
                transcript: &transcript.text,
                question,
            })
            .await?;
        Ok(Generated { transcript, text })
    }

    pub async fn summarize(&self, link: &str) -> Result<Generated> {
        let transcript = self.extract_transcript(link).await?;
        self.summarize_transcript(transcript).await
    }

    pub async fn answer(&self, link: &str, question: &str) -> Result<Generated> {
        require(question, "question")?;
        let transcript = self.extract_transcript(link).await?;
        self.answer_from_transcript(transcript, question).await
    }
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TubenotesError::MissingInput {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}
