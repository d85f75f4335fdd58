use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tubenotes_core::{
    ExtractedTranscript, NotesPipeline, TranslationStatus, TubenotesError, extract_video_id,
    thumbnail_url,
};

/// Under a minute with one decimal, otherwise whole minutes and seconds.
pub fn format_duration(d: Duration) -> String {
    let tenths = (d.as_millis() + 50) / 100;
    if tenths < 600 {
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        let secs = tenths / 10;
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), message);
}

/// Message shown when fetching or translating the transcript failed.
pub fn describe_transcript_error(err: &TubenotesError) -> String {
    match err {
        TubenotesError::TranscriptsDisabled { .. } => {
            "Transcripts are disabled for this video.".to_string()
        }
        TubenotesError::NoTranscriptFound { languages, .. } => format!(
            "No transcript available in {} for this video.",
            languages.join(" or ")
        ),
        TubenotesError::MissingInput { field } => format!("Please enter a {}.", field),
        other => format!("Error extracting transcript: {}", other),
    }
}

pub fn describe_generation_error(err: &TubenotesError) -> String {
    format!("Error generating content: {}", err)
}

pub fn print_thumbnail(link: &str) {
    let video_id = extract_video_id(link);
    println!(
        "{} {}",
        style("Thumbnail:").dim(),
        style(thumbnail_url(&video_id)).cyan()
    );
}

fn describe_transcript(transcript: &ExtractedTranscript) -> String {
    let kind = if transcript.is_generated {
        "auto-generated"
    } else {
        "manual"
    };
    let translation = match &transcript.translation {
        TranslationStatus::Translated { chunks, .. } => {
            format!(", translated in {} chunk(s)", chunks)
        }
        _ => String::new(),
    };
    format!(
        "{} {} transcript, {} chars{}",
        style(&transcript.language_code).yellow(),
        kind,
        transcript.text.chars().count(),
        translation
    )
}

/// Fetch (and translate) the transcript with a spinner. Failures are printed
/// and yield `None` so the caller can abort the action.
pub async fn fetch_transcript(pipeline: &NotesPipeline, link: &str) -> Option<ExtractedTranscript> {
    let step_start = Instant::now();
    let spinner = create_spinner("Fetching transcript...");
    match pipeline.extract_transcript(link).await {
        Ok(transcript) => {
            spinner.finish_with_message(format!(
                "{} Transcript: {} {}",
                style("✓").green().bold(),
                describe_transcript(&transcript),
                style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
            ));
            if let Some(warning) = transcript.translation_warning() {
                print_warning(&warning);
            }
            Some(transcript)
        }
        Err(e) => {
            spinner.finish_and_clear();
            print_error(&describe_transcript_error(&e));
            None
        }
    }
}

/// Transcript then one generation call. `None` means the action was aborted.
pub async fn run_notes(pipeline: &NotesPipeline, link: &str) -> Option<String> {
    let transcript = fetch_transcript(pipeline, link).await?;

    let step_start = Instant::now();
    let provider = pipeline.settings().provider.name();
    let spinner = create_spinner(&format!("Generating notes with {}...", provider));
    match pipeline.summarize_transcript(transcript).await {
        Ok(generated) => {
            spinner.finish_with_message(format!(
                "{} Notes generated ({}) {}",
                style("✓").green().bold(),
                provider,
                style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
            ));
            Some(generated.text)
        }
        Err(e) => {
            spinner.finish_and_clear();
            print_error(&describe_generation_error(&e));
            None
        }
    }
}

pub async fn run_answer(pipeline: &NotesPipeline, link: &str, question: &str) -> Option<String> {
    if question.trim().is_empty() {
        print_error("Please enter a question.");
        return None;
    }

    let transcript = fetch_transcript(pipeline, link).await?;

    let step_start = Instant::now();
    let provider = pipeline.settings().provider.name();
    let spinner = create_spinner(&format!("Answering with {}...", provider));
    match pipeline.answer_from_transcript(transcript, question).await {
        Ok(generated) => {
            spinner.finish_with_message(format!(
                "{} Answer generated ({}) {}",
                style("✓").green().bold(),
                provider,
                style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
            ));
            Some(generated.text)
        }
        Err(e) => {
            spinner.finish_and_clear();
            print_error(&describe_generation_error(&e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_and_long_durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn rounding_never_shows_sixty_seconds() {
        assert_eq!(format_duration(Duration::from_millis(59_960)), "1m 0s");
        assert_eq!(format_duration(Duration::from_millis(119_600)), "1m 59s");
        assert_eq!(format_duration(Duration::from_millis(59_940)), "59.9s");
    }

    #[test]
    fn disabled_and_missing_transcripts_have_their_own_messages() {
        let disabled = TubenotesError::TranscriptsDisabled {
            video_id: "abc".to_string(),
        };
        assert_eq!(
            describe_transcript_error(&disabled),
            "Transcripts are disabled for this video."
        );

        let missing = TubenotesError::NoTranscriptFound {
            video_id: "abc".to_string(),
            languages: vec!["en".to_string(), "hi".to_string()],
        };
        assert_eq!(
            describe_transcript_error(&missing),
            "No transcript available in en or hi for this video."
        );

        let other = TubenotesError::TranscriptFetchFailed {
            video_id: "abc".to_string(),
            reason: "HTTP 500".to_string(),
        };
        assert!(describe_transcript_error(&other).starts_with("Error extracting transcript:"));
    }
}
