use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

use tubenotes_core::{
    NotesPipeline, Provider, Settings, config, format_answer, format_notes,
    format_transcript_with_timestamps,
};

use crate::actions::{
    create_spinner, describe_transcript_error, fetch_transcript, print_error, print_thumbnail,
    print_warning, run_answer, run_notes,
};

mod actions;
mod session;

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Gemini,
    Openai,
    Grok,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Grok => Provider::Grok,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubenotes")]
#[command(about = "Turn YouTube transcripts into detailed notes and answer questions about a video")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// AI provider for notes and answers
    #[arg(short, long, global = true, default_value = "gemini")]
    provider: CliProvider,

    /// Model name. Defaults to the provider's default model.
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Transcript language used as-is (manual tracks only)
    #[arg(long, global = true, default_value = config::DEFAULT_PRIMARY_LANGUAGE)]
    primary_lang: String,

    /// Fallback language (auto-generated tracks), translated before generation
    #[arg(long, global = true, default_value = config::DEFAULT_SECONDARY_LANGUAGE)]
    secondary_lang: String,

    /// Debug logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Get detailed notes for a video
    Notes {
        /// Video URL
        url: String,
    },
    /// Ask a question about a video
    Ask {
        /// Video URL
        url: String,
        /// Question about the video content
        question: String,
    },
    /// Print the transcript that notes and answers are generated from
    Transcript {
        /// Video URL
        url: String,

        /// Print the original segments with timestamps instead
        #[arg(short, long)]
        timestamps: bool,
    },
    /// Interactive session: set a link once, then ask for notes and answers
    Session,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_from(cli: &Cli) -> Settings {
    Settings {
        provider: cli.provider.clone().into(),
        model: cli.model.clone(),
        primary_language: cli.primary_lang.clone(),
        secondary_language: cli.secondary_lang.clone(),
        ..Settings::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = settings_from(&cli);
    tracing::debug!(
        provider = settings.provider.name(),
        model = %settings.model(),
        primary = %settings.primary_language,
        secondary = %settings.secondary_language,
        "settings resolved"
    );
    let command = cli.command.unwrap_or(Command::Session);

    // Validate API key early; printing a transcript does not need one
    let pipeline = if matches!(command, Command::Transcript { .. }) {
        NotesPipeline::without_generator(settings)
    } else {
        NotesPipeline::from_settings(settings)
    };
    let pipeline = match pipeline {
        Ok(pipeline) => pipeline,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match command {
        Command::Notes { url } => {
            print_thumbnail(&url);
            let Some(summary) = run_notes(&pipeline, &url).await else {
                std::process::exit(1);
            };
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_notes(&summary));
        }
        Command::Ask { url, question } => {
            print_thumbnail(&url);
            let Some(answer) = run_answer(&pipeline, &url, &question).await else {
                std::process::exit(1);
            };
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_answer(&answer));
        }
        Command::Transcript { url, timestamps } => {
            if !print_transcript(&pipeline, &url, timestamps).await {
                std::process::exit(1);
            }
        }
        Command::Session => session::run(&pipeline).await?,
    }

    Ok(())
}

async fn print_transcript(pipeline: &NotesPipeline, url: &str, timestamps: bool) -> bool {
    if !timestamps {
        let Some(transcript) = fetch_transcript(pipeline, url).await else {
            return false;
        };
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", transcript.text);
        return true;
    }

    let spinner = create_spinner("Fetching transcript segments...");
    match pipeline.segments(url).await {
        Ok((track, segments)) => {
            spinner.finish_and_clear();
            if track.language_code != pipeline.settings().primary_language {
                print_warning(&format!(
                    "Showing the untranslated {} track",
                    track.language_code
                ));
            }
            println!("{}", format_transcript_with_timestamps(&segments));
            true
        }
        Err(e) => {
            spinner.finish_and_clear();
            print_error(&describe_transcript_error(&e));
            false
        }
    }
}
