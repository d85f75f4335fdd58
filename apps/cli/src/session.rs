use std::io::Write;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tubenotes_core::{NotesPipeline, SessionKey, SessionState, format_answer, format_notes};

use crate::actions::{print_error, print_thumbnail, run_answer, run_notes};

const HELP: &str = "Commands:
  link <url>       set the video link (a bare URL works too)
  notes            get detailed notes for the video
  ask <question>   ask a question about the video
  show             show the last notes and answer
  help             show this message
  quit             leave the session";

#[derive(Debug, PartialEq)]
enum Input {
    Link(String),
    Notes,
    Ask(String),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// A single token that is a URL or carries a `v=` video parameter.
fn looks_like_link(line: &str) -> bool {
    if line.contains(char::is_whitespace) {
        return false;
    }
    line.starts_with("http://") || line.starts_with("https://") || line.contains("v=")
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if looks_like_link(line) {
        return Input::Link(line.to_string());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "link" | "url" => Input::Link(rest.to_string()),
        "notes" | "summary" => Input::Notes,
        "ask" | "question" => Input::Ask(rest.to_string()),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown(command.to_string()),
    }
}

/// One interactive user: the current link and the last results.
#[derive(Default)]
struct Session {
    link: Option<String>,
    state: SessionState,
}

impl Session {
    fn render(&self) {
        if let Some(summary) = self.state.get(SessionKey::Summary) {
            println!("\n{}", format_notes(summary));
        }
        if let Some(answer) = self.state.get(SessionKey::Answer) {
            println!("\n{}", format_answer(answer));
        }
    }
}

fn prompt() -> Result<()> {
    print!("{} ", style(">").cyan().bold());
    std::io::stdout().flush()?;
    Ok(())
}

/// Read commands from stdin until `quit` or end of input. No failure ends the loop.
pub async fn run(pipeline: &NotesPipeline) -> Result<()> {
    println!(
        "\n{}  {}\n",
        style("tubenotes").cyan().bold(),
        style("YouTube Transcript to Detailed Notes and Q&A").dim()
    );
    println!("{}\n", style(HELP).dim());

    let mut session = Session::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Link(link) if link.is_empty() => print_error("Usage: link <url>"),
            Input::Link(link) => {
                print_thumbnail(&link);
                session.link = Some(link);
            }
            Input::Notes => match session.link.as_deref() {
                Some(link) => {
                    if let Some(summary) = run_notes(pipeline, link).await {
                        session.state.store(SessionKey::Summary, summary);
                    }
                    session.render();
                }
                None => print_error("Enter a video link first (link <url>)."),
            },
            Input::Ask(question) => match session.link.as_deref() {
                Some(link) => {
                    if let Some(answer) = run_answer(pipeline, link, &question).await {
                        session.state.store(SessionKey::Answer, answer);
                    }
                    session.render();
                }
                None => print_error("Enter a video link first (link <url>)."),
            },
            Input::Show => session.render(),
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Empty => {}
            Input::Unknown(command) => {
                print_error(&format!(
                    "Unknown command '{}'. Set a video with 'link <url>' or type 'help'.",
                    command
                ))
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_urls_set_the_link() {
        assert_eq!(
            parse_input("  https://www.youtube.com/watch?v=abc  "),
            Input::Link("https://www.youtube.com/watch?v=abc".to_string())
        );
        assert_eq!(
            parse_input("link https://x/watch?v=abc"),
            Input::Link("https://x/watch?v=abc".to_string())
        );
    }

    #[test]
    fn links_without_a_scheme_are_recognised() {
        assert_eq!(
            parse_input("www.youtube.com/watch?v=x"),
            Input::Link("www.youtube.com/watch?v=x".to_string())
        );
        assert_eq!(
            parse_input("youtube.com/watch?v=abc&t=10"),
            Input::Link("youtube.com/watch?v=abc&t=10".to_string())
        );
        assert_eq!(
            parse_input("ask what does v=x mean"),
            Input::Ask("what does v=x mean".to_string())
        );
    }

    #[test]
    fn ask_keeps_the_whole_question() {
        assert_eq!(
            parse_input("ask What is   the main point?"),
            Input::Ask("What is   the main point?".to_string())
        );
        assert_eq!(parse_input("ask"), Input::Ask(String::new()));
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_input("NOTES"), Input::Notes);
        assert_eq!(parse_input("Quit"), Input::Quit);
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("dance"), Input::Unknown("dance".to_string()));
    }
}
