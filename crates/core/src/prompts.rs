pub const SUMMARY_PROMPT: &str = "You are a YouTube video summarizer. You will be taking the transcript text
and summarizing the entire video, providing the important summary in points
within 250 words. Please provide the summary of the text given here:  ";

/// Slots, in order: transcript, question.
pub const QA_PROMPT: &str = "You are a Q&A assistant. Based on the provided transcript text, answer the following question in detail. \n\
                             The transcript text is: {} \n\
                             The question is: {}";

const SLOT: &str = "{}";

#[derive(Debug, Clone, PartialEq)]
pub enum Prompt<'a> {
    Summary { transcript: &'a str },
    Question { transcript: &'a str, question: &'a str },
}

impl Prompt<'_> {
    pub fn render(&self) -> String {
        match self {
            Prompt::Summary { transcript } => format!("{}{}", SUMMARY_PROMPT, transcript),
            Prompt::Question {
                transcript,
                question,
            } => fill_slots(QA_PROMPT, &[*transcript, *question]),
        }
    }
}

/// Positional `{}` substitution. Slot markers inside the substituted values
/// are left alone.
fn fill_slots(template: &str, values: &[&str]) -> String {
    let capacity = template.len() + values.iter().map(|v| v.len()).sum::<usize>();
    let mut output = String::with_capacity(capacity);
    let mut rest = template;
    for value in values {
        let Some(pos) = rest.find(SLOT) else {
            break;
        };
        output.push_str(&rest[..pos]);
        output.push_str(value);
        rest = &rest[pos + SLOT.len()..];
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_instruction_then_transcript() {
        let prompt = Prompt::Summary {
            transcript: "Hello world",
        };
        assert_eq!(prompt.render(), format!("{}Hello world", SUMMARY_PROMPT));
    }

    #[test]
    fn question_fills_transcript_then_question() {
        let prompt = Prompt::Question {
            transcript: "T",
            question: "Q",
        }
        .render();
        assert!(prompt.contains("The transcript text is: T \n"));
        assert!(prompt.ends_with("The question is: Q"));
        assert!(!prompt.contains(SLOT));
    }

    #[test]
    fn braces_in_transcript_do_not_shift_slots() {
        let prompt = Prompt::Question {
            transcript: "uses {} in rust",
            question: "why?",
        }
        .render();
        assert!(prompt.contains("The transcript text is: uses {} in rust \n"));
        assert!(prompt.ends_with("The question is: why?"));
    }
}
