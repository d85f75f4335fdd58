use crate::types::Segment;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript segments with timestamps
pub fn format_transcript_with_timestamps(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_notes(summary: &str) -> String {
    format!("## Detailed Notes:\n\n{}\n", summary.trim_end())
}

pub fn format_answer(answer: &str) -> String {
    format!("## Answer:\n\n{}\n", answer.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.9), "01:15");
        assert_eq!(format_timestamp(3600.0), "60:00");
    }

    #[test]
    fn prefixes_each_segment_with_its_start() {
        let segments = vec![
            Segment::new(" Hello ", 0.0, 2.0),
            Segment::new("world", 62.0, 1.0),
        ];
        assert_eq!(
            format_transcript_with_timestamps(&segments),
            "[00:00] Hello\n[01:02] world"
        );
    }

    #[test]
    fn wraps_results_in_headings() {
        assert_eq!(format_notes("- a\n"), "## Detailed Notes:\n\n- a\n");
        assert_eq!(format_answer("42"), "## Answer:\n\n42\n");
    }
}
