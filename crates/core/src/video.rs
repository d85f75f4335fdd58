const VIDEO_ID_MARKER: &str = "v=";

/// Take everything after the last `v=` in the link, or the whole link when
/// the marker is missing. No validation: short links and ids with trailing
/// query parameters come through as-is.
pub fn extract_video_id(link: &str) -> String {
    link.rsplit(VIDEO_ID_MARKER)
        .next()
        .unwrap_or(link)
        .to_string()
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_id_after_marker() {
        assert_eq!(extract_video_id("https://x/watch?v=abc123"), "abc123");
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn uses_last_marker() {
        assert_eq!(extract_video_id("https://x/?v=first&v=second"), "second");
    }

    #[test]
    fn keeps_trailing_parameters() {
        assert_eq!(extract_video_id("https://x/watch?v=abc&t=10"), "abc&t=10");
    }

    #[test]
    fn returns_whole_input_without_marker() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            "https://youtu.be/dQw4w9WgXcQ"
        );
        assert_eq!(extract_video_id(""), "");
    }

    #[test]
    fn marker_at_end_yields_empty_id() {
        assert_eq!(extract_video_id("https://x/watch?v="), "");
    }

    #[test]
    fn builds_thumbnail_url() {
        assert_eq!(
            thumbnail_url("abc123"),
            "http://img.youtube.com/vi/abc123/0.jpg"
        );
    }
}
