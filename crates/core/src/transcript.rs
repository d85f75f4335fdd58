use std::{collections::HashMap, sync::LazyLock, time::Duration};

use async_trait::async_trait;
use regex::Regex;
use reqwest::{StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, TubenotesError},
    types::{Segment, TrackInfo},
};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("static regex")
});

/// Caption tracks of one video, split by how they were produced.
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_id: String,
    pub manually_created: HashMap<String, TrackInfo>,
    pub generated: HashMap<String, TrackInfo>,
}

impl TranscriptList {
    pub fn find_manually_created(&self, language_codes: &[&str]) -> Option<&TrackInfo> {
        language_codes
            .iter()
            .find_map(|code| self.manually_created.get(*code))
    }

    pub fn find_generated(&self, language_codes: &[&str]) -> Option<&TrackInfo> {
        language_codes.iter().find_map(|code| self.generated.get(*code))
    }

    pub fn insert(&mut self, track: TrackInfo) {
        let code = track.language_code.clone();
        if track.is_generated {
            self.generated.insert(code, track);
        } else {
            self.manually_created.insert(code, track);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manually_created.is_empty() && self.generated.is_empty()
    }
}

/// Boundary to whatever service lists and serves caption tracks.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn list_transcripts(&self, video_id: &str) -> Result<TranscriptList>;

    async fn fetch_segments(&self, video_id: &str, track: &TrackInfo) -> Result<Vec<Segment>>;
}

/// Space-join segment texts in the order they were received.
pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| seg.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caption client talking to YouTube's innertube player endpoint.
pub struct YoutubeTranscriptClient {
    client: reqwest::Client,
}

impl YoutubeTranscriptClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US"),
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_watch_html(&self, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .send()
            .await?;
        check_status(response.status(), video_id)?;
        Ok(response.text().await?)
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> Result<Value> {
        let response = self
            .client
            .post(INNERTUBE_PLAYER_URL)
            .query(&[("key", api_key)])
            .json(&serde_json::json!({
                "context": {
                    "client": {
                        "clientName": "ANDROID",
                        "clientVersion": "20.10.38"
                    }
                },
                "videoId": video_id
            }))
            .send()
            .await?;
        check_status(response.status(), video_id)?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    async fn list_transcripts(&self, video_id: &str) -> Result<TranscriptList> {
        let html = self.fetch_watch_html(video_id).await?;
        let api_key = extract_api_key(&html, video_id)?;
        debug!(video_id, "fetching innertube player data");
        let player = self.fetch_player(video_id, &api_key).await?;
        parse_track_list(video_id, &player)
    }

    async fn fetch_segments(&self, video_id: &str, track: &TrackInfo) -> Result<Vec<Segment>> {
        let url = format!("{}&fmt=json3", track.base_url);
        debug!(video_id, language = %track.language_code, "fetching caption track");
        let response = self.client.get(&url).send().await?;
        check_status(response.status(), video_id)?;
        let body = response.text().await?;
        parse_json3(video_id, &body)
    }
}

fn check_status(status: StatusCode, video_id: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let reason = if status == StatusCode::TOO_MANY_REQUESTS {
        "too many requests, YouTube is rate limiting this client".to_string()
    } else {
        format!("HTTP {}", status)
    };
    Err(TubenotesError::TranscriptFetchFailed {
        video_id: video_id.to_string(),
        reason,
    })
}

fn extract_api_key(html: &str, video_id: &str) -> Result<String> {
    if html.contains("g-recaptcha") {
        return Err(TubenotesError::TranscriptFetchFailed {
            video_id: video_id.to_string(),
            reason: "request blocked by a captcha".to_string(),
        });
    }

    INNERTUBE_API_KEY
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TubenotesError::TranscriptFetchFailed {
            video_id: video_id.to_string(),
            reason: "innertube api key not found in watch page".to_string(),
        })
}

fn assert_playable(video_id: &str, player: &Value) -> Result<()> {
    let Some(playability) = player.get("playabilityStatus") else {
        return Ok(());
    };

    let status = playability["status"].as_str().unwrap_or("");
    if status == "OK" {
        return Ok(());
    }

    let reason = playability["reason"].as_str().unwrap_or("").to_string();
    if status == "ERROR" && reason.contains("unavailable") {
        return Err(TubenotesError::VideoUnavailable {
            video_id: video_id.to_string(),
        });
    }

    Err(TubenotesError::VideoUnplayable {
        video_id: video_id.to_string(),
        reason,
    })
}

pub(crate) fn parse_track_list(video_id: &str, player: &Value) -> Result<TranscriptList> {
    assert_playable(video_id, player)?;

    let disabled = || TubenotesError::TranscriptsDisabled {
        video_id: video_id.to_string(),
    };

    let tracks = player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .ok_or_else(disabled)?;

    let mut list = TranscriptList {
        video_id: video_id.to_string(),
        ..Default::default()
    };

    for caption in tracks {
        let (Some(language_code), Some(base_url)) =
            (caption["languageCode"].as_str(), caption["baseUrl"].as_str())
        else {
            continue;
        };

        let language = caption
            .pointer("/name/runs/0/text")
            .or_else(|| caption.pointer("/name/simpleText"))
            .and_then(Value::as_str)
            .unwrap_or(language_code)
            .to_string();

        list.insert(TrackInfo {
            language_code: language_code.to_string(),
            language,
            is_generated: caption["kind"].as_str() == Some("asr"),
            base_url: base_url.replace("&fmt=srv3", ""),
        });
    }

    if list.is_empty() {
        return Err(disabled());
    }

    Ok(list)
}

#[derive(Deserialize)]
struct Json3Response {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

pub(crate) fn parse_json3(video_id: &str, body: &str) -> Result<Vec<Segment>> {
    let response: Json3Response =
        serde_json::from_str(body).map_err(|e| TubenotesError::TranscriptFetchFailed {
            video_id: video_id.to_string(),
            reason: format!("unreadable caption track: {}", e),
        })?;

    let segments = response
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, generated: bool) -> TrackInfo {
        TrackInfo {
            language_code: code.to_string(),
            language: code.to_string(),
            is_generated: generated,
            base_url: format!("https://captions/{}", code),
        }
    }

    #[test]
    fn joins_segments_with_spaces_in_order() {
        let segments = vec![Segment::new("a", 0.0, 1.0), Segment::new("b", 1.0, 1.0)];
        assert_eq!(join_segments(&segments), "a b");
        assert_eq!(join_segments(&[]), "");
    }

    #[test]
    fn manual_and_generated_lookups_are_separate() {
        let mut list = TranscriptList::default();
        list.insert(track("en", true));
        list.insert(track("hi", true));

        assert!(list.find_manually_created(&["en"]).is_none());
        assert_eq!(list.find_generated(&["hi"]).unwrap().language_code, "hi");
    }

    #[test]
    fn lookups_follow_language_preference_order() {
        let mut list = TranscriptList::default();
        list.insert(track("de", false));
        list.insert(track("en", false));

        let found = list.find_manually_created(&["en", "de"]).unwrap();
        assert_eq!(found.language_code, "en");
    }

    #[test]
    fn parses_caption_tracks() {
        let player = serde_json::json!({
            "playabilityStatus": { "status": "OK" },
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {
                            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=srv3",
                            "languageCode": "en",
                            "name": { "runs": [{ "text": "English" }] }
                        },
                        {
                            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc&lang=hi&kind=asr",
                            "languageCode": "hi",
                            "kind": "asr",
                            "name": { "runs": [{ "text": "Hindi (auto-generated)" }] }
                        }
                    ]
                }
            }
        });

        let list = parse_track_list("abc", &player).unwrap();
        let en = list.find_manually_created(&["en"]).unwrap();
        assert_eq!(en.language, "English");
        assert_eq!(
            en.base_url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=en"
        );
        assert!(list.find_generated(&["hi"]).unwrap().is_generated);
    }

    #[test]
    fn missing_captions_means_disabled() {
        let player = serde_json::json!({ "playabilityStatus": { "status": "OK" } });
        let err = parse_track_list("abc", &player).unwrap_err();
        assert!(matches!(err, TubenotesError::TranscriptsDisabled { .. }));
    }

    #[test]
    fn unavailable_video_is_reported() {
        let player = serde_json::json!({
            "playabilityStatus": { "status": "ERROR", "reason": "This video is unavailable" }
        });
        let err = parse_track_list("abc", &player).unwrap_err();
        assert!(matches!(err, TubenotesError::VideoUnavailable { .. }));
    }

    #[test]
    fn parses_json3_events() {
        let body = r#"{
            "events": [
                { "tStartMs": 0, "dDurationMs": 1500 },
                { "tStartMs": 0, "dDurationMs": 2000, "segs": [{ "utf8": "Hello" }, { "utf8": " world" }] },
                { "tStartMs": 2000, "dDurationMs": 10, "segs": [{ "utf8": "\n" }] },
                { "tStartMs": 2500, "dDurationMs": 1000, "segs": [{ "utf8": "again" }] }
            ]
        }"#;

        let segments = parse_json3("abc", body).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new("Hello world", 0.0, 2.0),
                Segment::new("again", 2.5, 1.0),
            ]
        );
    }

    #[test]
    fn extracts_api_key_from_html() {
        let html = r#"<script>ytcfg.set({"INNERTUBE_API_KEY": "AIzaKey_123-x"})</script>"#;
        assert_eq!(extract_api_key(html, "abc").unwrap(), "AIzaKey_123-x");
        assert!(extract_api_key("<html></html>", "abc").is_err());
    }
}
