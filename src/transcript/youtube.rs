//! YouTube transcript provider
//!
//! Three requests per lookup:
//! 1. the watch page, for the innertube API key
//! 2. the innertube player endpoint, for playability and caption tracks
//! 3. the timedtext URL of the selected track, for the cues
//!
//! Listing tracks stops after step 2.

use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use serde_json::json;

use super::provider::{no_transcript_found, select_track, TranscriptProvider};
use super::{LanguageTrack, TranscriptLine};
use crate::error::ProviderError;
use crate::html::strip_tags;

/// Client identity presented to the player endpoint
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTracklist {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Deserialize)]
struct TextRun {
    text: String,
}

impl CaptionTrack {
    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|n| {
                n.runs
                    .first()
                    .map(|r| r.text.clone())
                    .or_else(|| n.simple_text.clone())
            })
            .unwrap_or_else(|| self.language_code.clone())
    }

    fn to_language_track(&self) -> LanguageTrack {
        LanguageTrack::new(
            &self.language_code,
            &self.display_name(),
            self.kind.as_deref() == Some("asr"),
        )
    }

    fn transcript_url(&self) -> String {
        self.base_url.replace("&fmt=srv3", "")
    }
}

/// Transcript provider backed by YouTube's public web endpoints
#[derive(Debug, Clone)]
pub struct YoutubeProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YoutubeProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, ProviderError> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html)
            .ok_or_else(|| ProviderError::MissingApiKey(video_id.to_string()))?;
        let player = self.fetch_player(video_id, &api_key).await?;
        caption_tracks(video_id, player)
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, ProviderError> {
        let url = format!("{}/watch", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("v", video_id)])
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;
        let html = check_status(response, &url)?.text().await?;

        if html.contains("class=\"g-recaptcha\"") {
            return Err(ProviderError::TooManyRequests);
        }
        Ok(html)
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse, ProviderError> {
        let url = format!("{}/youtubei/v1/player", self.base_url);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;
        check_status(response, &url)?
            .json::<PlayerResponse>()
            .await
            .map_err(|e| ProviderError::Parse(format!("player response: {}", e)))
    }

    async fn fetch_cues(&self, track: &CaptionTrack) -> Result<Vec<TranscriptLine>, ProviderError> {
        let url = track.transcript_url();
        let response = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;
        let xml = check_status(response, &url)?.text().await?;
        parse_timedtext(&xml)
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeProvider {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<LanguageTrack>, ProviderError> {
        let tracks = self.fetch_caption_tracks(video_id).await?;
        Ok(tracks.iter().map(CaptionTrack::to_language_track).collect())
    }

    async fn fetch_transcript(
        &self,
        video_id: &str,
        language_codes: &[&str],
    ) -> Result<Vec<TranscriptLine>, ProviderError> {
        let tracks = self.fetch_caption_tracks(video_id).await?;
        let listed: Vec<LanguageTrack> = tracks.iter().map(CaptionTrack::to_language_track).collect();

        let index = select_track(&listed, language_codes)
            .ok_or_else(|| no_transcript_found(video_id, &listed, language_codes))?;
        tracing::debug!(
            video_id,
            language = %listed[index].code,
            generated = listed[index].is_generated,
            "selected caption track"
        );
        self.fetch_cues(&tracks[index]).await
    }
}

fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::TooManyRequests);
    }
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

fn extract_api_key(html: &str) -> Option<String> {
    regex!(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
        .captures(html)
        .map(|caps| caps[1].to_string())
}

fn caption_tracks(video_id: &str, player: PlayerResponse) -> Result<Vec<CaptionTrack>, ProviderError> {
    if let Some(playability) = player.playability_status {
        let reason = playability.reason.unwrap_or_default();
        match playability.status.as_str() {
            "OK" => {}
            "LOGIN_REQUIRED" => {
                return Err(ProviderError::LoginRequired {
                    video_id: video_id.to_string(),
                    reason,
                })
            }
            _ => {
                return Err(ProviderError::VideoUnavailable {
                    video_id: video_id.to_string(),
                    reason: if reason.is_empty() {
                        playability.status
                    } else {
                        reason
                    },
                })
            }
        }
    }

    let tracks = player
        .captions
        .and_then(|c| c.tracklist)
        .map(|t| t.caption_tracks)
        .unwrap_or_default();
    if tracks.is_empty() {
        return Err(ProviderError::TranscriptsDisabled(video_id.to_string()));
    }
    Ok(tracks)
}

/// Parse timedtext XML into cues, in document order
fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptLine>, ProviderError> {
    let mut lines = Vec::new();
    for caps in regex!(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").captures_iter(xml) {
        let attrs = &caps[1];
        let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if raw.is_empty() {
            continue;
        }

        let start = attribute(attrs, "start")
            .ok_or_else(|| ProviderError::Parse("cue without start attribute".to_string()))?;
        let duration = attribute(attrs, "dur").unwrap_or(0.0);
        // Cue text is escaped once for XML and once more for HTML.
        let once = html_escape::decode_html_entities(raw);
        let text = strip_tags(&html_escape::decode_html_entities(&once));

        lines.push(TranscriptLine {
            start,
            duration,
            text,
        });
    }
    Ok(lines)
}

fn attribute(attrs: &str, name: &str) -> Option<f64> {
    regex!(r#"([a-zA-Z]+)="([^"]*)""#)
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps[2].parse().ok())
}
