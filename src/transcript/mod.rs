//! Caption track listing and transcript retrieval
//!
//! This module provides:
//! - Data types for caption tracks and cues
//! - Video id extraction from shareable URLs
//! - The [`TranscriptService`] that fetches and formats transcripts
//! - A YouTube-backed [`TranscriptProvider`]

pub mod format;
pub mod provider;
pub mod youtube;

#[cfg(test)]
pub(crate) mod mock;

pub use format::{FormattedTranscript, TranscriptFormat};
pub use provider::TranscriptProvider;
pub use youtube::YoutubeProvider;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::TranscriptError;

/// Languages listed first and used as the default fetch order
pub const PREFERRED_LANGUAGES: [&str; 2] = ["ko", "en"];

/// Opaque video identifier taken from a URL query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id: the text after the first `v=` up to the next `&`.
///
/// Purely textual, the URL is not otherwise validated.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    regex!(r"v=([^&]+)")
        .captures(url)
        .map(|caps| VideoId(caps[1].to_string()))
}

/// One available caption track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTrack {
    pub code: String,
    pub name: String,
    pub is_generated: bool,
    pub display_name: String,
}

impl LanguageTrack {
    pub fn new(code: &str, name: &str, is_generated: bool) -> Self {
        let kind = if is_generated { "auto-generated" } else { "manual" };
        Self {
            code: code.to_string(),
            name: name.to_string(),
            is_generated,
            display_name: format!("{} ({})", name, kind),
        }
    }

    pub fn is_preferred(&self) -> bool {
        PREFERRED_LANGUAGES.contains(&self.code.as_str())
    }
}

/// A single timed cue
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    /// Start offset in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
    pub text: String,
}

/// Move preferred-language tracks to the front.
///
/// Stable partition: both groups keep their discovery order.
pub fn prioritize(tracks: Vec<LanguageTrack>) -> Vec<LanguageTrack> {
    let (mut preferred, others): (Vec<_>, Vec<_>) =
        tracks.into_iter().partition(LanguageTrack::is_preferred);
    preferred.extend(others);
    preferred
}

/// Lists caption tracks and fetches formatted transcripts
#[derive(Clone)]
pub struct TranscriptService {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptService {
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// All caption tracks of a video, preferred languages first
    pub async fn list_languages(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<LanguageTrack>, TranscriptError> {
        let tracks = self.provider.list_tracks(video_id.as_str()).await?;
        tracing::debug!(%video_id, count = tracks.len(), "listed caption tracks");
        Ok(prioritize(tracks))
    }

    /// Fetch exactly `language_code`, without fallback
    pub async fn fetch_by_language(
        &self,
        video_id: &VideoId,
        language_code: &str,
        format: &str,
        title: &str,
    ) -> Result<FormattedTranscript, TranscriptError> {
        let format: TranscriptFormat = format.parse()?;
        let lines = self
            .provider
            .fetch_transcript(video_id.as_str(), &[language_code])
            .await?;
        tracing::debug!(%video_id, language = language_code, cues = lines.len(), "fetched transcript");

        Ok(FormattedTranscript::render(
            &lines,
            format,
            video_id.as_str(),
            title,
            Some(language_code),
        ))
    }

    /// Fetch the first available of [`PREFERRED_LANGUAGES`]
    pub async fn fetch_default(
        &self,
        video_id: &VideoId,
        format: &str,
        title: &str,
    ) -> Result<FormattedTranscript, TranscriptError> {
        let format: TranscriptFormat = format.parse()?;
        let lines = self
            .provider
            .fetch_transcript(video_id.as_str(), &PREFERRED_LANGUAGES)
            .await?;
        tracing::debug!(%video_id, cues = lines.len(), "fetched transcript with default priority");

        Ok(FormattedTranscript::render(
            &lines,
            format,
            video_id.as_str(),
            title,
            None,
        ))
    }
}
