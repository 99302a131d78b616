//! Transcript provider abstraction
//!
//! The service only talks to a [`TranscriptProvider`]; the concrete
//! implementation decides how tracks and cues are fetched.

use async_trait::async_trait;

use super::{LanguageTrack, TranscriptLine};
use crate::error::ProviderError;

/// Source of caption tracks and their cues
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Enumerate every caption track of a video, in discovery order
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<LanguageTrack>, ProviderError>;

    /// Fetch the cues of the first available track among `language_codes`.
    ///
    /// Codes are tried in order; the first one with a track wins.
    async fn fetch_transcript(
        &self,
        video_id: &str,
        language_codes: &[&str],
    ) -> Result<Vec<TranscriptLine>, ProviderError>;
}

/// Pick the track to fetch for an ordered list of language codes.
///
/// For each code, a manually created track is preferred over a generated one.
/// Returns the index into `tracks`.
pub fn select_track(tracks: &[LanguageTrack], language_codes: &[&str]) -> Option<usize> {
    language_codes.iter().find_map(|code| {
        let matching = |generated: bool| {
            tracks
                .iter()
                .position(|t| t.code == *code && t.is_generated == generated)
        };
        matching(false).or_else(|| matching(true))
    })
}

/// Build the error reported when no requested language has a track
pub fn no_transcript_found(
    video_id: &str,
    tracks: &[LanguageTrack],
    language_codes: &[&str],
) -> ProviderError {
    ProviderError::NoTranscriptFound {
        video_id: video_id.to_string(),
        requested: language_codes.iter().map(|c| c.to_string()).collect(),
        available: tracks.iter().map(|t| t.code.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, generated: bool) -> LanguageTrack {
        LanguageTrack::new(code, code, generated)
    }

    #[test]
    fn test_select_first_available_code() {
        let tracks = vec![track("en", false), track("de", false)];
        assert_eq!(select_track(&tracks, &["ko", "en"]), Some(0));
    }

    #[test]
    fn test_select_prefers_code_order() {
        let tracks = vec![track("en", false), track("ko", true)];
        assert_eq!(select_track(&tracks, &["ko", "en"]), Some(1));
    }

    #[test]
    fn test_select_prefers_manual_track() {
        let tracks = vec![track("ko", true), track("ko", false)];
        assert_eq!(select_track(&tracks, &["ko"]), Some(1));
    }

    #[test]
    fn test_select_none() {
        let tracks = vec![track("fr", false)];
        assert_eq!(select_track(&tracks, &["ko", "en"]), None);
        assert_eq!(select_track(&[], &["ko"]), None);
    }

    #[test]
    fn test_no_transcript_found_lists_codes() {
        let tracks = vec![track("fr", false), track("de", true)];
        let err = no_transcript_found("abc", &tracks, &["ko", "en"]);
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("\"ko\""));
        assert!(msg.contains("\"fr\""));
    }
}
