//! In-memory provider for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::provider::{no_transcript_found, select_track, TranscriptProvider};
use super::{LanguageTrack, TranscriptLine};
use crate::error::ProviderError;

#[derive(Clone)]
pub struct MockProvider {
    tracks: Vec<(LanguageTrack, Vec<TranscriptLine>)>,
    failure: Option<fn(&str) -> ProviderError>,
    fetches: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            failure: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call fails with the error built by `make_error`
    pub fn failing(make_error: fn(&str) -> ProviderError) -> Self {
        Self {
            failure: Some(make_error),
            ..Self::new()
        }
    }

    pub fn with_track(mut self, code: &str, generated: bool, cues: &[(f64, f64, &str)]) -> Self {
        let lines = cues
            .iter()
            .map(|(start, duration, text)| TranscriptLine {
                start: *start,
                duration: *duration,
                text: text.to_string(),
            })
            .collect();
        self.tracks
            .push((LanguageTrack::new(code, code, generated), lines));
        self
    }

    /// Number of `fetch_transcript` calls made so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptProvider for MockProvider {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<LanguageTrack>, ProviderError> {
        if let Some(make_error) = self.failure {
            return Err(make_error(video_id));
        }
        Ok(self.tracks.iter().map(|(t, _)| t.clone()).collect())
    }

    async fn fetch_transcript(
        &self,
        video_id: &str,
        language_codes: &[&str],
    ) -> Result<Vec<TranscriptLine>, ProviderError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(make_error) = self.failure {
            return Err(make_error(video_id));
        }

        let tracks: Vec<LanguageTrack> = self.tracks.iter().map(|(t, _)| t.clone()).collect();
        match select_track(&tracks, language_codes) {
            Some(i) => Ok(self.tracks[i].1.clone()),
            None => Err(no_transcript_found(video_id, &tracks, language_codes)),
        }
    }
}
