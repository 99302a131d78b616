//! Application state
//!
//! Shared, read-only collaborators handed to every request:
//! - Server configuration
//! - Title resolver
//! - Transcript service

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::title::TitleResolver;
use crate::transcript::{TranscriptProvider, TranscriptService, YoutubeProvider};

pub struct AppState {
    pub config: ServerConfig,
    pub titles: TitleResolver,
    pub transcripts: TranscriptService,
}

impl AppState {
    /// Build state backed by the YouTube provider.
    ///
    /// One pooled HTTP client is shared by both collaborators.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = config.http_client.build_client()?;
        let provider = YoutubeProvider::new(client.clone(), &config.http_client.youtube_base_url);
        Ok(Self::with_provider(config, client, Arc::new(provider)))
    }

    pub fn with_provider(
        config: ServerConfig,
        client: reqwest::Client,
        provider: Arc<dyn TranscriptProvider>,
    ) -> Self {
        let titles = TitleResolver::new(
            client,
            &config.http_client.user_agent,
            &config.http_client.title_suffix,
        );
        Self {
            config,
            titles,
            transcripts: TranscriptService::new(provider),
        }
    }
}
