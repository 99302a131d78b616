use thiserror::Error;

/// Startup and process-level errors for the transcript server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No free port found in range {start}-{end}")]
    NoFreePort { start: u16, end: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised while resolving a video title
///
/// Non-200 responses and pages without a title are not errors; they are
/// reported through [`crate::title::ResolvedTitle`].
#[derive(Error, Debug)]
pub enum TitleError {
    #[error("Title request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors reported by a transcript provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Too many requests: the video host is rate limiting this client")]
    TooManyRequests,

    #[error("Could not find the player API key for video {0}")]
    MissingApiKey(String),

    #[error("Video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("Video {video_id} requires sign-in: {reason}")]
    LoginRequired { video_id: String, reason: String },

    #[error("Subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {video_id} in {requested:?} (available: {available:?})")]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("Malformed provider response: {0}")]
    Parse(String),
}

/// Errors returned by the transcript service
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Unsupported format: {0}. Choose 'text' or 'subtitle'")]
    UnsupportedFormat(String),
}

/// Result type alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
