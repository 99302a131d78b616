//! HTTP request handlers
//!
//! Implements the health, language listing and transcript endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;
use crate::transcript::{extract_video_id, LanguageTrack, VideoId};

/// Characters left unescaped in an RFC 5987 `filename*` value
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// HTTP error type, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Body of `POST /get-languages`
#[derive(Debug, Default, Deserialize)]
pub struct LanguagesRequest {
    pub target_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageTrack>,
}

/// Body of `POST /submit-url`
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    pub target_url: Option<String>,
    /// `json` (default when absent) or `txt`; an explicit `null` is rejected
    #[serde(default, deserialize_with = "present")]
    pub format: Option<Option<String>>,
    /// Exact language to fetch; omitted means Korean, then English
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    #[serde(rename = "subTitles")]
    pub sub_titles: String,
    pub language: String,
}

/// How `/submit-url` returns the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseFormat {
    Json,
    Attachment,
}

impl ResponseFormat {
    fn parse(format: Option<Option<&str>>) -> Option<Self> {
        match format {
            None | Some(Some("json")) => Some(ResponseFormat::Json),
            Some(Some("txt")) => Some(ResponseFormat::Attachment),
            Some(_) => None,
        }
    }
}

/// Keep `null` distinct from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn parse_body<T: DeserializeOwned>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })
}

/// Validate the target URL and pull the video id out of it
fn require_video(target_url: Option<&str>) -> Result<(&str, VideoId), ApiError> {
    let url = match target_url {
        Some(url) if !url.is_empty() => url,
        _ => {
            tracing::warn!("No URL provided");
            return Err(ApiError::BadRequest("No URL provided".to_string()));
        }
    };

    match extract_video_id(url) {
        Some(video_id) => {
            tracing::info!(target_url = url, %video_id, "extracted video id");
            Ok((url, video_id))
        }
        None => {
            tracing::warn!(target_url = url, "Invalid YouTube URL (no video id found)");
            Err(ApiError::BadRequest("Invalid YouTube URL".to_string()))
        }
    }
}

/// `Content-Disposition` for a download, with an ASCII fallback name
fn attachment_disposition(file_name: &str) -> Result<HeaderValue, ApiError> {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if !c.is_ascii() || c.is_ascii_control() || c == '"' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();
    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(file_name, ATTR_CHAR)
    );
    HeaderValue::from_str(&value)
        .map_err(|e| ApiError::InternalError(format!("Invalid file name header: {}", e)))
}

/// Health check endpoint
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check called");
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "Server is running" })),
    )
}

/// Version endpoint
/// GET /version
pub async fn version_check() -> &'static str {
    concat!("transcript-server v", env!("CARGO_PKG_VERSION"))
}

/// Available caption languages, Korean and English first
/// POST /get-languages
pub async fn get_languages(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LanguagesRequest>, JsonRejection>,
) -> Result<Json<LanguagesResponse>, ApiError> {
    let request = parse_body(body)?;
    let (target_url, video_id) = require_video(request.target_url.as_deref())?;

    let languages = state
        .transcripts
        .list_languages(&video_id)
        .await
        .map_err(|e| {
            tracing::error!(target_url, %video_id, "Error getting languages: {}", e);
            ApiError::InternalError(format!("Failed to get available languages: {}", e))
        })?;

    if !languages.iter().any(LanguageTrack::is_preferred) {
        tracing::warn!(target_url, %video_id, "No Korean or English subtitles available");
        return Err(ApiError::NotFound(
            "No Korean or English subtitles available".to_string(),
        ));
    }

    tracing::info!(%video_id, count = languages.len(), "listed available languages");
    Ok(Json(LanguagesResponse { languages }))
}

/// Fetch the title and transcript of a video
/// POST /submit-url
pub async fn submit_url(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = parse_body(body)?;
    let language_code = request.language_code.as_deref().filter(|c| !c.is_empty());
    tracing::info!(
        target_url = request.target_url.as_deref().unwrap_or_default(),
        language = language_code.unwrap_or("auto"),
        "received transcript request"
    );

    let (target_url, video_id) = require_video(request.target_url.as_deref())?;
    let requested_format = request.format.as_ref().map(|f| f.as_deref());
    let response_format = ResponseFormat::parse(requested_format).ok_or_else(|| {
        tracing::warn!(target_url, format = ?requested_format, "Invalid response format");
        ApiError::BadRequest("Invalid Format".to_string())
    })?;

    let title = state.titles.resolve(target_url).await.map_err(|e| {
        tracing::error!(target_url, %video_id, "Error resolving video title: {}", e);
        ApiError::InternalError("Failed to get video title".to_string())
    })?;
    if !title.is_found() {
        tracing::warn!(target_url, %video_id, "Using placeholder title: {}", title);
    }
    let title = title.to_string();
    tracing::info!(%video_id, title = %title, "resolved video title");

    let transcript = match language_code {
        Some(code) => {
            state
                .transcripts
                .fetch_by_language(&video_id, code, "text", &title)
                .await
        }
        None => state.transcripts.fetch_default(&video_id, "text", &title).await,
    }
    .map_err(|e| {
        tracing::error!(
            target_url,
            %video_id,
            language = language_code.unwrap_or("auto"),
            "Subtitle download failed: {}",
            e
        );
        ApiError::InternalError(format!("Subtitle extraction failed: {}", e))
    })?;
    tracing::info!(
        %video_id,
        file_name = %transcript.file_name,
        length = transcript.content.len(),
        "downloaded subtitles"
    );

    match response_format {
        ResponseFormat::Json => Ok(Json(SubmitResponse {
            sub_titles: transcript.content,
            language: language_code.unwrap_or("auto").to_string(),
        })
        .into_response()),
        ResponseFormat::Attachment => {
            let disposition = attachment_disposition(&transcript.file_name)?;
            Ok((
                [
                    (
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("text/plain; charset=utf-8"),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                transcript.content,
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format() {
        assert_eq!(ResponseFormat::parse(None), Some(ResponseFormat::Json));
        assert_eq!(ResponseFormat::parse(Some(Some("json"))), Some(ResponseFormat::Json));
        assert_eq!(ResponseFormat::parse(Some(Some("txt"))), Some(ResponseFormat::Attachment));
        assert_eq!(ResponseFormat::parse(Some(Some("xml"))), None);
        assert_eq!(ResponseFormat::parse(Some(None)), None);
    }

    #[test]
    fn test_submit_request_null_format() {
        let absent: SubmitRequest = serde_json::from_str(r#"{"target_url": "u"}"#).unwrap();
        assert_eq!(absent.format, None);

        let null: SubmitRequest =
            serde_json::from_str(r#"{"target_url": "u", "format": null}"#).unwrap();
        assert_eq!(null.format, Some(None));

        let txt: SubmitRequest = serde_json::from_str(r#"{"format": "txt"}"#).unwrap();
        assert_eq!(txt.format, Some(Some("txt".to_string())));
    }

    #[test]
    fn test_require_video() {
        let (url, id) = require_video(Some("https://www.youtube.com/watch?v=abc123&t=5")).unwrap();
        assert_eq!(url, "https://www.youtube.com/watch?v=abc123&t=5");
        assert_eq!(id.as_str(), "abc123");

        assert!(matches!(require_video(None), Err(ApiError::BadRequest(m)) if m == "No URL provided"));
        assert!(matches!(require_video(Some("")), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            require_video(Some("https://example.com/video")),
            Err(ApiError::BadRequest(m)) if m == "Invalid YouTube URL"
        ));
    }

    #[test]
    fn test_attachment_disposition() {
        let value = attachment_disposition("My Video_ko_subtitles.txt").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"My Video_ko_subtitles.txt\"; filename*=UTF-8''My%20Video_ko_subtitles.txt"
        );

        let value = attachment_disposition("제목_subtitles.txt").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"___subtitles.txt\"; filename*=UTF-8''%EC%A0%9C%EB%AA%A9_subtitles.txt"
        );
    }
}
