// Cookie uploader: read exported cookies from a file or pasted text, check
// the text parses as a JSON array of cookie objects, and submit it.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, LeaderboardApi};
use crate::model::CookieRecord;

/// Where the raw cookie text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieSource {
    /// Path to an exported `cookies.json`.
    File(PathBuf),
    /// Text pasted into the uploader.
    Paste(String),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The cookie text is not a JSON array of objects.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CookieParseError(#[from] serde_json::Error);

#[derive(Debug, Error)]
pub enum CookieSubmitError {
    /// The backend answered with a non-`success` status.
    #[error("Error: {0}")]
    Rejected(String),

    #[error("Failed to upload cookies: {0}")]
    Transport(#[from] ApiError),
}

/// Any failure of one upload attempt, worded for the user.
#[derive(Debug, Error)]
pub enum CookieUploadError {
    #[error("Invalid cookies.json file: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid cookies.json file: {0}")]
    InvalidFile(CookieParseError),

    #[error("Invalid JSON: {0}")]
    InvalidPaste(CookieParseError),

    #[error(transparent)]
    Submit(#[from] CookieSubmitError),
}

impl CookieUploadError {
    /// Parse failures for the given source, worded by source.
    pub fn parse(source: &CookieSource, err: CookieParseError) -> Self {
        match source {
            CookieSource::File(_) => CookieUploadError::InvalidFile(err),
            CookieSource::Paste(_) => CookieUploadError::InvalidPaste(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Parse exported cookie text.
///
/// Only structure is checked here; whether each record carries `name`,
/// `value` and `domain` is the backend's call.
pub fn parse_cookies(text: &str) -> Result<Vec<CookieRecord>, CookieParseError> {
    Ok(serde_json::from_str(text)?)
}

/// Load the raw text for `source`.
pub async fn read_source(source: &CookieSource) -> Result<String, CookieUploadError> {
    match source {
        CookieSource::Paste(text) => Ok(text.clone()),
        CookieSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CookieUploadError::Read {
                    path: path.clone(),
                    source: e,
                })
        }
    }
}

/// Submit parsed cookies as a single request.
///
/// Returns the backend's confirmation message on success.
pub async fn submit(
    api: &dyn LeaderboardApi,
    cookies: &[CookieRecord],
) -> Result<String, CookieSubmitError> {
    let response = api.submit_cookies(cookies).await?;
    if response.is_success() {
        info!(
            "Backend accepted {} cookies: {}",
            response
                .cookie_count
                .unwrap_or_else(|| u32::try_from(cookies.len()).unwrap_or(u32::MAX)),
            response.message
        );
        Ok(response.message)
    } else {
        warn!(
            "Backend rejected cookies (status={}): {}",
            response.status, response.message
        );
        Err(CookieSubmitError::Rejected(response.message))
    }
}

/// Read, parse and submit in one go.
pub async fn upload(
    api: &dyn LeaderboardApi,
    source: &CookieSource,
) -> Result<String, CookieUploadError> {
    let text = read_source(source).await?;
    let cookies = parse_cookies(&text).map_err(|e| CookieUploadError::parse(source, e))?;
    Ok(submit(api, &cookies).await?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
