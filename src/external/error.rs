use thiserror::Error;

/// TMDB 请求错误
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("TMDB API error: status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// 实现从 reqwest::Error 到 TmdbError 的转换
impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TmdbError::Timeout
        } else if let Some(status) = err.status() {
            TmdbError::Status(status.as_u16())
        } else {
            TmdbError::Network(err.to_string())
        }
    }
}
