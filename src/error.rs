use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("invalid JSON in response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("result at index {0} is null")]
    MalformedResult(usize),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl WidgetError {
    /// Input errors are the user's to fix; everything else is a fetch failure.
    pub fn is_input_error(&self) -> bool {
        matches!(self, WidgetError::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
