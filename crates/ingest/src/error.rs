use std::fmt;

/// Longest slice of an error response body kept in [`IngestError::Status`].
pub const ERROR_BODY_LIMIT: usize = 180;

#[derive(Debug)]
pub enum IngestError {
    /// The Overpass endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// The request never produced a response.
    Transport(String),
    /// The response body was not the expected JSON.
    Decode(String),
}

impl IngestError {
    /// Build a status error, keeping at most [`ERROR_BODY_LIMIT`] characters of the body.
    pub fn status(status: u16, body: &str) -> Self {
        IngestError::Status {
            status,
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Status { status, body } => write!(f, "Overpass error {status}: {body}"),
            IngestError::Transport(e) => write!(f, "Overpass request failed: {e}"),
            IngestError::Decode(e) => write!(f, "Invalid Overpass response: {e}"),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<ureq::Error> for IngestError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                IngestError::status(code, &body)
            }
            other => IngestError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::Decode(e.to_string())
    }
}
