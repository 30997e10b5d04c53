use std::fmt;

/// Message used when the payload is valid JSON but not a non-empty array.
pub const NO_DATA_MESSAGE: &str = "No user data was returned by the API.";

/// Why a load failed. Every variant is terminal for the invocation that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    Transport(String),
    /// The upstream answered outside 200-299.
    HttpStatus { status: u16, reason: String },
    /// The body is not valid JSON.
    Parse(String),
    /// Valid JSON, but not a non-empty array of user records.
    Shape(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    HttpStatus,
    Parse,
    Shape,
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::HttpStatus { .. } => ErrorKind::HttpStatus,
            FetchError::Parse(_) => ErrorKind::Parse,
            FetchError::Shape(_) => ErrorKind::Shape,
        }
    }

    #[must_use]
    pub fn no_data() -> Self {
        FetchError::Shape(NO_DATA_MESSAGE.to_string())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(message) => write!(formatter, "Network error: {message}"),
            FetchError::HttpStatus { status, reason } => {
                if reason.is_empty() {
                    write!(formatter, "HTTP Error: {status}")
                } else {
                    write!(formatter, "HTTP Error: {status} {reason}")
                }
            }
            FetchError::Parse(message) => write!(formatter, "JSON Error: {message}"),
            FetchError::Shape(message) => formatter.write_str(message),
        }
    }
}

impl std::error::Error for FetchError {}
