use reqwest::StatusCode;
use std::{
    error::Error as StdError,
    fmt::{self, Display},
    result,
};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Rusqlite(rusqlite::Error),
    Url(url::ParseError),
    Reqwest(reqwest::Error),
    Json(serde_json::Error),
    /// A non-success response, with the path that was requested.
    Status(StatusCode, String),
    Config(String),
    Internal(String),
}

impl Error {
    /// Transient failures worth another attempt: timeouts, refused or reset
    /// connections, throttling and server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Reqwest(inner) => inner.is_timeout() || inner.is_connect(),
            Error::Status(code, _) => {
                code.is_server_error() || *code == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Rusqlite(inner) => fmt::Display::fmt(&inner, f),
            Error::Url(inner) => fmt::Display::fmt(&inner, f),
            Error::Reqwest(inner) => fmt::Display::fmt(&inner, f),
            Error::Json(inner) => fmt::Display::fmt(&inner, f),
            Error::Status(code, path) => write!(f, "{code} for {path}"),
            Error::Config(inner) => write!(f, "invalid configuration: {inner}"),
            Error::Internal(inner) => f.write_str(inner),
        }
    }
}

impl StdError for Error {}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Error {
        Error::Rusqlite(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}
