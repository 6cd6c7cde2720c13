mod response;

pub use response::ResponseHandler;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{message} (status {status})")]
    ApiError { status: u16, message: String },
    #[error("Failed to send request")]
    SendRequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
    #[error("Response carried no content")]
    EmptyResponse,
    #[error("Cannot read upload source {path}")]
    ReadSourceError {
        path: String,
        #[source]
        cause: std::io::Error,
    },
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(cause: reqwest::Error) -> Self {
        Error::SendRequestError { cause }
    }
}
