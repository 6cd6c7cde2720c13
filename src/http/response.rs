use super::Error;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

pub trait ResponseHandler {
    async fn handle<T>(self) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl ResponseHandler for reqwest::Response {
    async fn handle<T>(self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let status = self.status().as_u16();

        let text = self
            .text()
            .await
            .map_err(|cause| Error::ReadResponseTextError { cause })?;

        if !(200..300).contains(&status) {
            return Err(Error::ApiError {
                status,
                message: error_message(&text),
            });
        }

        serde_json::from_str::<T>(&text).map_err(|cause| Error::ParseResponseError { cause })
    }
}

/// The API wraps failures as `{"error": {"message": "..."}}`; anything else is kept as is.
fn error_message(text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.error.message,
        Err(_) if text.trim().is_empty() => "empty error response".to_owned(),
        Err(_) => text.trim().to_owned(),
    }
}
