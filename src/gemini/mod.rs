mod api;

use crate::{
    http::{Error, ResponseHandler},
    prompts::{PromptSource, PromptWriter},
};
use api::{GenerateContentRequest, GenerateContentResponse};
use reqwest::header::USER_AGENT;
use std::{env, fmt};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const USER_AGENT_VALUE: &str = "tuneatlife-assets";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_VARS: [&str; 3] = [
    "GEMINI_API_KEY",
    "VITE_GEMINI_API_KEY",
    "REACT_APP_GEMINI_API_KEY",
];

const INSTRUCTION: &str = "You write prompts for an image generation model. \
Rewrite the brief you are given into one detailed prompt. \
Keep every brand color, format and avoid-list requirement it states. \
Answer with the prompt text only.";

/// Text client for the `generateContent` endpoint of one model.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_api_base(api_key, model, DEFAULT_API_BASE)
    }

    pub fn with_api_base(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        GeminiClient {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// `None` when no API key is set.
    pub fn from_env(model: &str) -> Option<Self> {
        Self::from_lookup(model, |name| env::var(name).ok())
    }

    pub fn from_lookup(model: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .map(|value| value.trim().to_owned())
            .find(|value| !value.is_empty())
            .map(|api_key| GeminiClient::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_text(&self, text: &str) -> Result<String, Error> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base,
            self.model.trim_start_matches("models/")
        );

        let response: GenerateContentResponse = self
            .client
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::new(INSTRUCTION, text))
            .send()
            .await?
            .handle()
            .await?;

        response.into_text().ok_or(Error::EmptyResponse)
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"<set>")
            .field("model", &self.model)
            .finish()
    }
}

impl PromptWriter for GeminiClient {
    fn source(&self) -> PromptSource {
        PromptSource::Gemini
    }

    async fn write(&self, brief: &str) -> Result<String, Error> {
        self.generate_text(brief).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;

    #[tokio::test]
    async fn should_generate_text_with_api_key_header() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "secret-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Logo brief" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"A gradient logo"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_api_base("secret-key", "gemini-1.5-flash", server.url());
        let text = client.generate_text("Logo brief").await?;

        mock.assert_async().await;
        assert_eq!(text, "A gradient logo");

        Ok(())
    }

    #[tokio::test]
    async fn should_accept_qualified_model_names() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-pro:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_api_base("key", "models/gemini-pro", server.url());
        client.generate_text("brief").await?;

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn should_map_api_errors() -> Result<()> {
        let mut server = Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_api_base("bad", DEFAULT_MODEL, server.url());
        let err = client.generate_text("brief").await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "API key not valid (status 400)");

        Ok(())
    }

    #[tokio::test]
    async fn should_reject_responses_without_text() -> Result<()> {
        let mut server = Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_api_base("key", DEFAULT_MODEL, server.url());

        assert!(matches!(
            client.generate_text("brief").await,
            Err(Error::EmptyResponse)
        ));

        Ok(())
    }

    #[test]
    fn should_read_api_key_fallbacks() {
        let vars: HashMap<&str, &str> = [("GEMINI_API_KEY", " "), ("VITE_GEMINI_API_KEY", "vite-key")]
            .into_iter()
            .collect();

        let client = GeminiClient::from_lookup(DEFAULT_MODEL, |name| vars.get(name).map(|v| v.to_string()));

        assert!(client.is_some_and(|client| client.api_key == "vite-key"));
        assert!(GeminiClient::from_lookup(DEFAULT_MODEL, |_| None).is_none());
    }

    #[test]
    fn should_redact_api_key() {
        let client = GeminiClient::new("secret-key", DEFAULT_MODEL);

        assert!(!format!("{:?}", client).contains("secret-key"));
    }
}
