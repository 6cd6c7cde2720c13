use super::{
    credentials::Credentials,
    request::{UploadRequest, UploadSource},
    response::{DestroyResponse, FolderResponse, PingResponse, UploadResponse, UsageResponse},
    signature::sign,
    Uploader,
};
use crate::http::{Error, ResponseHandler};
use chrono::Utc;
use reqwest::{
    header::USER_AGENT,
    multipart::{Form, Part},
    RequestBuilder,
};
use std::collections::BTreeMap;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
const API_VERSION: &str = "v1_1";
const USER_AGENT_VALUE: &str = "tuneatlife-assets";
const SIGNATURE_ALGORITHM: &str = "sha256";

pub trait Headers {
    fn default_headers(self) -> RequestBuilder;
    fn admin_auth(self, credentials: &Credentials) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn default_headers(self) -> RequestBuilder {
        self.header(USER_AGENT, USER_AGENT_VALUE)
    }

    fn admin_auth(self, credentials: &Credentials) -> RequestBuilder {
        self.default_headers()
            .basic_auth(&credentials.api_key, Some(&credentials.api_secret))
    }
}

/// Client for the upload and admin APIs of one cloud.
#[derive(Clone, Debug)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    api_base: String,
    credentials: Credentials,
}

impl CloudinaryClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_api_base(credentials, DEFAULT_API_BASE)
    }

    pub fn with_api_base(credentials: Credentials, api_base: impl Into<String>) -> Self {
        CloudinaryClient {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    pub fn cloud_name(&self) -> &str {
        &self.credentials.cloud_name
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base, API_VERSION, self.credentials.cloud_name, path
        )
    }

    fn signed(&self, mut params: BTreeMap<String, String>) -> BTreeMap<String, String> {
        let signature = sign(&params, &self.credentials.api_secret);
        params.insert("signature".to_owned(), signature);
        params.insert(
            "signature_algorithm".to_owned(),
            SIGNATURE_ALGORITHM.to_owned(),
        );
        params.insert("api_key".to_owned(), self.credentials.api_key.to_owned());
        params
    }

    pub async fn upload_image(&self, request: &UploadRequest) -> Result<UploadResponse, Error> {
        let params = self.signed(request.params(Utc::now().timestamp()));

        let mut form = params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value));

        form = match &request.source {
            UploadSource::File(path) => {
                let content =
                    tokio::fs::read(path)
                        .await
                        .map_err(|cause| Error::ReadSourceError {
                            path: path.display().to_string(),
                            cause,
                        })?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| request.public_id.to_owned());

                form.part("file", Part::bytes(content).file_name(file_name))
            }
            UploadSource::Remote(uri) => form.text("file", uri.to_owned()),
        };

        log::debug!(
            "uploading {} to {}/{}",
            request.public_id,
            request.folder,
            self.credentials.cloud_name
        );

        self.client
            .post(self.endpoint("image/upload"))
            .default_headers()
            .multipart(form)
            .send()
            .await?
            .handle()
            .await
    }

    pub async fn destroy(&self, public_id: &str) -> Result<DestroyResponse, Error> {
        let mut params = BTreeMap::new();
        params.insert("public_id".to_owned(), public_id.to_owned());
        params.insert("timestamp".to_owned(), Utc::now().timestamp().to_string());

        self.client
            .post(self.endpoint("image/destroy"))
            .default_headers()
            .form(&self.signed(params))
            .send()
            .await?
            .handle()
            .await
    }

    pub async fn ping(&self) -> Result<PingResponse, Error> {
        self.client
            .get(self.endpoint("ping"))
            .admin_auth(&self.credentials)
            .send()
            .await?
            .handle()
            .await
    }

    pub async fn usage(&self) -> Result<UsageResponse, Error> {
        self.client
            .get(self.endpoint("usage"))
            .admin_auth(&self.credentials)
            .send()
            .await?
            .handle()
            .await
    }

    pub async fn create_folder(&self, path: &str) -> Result<FolderResponse, Error> {
        self.client
            .post(self.endpoint(&format!("folders/{}", path.trim_matches('/'))))
            .admin_auth(&self.credentials)
            .send()
            .await?
            .handle()
            .await
    }
}

impl Uploader for CloudinaryClient {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, Error> {
        self.upload_image(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::{Matcher, Server};
    use std::{fs, path::PathBuf};
    use tempdir::TempDir;

    const UPLOAD_RESPONSE: &str = r#"{
        "public_id": "tuneatlife/experts/coach-alex-rivera-avatar",
        "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/tuneatlife/experts/coach-alex-rivera-avatar.webp",
        "width": 400,
        "height": 400,
        "format": "webp",
        "bytes": 20480,
        "created_at": "2024-05-01T10:00:00Z"
    }"#;

    fn client(url: String) -> CloudinaryClient {
        CloudinaryClient::with_api_base(Credentials::new("demo", "key", "secret"), url)
    }

    #[tokio::test]
    async fn should_upload_remote_source() -> Result<()> {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .match_header("user-agent", "tuneatlife-assets")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_owned()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="public_id""#.to_owned()),
                Matcher::Regex(r#"name="signature""#.to_owned()),
                Matcher::Regex(r#"name="api_key""#.to_owned()),
                Matcher::Regex(r#"name="signature_algorithm"\s+sha256"#.to_owned()),
                Matcher::Regex("data:image/png;base64,AAAA".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(UPLOAD_RESPONSE)
            .create_async()
            .await;

        let request = UploadRequest::new(
            UploadSource::Remote("data:image/png;base64,AAAA".to_owned()),
            "tuneatlife/experts",
            "coach-alex-rivera-avatar",
        );

        let response = client(server.url()).upload_image(&request).await?;

        mock.assert_async().await;
        assert_eq!(
            response.public_id,
            "tuneatlife/experts/coach-alex-rivera-avatar"
        );
        assert_eq!(response.width, 400);
        assert_eq!(response.bytes, 20480);

        Ok(())
    }

    #[tokio::test]
    async fn should_upload_file_source() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("upload")?;
        let path = dir.path().join("alex-rivera.png");
        fs::write(&path, b"not really a png")?;

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .with_status(200)
            .with_body(UPLOAD_RESPONSE)
            .create_async()
            .await;

        let request = UploadRequest::new(UploadSource::File(path), "tuneatlife/experts", "alex");
        let response = client(server.url()).upload(&request).await?;

        mock.assert_async().await;
        assert_eq!(response.format, "webp");

        dir.close()?;
        Ok(())
    }

    #[tokio::test]
    async fn should_fail_on_missing_file() {
        let request = UploadRequest::new(
            UploadSource::File(PathBuf::from("/definitely/missing.png")),
            "tuneatlife",
            "missing",
        );

        let result = client("http://127.0.0.1:9".to_owned())
            .upload_image(&request)
            .await;

        assert!(matches!(result, Err(Error::ReadSourceError { .. })));
    }

    #[tokio::test]
    async fn should_map_provider_errors() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid api_key key"}}"#)
            .create_async()
            .await;

        let request = UploadRequest::new(UploadSource::Remote("data:,".to_owned()), "", "x");
        let err = client(server.url())
            .upload_image(&request)
            .await
            .expect_err("upload should fail");

        mock.assert_async().await;
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Invalid api_key key (status 401)");
        assert!(crate::cloudinary::troubleshooting(&err)[0].contains("API credentials"));

        Ok(())
    }

    #[tokio::test]
    async fn should_ping_with_basic_auth() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1_1/demo/ping")
            .match_header("authorization", "Basic a2V5OnNlY3JldA==")
            .with_status(200)
            .with_body(r#"{"status":"ok"}"#)
            .create_async()
            .await;

        let response = client(server.url()).ping().await?;

        mock.assert_async().await;
        assert_eq!(response.status, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn should_read_usage() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1_1/demo/usage")
            .with_status(200)
            .with_body(
                r#"{"plan":"Free","credits":{"usage":1.5},"storage":{"usage":5242880},"requests":12}"#,
            )
            .create_async()
            .await;

        let usage = client(server.url()).usage().await?;

        mock.assert_async().await;
        assert_eq!(usage.plan, "Free");
        assert_eq!(usage.storage_megabytes(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn should_destroy_with_signed_form() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/image/destroy")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("public_id".to_owned(), "tuneatlife/test/connection-test".to_owned()),
                Matcher::UrlEncoded("api_key".to_owned(), "key".to_owned()),
                Matcher::UrlEncoded("signature_algorithm".to_owned(), "sha256".to_owned()),
                Matcher::Regex("signature=".to_owned()),
            ]))
            .with_status(200)
            .with_body(r#"{"result":"ok"}"#)
            .create_async()
            .await;

        let response = client(server.url())
            .destroy("tuneatlife/test/connection-test")
            .await?;

        mock.assert_async().await;
        assert_eq!(response.result, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn should_create_folder() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/folders/tuneatlife/experts")
            .with_status(200)
            .with_body(r#"{"success":true,"path":"tuneatlife/experts","name":"experts"}"#)
            .create_async()
            .await;

        let response = client(server.url())
            .create_folder("/tuneatlife/experts/")
            .await?;

        mock.assert_async().await;
        assert!(response.success);
        assert_eq!(response.path, "tuneatlife/experts");

        Ok(())
    }
}
