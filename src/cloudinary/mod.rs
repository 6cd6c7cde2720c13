mod client;
mod credentials;
mod hints;
mod request;
mod response;
mod signature;

pub use client::CloudinaryClient;
pub use credentials::{Credentials, CredentialsError, PartialCredentials};
pub use hints::troubleshooting;
pub use request::{UploadRequest, UploadSource};
pub use response::{
    DestroyResponse, FolderResponse, PingResponse, UploadResponse, UsageMetric, UsageResponse,
};
pub use signature::sign;

pub(crate) use credentials::CLOUD_NAME_VARS;

use crate::http::Error;

/// Anything that can store an image and report where it ended up.
pub trait Uploader {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, Error>;
}
