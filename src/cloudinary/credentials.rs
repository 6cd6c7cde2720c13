use std::{env, fmt};
use thiserror::Error;

pub(crate) const CLOUD_NAME_VARS: [&str; 2] = ["CLOUDINARY_CLOUD_NAME", "REACT_APP_CLOUDINARY_CLOUD_NAME"];
const API_KEY_VARS: [&str; 2] = ["CLOUDINARY_API_KEY", "REACT_APP_CLOUDINARY_API_KEY"];
const API_SECRET_VARS: [&str; 2] = ["CLOUDINARY_API_SECRET", "REACT_APP_CLOUDINARY_API_SECRET"];

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Missing cloud name: set {} (find it at https://console.cloudinary.com/)", CLOUD_NAME_VARS[0])]
    MissingCloudName,
    #[error("Missing API credentials: set {} and {} in .env.local", API_KEY_VARS[0], API_SECRET_VARS[0])]
    MissingApiCredentials,
}

/// Whatever credentials the environment provides; nothing is required.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PartialCredentials {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl PartialCredentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|value| value.trim().to_owned())
                .find(|value| !value.is_empty())
        };

        PartialCredentials {
            cloud_name: first(&CLOUD_NAME_VARS[..]),
            api_key: first(&API_KEY_VARS[..]),
            api_secret: first(&API_SECRET_VARS[..]),
        }
    }

    pub fn complete(self) -> Result<Credentials, CredentialsError> {
        let cloud_name = self.cloud_name.ok_or(CredentialsError::MissingCloudName)?;

        match (self.api_key, self.api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => Err(CredentialsError::MissingApiCredentials),
        }
    }
}

impl fmt::Debug for PartialCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn from_env() -> Result<Credentials, CredentialsError> {
        PartialCredentials::from_env().complete()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
