//! Configuration loading
//!
//! All run parameters come from the process environment. Values are
//! validated up front so that nothing touches the network when a required
//! value is missing or the artifact path is wrong.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the storage access key
pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY";

/// Environment variable holding the storage secret key
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_KEY";

/// Environment variable holding the top-level key prefix
pub const ENV_FOLDER_NAME: &str = "FOLDER_NAME";

/// Environment variable holding the release version
pub const ENV_VERSION_NUMBER: &str = "VERSION_NUMBER";

/// Environment variable holding the local artifact path
pub const ENV_PATH_TO_FILE: &str = "PATH_TO_FILE";

/// Optional endpoint override for S3-compatible servers
pub const ENV_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";

/// Static storage credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

// Keep the secret out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Validated parameters for one publish run
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Storage credentials
    pub credentials: Credentials,

    /// Top-level object key prefix
    pub folder_name: String,

    /// Second-level key prefix, also substituted into templates
    pub version_number: String,

    /// Local artifact to publish
    pub path_to_file: PathBuf,

    /// Custom S3 endpoint, if any
    pub endpoint_url: Option<String>,
}

impl PublishConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    ///
    /// Absent and empty values are treated the same way. Required values are
    /// checked in a fixed order and the first missing one is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str, field: &'static str| {
            non_empty(lookup(var)).ok_or(Error::MissingConfiguration(field))
        };

        let access_key = required(ENV_ACCESS_KEY, "access key")?;
        let secret_key = required(ENV_SECRET_KEY, "secret key")?;
        let folder_name = required(ENV_FOLDER_NAME, "folder name")?;
        let version_number = required(ENV_VERSION_NUMBER, "version number")?;
        let path_to_file = PathBuf::from(required(ENV_PATH_TO_FILE, "path to file")?);

        ensure_file(&path_to_file)?;

        Ok(Self {
            credentials: Credentials::new(access_key, secret_key),
            folder_name,
            version_number,
            path_to_file,
            endpoint_url: non_empty(lookup(ENV_ENDPOINT_URL)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Check that `path` names an existing regular file
fn ensure_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(Error::FileNotFound(path.to_path_buf())),
    }
}
