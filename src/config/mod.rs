//! Client configuration (code > env > `.env` file).
//!
//! A [`ClientConfig`] is built once per process, wrapped in an `Arc`, and
//! handed to every component that talks to the service. It is never mutated
//! after construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ThreadrunError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Credentials and endpoint settings for the OpenAI API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    organization: Option<String>,
    project: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            project: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// `OPENAI_API_KEY` is required. `OPENAI_BASE_URL`, `OPENAI_ORG_ID`,
    /// `OPENAI_PROJECT_ID` and `OPENAI_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from a specific dotenv file, falling back to the process
    /// environment for anything the file does not set.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file_vars = Vec::new();
        for item in dotenvy::from_path_iter(path).map_err(|e| {
            ThreadrunError::Configuration(format!("Failed to read {}: {e}", path.display()))
        })? {
            let (key, value) = item.map_err(|e| {
                ThreadrunError::Configuration(format!("Invalid entry in {}: {e}", path.display()))
            })?;
            file_vars.push((key, value));
        }

        Self::from_vars(|name| {
            file_vars
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .or_else(|| std::env::var(name).ok())
        })
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ThreadrunError::Configuration("OPENAI_API_KEY is not set".to_string())
            })?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        config.organization = lookup("OPENAI_ORG_ID").filter(|v| !v.trim().is_empty());
        config.project = lookup("OPENAI_PROJECT_ID").filter(|v| !v.trim().is_empty());

        if let Some(raw) = lookup("OPENAI_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ThreadrunError::Configuration(format!("OPENAI_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            if secs == 0 {
                return Err(ThreadrunError::Configuration(
                    "OPENAI_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
