//! HTTP client for the OpenAI endpoints this crate talks to.
//!
//! [`OpenAiClient`] implements [`crate::threads::ThreadsApi`] (see
//! `threads::api`) and carries the completion and transcription helpers as
//! inherent methods.

pub mod http;

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::util::timeout::with_timeout;

use self::http::{assistants_headers, parse_json, shared_client};

/// Client bound to one [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: Arc<ClientConfig>,
}

impl OpenAiClient {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    fn assistants_headers(&self) -> HeaderMap {
        assistants_headers(&self.config)
    }

    /// GET a thread/run endpoint.
    pub(crate) async fn get_beta<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.assistants_headers();
        with_timeout(self.config.timeout(), async {
            let response = shared_client()
                .get(url)
                .headers(headers)
                .query(query)
                .send()
                .await?;
            parse_json(response).await
        })
        .await
    }

    /// POST JSON to a thread/run endpoint.
    pub(crate) async fn post_beta<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.assistants_headers();
        with_timeout(self.config.timeout(), async {
            let response = shared_client()
                .post(url)
                .headers(headers)
                .json(body)
                .send()
                .await?;
            parse_json(response).await
        })
        .await
    }
}
