// src/tree/api.rs
//! Talks to the GitHub REST API over `reqwest`.

use super::{ApiResponse, Endpoint, TreeApi};
use crate::constants::{GITHUB_ACCEPT, GITHUB_TOKEN_ENV};
use crate::errors::{Error, Result, TransportFailure};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::env;
use std::time::Duration;
use url::Url;

/// A blocking [`TreeApi`] backed by the GitHub REST API.
///
/// To avoid the anonymous rate limit, set a `GITHUB_TOKEN` environment
/// variable; it is sent as a bearer token.
#[derive(Debug, Clone)]
pub struct GitHubTreeApi {
    client: Client,
    base: Url,
}

impl GitHubTreeApi {
    /// Builds a client for the repository API at `base` with a per-request `timeout`.
    ///
    /// # Errors
    /// Returns `Error::Config` if `base` cannot carry path segments, the token
    /// is not a valid header value, or the HTTP client cannot be built.
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "'{}' cannot be used as an API base URL",
                base
            )));
        }
        let client = build_reqwest_client(timeout, env::var(GITHUB_TOKEN_ENV).ok())?;
        Ok(Self { client, base })
    }

    /// The absolute URL for `endpoint`.
    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.path_segments());
        }
        if let Some((key, value)) = endpoint.query() {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }
}

impl TreeApi for GitHubTreeApi {
    fn get(&self, endpoint: &Endpoint) -> std::result::Result<ApiResponse, TransportFailure> {
        let url = self.url_for(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        // Reading the body can still time out, which counts as a transport failure.
        let body = response.text()?;
        log::debug!("HTTP {} ({} bytes) for {}", status, body.len(), endpoint);
        Ok(ApiResponse { status, body })
    }
}

/// Builds a `reqwest` client with default headers for GitHub API interaction.
fn build_reqwest_client(timeout: Duration, token: Option<String>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("geosite-files/", env!("CARGO_PKG_VERSION"))),
    );

    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| Error::Config(format!("{} is not a valid header value", GITHUB_TOKEN_ENV)))?;
        headers.insert(AUTHORIZATION, value);
        log::debug!("Using {} for authentication.", GITHUB_TOKEN_ENV);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
