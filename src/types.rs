//! Types for Clarifai API requests and responses.

use reqwest::Method;
use serde::Deserialize;
use std::path::PathBuf;

/// Production API root.
pub const DEFAULT_API_ROOT: &str = "https://api.clarifai.com";

/// Fixed version segment used when building endpoint URLs.
pub const API_VERSION: &str = "v1";

/// Sentinel token value held until the first successful token exchange.
pub const UNASSIGNED_TOKEN: &str = "unassigned";

/// Configuration for connecting to the Clarifai API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Base URL of the API
    pub api_root: String,
}

impl ClientConfig {
    /// Create a config pointing at the production API.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }

    /// Create a config with an overridden API root (e.g. a test double).
    pub fn with_api_root(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_root: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_root: api_root.into(),
        }
    }
}

/// Response from the token exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Token validity in seconds
    pub expires_in: u64,
    pub scope: String,
    pub token_type: String,
}

/// A request carried through the dispatch and retry path.
///
/// JSON and file requests run through the same response state machine; the
/// variant tag decides how the body is rebuilt for the single retry.
#[derive(Debug, Clone)]
pub(crate) enum ApiRequest {
    Json {
        method: Method,
        endpoint: String,
        body: serde_json::Value,
    },
    Files {
        endpoint: String,
        paths: Vec<PathBuf>,
    },
}

/// Whether a dispatch is the first attempt or the single permitted retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    First,
    Retried,
}
