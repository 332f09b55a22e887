//! Main Clarifai API client.
//!
//! The client owns the OAuth2 credentials and the current access token,
//! dispatches JSON and multipart file requests, and re-authenticates at most
//! once per logical call when the token is rejected.

use crate::auth::AuthClient;
use crate::error::{ClarifaiError, Result};
use crate::types::{ApiRequest, Attempt, ClientConfig, API_VERSION, UNASSIGNED_TOKEN};
use crate::upload::build_file_form;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Mutable session state shared across in-flight requests.
///
/// The token is only ever replaced wholesale under the write guard, so a
/// concurrent request can never observe a partially updated value.
#[derive(Debug)]
struct SessionState {
    access_token: String,
    throttled: bool,
}

/// Client for the Clarifai image and video recognition API.
///
/// Higher-level operations are expressed as "endpoint name + JSON body" or
/// "endpoint name + file list" fed into [`request_json`](Self::request_json)
/// and [`request_files`](Self::request_files); response payloads are returned
/// as raw bytes for the caller to interpret.
///
/// # Example
///
/// ```ignore
/// use clarifai_client::{ClarifaiClient, ClientConfig, Method};
///
/// let client = ClarifaiClient::new(ClientConfig::new("client-id", "client-secret"))?;
///
/// let body = serde_json::json!({ "url": "https://example.com/cat.jpg" });
/// let response = client.request_json(Method::POST, "tag", Some(&body)).await?;
/// println!("{}", String::from_utf8_lossy(&response));
/// ```
pub struct ClarifaiClient {
    http: Client,
    client_id: String,
    client_secret: String,
    api_root: String,
    state: Arc<RwLock<SessionState>>,
}

impl ClarifaiClient {
    /// Create a client from the given configuration.
    ///
    /// No network call is made here; authentication is deferred until a
    /// request is first rejected as unauthorized or the caller asks for a
    /// token explicitly.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_root = normalize_api_root(&config.api_root)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("clarifai-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            client_id: config.client_id,
            client_secret: config.client_secret,
            api_root,
            state: Arc::new(RwLock::new(SessionState {
                access_token: UNASSIGNED_TOKEN.to_string(),
                throttled: false,
            })),
        })
    }

    /// Base URL the client is pointed at.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Current access token.
    ///
    /// Reads back the `"unassigned"` sentinel until the first successful
    /// token exchange.
    pub async fn access_token(&self) -> String {
        self.state.read().await.access_token.clone()
    }

    /// Whether the most recent response from the API was a rate limit.
    pub async fn is_throttled(&self) -> bool {
        self.state.read().await.throttled
    }

    /// Send a JSON request to an endpoint and return the raw response body.
    ///
    /// A `None` body is sent as the empty JSON object, not as `null`.
    pub async fn request_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&T>,
    ) -> Result<Vec<u8>> {
        let body = match body {
            Some(value) => serde_json::to_value(value)?,
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        self.dispatch(ApiRequest::Json {
            method,
            endpoint: endpoint.to_string(),
            body,
        })
        .await
    }

    /// Upload files to an endpoint and return the raw response body.
    ///
    /// All files go out in a single multipart POST; the endpoint name rides
    /// along in the form's `op` field.
    pub async fn request_files(
        &self,
        endpoint: &str,
        paths: &[impl AsRef<Path>],
    ) -> Result<Vec<u8>> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();

        self.dispatch(ApiRequest::Files {
            endpoint: endpoint.to_string(),
            paths,
        })
        .await
    }

    /// Exchange the client credentials for a fresh access token and store it.
    ///
    /// The stored token is left untouched if the exchange fails.
    pub async fn request_access_token(&self) -> Result<()> {
        let current = self.access_token().await;
        let auth = AuthClient::new(&self.http, &self.api_root);
        let token = auth
            .request_access_token(&self.client_id, &self.client_secret, &current)
            .await?;

        self.state.write().await.access_token = token.access_token;
        Ok(())
    }

    /// Dispatch a request and interpret the response.
    ///
    /// A 401 on the first attempt re-authenticates and re-issues the original
    /// request exactly once; every other failure class surfaces verbatim so
    /// the caller can apply its own policy.
    async fn dispatch(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let mut attempt = Attempt::First;

        loop {
            let response = self.send(&request).await?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::CREATED => {
                    let mut state = self.state.write().await;
                    if state.throttled {
                        debug!("Rate limit cleared");
                        state.throttled = false;
                    }
                    drop(state);

                    return Ok(response.bytes().await?.to_vec());
                }
                StatusCode::UNAUTHORIZED => match attempt {
                    Attempt::First => {
                        warn!("Access token rejected, re-authenticating");
                        self.request_access_token().await?;
                        attempt = Attempt::Retried;
                    }
                    Attempt::Retried => return Err(ClarifaiError::TokenInvalid),
                },
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!("Rate limited by the API");
                    self.state.write().await.throttled = true;
                    return Err(ClarifaiError::Throttled);
                }
                StatusCode::BAD_REQUEST => {
                    let message = response.text().await.unwrap_or_default();
                    return Err(ClarifaiError::RequestRejected { message });
                }
                StatusCode::INTERNAL_SERVER_ERROR => {
                    let message = response.text().await.unwrap_or_default();
                    return Err(ClarifaiError::ServiceError { message });
                }
                other => return Err(ClarifaiError::UnexpectedStatus(other.as_u16())),
            }
        }
    }

    /// Issue a single attempt of the given request.
    ///
    /// The body is rebuilt per attempt: JSON from the retained value,
    /// multipart forms by re-opening the files.
    async fn send(&self, request: &ApiRequest) -> Result<Response> {
        match request {
            ApiRequest::Json {
                method,
                endpoint,
                body,
            } => {
                let url = self.build_url(endpoint);
                let token = self.access_token().await;
                let bytes = serde_json::to_vec(body)?;

                debug!(url = %url, method = %method, "Sending JSON request");

                let response = self
                    .http
                    .request(method.clone(), &url)
                    .bearer_auth(&token)
                    .header(CONTENT_TYPE, "application/json")
                    .header(CONTENT_LENGTH, bytes.len())
                    .body(bytes)
                    .send()
                    .await?;

                Ok(response)
            }
            ApiRequest::Files { endpoint, paths } => {
                let url = self.build_url(endpoint);
                let token = self.access_token().await;
                let form = build_file_form(endpoint, paths).await?;

                debug!(url = %url, files = paths.len(), "Sending multipart request");

                let response = self
                    .http
                    .post(&url)
                    .bearer_auth(&token)
                    .multipart(form)
                    .send()
                    .await?;

                Ok(response)
            }
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.api_root, API_VERSION, endpoint)
    }
}

/// Validate and normalize the configured API root.
fn normalize_api_root(api_root: &str) -> Result<String> {
    if api_root.is_empty() {
        return Err(ClarifaiError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = url::Url::parse(api_root)
        .map_err(|e| ClarifaiError::InvalidUrl(format!("{}: {}", api_root, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClarifaiError::InvalidUrl(format!(
                "unsupported scheme {}://",
                other
            )))
        }
    }

    Ok(api_root.trim_end_matches('/').to_string())
}
