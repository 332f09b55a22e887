//! OAuth2 client-credential token exchange.

use crate::error::{ClarifaiError, Result};
use crate::types::{TokenResponse, API_VERSION};
use reqwest::Client;
use tracing::{debug, info};

/// Authentication client for the Clarifai token endpoint.
pub struct AuthClient<'a> {
    http: &'a Client,
    api_root: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, api_root: &'a str) -> Self {
        Self { http, api_root }
    }

    /// Exchange client credentials for a fresh access token.
    ///
    /// The current bearer token is attached even though the token endpoint
    /// does not require one; the Authorization header is sent on every
    /// request uniformly. The response body is decoded without status
    /// interpretation, so an error payload surfaces as a decode failure.
    pub async fn request_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        current_token: &str,
    ) -> Result<TokenResponse> {
        let url = format!("{}/{}/token", self.api_root, API_VERSION);
        debug!(url = %url, "Requesting access token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(current_token)
            .form(&params)
            .send()
            .await?;

        let body = response.bytes().await?;
        let token: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            ClarifaiError::ParseError(format!("failed to parse token response: {}", e))
        })?;

        info!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            "Access token acquired"
        );

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    // Covered end to end by the mock-server tests in tests/client_tests.rs.
}
