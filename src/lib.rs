//! Clarifai API Client
//!
//! Async HTTP client library for the Clarifai v1 image and video recognition
//! API.
//!
//! # Features
//!
//! - **Authentication**: OAuth2 client-credential token exchange, with one
//!   automatic re-authentication when a request is rejected as unauthorized
//! - **JSON requests**: arbitrary verb and serializable body against any
//!   endpoint
//! - **File uploads**: multipart posts that stream files from disk without
//!   leaking local file names
//! - **Rate-limit tracking**: a throttled flag mirroring the API's 429
//!   responses
//!
//! # Example
//!
//! ```ignore
//! use clarifai_client::{ClarifaiClient, ClientConfig, Method};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClarifaiClient::new(ClientConfig::new("client-id", "client-secret"))?;
//!
//!     // Tag an image by URL
//!     let body = serde_json::json!({ "url": "https://example.com/cat.jpg" });
//!     let response = client.request_json(Method::POST, "tag", Some(&body)).await?;
//!     println!("{}", String::from_utf8_lossy(&response));
//!
//!     // Or upload local files
//!     let response = client.request_files("tag", &["cat.jpg", "dog.jpg"]).await?;
//!     println!("{}", String::from_utf8_lossy(&response));
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod types;
mod upload;

// Re-export main types
pub use client::ClarifaiClient;
pub use error::{ClarifaiError, Result};
pub use types::{ClientConfig, TokenResponse, DEFAULT_API_ROOT, UNASSIGNED_TOKEN};

// Re-export the verb type accepted by the JSON entry point
pub use reqwest::Method;

// Re-export the auth sub-client for direct use if needed
pub use auth::AuthClient;
