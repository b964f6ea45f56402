//! HTTP client for the scrap ERP backend
//!
//! Wraps `reqwest` with the session headers the backend expects, maps
//! failures onto [`ClientError`] and normalizes the response envelope.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

mod auth;
mod invoice;
mod scrap;

pub use auth::AuthApi;
pub use invoice::{InvoiceApi, ProcessedInvoiceQuery};
pub use scrap::{EntryQuery, ScrapApi, StockQuery};

/// Longest body excerpt carried by [`ClientError::InvalidJson`]
const INVALID_JSON_EXCERPT: usize = 200;

/// Normalized response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Value,
}

impl ApiResponse {
    /// Bring the backend's response shapes into one envelope:
    /// `{success, message, data}` passes through, objects carrying `Id` or
    /// `message` are a successful payload, anything else is the data itself.
    pub fn normalize(body: Value) -> Self {
        if let Some(object) = body.as_object() {
            if let Some(success) = object.get("success") {
                return Self {
                    success: truthy(success),
                    message: message_of(&body, &["message", "error"]),
                    data: object.get("data").cloned().unwrap_or(Value::Null),
                };
            }
            if object.contains_key("Id") || object.contains_key("message") {
                return Self {
                    success: true,
                    message: message_of(&body, &["message"]).or_else(|| Some("Success".to_string())),
                    data: body,
                };
            }
        }
        Self {
            success: true,
            message: None,
            data: body,
        }
    }

    /// Fail on `success: false`
    pub fn into_result(self) -> ClientResult<Self> {
        if self.success {
            Ok(self)
        } else {
            let message = self
                .message
                .unwrap_or_else(|| "Request was not successful".to_string());
            tracing::warn!(%message, "Backend rejected request");
            Err(ClientError::Rejected(message))
        }
    }

    /// Payload of a successful response
    pub fn into_data(self) -> ClientResult<Value> {
        self.into_result().map(|r| r.data)
    }

    /// Deserialize the payload of a successful response
    pub fn data_as<T: DeserializeOwned>(self) -> ClientResult<T> {
        let data = self.into_data()?;
        serde_json::from_value(data)
            .map_err(|e| ClientError::InvalidJson(format!("Unexpected response shape: {}", e)))
    }
}

/// Backend API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    /// Mask 5xx bodies
    production: bool,
}

impl ApiClient {
    /// Create a new ApiClient
    pub fn new(config: &ApiConfig, production: bool) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            production,
        })
    }

    /// Create a new ApiClient with custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            production: false,
        }
    }

    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn scrap(&self) -> ScrapApi<'_> {
        ScrapApi::new(self)
    }

    pub fn invoice(&self) -> InvoiceApi<'_> {
        InvoiceApi::new(self)
    }

    pub async fn get(&self, session: &Session, endpoint: &str) -> ClientResult<ApiResponse> {
        self.request(session, Method::GET, endpoint, &[], None, None).await
    }

    pub async fn get_query(
        &self,
        session: &Session,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ClientResult<ApiResponse> {
        self.request(session, Method::GET, endpoint, query, None, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<ApiResponse> {
        let body = body.map(to_body).transpose()?;
        self.request(session, Method::POST, endpoint, &[], body, None).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<ApiResponse> {
        let body = body.map(to_body).transpose()?;
        self.request(session, Method::PUT, endpoint, &[], body, None).await
    }

    pub async fn delete(&self, session: &Session, endpoint: &str) -> ClientResult<ApiResponse> {
        self.request(session, Method::DELETE, endpoint, &[], None, None).await
    }

    /// Send one request. An explicit `authorization` replaces the session's
    /// company credentials.
    pub(crate) async fn request(
        &self,
        session: &Session,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        authorization: Option<String>,
    ) -> ClientResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "Sending request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in session.headers() {
            if name == "Authorization" && authorization.is_some() {
                continue;
            }
            builder = builder.header(name, value);
        }
        if let Some(authorization) = authorization {
            builder = builder.header("Authorization", authorization);
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, %url, error = %e, "Network error");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "Session expired or unauthorized");
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await.map_err(ClientError::Network)?;
        let body = parse_body(&text)?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                %url,
                response = %text,
                "API error"
            );
            if self.production && status.is_server_error() {
                return Err(ClientError::ServerError {
                    status: status.as_u16(),
                });
            }
            let message = message_of(&body, &["Message", "message", "ExceptionMessage"])
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ApiResponse::normalize(body))
    }
}

/// Empty body is `{}`
fn parse_body(text: &str) -> ClientResult<Value> {
    if text.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(text).map_err(|_| {
        let excerpt: String = text.chars().take(INVALID_JSON_EXCERPT).collect();
        tracing::error!(body = %excerpt, "Failed to parse response as JSON");
        ClientError::InvalidJson(excerpt)
    })
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::Validation(format!("Invalid request body: {}", e)))
}

/// First non-empty string among `keys`
fn message_of(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        _ => false,
    }
}
