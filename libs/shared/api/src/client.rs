use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    multipart::{Form, Part},
    Client, Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

/// Query string pairs appended to a request.
pub type Query<'a> = &'a [(&'a str, String)];

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AppError::Auth("Token contains invalid characters".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        query: Option<Query<'_>>,
    ) -> Result<RequestBuilder, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(auth_token)?);

        if let Some(params) = query {
            req = req.query(params);
        }

        Ok(req)
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Response, AppError> {
        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);
            return Err(AppError::from_status(
                status.as_u16(),
                extract_detail(&error_text, status.canonical_reason().unwrap_or("error")),
            ));
        }

        Ok(response)
    }

    /// Sends a request and decodes the JSON response body.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        query: Option<Query<'_>>,
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut req = self.build(method, path, auth_token, query)?;
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let text = self.read_text(req).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`ApiClient::request`], but an empty or `null` body yields `None`.
    pub async fn request_optional<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        query: Option<Query<'_>>,
        body: Option<Value>,
    ) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let mut req = self.build(method, path, auth_token, query)?;
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let text = self.read_text(req).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn read_text(&self, req: RequestBuilder) -> Result<String, AppError> {
        let response = self.execute(req).await?;
        response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))
    }

    /// Sends a request whose response body is not needed.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        query: Option<Query<'_>>,
        body: Option<Value>,
    ) -> Result<(), AppError> {
        let mut req = self.build(method, path, auth_token, query)?;
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        self.execute(req).await?;
        Ok(())
    }

    /// Multipart upload of a single file field.
    pub async fn upload(
        &self,
        path: &str,
        auth_token: Option<&str>,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, AppError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part(field.to_string(), part);

        let req = self
            .build(Method::POST, path, auth_token, None)?
            .multipart(form);

        let text = self.read_text(req).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pulls the human readable message out of a backend error body.
///
/// Accepts `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}` and
/// `{"message": "..."}`; anything else falls back to the raw text.
pub fn extract_detail(body: &str, fallback: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let message = parsed.as_ref().and_then(|value| {
        match value.get("detail") {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(Value::Array(items)) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            _ => value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    });

    match message {
        Some(msg) => msg,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => fallback.to_string(),
    }
}
