use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::public::{ChatReply, ErrorBody, HealthResponse, StartChatResponse, SummarizeResponse};
use crate::core::config::DEFAULT_API_URL;
use crate::document::SelectedFile;

/// HTTP client for the document service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a document and get back its summary.
    pub async fn summarize(&self, file: &SelectedFile) -> Result<SummarizeResponse, ApiError> {
        let endpoint = "/api/summarize";
        let form = file_form(file);
        let request = self.http.post(self.url(endpoint)).multipart(form);
        self.execute_json(endpoint, request).await
    }

    /// Upload a document and open a chat session about it.
    pub async fn start_chat(&self, file: &SelectedFile) -> Result<StartChatResponse, ApiError> {
        let endpoint = "/api/start_chat";
        let form = file_form(file);
        let request = self.http.post(self.url(endpoint)).multipart(form);
        self.execute_json(endpoint, request).await
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatReply, ApiError> {
        let endpoint = format!("/api/chat/{}", urlencoding::encode(session_id));
        let form = Form::new().text("message", message.to_string());
        let request = self.http.post(self.url(&endpoint)).multipart(form);
        self.execute_json(&endpoint, request).await
    }

    /// End a chat session. Only the status matters, the body is ignored.
    pub async fn end_chat(&self, session_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("/api/end_chat/{}", urlencoding::encode(session_id));
        let request = self.http.delete(self.url(&endpoint));
        self.execute(&endpoint, request).await?;
        Ok(())
    }

    pub async fn health(&self, name: &str) -> Result<HealthResponse, ApiError> {
        let endpoint = format!("/health/{}", urlencoding::encode(name));
        let request = self.http.get(self.url(&endpoint));
        self.execute_json(&endpoint, request).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        tracing::debug!("Calling {}{}", self.base_url, endpoint);

        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            if let Ok(body) = response.json::<ErrorBody>().await {
                tracing::debug!("{} error body: {}", endpoint, body.error);
            }
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(endpoint, request).await?;
        response.json::<T>().await.map_err(|source| {
            if source.is_decode() {
                ApiError::Decode {
                    endpoint: endpoint.to_string(),
                    source,
                }
            } else {
                ApiError::Transport {
                    endpoint: endpoint.to_string(),
                    source,
                }
            }
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn file_form(file: &SelectedFile) -> Form {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type()));
    let part = Part::bytes(file.contents().to_vec())
        .file_name(file.name().to_string())
        .headers(headers);
    Form::new().part("file", part)
}
