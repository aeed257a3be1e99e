use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, AppResult};

use super::Classifier;
use super::endpoints;
use super::models::{AnalysisResponse, HealthStatus, SubmissionInput};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze(&self, input: &SubmissionInput) -> AppResult<AnalysisResponse> {
        let url = self.endpoint_url(endpoints::analyze_endpoint())?;
        let form = build_form(input)?;

        tracing::debug!(%url, kind = input_kind(input), "sending analysis request");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        self.parse_json_response(response).await
    }

    pub async fn health(&self) -> AppResult<HealthStatus> {
        let url = self.endpoint_url(endpoints::health_endpoint())?;
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        self.parse_json_response(response).await
    }

    /// Appends `endpoint` to the base URL's own path, so a base such as
    /// `https://host/automail` is kept as a prefix.
    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        url.set_path(&path);
        Ok(url)
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|err| {
                AppError::MalformedResponse(format!("unexpected response from classifier: {err}"))
            });
        }

        Err(map_api_error(status, &body))
    }
}

#[async_trait]
impl Classifier for ClassifierClient {
    async fn classify(&self, input: &SubmissionInput) -> AppResult<AnalysisResponse> {
        self.analyze(input).await
    }
}

fn build_form(input: &SubmissionInput) -> AppResult<Form> {
    let form = match input {
        SubmissionInput::Text(text) => Form::new().text("text", text.clone()),
        SubmissionInput::File(file) => {
            let mut part = Part::bytes(file.data.clone()).file_name(file.name.clone());
            if let Some(mime_type) = &file.mime_type {
                part = part.mime_str(mime_type)?;
            }
            Form::new().part("file", part)
        }
    };

    Ok(form)
}

fn input_kind(input: &SubmissionInput) -> &'static str {
    match input {
        SubmissionInput::Text(_) => "text",
        SubmissionInput::File(_) => "file",
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::Transport(format!("could not reach the classifier: {err}"))
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    detail: Option<serde_json::Value>,
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_detail(body)
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    AppError::Transport(message)
}

fn parse_api_error_detail(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    let detail = envelope.detail?;
    let detail = detail.as_str()?.trim();

    if detail.is_empty() {
        return None;
    }

    Some(detail.to_string())
}
