//! Hugging Face Inference API client for text generation.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const INFERENCE_API_URL: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-large";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_LENGTH: u32 = 150;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.85;

pub struct InferenceClient {
    token: Option<String>,
    endpoint: String,
    http: reqwest::Client,
}

#[derive(Serialize, Debug)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: Parameters,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub max_length: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_length: MAX_LENGTH,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

impl<'a> InferenceRequest<'a> {
    pub fn new(inputs: &'a str) -> Self {
        Self {
            inputs,
            parameters: Parameters::default(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub generated_text: String,
}

impl InferenceClient {
    pub fn new(token: Option<String>) -> Result<Self, Error> {
        Self::with_endpoint(token, INFERENCE_API_URL, REQUEST_TIMEOUT)
    }

    pub fn with_endpoint(
        token: Option<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            token,
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Run one generation for `prompt` and return the first candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let request = InferenceRequest::new(prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("failed to read response: {e}")))?;

        debug!("Inference response status: {status}");

        extract_generated_text(status, &body)
    }
}

/// Validate an inference response and pull out the first candidate's text.
pub fn extract_generated_text(status: StatusCode, body: &str) -> Result<String, Error> {
    if !status.is_success() {
        return Err(Error::Api(format!("{status}: {body}")));
    }

    let candidates: Vec<Candidate> =
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;

    candidates
        .into_iter()
        .next()
        .map(|c| c.generated_text)
        .filter(|text| !text.is_empty())
        .ok_or(Error::Empty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingToken,
    Http(String),
    Api(String),
    Parse(String),
    Empty,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingToken => write!(f, "HF_API_TOKEN is not set"),
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Empty => write!(f, "No text in inference response"),
        }
    }
}

impl std::error::Error for Error {}
