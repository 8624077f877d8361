//! HTTP implementation of the inference port.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use llamapocket_core::ports::{InferenceClient, InferenceError};

use crate::config::InferenceClientConfig;
use crate::wire::{GenerateRequest, parse_generate_response};

/// Production inference client using reqwest with retry logic.
///
/// Implements exponential backoff for transient failures (5xx, network,
/// timeout); 4xx responses and malformed bodies fail immediately.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl HttpInferenceClient {
    /// Create a client from the given configuration.
    ///
    /// Fails if the configured base URL does not parse.
    pub fn new(config: &InferenceClientConfig) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(&config.base_url)?.join("generate")?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// One attempt against the endpoint, no retry.
    async fn try_complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateRequest { input: prompt })
            .send()
            .await
            .map_err(|err| self.map_transport_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(&err))?;
        parse_generate_response(&body)
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            InferenceError::network(err.to_string())
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let mut last_error: Option<InferenceError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tokio::time::sleep(delay).await;
            }

            match self.try_complete(prompt).await {
                Ok(completion) => return Ok(completion),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    debug!(error = %err, attempt, "transient inference failure; retrying");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        // Unreachable unless every attempt was transient; surface the last.
        Err(last_error
            .unwrap_or_else(|| InferenceError::network("inference retries exhausted")))
    }
}
