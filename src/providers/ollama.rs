use anyhow::{anyhow, Result};
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama client for interacting with Ollama API
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Optional rate limit in requests per minute
    rate_limit: Option<u32>,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Top-p sampling (default: 0.9)
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Creation timestamp
    pub created_at: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

/// Version response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    /// Server version string
    pub version: String,
}

/// Builder methods for GenerationRequest - API surface for library consumers
#[allow(dead_code)]
impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        match &mut self.options {
            Some(options) => options.temperature = Some(temperature),
            None => {
                self.options = Some(GenerationOptions {
                    temperature: Some(temperature),
                    top_p: None,
                    num_predict: None,
                });
            }
        }
        self
    }

    /// Disable streaming for this request
    pub fn no_stream(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

/// Ollama client implementation - some methods are API surface for library consumers
#[allow(dead_code)]
impl Ollama {
    /// Create a new Ollama client with the specified base URL
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::new_with_config(host, port, 3, 1000, None)
    }

    /// Create a new Ollama client with retry and rate-limit configuration.
    ///
    /// Uses connection pooling for better performance with concurrent
    /// requests. Ollama typically speaks HTTP/1.1, so HTTP/2 is not forced.
    pub fn new_with_config(
        host: impl Into<String>,
        port: u16,
        max_retries: u32,
        backoff_base_ms: u64,
        rate_limit: Option<u32>,
    ) -> Self {
        let host = host.into();

        // Construct a proper URL with scheme and port
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            let url_parts: Vec<&str> = host.split("://").collect();
            if url_parts.len() == 2 {
                let scheme = url_parts[0];
                let host_part = url_parts[1];

                if host_part.contains(':') {
                    host
                } else {
                    format!("{}://{}:{}", scheme, host_part, port)
                }
            } else {
                format!("http://localhost:{}", port)
            }
        } else {
            format!("http://{}:{}", host, port)
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .pool_max_idle_per_host(20)
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
            rate_limit,
        }
    }

    /// Generate text from the Ollama API with retry logic
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/api/generate", self.base_url);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            if attempt > 0 {
                let backoff = self.backoff_base_ms * (1 << (attempt - 1));
                debug!("Retrying Ollama request (attempt {}) after {}ms", attempt + 1, backoff);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            } else if let Some(rate_limit) = self.rate_limit {
                // Convert requests per minute to a pacing delay
                let delay_ms = 60_000 / u64::from(rate_limit.max(1));
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let response_result = self.client.post(&url).json(&request).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let response_text = response
                            .text()
                            .await
                            .map_err(|e| anyhow!("Failed to get response text from Ollama API: {}", e))?;

                        match serde_json::from_str::<GenerationResponse>(&response_text) {
                            Ok(generated) => return Ok(generated),
                            Err(e) => {
                                error!("Failed to parse Ollama API response: {}", e);
                                last_error = Some(anyhow!("Failed to parse Ollama response: {}", e));
                            }
                        }
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        last_error = Some(anyhow!("Ollama API error ({}): {}", status, error_text));
                    }
                }
                Err(e) => {
                    last_error = Some(anyhow!("Failed to send request to Ollama API: {}", e));
                }
            }

            attempt += 1;
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Ollama request failed with no recorded error")))
    }

    /// Get the Ollama server version
    pub async fn version(&self) -> Result<String> {
        let url = format!("{}/api/version", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach Ollama at {}: {}", self.base_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Ollama version check failed with status {}", status));
        }

        let version = response
            .json::<VersionResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse Ollama version response: {}", e))?;

        Ok(version.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_withBareHost_shouldAddSchemeAndPort() {
        let client = Ollama::new("localhost", 11434);
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_new_withSchemeAndPortInHost_shouldKeepHostAsIs() {
        let client = Ollama::new("http://10.0.0.5:4242", 11434);
        assert_eq!(client.base_url, "http://10.0.0.5:4242");
    }

    #[test]
    fn test_new_withSchemeNoPort_shouldAppendPort() {
        let client = Ollama::new("https://ollama.internal", 443);
        assert_eq!(client.base_url, "https://ollama.internal:443");
    }

    #[test]
    fn test_generation_request_builder_shouldSerializeWithoutNones() {
        let request = GenerationRequest::new("llama2", "hello").temperature(0.3);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"llama2\""));
        assert!(json.contains("\"temperature\":0.3"));
        assert!(!json.contains("top_p"));
    }
}
