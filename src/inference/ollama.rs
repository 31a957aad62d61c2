use super::{GenerateRequest, InferenceClient};
use crate::config::ModelConfig;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder
                .build()
                .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> AppResult<String> {
        tracing::debug!(model = %request.model, url = %self.base_url, "Sending generate request");

        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Connectivity(format!("Failed to connect to {}: {}", self.base_url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Connectivity(format!(
                "Inference request failed: {} - {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Connectivity(format!("Failed to parse inference response: {}", e)))?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_client_uses_configured_url() {
        let mut config = Config::default().model;
        config.timeout_secs = Some(5);
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434/api/generate");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connectivity_error() {
        // Bind then drop a listener to get a local port nothing is serving on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let mut config = Config::default().model;
        config.base_url = format!("http://127.0.0.1:{}/api/generate", port);
        config.timeout_secs = Some(2);

        let client = OllamaClient::new(&config).unwrap();
        let err = client
            .generate(&GenerateRequest::new("m", "p", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Connectivity(_)));
    }

    /// Serve exactly one HTTP reply on a local port and return its address.
    async fn serve_once(status: &'static str, body: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // The JSON body is the last thing sent and ends with '}'.
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.ends_with(b"}") {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });
        addr
    }

    fn client_for(addr: std::net::SocketAddr) -> OllamaClient {
        let mut config = Config::default().model;
        config.base_url = format!("http://{}/api/generate", addr);
        config.timeout_secs = Some(5);
        OllamaClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_reads_response_field_from_local_server() {
        let addr = serve_once("200 OK", r#"{"model":"m","response":"  agree\n","done":true}"#).await;
        let text = client_for(addr)
            .generate(&GenerateRequest::new("m", "p", 1.0))
            .await
            .unwrap();
        assert_eq!(text, "  agree\n");
    }

    #[tokio::test]
    async fn test_error_status_is_connectivity_error() {
        let addr = serve_once("500 Internal Server Error", r#"{"error":"model not loaded"}"#).await;
        let err = client_for(addr)
            .generate(&GenerateRequest::new("m", "p", 1.0))
            .await
            .unwrap_err();
        match err {
            AppError::Connectivity(msg) => {
                assert!(msg.contains("500"), "unexpected message: {}", msg);
                assert!(msg.contains("model not loaded"));
            }
            other => panic!("expected connectivity error, got {:?}", other),
        }
    }
}
