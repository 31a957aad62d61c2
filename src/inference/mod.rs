pub mod ollama;

use crate::utils::error::AppResult;
use async_trait::async_trait;
use serde::Serialize;

pub use ollama::OllamaClient;

/// Body of a non-streaming generation request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub temperature: f64,
}

impl GenerateRequest {
    pub fn new(model: &str, prompt: &str, temperature: f64) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            temperature,
        }
    }
}

/// A text-generation backend.
///
/// Implementations return the generated text untrimmed; every failure is
/// reported as [`crate::utils::error::AppError::Connectivity`].
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> AppResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest::new("llama3.1:latest", "Hello", 0.7);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3.1:latest",
                "prompt": "Hello",
                "stream": false,
                "temperature": 0.7
            })
        );
    }
}
