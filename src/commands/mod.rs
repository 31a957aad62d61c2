pub mod configure;
pub mod preview;
pub mod run;
pub mod settings;

use crate::config::Config;
use crate::inference::OllamaClient;
use crate::responder::SurveyResponder;
use crate::utils::error::AppResult;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build a responder talking to the configured Ollama endpoint.
pub fn build_responder(config: Config) -> AppResult<SurveyResponder<OllamaClient>> {
    let client = OllamaClient::new(&config.model)?;
    tracing::debug!(url = %client.base_url(), "Using inference endpoint");
    SurveyResponder::new(config, client)
}

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
