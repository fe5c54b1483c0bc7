mod fallback;
mod prompt;

pub use fallback::{UNAVAILABLE_MESSAGE, compose_fallback};
pub use prompt::{DEFAULT_INSTRUCTIONS, build_prompt, render_catalog};

use crate::{
    Error, Result,
    catalog::Product,
    config::LlmConfig,
    history::ChatContext,
    llm::{CompletionRequest, LlmClient, OpenAiClient},
};
use tracing::{debug, info, warn};

/// Sales assistant that answers chat messages about the catalog.
///
/// [`SalesAssistant::generate_response`] always produces text: any problem
/// with the completion provider is logged and replaced by a locally composed
/// answer.
pub struct SalesAssistant {
    llm_client: Option<Box<dyn LlmClient>>,
    instructions: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl SalesAssistant {
    pub fn new(config: &LlmConfig) -> Self {
        if config.is_configured() {
            info!(
                "Completion provider '{}' configured with model {}",
                config.provider, config.model
            );
            Self::with_client(Box::new(OpenAiClient::new(config.clone())), config)
        } else {
            warn!("No API key configured for the completion provider, answers will use the fallback");
            Self::build(None, config)
        }
    }

    pub fn with_client(llm_client: Box<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self::build(Some(llm_client), config)
    }

    /// Assistant without a completion provider, answering only with the fallback.
    pub fn offline() -> Self {
        Self::build(None, &LlmConfig::default())
    }

    fn build(llm_client: Option<Box<dyn LlmClient>>, config: &LlmConfig) -> Self {
        Self {
            llm_client,
            instructions: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.llm_client.is_some()
    }

    pub async fn generate_response(
        &self,
        user_message: &str,
        products: &[Product],
        context: &ChatContext,
    ) -> String {
        let prompt = build_prompt(&self.instructions, user_message, products, context);

        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Completion provider failed, using fallback answer: {}", e);
                compose_fallback(products)
            }
        }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let llm_client = self
            .llm_client
            .as_ref()
            .ok_or_else(|| Error::llm("completion provider not configured"))?;

        let request = CompletionRequest {
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = llm_client.complete(request).await?;
        if let Some(ref usage) = response.usage {
            debug!(
                "Completion {} used {} tokens",
                response.id, usage.total_tokens
            );
        }

        let text = response.content.trim();
        if text.is_empty() {
            return Err(Error::llm("completion provider returned an empty answer"));
        }

        Ok(text.to_string())
    }
}
