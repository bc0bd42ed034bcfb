use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponseFormat, JsonSpec};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};
use tracing::{debug, warn};

use super::config::{ComparatorConfig, JudgmentVariant};
use super::error::ComparisonError;
use super::parse::{judgment_schema, parse_judgment};
use super::prompt::{SYSTEM_PROMPT, user_prompt};
use super::{Comparator, validate_text};
use crate::model::Judgment;

const SCHEMA_NAME: &str = "judgment";

/// Comparator backed by a chat model with JSON structured output.
#[derive(Clone)]
pub struct LlmComparator {
    client: Client,
    config: ComparatorConfig,
    options: ChatOptions,
}

impl std::fmt::Debug for LlmComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmComparator")
            .field("config", &self.config)
            .finish()
    }
}

impl LlmComparator {
    /// Builds a `genai` client that authenticates with `config.api_key`.
    ///
    /// Without a key, credentials come from the provider's usual environment
    /// variable (e.g. `OPENAI_API_KEY`).
    pub fn new(config: ComparatorConfig) -> Result<Self, ComparisonError> {
        let client = build_client(config.api_key.clone());
        Self::with_client(client, config)
    }

    pub fn with_client(client: Client, config: ComparatorConfig) -> Result<Self, ComparisonError> {
        config
            .validate()
            .map_err(|reason| ComparisonError::InvalidConfig { reason })?;

        let options = build_options(&config);
        Ok(Self {
            client,
            config,
            options,
        })
    }

    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    pub fn variant(&self) -> JudgmentVariant {
        self.config.variant
    }

    /// Chat request for one comparison; exposed for inspection in tests.
    pub fn build_request(&self, reference: &str, candidate: &str) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(reference, candidate, self.config.variant)),
        ])
    }
}

fn build_client(api_key: Option<String>) -> Client {
    match api_key {
        Some(key) => {
            let resolver = AuthResolver::from_resolver_fn(
                move |_model: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                    Ok(Some(AuthData::from_single(key.clone())))
                },
            );
            Client::builder().with_auth_resolver(resolver).build()
        }
        None => Client::default(),
    }
}

fn build_options(config: &ComparatorConfig) -> ChatOptions {
    let spec = JsonSpec::new(SCHEMA_NAME, judgment_schema(config.variant));
    let mut options = ChatOptions::default().with_response_format(ChatResponseFormat::JsonSpec(spec));
    if let Some(temperature) = config.temperature {
        options = options.with_temperature(temperature);
    }
    options
}

impl Comparator for LlmComparator {
    async fn compare(&self, reference: &str, candidate: &str) -> Result<Judgment, ComparisonError> {
        validate_text("reference", reference, self.config.max_text_chars)?;
        validate_text("candidate", candidate, self.config.max_text_chars)?;

        let request = self.build_request(reference, candidate);

        debug!(
            model = %self.config.model,
            variant = self.config.variant.as_str(),
            reference_len = reference.len(),
            candidate_len = candidate.len(),
            "Requesting comparison"
        );

        let response = self
            .client
            .exec_chat(&self.config.model, request, Some(&self.options))
            .await
            .map_err(|e| {
                warn!(model = %self.config.model, error = %e, "Comparison request failed");
                ComparisonError::Provider {
                    model: self.config.model.clone(),
                    message: e.to_string(),
                }
            })?;

        let text = response
            .first_text()
            .ok_or_else(|| ComparisonError::MalformedOutput {
                reason: "model returned no text content".to_string(),
            })?;

        parse_judgment(text, self.config.variant).inspect_err(|e| {
            warn!(model = %self.config.model, error = %e, "Rejected model output");
        })
    }
}
