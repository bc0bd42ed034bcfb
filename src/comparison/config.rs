use crate::constants::{DEFAULT_COMPARISON_MODEL, DEFAULT_MAX_TEXT_CHARS};

/// Which judgment shape the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JudgmentVariant {
    /// Score and rationale only.
    Standard,
    /// Score plus a required, independent confidence value.
    #[default]
    WithConfidence,
}

impl JudgmentVariant {
    pub fn requires_confidence(self) -> bool {
        matches!(self, JudgmentVariant::WithConfidence)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JudgmentVariant::Standard => "standard",
            JudgmentVariant::WithConfidence => "confidence",
        }
    }
}

impl std::str::FromStr for JudgmentVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "basic" => Ok(Self::Standard),
            "confidence" | "with_confidence" | "with-confidence" => Ok(Self::WithConfidence),
            _ => Err(format!("Unknown judgment variant: {}", s)),
        }
    }
}

#[derive(Clone)]
pub struct ComparatorConfig {
    /// Model identifier passed to the chat backend.
    pub model: String,
    pub variant: JudgmentVariant,
    /// Per-text bound, in characters.
    pub max_text_chars: usize,
    pub temperature: Option<f64>,
    /// Provider key; `None` leaves resolution to the provider's environment variable.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ComparatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorConfig")
            .field("model", &self.model)
            .field("variant", &self.variant)
            .field("max_text_chars", &self.max_text_chars)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_COMPARISON_MODEL.to_string(),
            variant: JudgmentVariant::default(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            temperature: Some(0.0),
            api_key: None,
        }
    }
}

impl ComparatorConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: JudgmentVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|k| !k.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than zero".to_string());
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(format!("temperature must be between 0.0 and 2.0, got {}", t));
        }
        Ok(())
    }
}
