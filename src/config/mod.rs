//! Environment-backed configuration.
//!
//! Most settings have defaults. A TOML or JSON file named by `HORIZON_CONFIG`
//! (or passed to [`Config::from_file`]) is applied first, then `HORIZON_*`
//! environment variables override it.

pub mod error;
pub mod tree;


pub use error::ConfigError;
pub use tree::ConfigTree;

use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::comparison::{ComparatorConfig, JudgmentVariant};
use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_COMPARISON_MODEL, DEFAULT_CONCURRENCY, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_EMBEDDING_URL, DEFAULT_MAX_TEXT_CHARS, DEFAULT_TOP_K, DEFAULT_VECTOR_SIZE_U64,
};
use crate::embedding::EmbeddingConfig;
use crate::pipeline::PipelineConfig;

/// Default Qdrant URL used when `HORIZON_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Top-level table read from configuration files.
pub const FILE_SECTION: &str = "horizon-match";

/// Server and pipeline configuration.
///
/// Use [`Config::from_env`] to read `HORIZON_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    pub qdrant_api_key: Option<String>,

    pub collection: String,

    /// Must match the embedding model's output dimension.
    pub vector_size: u64,

    /// Base URL of an OpenAI-compatible embeddings API.
    pub embedding_url: String,

    pub embedding_model: String,

    pub embedding_api_key: Option<String>,

    /// Chat model used for comparisons.
    pub comparison_model: String,

    /// Key for the chat provider. When unset, the provider's own environment
    /// variable is used.
    pub comparison_api_key: Option<String>,

    pub judgment_variant: JudgmentVariant,

    /// Per-text bound handed to the comparator, in characters.
    pub max_text_chars: usize,

    /// Comparisons in flight per request. Default: `4`.
    pub concurrency: usize,

    /// `k` used when a request does not specify one. Default: `5`.
    pub default_k: usize,

    /// Bound on one pipeline run. Default: none.
    pub timeout: Option<Duration>,

    /// File the configuration was layered from, if any.
    pub config_path: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("qdrant_url", &self.qdrant_url)
            .field(
                "qdrant_api_key",
                &self.qdrant_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("collection", &self.collection)
            .field("vector_size", &self.vector_size)
            .field("embedding_url", &self.embedding_url)
            .field("embedding_model", &self.embedding_model)
            .field(
                "embedding_api_key",
                &self.embedding_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("comparison_model", &self.comparison_model)
            .field(
                "comparison_api_key",
                &self.comparison_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("judgment_variant", &self.judgment_variant)
            .field("max_text_chars", &self.max_text_chars)
            .field("concurrency", &self.concurrency)
            .field("default_k", &self.default_k)
            .field("timeout", &self.timeout)
            .field("config_path", &self.config_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            qdrant_api_key: None,
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            vector_size: DEFAULT_VECTOR_SIZE_U64,
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            comparison_model: DEFAULT_COMPARISON_MODEL.to_string(),
            comparison_api_key: None,
            judgment_variant: JudgmentVariant::default(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            concurrency: DEFAULT_CONCURRENCY,
            default_k: DEFAULT_TOP_K,
            timeout: None,
            config_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "HORIZON_PORT";
    const ENV_BIND_ADDR: &'static str = "HORIZON_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "HORIZON_QDRANT_URL";
    const ENV_QDRANT_API_KEY: &'static str = "HORIZON_QDRANT_API_KEY";
    const ENV_COLLECTION: &'static str = "HORIZON_COLLECTION";
    const ENV_VECTOR_SIZE: &'static str = "HORIZON_VECTOR_SIZE";
    const ENV_EMBEDDING_URL: &'static str = "HORIZON_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "HORIZON_EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "HORIZON_EMBEDDING_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_COMPARISON_MODEL: &'static str = "HORIZON_COMPARISON_MODEL";
    const ENV_COMPARISON_API_KEY: &'static str = "HORIZON_COMPARISON_API_KEY";
    const ENV_JUDGMENT_VARIANT: &'static str = "HORIZON_JUDGMENT_VARIANT";
    const ENV_MAX_TEXT_CHARS: &'static str = "HORIZON_MAX_TEXT_CHARS";
    const ENV_CONCURRENCY: &'static str = "HORIZON_CONCURRENCY";
    const ENV_DEFAULT_K: &'static str = "HORIZON_DEFAULT_K";
    const ENV_TIMEOUT_SECS: &'static str = "HORIZON_TIMEOUT_SECS";
    const ENV_CONFIG: &'static str = "HORIZON_CONFIG";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// When `HORIZON_CONFIG` names a file it is applied before the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match Self::parse_optional_string_from_env(Self::ENV_CONFIG) {
            Some(path) => Self::from_file(path),
            None => Self::default().apply_env(),
        }
    }

    /// Layers the `[horizon-match]` section of `path` over defaults, then the
    /// environment over that.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let tree = ConfigTree::load(path)?;

        let mut config = Self::default().apply_tree(&tree)?;
        config.config_path = Some(path.to_path_buf());
        config.apply_env()
    }

    /// Applies values found under [`FILE_SECTION`]; missing keys keep their current value.
    pub fn apply_tree(mut self, tree: &ConfigTree) -> Result<Self, ConfigError> {
        const STORE: [&str; 3] = [FILE_SECTION, "vector-search-service", "store"];
        const EMBEDDINGS: [&str; 3] = [FILE_SECTION, "vector-search-service", "embeddings"];
        const COMPARISON: [&str; 2] = [FILE_SECTION, "comparison-service"];
        const PIPELINE: [&str; 2] = [FILE_SECTION, "pipeline"];
        const SERVER: [&str; 2] = [FILE_SECTION, "server"];

        let key = |base: &[&'static str], leaf: &'static str| {
            let mut path = base.to_vec();
            path.push(leaf);
            path
        };
        // Both spellings are accepted; the hyphenated one wins when both are set.
        let api_key = |base: &[&'static str]| {
            ["api-key", "api_key"]
                .into_iter()
                .find_map(|leaf| tree.get_str(&key(base, leaf)))
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        };

        if let Some(port) = tree.get_u64(&key(&SERVER, "port")) {
            self.port = u16::try_from(port)
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| ConfigError::InvalidPort {
                    value: port.to_string(),
                })?;
        }
        if let Some(addr) = tree.get_str(&key(&SERVER, "bind-addr")) {
            self.bind_addr = addr.parse().map_err(|e| ConfigError::InvalidBindAddr {
                value: addr.to_string(),
                source: e,
            })?;
        }

        if let Some(url) = tree.get_str(&key(&STORE, "url")) {
            self.qdrant_url = url.to_string();
        }
        if let Some(collection) = tree.get_str(&key(&STORE, "collection")) {
            self.collection = collection.to_string();
        }
        if let Some(size) = tree.get_u64(&key(&STORE, "vector-size")) {
            self.vector_size = size;
        }
        if let Some(k) = api_key(&STORE) {
            self.qdrant_api_key = Some(k);
        }

        if let Some(url) = tree.get_str(&key(&EMBEDDINGS, "url")) {
            self.embedding_url = url.to_string();
        }
        if let Some(model) = tree.get_str(&key(&EMBEDDINGS, "model")) {
            self.embedding_model = model.to_string();
        }
        if let Some(k) = api_key(&EMBEDDINGS) {
            self.embedding_api_key = Some(k);
        }

        if let Some(model) = tree.get_str(&key(&COMPARISON, "model")) {
            self.comparison_model = model.to_string();
        }
        if let Some(k) = api_key(&COMPARISON) {
            self.comparison_api_key = Some(k);
        }
        if let Some(variant) = tree.get_str(&key(&COMPARISON, "variant")) {
            self.judgment_variant = Self::parse_variant(variant)?;
        }
        if let Some(max) = tree.get_u64(&key(&COMPARISON, "max-text-chars")) {
            self.max_text_chars = max as usize;
        }

        if let Some(concurrency) = tree.get_u64(&key(&PIPELINE, "concurrency")) {
            self.concurrency = concurrency as usize;
        }
        if let Some(k) = tree.get_u64(&key(&PIPELINE, "default-k")) {
            self.default_k = k as usize;
        }
        if let Some(secs) = tree.get_u64(&key(&PIPELINE, "timeout-secs")) {
            self.timeout = Some(Duration::from_secs(secs));
        }

        Ok(self)
    }

    fn apply_env(mut self) -> Result<Self, ConfigError> {
        self.port = Self::parse_port_from_env(self.port)?;
        self.bind_addr = Self::parse_bind_addr_from_env(self.bind_addr)?;
        self.qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, self.qdrant_url);
        self.qdrant_api_key =
            Self::parse_optional_string_from_env(Self::ENV_QDRANT_API_KEY).or(self.qdrant_api_key);
        self.collection = Self::parse_string_from_env(Self::ENV_COLLECTION, self.collection);
        self.vector_size = Self::parse_u64_from_env(Self::ENV_VECTOR_SIZE, self.vector_size)?;
        self.embedding_url = Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, self.embedding_url);
        self.embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, self.embedding_model);
        self.embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY)
            .or(self.embedding_api_key)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY));
        self.comparison_model =
            Self::parse_string_from_env(Self::ENV_COMPARISON_MODEL, self.comparison_model);
        self.comparison_api_key = Self::parse_optional_string_from_env(Self::ENV_COMPARISON_API_KEY)
            .or(self.comparison_api_key);

        if let Some(variant) = Self::parse_optional_string_from_env(Self::ENV_JUDGMENT_VARIANT) {
            self.judgment_variant = Self::parse_variant(&variant)?;
        }

        self.max_text_chars =
            Self::parse_u64_from_env(Self::ENV_MAX_TEXT_CHARS, self.max_text_chars as u64)? as usize;
        self.concurrency =
            Self::parse_u64_from_env(Self::ENV_CONCURRENCY, self.concurrency as u64)? as usize;
        self.default_k =
            Self::parse_u64_from_env(Self::ENV_DEFAULT_K, self.default_k as u64)? as usize;

        if let Some(value) = Self::parse_optional_string_from_env(Self::ENV_TIMEOUT_SECS) {
            let secs = Self::parse_number(Self::ENV_TIMEOUT_SECS, &value)?;
            self.timeout = Some(Duration::from_secs(secs));
        }

        Ok(self)
    }

    /// Checks invariants that parsing alone does not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort {
                value: self.port.to_string(),
            });
        }

        for (name, value) in [
            ("qdrant_url", &self.qdrant_url),
            ("collection", &self.collection),
            ("embedding_url", &self.embedding_url),
            ("embedding_model", &self.embedding_model),
            ("comparison_model", &self.comparison_model),
        ] {
            if value.trim().is_empty() {
                return Err(Self::invalid(name, "must not be empty"));
            }
        }

        for (name, value) in [
            ("vector_size", self.vector_size as usize),
            ("max_text_chars", self.max_text_chars),
            ("concurrency", self.concurrency),
            ("default_k", self.default_k),
        ] {
            if value == 0 {
                return Err(Self::invalid(name, "must be greater than zero"));
            }
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Self::invalid("timeout", "must be greater than zero"));
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn comparator_config(&self) -> ComparatorConfig {
        let config = ComparatorConfig::new(self.comparison_model.clone())
            .with_variant(self.judgment_variant)
            .with_max_text_chars(self.max_text_chars);
        match &self.comparison_api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    pub fn embedding_config(&self) -> EmbeddingConfig {
        let config = EmbeddingConfig::new(self.embedding_model.clone(), self.vector_size as usize)
            .with_base_url(self.embedding_url.clone());
        match &self.embedding_api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.concurrency).with_timeout(self.timeout)
    }

    fn invalid(name: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse_variant(value: &str) -> Result<JudgmentVariant, ConfigError> {
        value.parse().map_err(|_| ConfigError::UnknownVariant {
            value: value.to_string(),
        })
    }

    fn parse_number(name: &str, value: &str) -> Result<u64, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|e| ConfigError::NumberParseError {
                name: name.to_string(),
                value: value.to_string(),
                source: e,
            })
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> Result<u64, ConfigError> {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => Self::parse_number(var_name, &value),
            None => Ok(default),
        }
    }
}
