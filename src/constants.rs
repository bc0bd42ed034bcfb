//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Embedding dimension of `text-embedding-3-small` / `ada-002`.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

pub const DEFAULT_VECTOR_SIZE_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;

pub const DEFAULT_COLLECTION_NAME: &str = "horizon_items";

/// Number of candidates fetched when a caller does not pass `k`.
pub const DEFAULT_TOP_K: usize = 5;

/// Upper bound on either text handed to a comparator, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

/// Comparator calls allowed in flight per pipeline run.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// How far a score or confidence may stray outside `[0, 1]` and still be clamped.
pub const SCORE_TOLERANCE: f32 = 0.005;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

pub const DEFAULT_COMPARISON_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1";

/// Rendered in place of absent optional metadata.
pub const UNKNOWN_FIELD: &str = "unknown";
