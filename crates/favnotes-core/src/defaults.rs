//! Centralized default constants for favnotes.
//!
//! Crates reference these constants instead of defining their own magic
//! values. Organized by domain area.

// =============================================================================
// DATASETS
// =============================================================================

/// File name of the primary collected-notes document.
pub const DETAILS_FILE: &str = "favorite_notes_details.json";

/// File name of the AI annotation document.
pub const AI_PROCESSED_FILE: &str = "favorite_notes_ai_processed.json";

/// File name of the normalization document.
pub const NORMALIZED_FILE: &str = "favorite_notes_normalized.json";

/// Top-level key holding the record array in every dataset document.
pub const DATA_KEY: &str = "data";

/// Primary data directory, relative to the working directory.
pub const DATA_DIR: &str = "data";

/// Fallback data directory, relative to the working directory.
pub const DATA_FALLBACK_DIR: &str = "../data";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3001;

/// Default allowed CORS origins (comma-separated).
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;
