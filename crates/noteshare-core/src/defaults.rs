//! Centralized default constants for the noteshare system.
//!
//! **This module is the single source of truth** for all shared bounds and
//! default values. Crates should reference these constants instead of
//! defining their own magic numbers.

// =============================================================================
// NOTE FIELD BOUNDS
// =============================================================================

/// Minimum note title length in characters.
pub const TITLE_MIN_LEN: usize = 5;

/// Maximum note title length in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Minimum note description length in characters.
pub const DESCRIPTION_MIN_LEN: usize = 10;

/// Maximum note description length in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Minimum comment length in characters.
pub const COMMENT_MIN_LEN: usize = 1;

/// Maximum comment length in characters.
pub const COMMENT_MAX_LEN: usize = 500;

// =============================================================================
// RATING
// =============================================================================

/// Lowest accepted rating value.
pub const RATING_MIN: i32 = 1;

/// Highest accepted rating value.
pub const RATING_MAX: i32 = 5;

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_FILE_SIZE_BYTES: i64 = 10 * 1024 * 1024;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for note listings.
pub const PAGE_SIZE: i64 = 20;

/// Maximum page size a caller may request.
pub const PAGE_SIZE_MAX: i64 = 100;

/// First page number (pagination is 1-based).
pub const PAGE_FIRST: i64 = 1;
