//! Core data models for noteshare.
//!
//! These types are shared across all noteshare crates and represent the
//! note aggregate, its moderation lifecycle, and the user-facing
//! projections of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// =============================================================================
// MODERATION
// =============================================================================

/// Moderation lifecycle gate controlling public visibility.
///
/// `Pending` is the only non-terminal state: the defined transitions are
/// `pending -> approved` and `pending -> rejected`. Re-submission after a
/// terminal state requires a new note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Parse the database/wire representation.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            other => Err(Error::Internal(format!(
                "unknown moderation status: {}",
                other
            ))),
        }
    }

    /// Whether any further status transition is allowed from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ModerationStatus::Pending)
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// USERS
// =============================================================================

/// Role of a user within the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Moderator,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "student" => Ok(UserRole::Student),
            "moderator" => Ok(UserRole::Moderator),
            "admin" => Ok(UserRole::Admin),
            other => Err(Error::Internal(format!("unknown user role: {}", other))),
        }
    }

    /// Moderators and admins may change a note's moderation status.
    pub fn can_moderate(&self) -> bool {
        matches!(self, UserRole::Moderator | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }
}

/// Directory entry for a user, as needed for denormalization and
/// compensating statistics. Identity issuance lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub role: UserRole,
    pub upload_count: i64,
    pub download_count: i64,
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// NOTES
// =============================================================================

/// A comment on a note. `user_name` is a denormalized snapshot taken at
/// comment time; later profile renames do not update it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub body: String,
    pub created_at_utc: DateTime<Utc>,
}

/// The full note aggregate: an uploaded document plus its classification,
/// moderation state, and engagement statistics.
///
/// Statistics (`downloads`, `view_count`, `favorite_count`, `total_rating`,
/// `rating_count`, `rating`) are mutated only through repository operations,
/// never directly. `rating` always equals
/// `round(total_rating / rating_count, 1)`, or 0 when `rating_count` is 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    // Authorship (immutable; author_name is a creation-time snapshot)
    pub author_id: Uuid,
    pub author_name: String,

    // Classification (immutable after creation)
    pub degree: String,
    pub semester: String,
    pub subject: String,
    pub unit: Option<String>,
    pub tags: Vec<String>,

    // Content descriptor (immutable after creation)
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub pages: i32,

    // Aggregated statistics
    pub downloads: i64,
    pub view_count: i64,
    pub favorite_count: i64,
    pub total_rating: i64,
    pub rating_count: i64,
    pub rating: f64,

    // Moderation state
    pub is_verified: bool,
    pub is_public: bool,
    pub status: ModerationStatus,
    pub rejection_reason: Option<String>,

    pub comments: Vec<Comment>,

    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Listing projection of a note. Comments are intentionally excluded from
/// list results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub degree: String,
    pub semester: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub file_type: String,
    pub file_size: i64,
    pub pages: i32,
    pub downloads: i64,
    pub view_count: i64,
    pub rating: f64,
    pub rating_count: i64,
    pub status: ModerationStatus,
    pub is_public: bool,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Result of a rating submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingSummary {
    pub rating: f64,
    pub rating_count: i64,
}

/// Aggregate statistics over a single author's notes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AuthorStats {
    pub total_notes: i64,
    pub approved_notes: i64,
    pub pending_notes: i64,
    pub total_downloads: i64,
    pub total_views: i64,
    /// Mean of per-note ratings, taken over rated notes only.
    pub average_rating: f64,
}

/// Derived average rating: running sum over submission count, rounded to
/// one decimal place. Zero when there are no submissions.
pub fn average_rating(total_rating: i64, rating_count: i64) -> f64 {
    if rating_count <= 0 {
        return 0.0;
    }
    (total_rating as f64 / rating_count as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_zero_submissions() {
        assert_eq!(average_rating(0, 0), 0.0);
    }

    #[test]
    fn test_average_rating_single_submission() {
        assert_eq!(average_rating(4, 1), 4.0);
    }

    #[test]
    fn test_average_rating_rounds_to_one_decimal() {
        // 4 + 5 = 9 over 2 submissions
        assert_eq!(average_rating(9, 2), 4.5);
        // 1 + 5 + 5 = 11 over 3 submissions = 3.666... -> 3.7
        assert_eq!(average_rating(11, 3), 3.7);
        // 2 + 2 + 5 = 9 over 3 submissions = 3.0
        assert_eq!(average_rating(9, 3), 3.0);
    }

    #[test]
    fn test_average_rating_negative_count_is_zero() {
        assert_eq!(average_rating(10, -1), 0.0);
    }

    #[test]
    fn test_moderation_status_round_trip() {
        for status in [
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
        ] {
            assert_eq!(ModerationStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_moderation_status_unknown() {
        assert!(ModerationStatus::parse("archived").is_err());
    }

    #[test]
    fn test_moderation_terminal_states() {
        assert!(!ModerationStatus::Pending.is_terminal());
        assert!(ModerationStatus::Approved.is_terminal());
        assert!(ModerationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_user_role_can_moderate() {
        assert!(!UserRole::Student.can_moderate());
        assert!(UserRole::Moderator.can_moderate());
        assert!(UserRole::Admin.can_moderate());
    }

    #[test]
    fn test_moderation_status_serde_lowercase() {
        let json = serde_json::to_string(&ModerationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let back: ModerationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, ModerationStatus::Rejected);
    }
}
