//! Core traits for noteshare abstractions.
//!
//! These traits define the storage-agnostic contracts that concrete
//! implementations must satisfy, enabling pluggable backends and
//! testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{
    COMMENT_MAX_LEN, COMMENT_MIN_LEN, DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN, PAGE_FIRST,
    PAGE_SIZE, PAGE_SIZE_MAX, TITLE_MAX_LEN, TITLE_MIN_LEN,
};
use crate::error::{Error, Result};
use crate::file_safety::validate_descriptor;
use crate::models::{
    Actor, AuthorStats, Comment, ModerationStatus, Note, NoteSummary, RatingSummary, UserProfile,
    UserRole,
};

// =============================================================================
// NOTE REPOSITORY TYPES
// =============================================================================

/// Descriptor of an already-stored upload. Blob storage happens upstream;
/// the repository only records where the file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    /// Page count where known; 0 otherwise.
    pub pages: i32,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
    pub degree: String,
    pub semester: String,
    pub subject: String,
    pub unit: Option<String>,
    pub tags: Vec<String>,
    pub file: FileDescriptor,
}

impl CreateNoteRequest {
    /// Validate field bounds and the file descriptor.
    ///
    /// Classification values are checked for presence only; they are not
    /// cross-validated against the taxonomy catalog.
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN_LEN || title_len > TITLE_MAX_LEN {
            return Err(Error::Validation(format!(
                "title must be between {} and {} characters",
                TITLE_MIN_LEN, TITLE_MAX_LEN
            )));
        }

        let desc_len = self.description.trim().chars().count();
        if desc_len < DESCRIPTION_MIN_LEN || desc_len > DESCRIPTION_MAX_LEN {
            return Err(Error::Validation(format!(
                "description must be between {} and {} characters",
                DESCRIPTION_MIN_LEN, DESCRIPTION_MAX_LEN
            )));
        }

        for (field, value) in [
            ("degree", &self.degree),
            ("semester", &self.semester),
            ("subject", &self.subject),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("{} is required", field)));
            }
        }

        let file_check = validate_descriptor(&self.file.file_name, self.file.file_size);
        if !file_check.allowed {
            return Err(Error::Validation(
                file_check
                    .block_reason
                    .unwrap_or_else(|| "file descriptor rejected".to_string()),
            ));
        }

        if self.file.pages < 0 {
            return Err(Error::Validation("pages must not be negative".to_string()));
        }

        Ok(())
    }
}

/// Validate comment text bounds.
pub fn validate_comment_text(text: &str) -> Result<()> {
    let len = text.trim().chars().count();
    if len < COMMENT_MIN_LEN || len > COMMENT_MAX_LEN {
        return Err(Error::Validation(format!(
            "comment must be between {} and {} characters",
            COMMENT_MIN_LEN, COMMENT_MAX_LEN
        )));
    }
    Ok(())
}

/// Visibility scope a query runs under.
///
/// `Public` sees only approved, public notes. `Owner` additionally sees
/// that user's own notes in any moderation state. `Admin` sees everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Public,
    Owner(Uuid),
    Admin,
}

impl ListScope {
    /// Scope for an authenticated actor: admins get full visibility,
    /// everyone else owner visibility over their own notes.
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.role {
            UserRole::Admin => ListScope::Admin,
            _ => ListScope::Owner(actor.id),
        }
    }
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSort {
    #[default]
    Newest,
    Oldest,
    Rating,
    Downloads,
    Views,
}

/// Request for listing notes.
#[derive(Debug, Clone)]
pub struct ListNotesRequest {
    pub scope: ListScope,
    /// Filter by classification keys.
    pub degree: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    /// Keyword search over title, description, and tags.
    pub search: Option<String>,
    /// Moderation status filter. Honored for owner/admin scopes only;
    /// public queries are always pinned to approved.
    pub status: Option<ModerationStatus>,
    pub sort: NoteSort,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl ListNotesRequest {
    /// A public listing with default pagination.
    pub fn public() -> Self {
        Self {
            scope: ListScope::Public,
            degree: None,
            semester: None,
            subject: None,
            search: None,
            status: None,
            sort: NoteSort::default(),
            page: PAGE_FIRST,
            page_size: PAGE_SIZE,
        }
    }

    /// Page number clamped to the first page minimum.
    pub fn page_clamped(&self) -> i64 {
        self.page.max(PAGE_FIRST)
    }

    /// Page size clamped to `1..=PAGE_SIZE_MAX`.
    pub fn page_size_clamped(&self) -> i64 {
        self.page_size.clamp(1, PAGE_SIZE_MAX)
    }
}

/// Offset pagination summary for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_notes: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Compute pagination facts for a 1-based `page` of `page_size` rows
    /// over `total` matches. A non-positive `page_size` is treated as 1.
    pub fn compute(page: i64, page_size: i64, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            current_page: page,
            total_pages,
            total_notes: total,
            has_next: page * page_size < total,
            has_prev: page > PAGE_FIRST,
        }
    }
}

/// Response for listing notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesResponse {
    pub notes: Vec<NoteSummary>,
    pub pagination: Pagination,
}

// =============================================================================
// NOTE REPOSITORY TRAIT
// =============================================================================

/// Repository for note CRUD and statistic aggregation.
///
/// This is the sole mutator of a note's statistics: every counter change
/// funnels through it so invariants (rating bounds, non-negative counters)
/// cannot be bypassed. Implementations must execute each counter change as
/// an atomic increment at the storage layer, never as a read-then-write
/// round trip.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create a note: status starts at pending, visibility public, all
    /// counters zero. The author's display name is denormalized onto the
    /// note and the author's upload count is incremented in the same
    /// transaction.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a note with its comments. Hidden notes surface as
    /// `NoteNotFound`, indistinguishable from absence.
    async fn find_by_id(&self, id: Uuid, scope: ListScope) -> Result<Note>;

    /// List notes with filtering, sorting, and offset pagination.
    async fn list(&self, req: ListNotesRequest) -> Result<ListNotesResponse>;

    /// Increment the view counter by one. Every call counts; views are
    /// not deduplicated per viewer.
    async fn record_view(&self, id: Uuid) -> Result<()>;

    /// Increment the download counter and return the stored file URL for
    /// the caller to stream. When a downloader is known, their download
    /// count is incremented as well.
    async fn record_download(&self, id: Uuid, downloader: Option<Uuid>) -> Result<String>;

    /// Record a rating submission of `value` in 1..=5. Authors cannot
    /// rate their own notes. Every call is an independent rating event;
    /// there is no per-user uniqueness or retraction.
    async fn rate(&self, id: Uuid, rater: Uuid, value: i32) -> Result<RatingSummary>;

    /// Append a comment (chronological, append-only). `user_name` is
    /// snapshotted onto the comment.
    async fn add_comment(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_name: &str,
        text: &str,
    ) -> Result<Comment>;

    /// Hard-delete a note. Allowed for the note's author or an admin.
    /// The author's upload count is decremented in the same transaction.
    async fn delete(&self, id: Uuid, actor: Actor) -> Result<()>;

    /// Moderator-only status transition out of pending. Rejection
    /// requires a non-empty reason; approved/rejected are terminal.
    async fn set_moderation_status(
        &self,
        id: Uuid,
        actor: Actor,
        status: ModerationStatus,
        rejection_reason: Option<&str>,
    ) -> Result<()>;

    /// Aggregate statistics over one author's notes.
    async fn author_stats(&self, author_id: Uuid) -> Result<AuthorStats>;
}

// =============================================================================
// USER DIRECTORY TRAIT
// =============================================================================

/// Minimal user directory the repository depends on: profile lookup for
/// denormalization and atomic counter compensation. Authentication and
/// identity issuance live outside this system.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user's directory entry.
    async fn get_user(&self, id: Uuid) -> Result<UserProfile>;

    /// Atomically adjust a user's upload count by `delta`.
    async fn increment_upload_count(&self, id: Uuid, delta: i64) -> Result<()>;

    /// Atomically adjust a user's download count by `delta`.
    async fn increment_download_count(&self, id: Uuid, delta: i64) -> Result<()>;
}

/// Timestamp helper: all server-assigned timestamps funnel through here so
/// tests can reason about a single clock source.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateNoteRequest {
        CreateNoteRequest {
            title: "Calculus Semester Notes".to_string(),
            description: "Complete handwritten notes covering limits and derivatives".to_string(),
            author_id: Uuid::new_v4(),
            degree: "btech".to_string(),
            semester: "sem1".to_string(),
            subject: "engineering_mathematics".to_string(),
            unit: None,
            tags: vec!["calculus".to_string()],
            file: FileDescriptor {
                file_url: "/uploads/calc-notes.pdf".to_string(),
                file_name: "calc-notes.pdf".to_string(),
                file_size: 1_048_576,
                pages: 42,
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_short_title_rejected() {
        let mut req = valid_request();
        req.title = "Math".to_string();
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_long_description_rejected() {
        let mut req = valid_request();
        req.description = "x".repeat(1001);
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_missing_classification_rejected() {
        for field in ["degree", "semester", "subject"] {
            let mut req = valid_request();
            match field {
                "degree" => req.degree = "  ".to_string(),
                "semester" => req.semester = String::new(),
                _ => req.subject = String::new(),
            }
            let err = req.validate().unwrap_err();
            assert!(err.to_string().contains(field), "expected {} error", field);
        }
    }

    #[test]
    fn test_bad_file_descriptor_rejected() {
        let mut req = valid_request();
        req.file.file_name = "malware.exe".to_string();
        assert!(matches!(req.validate(), Err(Error::Validation(_))));

        let mut req = valid_request();
        req.file.file_size = 0;
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_negative_pages_rejected() {
        let mut req = valid_request();
        req.file.pages = -1;
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_comment_text_bounds() {
        assert!(validate_comment_text("").is_err());
        assert!(validate_comment_text("   ").is_err());
        assert!(validate_comment_text("nice notes").is_ok());
        assert!(validate_comment_text(&"x".repeat(500)).is_ok());
        assert!(validate_comment_text(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_pagination_partial_last_page() {
        // 45 approved notes, page size 20
        let page1 = Pagination::compute(1, 20, 45);
        assert!(page1.has_next);
        assert!(!page1.has_prev);
        assert_eq!(page1.total_pages, 3);

        let page3 = Pagination::compute(3, 20, 45);
        assert!(!page3.has_next);
        assert!(page3.has_prev);
        assert_eq!(page3.total_notes, 45);
    }

    #[test]
    fn test_pagination_zero_page_size_treated_as_one() {
        let p = Pagination::compute(1, 0, 45);
        assert_eq!(p.total_pages, 45);
        assert!(p.has_next);

        let p = Pagination::compute(1, -3, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn test_pagination_empty_result() {
        let p = Pagination::compute(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = Pagination::compute(2, 20, 40);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn test_list_request_clamping() {
        let mut req = ListNotesRequest::public();
        req.page = 0;
        req.page_size = 5000;
        assert_eq!(req.page_clamped(), 1);
        assert_eq!(req.page_size_clamped(), PAGE_SIZE_MAX);
    }

    #[test]
    fn test_scope_for_actor() {
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);
        assert_eq!(ListScope::for_actor(&admin), ListScope::Admin);

        let student = Actor::new(Uuid::new_v4(), UserRole::Student);
        assert_eq!(ListScope::for_actor(&student), ListScope::Owner(student.id));
    }
}
