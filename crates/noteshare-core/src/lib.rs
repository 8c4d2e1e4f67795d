//! # noteshare-core
//!
//! Core types, traits, and the academic taxonomy catalog for noteshare,
//! a student notes-sharing platform.
//!
//! This crate provides the storage-agnostic domain layer: the note
//! aggregate and its moderation lifecycle, the repository and user
//! directory contracts, and the static degree/semester/subject catalog
//! that classifies notes.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use catalog::{Catalog, Degree, DegreeType, Semester, SemesterResolution, Specialization, Subject};
pub use error::{Error, Result};
pub use file_safety::{file_type_from_name, validate_descriptor, ValidationResult};
pub use models::{
    average_rating, Actor, AuthorStats, Comment, ModerationStatus, Note, NoteSummary,
    RatingSummary, UserProfile, UserRole,
};
pub use traits::{
    now_utc, validate_comment_text, CreateNoteRequest, FileDescriptor, ListNotesRequest,
    ListNotesResponse, ListScope, NoteRepository, NoteSort, Pagination, UserDirectory,
};
