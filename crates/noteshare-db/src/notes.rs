//! Note repository implementation.
//!
//! Every statistic mutation here is a single atomic SQL statement of the
//! form `SET counter = counter + n`, never a read-modify-write from
//! application memory, so concurrent requests against the same note id
//! cannot lose updates.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::info;
use uuid::Uuid;

use noteshare_core::{
    now_utc, validate_comment_text, Actor, AuthorStats, Comment, CreateNoteRequest, Error,
    ListNotesRequest, ListNotesResponse, ListScope, ModerationStatus, Note, NoteRepository,
    NoteSort, NoteSummary, Pagination, RatingSummary, Result, UserRole,
};

use crate::escape_like;

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

// =============================================================================
// LIST QUERY BUILDING
// =============================================================================

/// A positional query parameter collected while building a dynamic query.
enum QueryParam {
    Text(String),
    Id(Uuid),
}

/// Build the WHERE conditions and bind parameters for a listing request.
/// Parameter numbering starts at `$1`.
fn build_list_conditions(req: &ListNotesRequest) -> (Vec<String>, Vec<QueryParam>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<QueryParam> = Vec::new();
    let mut idx = 1usize;

    match req.scope {
        // Public listings are pinned to approved, public notes; the status
        // filter is ignored so hidden notes cannot be enumerated.
        ListScope::Public => {
            conditions.push("n.status = 'approved' AND n.is_public = true".to_string());
        }
        ListScope::Owner(owner_id) => {
            conditions.push(format!("n.author_id = ${}", idx));
            params.push(QueryParam::Id(owner_id));
            idx += 1;
            if let Some(status) = req.status {
                conditions.push(format!("n.status = ${}", idx));
                params.push(QueryParam::Text(status.as_str().to_string()));
                idx += 1;
            }
        }
        ListScope::Admin => {
            if let Some(status) = req.status {
                conditions.push(format!("n.status = ${}", idx));
                params.push(QueryParam::Text(status.as_str().to_string()));
                idx += 1;
            }
        }
    }

    for (column, value) in [
        ("degree", &req.degree),
        ("semester", &req.semester),
        ("subject", &req.subject),
    ] {
        if let Some(value) = value {
            conditions.push(format!("n.{} = ${}", column, idx));
            params.push(QueryParam::Text(value.clone()));
            idx += 1;
        }
    }

    if let Some(search) = req.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", escape_like(search.trim()));
        conditions.push(format!(
            "(n.title ILIKE ${i} ESCAPE '\\' OR n.description ILIKE ${i} ESCAPE '\\' \
             OR EXISTS (SELECT 1 FROM unnest(n.tags) AS t WHERE t ILIKE ${i} ESCAPE '\\'))",
            i = idx
        ));
        params.push(QueryParam::Text(pattern));
    }

    (conditions, params)
}

/// Map a sort option to its ORDER BY clause. Non-recency sorts carry a
/// recency tiebreaker so equal-score pages stay stable.
fn build_order_clause(sort: NoteSort) -> &'static str {
    match sort {
        NoteSort::Newest => "n.created_at_utc DESC",
        NoteSort::Oldest => "n.created_at_utc ASC",
        NoteSort::Rating => "n.rating DESC, n.created_at_utc DESC",
        NoteSort::Downloads => "n.downloads DESC, n.created_at_utc DESC",
        NoteSort::Views => "n.view_count DESC, n.created_at_utc DESC",
    }
}

fn bind_params<'q>(
    query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    params: &'q [QueryParam],
) -> sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments> {
    let mut q = query;
    for param in params {
        q = match param {
            QueryParam::Text(s) => q.bind(s),
            QueryParam::Id(id) => q.bind(id),
        };
    }
    q
}

/// Normalize a tag list: trim whitespace, drop empties, and deduplicate
/// case-insensitively while preserving first-seen order and casing.
fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            result.push(trimmed.to_string());
        }
    }
    result
}

const SUMMARY_COLUMNS: &str = "n.id, n.title, n.description, n.author_id, n.author_name, \
     n.degree, n.semester, n.subject, n.tags, n.file_type, n.file_size, n.pages, \
     n.downloads, n.view_count, n.rating, n.rating_count, n.status, n.is_public, \
     n.created_at_utc, n.updated_at_utc";

fn map_row_to_summary(row: &PgRow) -> Result<NoteSummary> {
    let status: String = row.get("status");
    Ok(NoteSummary {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        degree: row.get("degree"),
        semester: row.get("semester"),
        subject: row.get("subject"),
        tags: row.get("tags"),
        file_type: row.get("file_type"),
        file_size: row.get("file_size"),
        pages: row.get("pages"),
        downloads: row.get("downloads"),
        view_count: row.get("view_count"),
        rating: row.get("rating"),
        rating_count: row.get("rating_count"),
        status: ModerationStatus::parse(&status)?,
        is_public: row.get("is_public"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    })
}

fn map_row_to_note(row: &PgRow, comments: Vec<Comment>) -> Result<Note> {
    let status: String = row.get("status");
    Ok(Note {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        degree: row.get("degree"),
        semester: row.get("semester"),
        subject: row.get("subject"),
        unit: row.get("unit"),
        tags: row.get("tags"),
        file_url: row.get("file_url"),
        file_name: row.get("file_name"),
        file_size: row.get("file_size"),
        file_type: row.get("file_type"),
        pages: row.get("pages"),
        downloads: row.get("downloads"),
        view_count: row.get("view_count"),
        favorite_count: row.get("favorite_count"),
        total_rating: row.get("total_rating"),
        rating_count: row.get("rating_count"),
        rating: row.get("rating"),
        is_verified: row.get("is_verified"),
        is_public: row.get("is_public"),
        status: ModerationStatus::parse(&status)?,
        rejection_reason: row.get("rejection_reason"),
        comments,
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    })
}

fn map_row_to_comment(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        body: row.get("body"),
        created_at_utc: row.get("created_at_utc"),
    }
}

/// Whether a note is visible under the given scope.
fn visible_under(scope: ListScope, author_id: Uuid, status: ModerationStatus, is_public: bool) -> bool {
    let publicly_visible = status == ModerationStatus::Approved && is_public;
    match scope {
        ListScope::Public => publicly_visible,
        ListScope::Owner(owner_id) => publicly_visible || author_id == owner_id,
        ListScope::Admin => true,
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Denormalize the author's display name at creation time; later
        // profile renames do not track back onto the note.
        let author_name: String =
            sqlx::query_scalar("SELECT display_name FROM app_user WHERE id = $1")
                .bind(req.author_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::Database)?
                .ok_or(Error::UserNotFound(req.author_id))?;

        let now = now_utc();
        let id = Uuid::new_v4();
        let tags = normalize_tags(&req.tags);
        let unit = req
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from);
        // validate() guarantees the extension exists and is allowlisted
        let file_type = noteshare_core::file_type_from_name(&req.file.file_name)
            .ok_or_else(|| Error::Validation("file name has no extension".to_string()))?;

        sqlx::query(
            "INSERT INTO note (id, title, description, author_id, author_name, \
                 degree, semester, subject, unit, tags, \
                 file_url, file_name, file_size, file_type, pages, \
                 created_at_utc, updated_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)",
        )
        .bind(id)
        .bind(req.title.trim())
        .bind(req.description.trim())
        .bind(req.author_id)
        .bind(&author_name)
        .bind(req.degree.trim())
        .bind(req.semester.trim())
        .bind(req.subject.trim())
        .bind(&unit)
        .bind(&tags)
        .bind(&req.file.file_url)
        .bind(&req.file.file_name)
        .bind(req.file.file_size)
        .bind(&file_type)
        .bind(req.file.pages)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        sqlx::query("UPDATE app_user SET upload_count = upload_count + 1 WHERE id = $1")
            .bind(req.author_id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "create",
            note_id = %id,
            user_id = %req.author_id,
            "Note created"
        );

        Ok(Note {
            id,
            title: req.title.trim().to_string(),
            description: req.description.trim().to_string(),
            author_id: req.author_id,
            author_name,
            degree: req.degree.trim().to_string(),
            semester: req.semester.trim().to_string(),
            subject: req.subject.trim().to_string(),
            unit,
            tags,
            file_url: req.file.file_url,
            file_name: req.file.file_name,
            file_size: req.file.file_size,
            file_type,
            pages: req.file.pages,
            downloads: 0,
            view_count: 0,
            favorite_count: 0,
            total_rating: 0,
            rating_count: 0,
            rating: 0.0,
            is_verified: false,
            is_public: true,
            status: ModerationStatus::Pending,
            rejection_reason: None,
            comments: Vec::new(),
            created_at_utc: now,
            updated_at_utc: now,
        })
    }

    async fn find_by_id(&self, id: Uuid, scope: ListScope) -> Result<Note> {
        let row = sqlx::query("SELECT n.* FROM note n WHERE n.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;

        let status = ModerationStatus::parse(row.get("status"))?;
        if !visible_under(scope, row.get("author_id"), status, row.get("is_public")) {
            // Hidden and missing are indistinguishable on purpose.
            return Err(Error::NoteNotFound(id));
        }

        let comments = sqlx::query(
            "SELECT id, user_id, user_name, body, created_at_utc \
             FROM note_comment WHERE note_id = $1 ORDER BY created_at_utc ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?
        .iter()
        .map(map_row_to_comment)
        .collect();

        map_row_to_note(&row, comments)
    }

    async fn list(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
        let (conditions, params) = build_list_conditions(&req);
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM note n {}", where_clause);
        let count_row = bind_params(sqlx::query(&count_sql), &params)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        let total: i64 = count_row.get(0);

        let page = req.page_clamped();
        let page_size = req.page_size_clamped();
        let offset = (page - 1) * page_size;

        let page_sql = format!(
            "SELECT {} FROM note n {} ORDER BY {} LIMIT ${} OFFSET ${}",
            SUMMARY_COLUMNS,
            where_clause,
            build_order_clause(req.sort),
            params.len() + 1,
            params.len() + 2,
        );
        let rows = bind_params(sqlx::query(&page_sql), &params)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes: Vec<NoteSummary> = rows
            .iter()
            .map(map_row_to_summary)
            .collect::<Result<_>>()?;

        Ok(ListNotesResponse {
            notes,
            pagination: Pagination::compute(page, page_size, total),
        })
    }

    async fn record_view(&self, id: Uuid) -> Result<()> {
        // Every call counts; views are deliberately not deduplicated.
        let result = sqlx::query(
            "UPDATE note SET view_count = view_count + 1, updated_at_utc = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(now_utc())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn record_download(&self, id: Uuid, downloader: Option<Uuid>) -> Result<String> {
        let file_url: String = sqlx::query_scalar(
            "UPDATE note SET downloads = downloads + 1, updated_at_utc = $2 \
             WHERE id = $1 AND status = 'approved' AND is_public = true \
             RETURNING file_url",
        )
        .bind(id)
        .bind(now_utc())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        if let Some(user_id) = downloader {
            // Compensating statistic on the user; an unknown downloader id
            // is ignored rather than failing the download.
            sqlx::query(
                "UPDATE app_user SET download_count = download_count + 1 WHERE id = $1",
            )
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        }

        Ok(file_url)
    }

    async fn rate(&self, id: Uuid, rater: Uuid, value: i32) -> Result<RatingSummary> {
        if !(noteshare_core::defaults::RATING_MIN..=noteshare_core::defaults::RATING_MAX)
            .contains(&value)
        {
            return Err(Error::Validation(format!(
                "rating must be between {} and {}",
                noteshare_core::defaults::RATING_MIN,
                noteshare_core::defaults::RATING_MAX
            )));
        }

        // Single-statement update: the derived rating is recomputed from
        // the incremented running sum and count in the same write, so the
        // invariant rating == round(total/count, 1) holds atomically.
        let row = sqlx::query(
            "UPDATE note \
             SET total_rating = total_rating + $2, \
                 rating_count = rating_count + 1, \
                 rating = ROUND((total_rating + $2)::numeric / (rating_count + 1), 1)::float8, \
                 updated_at_utc = $3 \
             WHERE id = $1 AND status = 'approved' AND is_public = true AND author_id <> $4 \
             RETURNING rating, rating_count",
        )
        .bind(id)
        .bind(value as i64)
        .bind(now_utc())
        .bind(rater)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        if let Some(row) = row {
            return Ok(RatingSummary {
                rating: row.get("rating"),
                rating_count: row.get("rating_count"),
            });
        }

        // Nothing updated: distinguish self-rating from absence/hiding
        // without mutating anything.
        let probe = sqlx::query(
            "SELECT author_id, status, is_public FROM note WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        let status = ModerationStatus::parse(probe.get("status"))?;
        let is_public: bool = probe.get("is_public");
        if status != ModerationStatus::Approved || !is_public {
            return Err(Error::NoteNotFound(id));
        }

        let author_id: Uuid = probe.get("author_id");
        if author_id == rater {
            return Err(Error::Forbidden(
                "you cannot rate your own note".to_string(),
            ));
        }

        Err(Error::Internal(format!(
            "rating update matched no row for visible note {}",
            id
        )))
    }

    async fn add_comment(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_name: &str,
        text: &str,
    ) -> Result<Comment> {
        validate_comment_text(text)?;
        let body = text.trim();
        let now = now_utc();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let touched = sqlx::query(
            "UPDATE note SET updated_at_utc = $2 \
             WHERE id = $1 AND status = 'approved' AND is_public = true",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if touched.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        let comment_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO note_comment (id, note_id, user_id, user_name, body, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(comment_id)
        .bind(id)
        .bind(user_id)
        .bind(user_name)
        .bind(body)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        Ok(Comment {
            id: comment_id,
            user_id,
            user_name: user_name.to_string(),
            body: body.to_string(),
            created_at_utc: now,
        })
    }

    async fn delete(&self, id: Uuid, actor: Actor) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let author_id: Uuid = sqlx::query_scalar("SELECT author_id FROM note WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;

        if actor.id != author_id && actor.role != UserRole::Admin {
            return Err(Error::Forbidden(
                "only the author or an admin may delete a note".to_string(),
            ));
        }

        // Hard delete; comments go with the note via ON DELETE CASCADE.
        sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        // Compensate the author's upload count in the same transaction so
        // the statistics cannot silently diverge from the note set.
        sqlx::query(
            "UPDATE app_user SET upload_count = GREATEST(upload_count - 1, 0) WHERE id = $1",
        )
        .bind(author_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            user_id = %actor.id,
            "Note deleted"
        );
        Ok(())
    }

    async fn set_moderation_status(
        &self,
        id: Uuid,
        actor: Actor,
        status: ModerationStatus,
        rejection_reason: Option<&str>,
    ) -> Result<()> {
        if !actor.role.can_moderate() {
            return Err(Error::Forbidden(
                "moderation requires a moderator or admin role".to_string(),
            ));
        }

        let reason = match status {
            ModerationStatus::Pending => {
                return Err(Error::Validation(
                    "a note cannot transition back to pending".to_string(),
                ));
            }
            ModerationStatus::Rejected => {
                let reason = rejection_reason.map(str::trim).unwrap_or("");
                if reason.is_empty() {
                    return Err(Error::Validation(
                        "rejection requires a non-empty reason".to_string(),
                    ));
                }
                Some(reason.to_string())
            }
            ModerationStatus::Approved => None,
        };

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let current: String =
            sqlx::query_scalar("SELECT status FROM note WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::Database)?
                .ok_or(Error::NoteNotFound(id))?;

        if ModerationStatus::parse(&current)?.is_terminal() {
            return Err(Error::Validation(format!(
                "note is already {}; moderation status is terminal",
                current
            )));
        }

        sqlx::query(
            "UPDATE note SET status = $2, rejection_reason = $3, updated_at_utc = $4 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(&reason)
        .bind(now_utc())
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "set_moderation_status",
            note_id = %id,
            user_id = %actor.id,
            status = status.as_str(),
            "Moderation status set"
        );
        Ok(())
    }

    async fn author_stats(&self, author_id: Uuid) -> Result<AuthorStats> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total_notes, \
                    COUNT(*) FILTER (WHERE status = 'approved') AS approved_notes, \
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending_notes, \
                    COALESCE(SUM(downloads), 0)::bigint AS total_downloads, \
                    COALESCE(SUM(view_count), 0)::bigint AS total_views, \
                    COALESCE(AVG(rating) FILTER (WHERE rating_count > 0), 0)::float8 \
                        AS average_rating \
             FROM note WHERE author_id = $1",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(AuthorStats {
            total_notes: row.get("total_notes"),
            approved_notes: row.get("approved_notes"),
            pending_notes: row.get("pending_notes"),
            total_downloads: row.get("total_downloads"),
            total_views: row.get("total_views"),
            average_rating: row.get("average_rating"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_mapping() {
        assert_eq!(build_order_clause(NoteSort::Newest), "n.created_at_utc DESC");
        assert_eq!(build_order_clause(NoteSort::Oldest), "n.created_at_utc ASC");
        assert!(build_order_clause(NoteSort::Rating).starts_with("n.rating DESC"));
        assert!(build_order_clause(NoteSort::Downloads).starts_with("n.downloads DESC"));
        assert!(build_order_clause(NoteSort::Views).starts_with("n.view_count DESC"));
    }

    #[test]
    fn test_public_scope_pins_visibility() {
        let req = ListNotesRequest::public();
        let (conditions, params) = build_list_conditions(&req);
        assert_eq!(
            conditions,
            vec!["n.status = 'approved' AND n.is_public = true".to_string()]
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_public_scope_ignores_status_filter() {
        let mut req = ListNotesRequest::public();
        req.status = Some(ModerationStatus::Pending);
        let (conditions, _) = build_list_conditions(&req);
        assert!(conditions.iter().all(|c| !c.contains("$")));
    }

    #[test]
    fn test_classification_filters_are_numbered_in_order() {
        let mut req = ListNotesRequest::public();
        req.degree = Some("btech".to_string());
        req.semester = Some("sem1".to_string());
        req.subject = Some("engineering_mathematics".to_string());
        let (conditions, params) = build_list_conditions(&req);

        assert!(conditions.contains(&"n.degree = $1".to_string()));
        assert!(conditions.contains(&"n.semester = $2".to_string()));
        assert!(conditions.contains(&"n.subject = $3".to_string()));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_owner_scope_binds_author_and_status() {
        let owner = Uuid::new_v4();
        let mut req = ListNotesRequest::public();
        req.scope = ListScope::Owner(owner);
        req.status = Some(ModerationStatus::Rejected);
        let (conditions, params) = build_list_conditions(&req);

        assert_eq!(conditions[0], "n.author_id = $1");
        assert_eq!(conditions[1], "n.status = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_search_condition_reuses_one_parameter() {
        let mut req = ListNotesRequest::public();
        req.search = Some("100% calculus".to_string());
        let (conditions, params) = build_list_conditions(&req);

        let search_cond = conditions.last().unwrap();
        assert_eq!(search_cond.matches("$1").count(), 3);
        assert_eq!(params.len(), 1);
        match &params[0] {
            QueryParam::Text(p) => assert_eq!(p, "%100\\% calculus%"),
            _ => panic!("expected text parameter"),
        }
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut req = ListNotesRequest::public();
        req.search = Some("   ".to_string());
        let (conditions, params) = build_list_conditions(&req);
        assert_eq!(conditions.len(), 1);
        assert!(params.is_empty());
    }

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " calculus ".to_string(),
            "".to_string(),
            "Calculus".to_string(),
            "sem1".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["calculus", "sem1"]);
    }

    #[test]
    fn test_visibility_rules() {
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        // approved + public: visible to everyone
        assert!(visible_under(ListScope::Public, author, ModerationStatus::Approved, true));
        // pending: hidden from public, visible to owner and admin
        assert!(!visible_under(ListScope::Public, author, ModerationStatus::Pending, true));
        assert!(visible_under(ListScope::Owner(author), author, ModerationStatus::Pending, true));
        assert!(!visible_under(ListScope::Owner(other), author, ModerationStatus::Pending, true));
        assert!(visible_under(ListScope::Admin, author, ModerationStatus::Pending, true));
        // private approved note: hidden from public, visible to owner
        assert!(!visible_under(ListScope::Public, author, ModerationStatus::Approved, false));
        assert!(visible_under(ListScope::Owner(author), author, ModerationStatus::Approved, false));
    }
}
