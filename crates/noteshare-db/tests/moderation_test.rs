//! Moderation transitions, deletion with counter compensation, author stats.

use noteshare_core::{
    Actor, AuthorStats, ListScope, ModerationStatus, NoteRepository, UserDirectory, UserRole,
};
use noteshare_db::test_fixtures::TestDatabase;

fn init() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter("noteshare_db=debug")
        .try_init();
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_moderation_transitions_are_one_way() -> anyhow::Result<()> {
    init();
    let db = TestDatabase::new().await;

    let author = db.create_student("Reviewed Author").await;
    let moderator = db
        .create_user_with_role("Reviewer", UserRole::Moderator)
        .await;
    let mod_actor = Actor::new(moderator.id, moderator.role);

    let note = db.create_note(&author, "Awaiting Review Notes").await;

    // Students cannot moderate
    let student_actor = Actor::new(author.id, author.role);
    assert!(matches!(
        db.notes
            .set_moderation_status(note.id, student_actor, ModerationStatus::Approved, None)
            .await,
        Err(noteshare_core::Error::Forbidden(_))
    ));

    // Pending is not a valid target
    assert!(matches!(
        db.notes
            .set_moderation_status(note.id, mod_actor, ModerationStatus::Pending, None)
            .await,
        Err(noteshare_core::Error::Validation(_))
    ));

    // Rejection requires a reason
    assert!(matches!(
        db.notes
            .set_moderation_status(note.id, mod_actor, ModerationStatus::Rejected, None)
            .await,
        Err(noteshare_core::Error::Validation(_))
    ));
    assert!(matches!(
        db.notes
            .set_moderation_status(note.id, mod_actor, ModerationStatus::Rejected, Some("   "))
            .await,
        Err(noteshare_core::Error::Validation(_))
    ));

    db.notes
        .set_moderation_status(note.id, mod_actor, ModerationStatus::Rejected, Some("blurry scan"))
        .await?;

    let rejected = db
        .notes
        .find_by_id(note.id, ListScope::Owner(author.id))
        .await?;
    assert_eq!(rejected.status, ModerationStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("blurry scan"));

    // Terminal states cannot be re-decided
    assert!(matches!(
        db.notes
            .set_moderation_status(note.id, mod_actor, ModerationStatus::Approved, None)
            .await,
        Err(noteshare_core::Error::Validation(_))
    ));

    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_delete_requires_author_or_admin() -> anyhow::Result<()> {
    init();
    let db = TestDatabase::new().await;

    let author = db.create_student("Delete Author").await;
    let stranger = db.create_student("Stranger").await;
    let note = db.create_approved_note(&author, "Soon Deleted Notes").await;
    let commenter = db.create_student("Last Commenter").await;
    db.notes
        .add_comment(note.id, commenter.id, "Last Commenter", "saving this")
        .await?;

    // Stranger is rejected and nothing changes
    assert!(matches!(
        db.notes
            .delete(note.id, Actor::new(stranger.id, stranger.role))
            .await,
        Err(noteshare_core::Error::Forbidden(_))
    ));
    assert!(db
        .notes
        .find_by_id(note.id, ListScope::Public)
        .await
        .is_ok());
    assert_eq!(db.users.get_user(author.id).await?.upload_count, 1);

    // The author may delete; comments go with the note and the author's
    // upload count is compensated back down.
    db.notes
        .delete(note.id, Actor::new(author.id, author.role))
        .await?;
    assert!(matches!(
        db.notes.find_by_id(note.id, ListScope::Admin).await,
        Err(noteshare_core::Error::NoteNotFound(_))
    ));
    assert_eq!(db.users.get_user(author.id).await?.upload_count, 0);

    let orphaned: i64 = sqlx::query_scalar("SELECT count(*) FROM note_comment WHERE note_id = $1")
        .bind(note.id)
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(orphaned, 0);

    // Deleting again reports not-found
    let admin = db.create_user_with_role("Cleanup Admin", UserRole::Admin).await;
    assert!(matches!(
        db.notes
            .delete(note.id, Actor::new(admin.id, admin.role))
            .await,
        Err(noteshare_core::Error::NoteNotFound(_))
    ));

    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_admin_delete_compensates_author_not_admin() -> anyhow::Result<()> {
    init();
    let db = TestDatabase::new().await;

    let author = db.create_student("Compensated Author").await;
    let admin = db.create_user_with_role("Acting Admin", UserRole::Admin).await;
    let note = db.create_approved_note(&author, "Removed By Admin Notes").await;

    db.notes
        .delete(note.id, Actor::new(admin.id, admin.role))
        .await?;

    // The author's count drops; the admin's is untouched.
    assert_eq!(db.users.get_user(author.id).await?.upload_count, 0);
    assert_eq!(db.users.get_user(admin.id).await?.upload_count, 0);

    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires migrated database"]
async fn test_author_stats_aggregate() -> anyhow::Result<()> {
    init();
    let db = TestDatabase::new().await;

    let author = db.create_student("Stats Author").await;
    let empty: AuthorStats = db.notes.author_stats(author.id).await?;
    assert_eq!(empty.total_notes, 0);
    assert_eq!(empty.approved_notes, 0);
    assert_eq!(empty.total_downloads, 0);
    assert_eq!(empty.average_rating, 0.0);

    let a = db.create_approved_note(&author, "Stats Note Alpha").await;
    let b = db.create_approved_note(&author, "Stats Note Beta").await;
    let _pending = db.create_note(&author, "Stats Note Pending").await;

    let rater = db.create_student("Stats Rater").await;
    db.notes.rate(a.id, rater.id, 4).await?;
    db.notes.rate(b.id, rater.id, 5).await?;
    db.notes.record_download(a.id, None).await?;
    db.notes.record_download(a.id, None).await?;
    db.notes.record_download(b.id, None).await?;

    let stats = db.notes.author_stats(author.id).await?;
    assert_eq!(stats.total_notes, 3);
    assert_eq!(stats.approved_notes, 2);
    assert_eq!(stats.total_downloads, 3);
    // Mean of per-note ratings 4.0 and 5.0 (unrated notes excluded)
    assert!((stats.average_rating - 4.5).abs() < 1e-9);

    db.cleanup().await;
    Ok(())
}
