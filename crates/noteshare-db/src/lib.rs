//! # noteshare-db
//!
//! PostgreSQL database layer for noteshare.
//!
//! This crate provides:
//! - Connection pool management
//! - The note repository and aggregator (atomic counter mutations)
//! - The user directory used for denormalization and compensation
//!
//! ## Example
//!
//! ```rust,no_run
//! use noteshare_core::{CreateNoteRequest, FileDescriptor, NoteRepository};
//! use noteshare_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/noteshare").await?;
//! #   let some_user_id = uuid::Uuid::new_v4();
//!
//!     let note = db.notes.create(CreateNoteRequest {
//!         title: "Calculus Semester Notes".to_string(),
//!         description: "Limits, derivatives, and integrals".to_string(),
//!         author_id: some_user_id,
//!         degree: "btech".to_string(),
//!         semester: "sem1".to_string(),
//!         subject: "engineering_mathematics".to_string(),
//!         unit: None,
//!         tags: vec!["calculus".to_string()],
//!         file: FileDescriptor {
//!             file_url: "/uploads/calc.pdf".to_string(),
//!             file_name: "calc.pdf".to_string(),
//!             file_size: 1_048_576,
//!             pages: 42,
//!         },
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod users;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use noteshare_core::*;

// Re-export repository implementations
pub use notes::PgNoteRepository;
pub use pool::{
    create_pool, create_pool_with_config, create_pool_with_connect_options, PoolConfig,
};
pub use users::PgUserDirectory;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository and aggregator.
    pub notes: PgNoteRepository,
    /// User directory for denormalization and counter compensation.
    pub users: PgUserDirectory,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            users: PgUserDirectory::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
