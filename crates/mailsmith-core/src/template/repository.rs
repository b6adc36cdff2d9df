//! Template storage repository.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::model::{PersistedTemplate, TemplateId, TemplatePayload, UserId};
use crate::{Error, Result};

const SELECT_COLUMNS: &str = r"
    SELECT id, user_id,
           title, title_en, title_ja,
           preview_text, preview_text_en, preview_text_ja,
           content, content_en, content_ja,
           created_at, updated_at
    FROM mails
";

/// Repository for template storage and retrieval.
///
/// Every query is scoped to the owning user.
pub struct TemplateRepository {
    pool: SqlitePool,
}

impl TemplateRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS mails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                title_en TEXT,
                title_ja TEXT,
                preview_text TEXT,
                preview_text_en TEXT,
                preview_text_ja TEXT,
                content TEXT NOT NULL,
                content_en TEXT,
                content_ja TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_mails_user ON mails(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new template owned by `user`.
    ///
    /// Per-language fields missing from the payload (absent or empty) are
    /// filled from the legacy fields, so a freshly created template always
    /// has both language variants populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn create(
        &self,
        user: &UserId,
        payload: &TemplatePayload,
    ) -> Result<PersistedTemplate> {
        let now = Utc::now();
        let title = payload.title.clone();
        let preview_text = payload.preview_text.clone();
        let content = payload.content.clone();

        let template = PersistedTemplate {
            id: TemplateId::new(0),
            user_id: user.clone(),
            title_en: Some(or_else(payload.title_en.as_deref(), &title)),
            title_ja: Some(or_else(payload.title_ja.as_deref(), &title)),
            preview_text_en: non_empty(payload.preview_text_en.as_deref())
                .or_else(|| preview_text.clone()),
            preview_text_ja: non_empty(payload.preview_text_ja.as_deref())
                .or_else(|| preview_text.clone()),
            content_en: Some(or_else(payload.content_en.as_deref(), &content)),
            content_ja: Some(or_else(payload.content_ja.as_deref(), &content)),
            title,
            preview_text,
            content,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let result = sqlx::query(
            r"
            INSERT INTO mails (
                user_id,
                title, title_en, title_ja,
                preview_text, preview_text_en, preview_text_ja,
                content, content_en, content_ja,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&template.user_id.0)
        .bind(&template.title)
        .bind(&template.title_en)
        .bind(&template.title_ja)
        .bind(&template.preview_text)
        .bind(&template.preview_text_en)
        .bind(&template.preview_text_ja)
        .bind(&template.content)
        .bind(&template.content_en)
        .bind(&template.content_ja)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = TemplateId::new(result.last_insert_rowid());
        debug!("Created template {id} for user {user}");

        Ok(PersistedTemplate { id, ..template })
    }

    /// Get a template by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, user: &UserId, id: TemplateId) -> Result<Option<PersistedTemplate>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ? AND user_id = ?"))
            .bind(id.0)
            .bind(&user.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_template))
    }

    /// Get all templates of a user, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user: &UserId) -> Result<Vec<PersistedTemplate>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? ORDER BY updated_at DESC, id DESC"
        ))
        .bind(&user.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_template).collect())
    }

    /// Update the fields supplied in `payload`.
    ///
    /// `title` and `content` are only written when non-empty; every other
    /// field is written whenever it is present, even if empty. Fields absent
    /// from the payload keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if the template does not exist or
    /// belongs to another user, or an error if the database query fails.
    pub async fn update(
        &self,
        user: &UserId,
        id: TemplateId,
        payload: &TemplatePayload,
    ) -> Result<()> {
        let mut assignments: Vec<(&str, &str)> = Vec::new();

        if !payload.title.is_empty() {
            assignments.push(("title", payload.title.as_str()));
        }
        if !payload.content.is_empty() {
            assignments.push(("content", payload.content.as_str()));
        }

        let optional = [
            ("title_en", &payload.title_en),
            ("title_ja", &payload.title_ja),
            ("preview_text", &payload.preview_text),
            ("preview_text_en", &payload.preview_text_en),
            ("preview_text_ja", &payload.preview_text_ja),
            ("content_en", &payload.content_en),
            ("content_ja", &payload.content_ja),
        ];
        for (column, value) in optional {
            if let Some(value) = value {
                assignments.push((column, value.as_str()));
            }
        }

        let mut sql = String::from("UPDATE mails SET updated_at = ?");
        for (column, _) in &assignments {
            sql.push_str(", ");
            sql.push_str(column);
            sql.push_str(" = ?");
        }
        sql.push_str(" WHERE id = ? AND user_id = ?");

        let mut query = sqlx::query(&sql).bind(Utc::now().to_rfc3339());
        for (_, value) in assignments {
            query = query.bind(value);
        }

        let result = query
            .bind(id.0)
            .bind(&user.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TemplateNotFound(id));
        }

        debug!("Updated template {id} for user {user}");
        Ok(())
    }

    /// Delete a template.
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, user: &UserId, id: TemplateId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM mails WHERE id = ? AND user_id = ?")
            .bind(id.0)
            .bind(&user.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Treat empty strings as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn or_else(value: Option<&str>, fallback: &str) -> String {
    non_empty(value).unwrap_or_else(|| fallback.to_string())
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert a database row to a template.
fn row_to_template(row: &sqlx::sqlite::SqliteRow) -> PersistedTemplate {
    PersistedTemplate {
        id: TemplateId::new(row.get("id")),
        user_id: UserId::new(row.get::<String, _>("user_id")),
        title: row.get("title"),
        title_en: row.get("title_en"),
        title_ja: row.get("title_ja"),
        preview_text: row.get("preview_text"),
        preview_text_en: row.get("preview_text_en"),
        preview_text_ja: row.get("preview_text_ja"),
        content: row.get("content"),
        content_en: row.get("content_en"),
        content_ja: row.get("content_ja"),
        created_at: parse_timestamp(row.get("created_at")),
        updated_at: parse_timestamp(row.get("updated_at")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1")
    }

    fn payload(title: &str) -> TemplatePayload {
        TemplatePayload {
            title: title.to_string(),
            preview_text: Some("Legacy preview".to_string()),
            content: r#"{"type":"doc"}"#.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_fills_localized_fields_from_legacy() {
        let repo = TemplateRepository::in_memory().await.unwrap();

        let mut p = payload("Welcome");
        p.title_ja = Some("ようこそ".to_string());
        p.content_en = Some(String::new());

        let created = repo.create(&user(), &p).await.unwrap();
        assert_eq!(created.title_en.as_deref(), Some("Welcome"));
        assert_eq!(created.title_ja.as_deref(), Some("ようこそ"));
        assert_eq!(created.preview_text_ja.as_deref(), Some("Legacy preview"));
        assert_eq!(created.content_en.as_deref(), Some(r#"{"type":"doc"}"#));

        let stored = repo.get(&user(), created.id).await.unwrap().unwrap();
        assert_eq!(stored.title_ja, created.title_ja);
        assert_eq!(stored.content_ja, created.content_ja);
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn test_update_writes_only_supplied_fields() {
        let repo = TemplateRepository::in_memory().await.unwrap();
        let created = repo.create(&user(), &payload("Welcome")).await.unwrap();

        let update = TemplatePayload {
            title: "Welcome back".to_string(),
            content: "{\"v\":2}".to_string(),
            content_ja: Some("{\"ja\":2}".to_string()),
            preview_text_ja: Some(String::new()),
            ..Default::default()
        };
        repo.update(&user(), created.id, &update).await.unwrap();

        let stored = repo.get(&user(), created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Welcome back");
        assert_eq!(stored.content, "{\"v\":2}");
        assert_eq!(stored.content_ja.as_deref(), Some("{\"ja\":2}"));
        assert_eq!(stored.content_en, created.content_en);
        assert_eq!(stored.preview_text_ja.as_deref(), Some(""));
        assert_eq!(stored.preview_text_en, created.preview_text_en);
    }

    #[tokio::test]
    async fn test_update_is_scoped_to_owner() {
        let repo = TemplateRepository::in_memory().await.unwrap();
        let created = repo.create(&user(), &payload("Welcome")).await.unwrap();

        let result = repo
            .update(&UserId::new("intruder"), created.id, &payload("Hijacked"))
            .await;
        assert!(matches!(result, Err(Error::TemplateNotFound(id)) if id == created.id));

        assert!(repo.get(&UserId::new("intruder"), created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let repo = TemplateRepository::in_memory().await.unwrap();
        let first = repo.create(&user(), &payload("First")).await.unwrap();
        repo.create(&user(), &payload("Second")).await.unwrap();
        repo.create(&UserId::new("other"), &payload("Other")).await.unwrap();

        assert_eq!(repo.list(&user()).await.unwrap().len(), 2);

        assert!(repo.delete(&user(), first.id).await.unwrap());
        assert!(!repo.delete(&user(), first.id).await.unwrap());
        assert_eq!(repo.list(&user()).await.unwrap().len(), 1);
    }
}
