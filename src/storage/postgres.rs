use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, EventChanges, EventFields};

const EVENT_COLUMNS: &str =
    r#"id, title, description, venue, "date", "time", created_at, updated_at"#;

/// PostgreSQL-backed event store. Each operation is a single statement.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub async fn list(&self) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            r#"SELECT {EVENT_COLUMNS} FROM events ORDER BY "date" ASC, "time" ASC, created_at ASC"#
        );

        sqlx::query_as::<_, Event>(&query)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create(&self, fields: EventFields) -> Result<Event, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO events (id, title, description, venue, "date", "time", created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {EVENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(Uuid::new_v4())
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.venue)
            .bind(fields.date)
            .bind(fields.time)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Absent fields keep their stored value. `updated_at` never moves backwards.
    pub async fn update(
        &self,
        id: Uuid,
        changes: EventChanges,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                venue = COALESCE($4, venue),
                "date" = COALESCE($5, "date"),
                "time" = COALESCE($6, "time"),
                updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.venue)
            .bind(changes.date)
            .bind(changes.time)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
