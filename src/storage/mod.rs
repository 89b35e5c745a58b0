// Storage backend abstraction.
// Enum dispatch over PostgreSQL (production) and in-memory (dev mode, tests).

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Event, EventChanges, EventFields};

pub use memory::InMemoryEventStore;
pub use postgres::PgEventStore;

#[derive(Clone)]
pub enum EventStore {
    Postgres(PgEventStore),
    InMemory(Arc<InMemoryEventStore>),
}

impl EventStore {
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryEventStore::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Ordered by date, then time.
    pub async fn list(&self) -> Result<Vec<Event>, sqlx::Error> {
        match self {
            Self::Postgres(db) => db.list().await,
            Self::InMemory(db) => Ok(db.list()),
        }
    }

    pub async fn create(&self, fields: EventFields) -> Result<Event, sqlx::Error> {
        match self {
            Self::Postgres(db) => db.create(fields).await,
            Self::InMemory(db) => Ok(db.create(fields)),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        match self {
            Self::Postgres(db) => db.get(id).await,
            Self::InMemory(db) => Ok(db.get(id)),
        }
    }

    /// Returns `None` when no event has this id.
    pub async fn update(
        &self,
        id: Uuid,
        changes: EventChanges,
    ) -> Result<Option<Event>, sqlx::Error> {
        match self {
            Self::Postgres(db) => db.update(id, changes).await,
            Self::InMemory(db) => Ok(db.update(id, changes)),
        }
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        match self {
            Self::Postgres(db) => db.delete(id).await,
            Self::InMemory(db) => Ok(db.delete(id)),
        }
    }
}

impl From<PgEventStore> for EventStore {
    fn from(store: PgEventStore) -> Self {
        Self::Postgres(store)
    }
}
