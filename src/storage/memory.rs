// In-memory event store for dev mode and tests.
// Rows and the schedule index live behind one lock so they never disagree.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{Event, EventChanges, EventFields};

type ScheduleKey = (NaiveDate, NaiveTime, DateTime<Utc>, Uuid);

#[derive(Default)]
struct Tables {
    rows: HashMap<Uuid, Event>,
    by_schedule: BTreeSet<ScheduleKey>,
}

/// All data is lost on restart.
#[derive(Default)]
pub struct InMemoryEventStore {
    tables: RwLock<Tables>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Event> {
        let tables = self.tables.read();
        tables
            .by_schedule
            .iter()
            .filter_map(|(_, _, _, id)| tables.rows.get(id).cloned())
            .collect()
    }

    pub fn create(&self, fields: EventFields) -> Event {
        let event = fields.into_event(Uuid::new_v4(), Utc::now());

        let mut tables = self.tables.write();
        tables.by_schedule.insert(event.schedule_key());
        tables.rows.insert(event.id, event.clone());
        event
    }

    pub fn get(&self, id: Uuid) -> Option<Event> {
        self.tables.read().rows.get(&id).cloned()
    }

    pub fn update(&self, id: Uuid, changes: EventChanges) -> Option<Event> {
        let mut guard = self.tables.write();
        let tables = &mut *guard;
        let event = tables.rows.get_mut(&id)?;

        tables.by_schedule.remove(&event.schedule_key());
        event.apply(changes, Utc::now());
        tables.by_schedule.insert(event.schedule_key());

        Some(event.clone())
    }

    pub fn delete(&self, id: Uuid) -> bool {
        let mut tables = self.tables.write();
        match tables.rows.remove(&id) {
            Some(event) => {
                tables.by_schedule.remove(&event.schedule_key());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tables.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
