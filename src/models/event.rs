use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::validation::{
    date_field, expect_object, text_field, time_field, FieldErrors, FieldResult, TextRules,
};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const VENUE_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Key for the listing order: date, then time, with creation order as tie-break.
    pub fn schedule_key(&self) -> (NaiveDate, NaiveTime, DateTime<Utc>, Uuid) {
        (self.date, self.time, self.created_at, self.id)
    }

    /// Overwrites the mutable fields present in `changes` and refreshes `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply(&mut self, changes: EventChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(venue) = changes.venue {
            self.venue = venue;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(time) = changes.time {
            self.time = time;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

/// A validated payload carrying every mutable field. Used by create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl EventFields {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldErrors> {
        let parsed = parse(expect_object(payload)?, true);

        match (
            parsed.title,
            parsed.description,
            parsed.venue,
            parsed.date,
            parsed.time,
        ) {
            (
                Ok(Some(title)),
                Ok(Some(description)),
                Ok(Some(venue)),
                Ok(Some(date)),
                Ok(Some(time)),
            ) => Ok(Self {
                title,
                description,
                venue,
                date,
                time,
            }),
            // every required field that failed has an entry in `errors`
            _ => Err(parsed.errors),
        }
    }

    pub fn into_event(self, id: Uuid, now: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            venue: self.venue,
            date: self.date,
            time: self.time,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<EventFields> for EventChanges {
    fn from(fields: EventFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            venue: Some(fields.venue),
            date: Some(fields.date),
            time: Some(fields.time),
        }
    }
}

/// A validated partial payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl EventChanges {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldErrors> {
        let parsed = parse(expect_object(payload)?, false);
        parsed.errors.into_result()?;

        Ok(Self {
            title: parsed.title.ok().flatten(),
            description: parsed.description.ok().flatten(),
            venue: parsed.venue.ok().flatten(),
            date: parsed.date.ok().flatten(),
            time: parsed.time.ok().flatten(),
        })
    }
}

struct Parsed {
    title: FieldResult<String>,
    description: FieldResult<String>,
    venue: FieldResult<String>,
    date: FieldResult<NaiveDate>,
    time: FieldResult<NaiveTime>,
    errors: FieldErrors,
}

fn parse(object: &Map<String, Value>, required: bool) -> Parsed {
    let mut errors = FieldErrors::new();

    let title = text_field(
        object,
        "title",
        required,
        TextRules::bounded(TITLE_MAX_LENGTH),
        &mut errors,
    );
    let description = text_field(
        object,
        "description",
        required,
        TextRules::unbounded(),
        &mut errors,
    );
    let venue = text_field(
        object,
        "venue",
        required,
        TextRules::bounded(VENUE_MAX_LENGTH),
        &mut errors,
    );
    let date = date_field(object, "date", required, &mut errors);
    let time = time_field(object, "time", required, &mut errors);

    Parsed {
        title,
        description,
        venue,
        date,
        time,
        errors,
    }
}
