use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";
pub const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const INVALID_TIME: &str =
    "Time has wrong format. Use one of these formats instead: hh:mm[:ss[.uuuuuu]].";

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Field name to the list of messages collected for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Ok when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Borrow the payload as a JSON object or report what was sent instead.
pub fn expect_object(payload: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    let kind = match payload {
        Value::Object(map) => return Ok(map),
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
    };

    let mut errors = FieldErrors::new();
    errors.add(
        NON_FIELD_ERRORS,
        format!("Invalid data. Expected an object, but got {}.", kind),
    );
    Err(errors)
}

/// Rules for a text-like field.
#[derive(Debug, Clone, Copy)]
pub struct TextRules {
    pub allow_blank: bool,
    pub max_length: Option<usize>,
}

impl TextRules {
    pub const fn bounded(max_length: usize) -> Self {
        Self {
            allow_blank: false,
            max_length: Some(max_length),
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            allow_blank: false,
            max_length: None,
        }
    }
}

/// Marker returned once a field's problem has been recorded in [`FieldErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalid;

/// `Ok(None)` means the field was absent and not required.
pub type FieldResult<T> = Result<Option<T>, Invalid>;

/// Every problem is recorded in `errors` so callers can keep checking the
/// remaining fields.
fn lookup<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> FieldResult<&'a Value> {
    match object.get(field) {
        None if required => {
            errors.add(field, REQUIRED);
            Err(Invalid)
        }
        None => Ok(None),
        Some(Value::Null) => {
            errors.add(field, NOT_NULL);
            Err(Invalid)
        }
        Some(value) => Ok(Some(value)),
    }
}

pub fn text_field(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    rules: TextRules,
    errors: &mut FieldErrors,
) -> FieldResult<String> {
    let Some(value) = lookup(object, field, required, errors)? else {
        return Ok(None);
    };

    let text = match value {
        // Postgres text columns cannot store NUL
        Value::String(s) if s.contains('\0') => {
            errors.add(field, NULL_CHARACTERS);
            return Err(Invalid);
        }
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            errors.add(field, INVALID_STRING);
            return Err(Invalid);
        }
    };

    if !rules.allow_blank && text.is_empty() {
        errors.add(field, NOT_BLANK);
        return Err(Invalid);
    }

    if let Some(max) = rules.max_length {
        if text.chars().count() > max {
            errors.add(
                field,
                format!("Ensure this field has no more than {} characters.", max),
            );
            return Err(Invalid);
        }
    }

    Ok(Some(text))
}

pub fn date_field(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> FieldResult<NaiveDate> {
    let Some(value) = lookup(object, field, required, errors)? else {
        return Ok(None);
    };

    match value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
    {
        Some(date) => Ok(Some(date)),
        None => {
            errors.add(field, INVALID_DATE);
            Err(Invalid)
        }
    }
}

pub fn time_field(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> FieldResult<NaiveTime> {
    let Some(value) = lookup(object, field, required, errors)? else {
        return Ok(None);
    };

    let parsed = value.as_str().and_then(|s| {
        let s = s.trim();
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
    });

    match parsed {
        Some(time) => Ok(Some(truncate_to_micros(time))),
        None => {
            errors.add(field, INVALID_TIME);
            Err(Invalid)
        }
    }
}

/// Both backends keep time-of-day at microsecond precision.
fn truncate_to_micros(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(time.nanosecond() / 1_000 * 1_000)
        .unwrap_or(time)
}
