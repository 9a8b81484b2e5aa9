//! Message model
//!
//! A pushed message arrives as a loose JSON map ([`RawMessage`]). Before it
//! is written it is validated into a [`MessageEntry`], and its embedded user
//! map (if any) into a [`UserEntry`].

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::SourceType;
use crate::core::error::PushError;
use crate::core::services::identity;

/// A message as received from the caller
pub type RawMessage = serde_json::Map<String, Value>;

/// Message identifier field
pub const ID_FIELD: &str = "id_str";
/// `[latitude, longitude]` field
pub const LOCATION_FIELD: &str = "location_point";
/// Modification timestamp field
pub const MTIME_FIELD: &str = "mtime";
/// Source type field
pub const SOURCE_TYPE_FIELD: &str = "source_type";
/// Embedded user map field
pub const USER_FIELD: &str = "user";
/// Screen name field of a user map
pub const SCREEN_NAME_FIELD: &str = "screen_name";

/// Fields ignored when deciding whether two messages carry the same content.
///
/// Identifiers are re-derived on every harvest run, so two logically equal
/// messages routinely differ here.
pub const IDENTIFIER_FIELDS: &[&str] = &[ID_FIELD];

/// Render a JSON scalar the way it appears in identifiers
///
/// Strings are used verbatim, everything else in its JSON form. Numbers keep
/// their original notation (`13` stays `13`, `52.52` stays `52.52`).
#[must_use]
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One coordinate of a location point
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    /// Numeric coordinate, kept in its original notation
    Number(Number),
    /// Coordinate supplied as text
    Text(String),
}

impl Coordinate {
    fn from_value(field: &'static str, value: &Value) -> Result<Self, PushError> {
        match value {
            Value::Number(n) => Ok(Self::Number(n.clone())),
            Value::String(s) => Ok(Self::Text(s.clone())),
            other => Err(PushError::TypeMismatch {
                field,
                reason: format!("expected number or string, found {}", kind_of(other)),
            }),
        }
    }

    /// Numeric value, if the coordinate is a number or numeric text
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// `[latitude, longitude]` pair of a message
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPoint {
    /// Index 0 of `location_point`
    pub latitude: Coordinate,
    /// Index 1 of `location_point`
    pub longitude: Coordinate,
}

impl LocationPoint {
    /// Extract the location point of a raw message
    pub fn from_message(message: &RawMessage) -> Result<Self, PushError> {
        let value = message
            .get(LOCATION_FIELD)
            .ok_or_else(|| PushError::InvalidInput(format!("{LOCATION_FIELD} not found")))?;
        Self::from_value(value)
    }

    /// Parse a `[latitude, longitude]` JSON array
    pub fn from_value(value: &Value) -> Result<Self, PushError> {
        let Value::Array(items) = value else {
            return Err(PushError::TypeMismatch {
                field: LOCATION_FIELD,
                reason: format!("expected [latitude, longitude], found {}", kind_of(value)),
            });
        };
        if items.len() != 2 {
            return Err(PushError::TypeMismatch {
                field: LOCATION_FIELD,
                reason: format!("expected 2 coordinates, found {}", items.len()),
            });
        }
        Ok(Self {
            latitude: Coordinate::from_value("latitude", &items[0])?,
            longitude: Coordinate::from_value("longitude", &items[1])?,
        })
    }

    /// Whether both points denote the same position
    ///
    /// Numeric coordinates compare by value, so `52.5` and `"52.5"` match.
    #[must_use]
    pub fn same_point(&self, other: &Self) -> bool {
        fn same(a: &Coordinate, b: &Coordinate) -> bool {
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            }
        }
        same(&self.latitude, &other.latitude) && same(&self.longitude, &other.longitude)
    }

    /// JSON form, as stored in messages
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(vec![self.latitude.to_value(), self.longitude.to_value()])
    }
}

/// A validated message, ready to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawMessage", try_from = "RawMessage")]
pub struct MessageEntry {
    id_str: String,
    source_type: SourceType,
    location_point: LocationPoint,
    mtime: Value,
    /// Every other field of the original message
    fields: RawMessage,
}

impl MessageEntry {
    /// Validate a raw message
    ///
    /// `fallback` is used when the message carries no `source_type`. A
    /// message without `id_str` gets one derived from its source type,
    /// location and mtime.
    pub fn from_raw(mut raw: RawMessage, fallback: SourceType) -> Result<Self, PushError> {
        let source_type = match raw.get(SOURCE_TYPE_FIELD) {
            None | Some(Value::Null) => fallback,
            Some(Value::String(s)) => s.parse().map_err(PushError::InvalidInput)?,
            Some(other) => {
                return Err(PushError::TypeMismatch {
                    field: SOURCE_TYPE_FIELD,
                    reason: format!("expected string, found {}", kind_of(other)),
                });
            },
        };

        let id_str = match raw.get(ID_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => identity::compute_message_id(&raw, None, source_type)?,
        };

        let location_point = LocationPoint::from_message(&raw)?;
        let mtime = raw
            .remove(MTIME_FIELD)
            .ok_or_else(|| PushError::InvalidInput(format!("{MTIME_FIELD} not found")))?;
        for field in [ID_FIELD, SOURCE_TYPE_FIELD, LOCATION_FIELD] {
            raw.remove(field);
        }

        Ok(Self {
            id_str,
            source_type,
            location_point,
            mtime,
            fields: raw,
        })
    }

    /// Message identifier
    #[must_use]
    pub fn id_str(&self) -> &str {
        &self.id_str
    }

    /// Source type of the message
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Location of the message
    #[must_use]
    pub const fn location_point(&self) -> &LocationPoint {
        &self.location_point
    }

    /// Any field of the message, including the validated ones
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            ID_FIELD => Some(Value::String(self.id_str.clone())),
            SOURCE_TYPE_FIELD => Some(Value::String(self.source_type.name().to_string())),
            LOCATION_FIELD => Some(self.location_point.to_value()),
            MTIME_FIELD => Some(self.mtime.clone()),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Flat field map, as stored
    #[must_use]
    pub fn to_map(&self) -> RawMessage {
        let mut map = self.fields.clone();
        map.insert(ID_FIELD.to_string(), Value::String(self.id_str.clone()));
        map.insert(
            SOURCE_TYPE_FIELD.to_string(),
            Value::String(self.source_type.name().to_string()),
        );
        map.insert(LOCATION_FIELD.to_string(), self.location_point.to_value());
        map.insert(MTIME_FIELD.to_string(), self.mtime.clone());
        map
    }

    /// Field map without identifier fields, used to compare content
    #[must_use]
    pub fn comparison_key(&self) -> RawMessage {
        let mut map = self.to_map();
        for field in IDENTIFIER_FIELDS {
            map.remove(*field);
        }
        map
    }

    /// Same content as `other`, ignoring identifiers
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl From<MessageEntry> for RawMessage {
    fn from(entry: MessageEntry) -> Self {
        entry.to_map()
    }
}

impl TryFrom<RawMessage> for MessageEntry {
    type Error = PushError;

    /// Stored messages must carry their own source type.
    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        if !raw.contains_key(SOURCE_TYPE_FIELD) {
            return Err(PushError::InvalidInput(format!("{SOURCE_TYPE_FIELD} not found")));
        }
        Self::from_raw(raw, SourceType::default())
    }
}

/// The user map detached from a message
///
/// Empty when the message had no user, or a user without a screen name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserEntry {
    fields: RawMessage,
}

impl UserEntry {
    /// Build from the detached `user` value of a message
    #[must_use]
    pub fn from_detached(user: Option<Value>) -> Self {
        match user {
            Some(Value::Object(fields)) if has_screen_name(&fields) => Self { fields },
            Some(Value::Null) | None => Self::default(),
            Some(_) => {
                log::warn!("ignoring user data without a screen name");
                Self::default()
            },
        }
    }

    /// Screen name of the user, if any
    #[must_use]
    pub fn screen_name(&self) -> Option<&str> {
        self.fields.get(SCREEN_NAME_FIELD).and_then(Value::as_str)
    }

    /// Whether the message had no usable user
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field map of the user
    #[must_use]
    pub const fn fields(&self) -> &RawMessage {
        &self.fields
    }
}

fn has_screen_name(fields: &RawMessage) -> bool {
    fields.get(SCREEN_NAME_FIELD).and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}
