//! Reservation record as returned by `GET /reservations`
//!
//! Fields are kept as raw JSON and only turned into text when rendered, so a
//! record with an odd value (a negative guest count, a numeric name, a float
//! timestamp) still shows up next to the well-formed ones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw `dateTime` value: an ISO-8601 string or epoch milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeValue {
    EpochMillis(i64),
    Text(String),
}

impl DateTimeValue {
    /// Interpret a JSON value. Fractional milliseconds are truncated;
    /// anything that is neither a number nor a string has no time.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .map(DateTimeValue::EpochMillis),
            Value::String(s) => Some(DateTimeValue::Text(s.clone())),
            _ => None,
        }
    }

    /// Resolve into `tz`. Strings without an offset are read as wall-clock
    /// time in `tz`; bare dates are midnight UTC.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            DateTimeValue::EpochMillis(ms) => {
                DateTime::<Utc>::from_timestamp_millis(*ms).map(|dt| dt.with_timezone(tz))
            }
            DateTimeValue::Text(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(tz));
                }
                // %#z accepts `Z`, `+hh`, `+hhmm` and `+hh:mm`
                for pattern in ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"] {
                    if let Ok(dt) = DateTime::parse_from_str(s, pattern) {
                        return Some(dt.with_timezone(tz));
                    }
                }
                for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
                    if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
                        return tz.from_local_datetime(&naive).earliest();
                    }
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
            }
        }
    }
}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "Pending"),
            ReservationStatus::Confirmed => write!(f, "Confirmed"),
            ReservationStatus::Canceled => write!(f, "Canceled"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "canceled" | "cancelled" => Ok(ReservationStatus::Canceled),
            other => Err(format!("unknown reservation status '{}'", other)),
        }
    }
}

/// A single booked visit, fields exactly as the server sent them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub guests: Option<Value>,
    #[serde(default)]
    pub date_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl Reservation {
    /// Build from one element of the response array. Elements that are not
    /// objects become an all-blank record.
    pub fn from_json(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Render key; empty when the record has no id
    pub fn key(&self) -> String {
        display_text(self.id.as_ref())
    }

    pub fn name_text(&self) -> String {
        display_text(self.name.as_ref())
    }

    pub fn guests_text(&self) -> String {
        display_text(self.guests.as_ref())
    }

    pub fn date_time(&self) -> Option<DateTimeValue> {
        self.date_time.as_ref().and_then(DateTimeValue::from_json)
    }

    /// Status label as sent, if any
    pub fn status_label(&self) -> Option<String> {
        match &self.status {
            None | Some(Value::Null) => None,
            Some(v) => Some(display_text(Some(v))),
        }
    }

    /// Parsed status, if the upstream sent one we recognise
    pub fn status(&self) -> Option<ReservationStatus> {
        self.status_label().and_then(|s| s.parse().ok())
    }
}

/// Text shown for a raw JSON field: strings verbatim, null or missing as
/// nothing, everything else as its JSON form
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
