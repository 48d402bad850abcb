//! Document payloads, snapshots, and the server-timestamp sentinel.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

/// A loosely-typed document body: top-level field name to JSON value.
pub type Document = serde_json::Map<String, Value>;

/// A document returned from a query, carrying its collection-scoped id.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSnapshot {
    pub id: String,
    pub fields: Document,
}

impl DocumentSnapshot {
    /// Decode the fields into a typed record.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

/// Field name marking a server-timestamp sentinel object.
const SENTINEL_KEY: &str = "__server_timestamp__";

/// Sentinel value that backends replace with the write-time UTC clock.
///
/// Mirrors the hosted store's server-timestamp marker: the caller never
/// supplies a wall-clock value, so record ordering does not depend on
/// client clocks.
pub fn server_timestamp() -> Value {
    let mut marker = Document::new();
    marker.insert(SENTINEL_KEY.to_string(), Value::Bool(true));
    Value::Object(marker)
}

fn is_server_timestamp(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.len() == 1 && map.get(SENTINEL_KEY).is_some())
}

/// Replace every top-level sentinel field with `now` as RFC 3339.
pub(crate) fn resolve_server_timestamps(fields: &mut Document, now: DateTime<Utc>) {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Micros, true);
    for value in fields.values_mut() {
        if is_server_timestamp(value) {
            *value = Value::String(stamp.clone());
        }
    }
}

/// Strictly monotonic UTC clock, one per store instance.
///
/// Each call returns at least one microsecond more than the previous
/// call, so `createdAt` stamps assigned by one backend never collide.
pub(crate) struct ServerClock {
    last_micros: AtomicI64,
}

impl Default for ServerClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerClock {
    pub(crate) fn new() -> Self {
        Self {
            last_micros: AtomicI64::new(0),
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        let mut prev = self.last_micros.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev + 1);
            match self.last_micros.compare_exchange(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    return DateTime::<Utc>::from_timestamp_micros(next)
                        .unwrap_or_else(Utc::now);
                }
                Err(observed) => prev = observed,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_round_trip() {
        assert!(is_server_timestamp(&server_timestamp()));
        assert!(!is_server_timestamp(&json!({"other": true})));
        assert!(!is_server_timestamp(&json!("__server_timestamp__")));
    }

    #[test]
    fn resolve_replaces_only_sentinels() {
        let mut fields = Document::new();
        fields.insert("createdAt".into(), server_timestamp());
        fields.insert("notes".into(), json!("kept"));
        let now = Utc::now();
        resolve_server_timestamps(&mut fields, now);
        assert!(fields.get("createdAt").unwrap().is_string());
        assert_eq!(fields.get("notes").unwrap(), &json!("kept"));
    }

    #[test]
    fn server_clock_is_strictly_monotonic() {
        let clock = ServerClock::new();
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next > prev);
            prev = next;
        }
    }
}
