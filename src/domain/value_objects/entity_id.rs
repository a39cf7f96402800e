use chrono::Utc;
use rand::Rng;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Opaque entity identifier.
///
/// Identifiers are assigned by the remote service or, for records created
/// while offline, generated locally. They are only ever compared for
/// equality. Both the numeric form and the serialized string form normalize
/// to the same identifier, so a record stored under one form is found under
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(i64);

impl EntityId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Generate a fresh local identifier without a server round-trip: a
    /// millisecond timestamp plus a small random component. Collisions are
    /// possible in principle but vanishingly unlikely for a single device.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let salt = rand::thread_rng().gen_range(0..1000);
        Self(millis + salt)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Normalize a JSON value into an identifier. Accepts a number or a
    /// numeric string; anything else is not an identifier.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("invalid entity id: {s}"))
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::from(id.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

struct EntityIdVisitor;

impl Visitor<'_> for EntityIdVisitor {
    type Value = EntityId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
        Ok(EntityId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
        i64::try_from(v)
            .map(EntityId)
            .map_err(|_| E::custom("entity id out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
        v.parse::<EntityId>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityIdVisitor)
    }
}
