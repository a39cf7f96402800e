use crate::domain::value_objects::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name of the record identifier.
pub const ID_FIELD: &str = "id";
/// Field name of the foreign key to the owning pet on non-root kinds.
pub const PARENT_FIELD: &str = "petId";

/// An entity record as an opaque labeled field map. The engine never
/// interprets fields beyond `id` and the parent foreign key; everything else
/// belongs to the application schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("entity record must be a JSON object, got {other}")),
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.0.get(ID_FIELD).and_then(EntityId::from_value)
    }

    pub fn set_id(&mut self, id: EntityId) {
        self.0.insert(ID_FIELD.to_string(), id.into());
    }

    pub fn parent_id(&self) -> Option<EntityId> {
        self.0.get(PARENT_FIELD).and_then(EntityId::from_value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Shallow merge: each field in `patch` overwrites the existing value,
    /// last write wins per field. Nested objects are replaced, not merged.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
