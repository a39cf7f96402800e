mod change_type;
mod entity_id;
mod entity_kind;

pub use change_type::ChangeType;
pub use entity_id::EntityId;
pub use entity_kind::EntityKind;
