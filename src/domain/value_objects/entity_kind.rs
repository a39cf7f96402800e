use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of record the engine stores and syncs. `Pet` is the root kind;
/// the others belong to a pet via a `petId` foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Pet,
    CareInstruction,
    EmergencyContact,
    Caretaker,
}

impl EntityKind {
    /// Fixed, deterministic order used when draining the pending-change log.
    /// Parents come before their children so replayed creates exist by the
    /// time dependent records are submitted.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Pet,
        EntityKind::CareInstruction,
        EntityKind::EmergencyContact,
        EntityKind::Caretaker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Pet => "pet",
            EntityKind::CareInstruction => "careInstruction",
            EntityKind::EmergencyContact => "emergencyContact",
            EntityKind::Caretaker => "caretaker",
        }
    }

    /// REST collection name on the remote service.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Pet => "pets",
            EntityKind::CareInstruction => "careInstructions",
            EntityKind::EmergencyContact => "emergencyContacts",
            EntityKind::Caretaker => "caretakers",
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, EntityKind::Pet)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pet" => Ok(EntityKind::Pet),
            "careInstruction" => Ok(EntityKind::CareInstruction),
            "emergencyContact" => Ok(EntityKind::EmergencyContact),
            "caretaker" => Ok(EntityKind::Caretaker),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}
