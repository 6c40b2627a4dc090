use serde::{Deserialize, Serialize};

/// Storage identifier of an owner entity. Zero means "not persisted yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd, Default)]
pub struct OwnerId(pub u64);

impl OwnerId {
    pub const UNSAVED: OwnerId = OwnerId(0);

    pub fn is_unsaved(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for OwnerId {
    fn from(id: u64) -> Self {
        OwnerId(id)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Foreign key of the entity a notification belongs to.
///
/// Notifications never hold the owner itself, only its type tag and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub owner_type: String,
    pub owner_id: OwnerId,
}

impl OwnerRef {
    pub fn new(owner_type: impl Into<String>, owner_id: u64) -> Self {
        Self {
            owner_type: owner_type.into(),
            owner_id: OwnerId(owner_id),
        }
    }

    /// Reference for an owner that has not been saved yet
    pub fn unsaved(owner_type: impl Into<String>) -> Self {
        Self::new(owner_type, OwnerId::UNSAVED.0)
    }

    pub fn is_persisted(&self) -> bool {
        !self.owner_id.is_unsaved()
    }

    /// Same owner type, different id. Used when a host entity gets its id on first save.
    pub fn with_id(&self, owner_id: u64) -> Self {
        Self::new(self.owner_type.clone(), owner_id)
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.owner_type, self.owner_id)
    }
}
