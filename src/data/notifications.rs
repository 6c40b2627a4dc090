use serde::{Deserialize, Serialize};

use crate::data::{now, FieldSet, OwnerRef, Timestamp};

/// Severity of a notification. Higher is more severe; the scale belongs to the host.
pub type Level = u32;

/// Free-form payload for the message/UI layer
pub type ExtraData = serde_json::Map<String, serde_json::Value>;

/// Storage identifier of a notification record, assigned on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct NotificationId(pub u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted status marker attached to an owner entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: OwnerRef,
    /// Stable machine identifier, e.g. `NO_EMAIL`
    pub kind: String,
    pub message: String,
    pub fields: FieldSet,
    pub level: Level,
    #[serde(default)]
    pub extra_data: ExtraData,
    /// Acknowledged notifications stay in storage but no longer count as active
    #[serde(default)]
    pub deactivated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Notification {
    pub fn is_active(&self) -> bool {
        !self.deactivated
    }

    pub fn is_entity_level(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether this record carries the identity `(kind, fields)` within its owner
    pub fn matches(&self, kind: &str, fields: &FieldSet) -> bool {
        self.kind == kind && fields.matches(&self.fields)
    }
}

/// A notification that has not been handed to a store yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub owner: OwnerRef,
    pub kind: String,
    pub message: String,
    pub fields: FieldSet,
    pub level: Level,
    pub extra_data: ExtraData,
    pub deactivated: bool,
    pub created_at: Timestamp,
}

impl NewNotification {
    pub fn new(owner: OwnerRef, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            owner,
            kind: kind.into(),
            message: message.into(),
            fields: FieldSet::empty(),
            level: 1,
            extra_data: ExtraData::new(),
            deactivated: false,
            created_at: now(),
        }
    }

    pub fn fields(mut self, fields: impl Into<FieldSet>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn extra_data(mut self, extra_data: ExtraData) -> Self {
        self.extra_data = extra_data;
        self
    }

    pub fn deactivated(mut self, deactivated: bool) -> Self {
        self.deactivated = deactivated;
        self
    }

    /// Attach the identifier a store assigned
    pub fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            owner: self.owner,
            kind: self.kind,
            message: self.message,
            fields: self.fields,
            level: self.level,
            extra_data: self.extra_data,
            deactivated: self.deactivated,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
