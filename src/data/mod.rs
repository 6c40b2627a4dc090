pub mod aggregate;
mod config;
mod field_set;
mod ledger;
mod lifecycle;
mod notifications;
mod owner;
mod store;
mod store_trait;
mod value;

pub use config::{LedgerConfig, NotifySwitch, CREATE_NOTIFICATIONS_ENV};
pub use field_set::FieldSet;
pub use ledger::{empty_field_kind, NotificationLedger};
pub use lifecycle::{LifecycleBinding, NotificationOwner, Recheck};
pub use notifications::{ExtraData, Level, NewNotification, Notification, NotificationId};
pub use owner::{OwnerId, OwnerRef};
pub use store::{MapStore, RecordNotFound};
pub use store_trait::NotificationStore;
pub use value::{is_empty_value, Value};

pub type Timestamp = time::OffsetDateTime;

pub fn now() -> Timestamp {
    time::OffsetDateTime::now_utc()
}

pub fn epoch() -> Timestamp {
    time::OffsetDateTime::UNIX_EPOCH
}
