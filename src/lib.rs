pub mod data;
mod error;

pub use data::{
    aggregate, empty_field_kind, ExtraData, FieldSet, LedgerConfig, Level, LifecycleBinding,
    MapStore, NewNotification, Notification, NotificationId, NotificationLedger,
    NotificationOwner, NotificationStore, NotifySwitch, OwnerId, OwnerRef, Recheck, Timestamp,
    Value, now,
};
pub use error::{Error, Result};

#[doc(hidden)]
pub use serde_json;

/// Build a [`FieldSet`] from field names
///
/// # Examples
///
/// ```
/// use notify_ledger::sfields;
///
/// let entity_level = sfields![];
/// let single = sfields!["email"];
/// let several = sfields!["street", "city"];
/// assert!(entity_level.is_empty());
/// assert!(single.is_subset_of(&sfields!["email", "phone"]));
/// assert_eq!(several.len(), 2);
/// ```
#[macro_export]
macro_rules! sfields {
    [] => {
        $crate::FieldSet::empty()
    };
    [$($field:expr),+ $(,)?] => {
        [$($field),+].into_iter().collect::<$crate::FieldSet>()
    };
}

/// Build an [`ExtraData`] map from `key => value` pairs
///
/// # Examples
///
/// ```
/// use notify_ledger::sextra;
///
/// let extra = sextra! { "min_length" => 8, "hint" => "use more characters" };
/// assert_eq!(extra["min_length"], 8);
/// ```
#[macro_export]
macro_rules! sextra {
    {} => {
        $crate::ExtraData::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut extra = $crate::ExtraData::new();
            $(
                extra.insert($key.to_string(), $crate::serde_json::json!($value));
            )+
            extra
        }
    };
}

/// Create a Some(Value::String) for host field values
#[macro_export]
macro_rules! sstr {
    ($value:expr) => {
        Some($crate::Value::String($value.to_string()))
    };
}

/// Create a Some(Value::Int) for host field values
#[macro_export]
macro_rules! sint {
    ($value:expr) => {
        Some($crate::Value::Int($value))
    };
}

/// Create a Some(Value::Bool) for host field values
#[macro_export]
macro_rules! sbool {
    ($value:expr) => {
        Some($crate::Value::Bool($value))
    };
}

#[cfg(test)]
mod test;
