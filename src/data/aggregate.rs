//! Aggregates over a loaded set of notifications.
//!
//! Both functions ignore deactivated records and are O(n) in the number of
//! records. They are used by the ledger on its cache and by stores that
//! compute levels for many owners at once.

use std::collections::BTreeMap;

use crate::data::{Level, Notification};

/// Highest level among active notifications, `0` when there are none
pub fn max_active_level<'a, I>(notifications: I) -> Level
where
    I: IntoIterator<Item = &'a Notification>,
{
    notifications
        .into_iter()
        .filter(|n| n.is_active())
        .map(|n| n.level)
        .max()
        .unwrap_or(0)
}

/// Field name to level for every active, field-scoped notification.
///
/// Entity-level notifications are skipped. A record naming several fields
/// contributes one entry per field. When two records name the same field the
/// one seen later in iteration order wins, regardless of level.
pub fn export_field_levels<'a, I>(notifications: I) -> BTreeMap<String, Level>
where
    I: IntoIterator<Item = &'a Notification>,
{
    let mut levels = BTreeMap::new();
    for notification in notifications
        .into_iter()
        .filter(|n| n.is_active() && !n.is_entity_level())
    {
        for field in notification.fields.iter() {
            levels.insert(field.to_string(), notification.level);
        }
    }
    levels
}
