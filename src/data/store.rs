use std::error;

use ahash::AHashMap;

use crate::data::{
    aggregate, now, Level, NewNotification, Notification, NotificationId, NotificationStore,
    OwnerId, OwnerRef,
};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct RecordNotFound(pub NotificationId);
impl error::Error for RecordNotFound {}
impl std::fmt::Display for RecordNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notification not found: {}", self.0)
    }
}

/// In-memory notification store.
///
/// Records are grouped by owner and kept in insertion order. Identifiers are
/// assigned from a counter and never reused.
#[derive(Debug, Default)]
pub struct MapStore {
    records: AHashMap<OwnerRef, Vec<Notification>>,
    next_id: u64,
}

impl MapStore {
    pub fn new() -> Self {
        MapStore::default()
    }

    /// Total number of records across all owners
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.records
            .values()
            .flat_map(|records| records.iter())
            .find(|n| n.id == id)
    }

    /// Acknowledge a notification: it stays stored but stops counting as active
    pub fn deactivate(&mut self, id: NotificationId) -> Result<()> {
        self.set_deactivated(id, true)
    }

    pub fn set_deactivated(&mut self, id: NotificationId, deactivated: bool) -> Result<()> {
        let record = self
            .records
            .values_mut()
            .flat_map(|records| records.iter_mut())
            .find(|n| n.id == id)
            .ok_or_else(|| Error::storage(RecordNotFound(id)))?;

        record.deactivated = deactivated;
        record.updated_at = now();
        Ok(())
    }

    fn position(&self, notification: &Notification) -> Result<usize> {
        self.records
            .get(&notification.owner)
            .and_then(|records| records.iter().position(|n| n.id == notification.id))
            .ok_or_else(|| Error::storage(RecordNotFound(notification.id)))
    }
}

impl NotificationStore for MapStore {
    fn find_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Notification>> {
        Ok(self.records.get(owner).cloned().unwrap_or_default())
    }

    fn insert(&mut self, notification: NewNotification) -> Result<Notification> {
        self.next_id += 1;
        let record = notification.into_notification(NotificationId(self.next_id));

        self.records
            .entry(record.owner.clone())
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    fn update(&mut self, notification: &Notification) -> Result<()> {
        let index = self.position(notification)?;
        if let Some(records) = self.records.get_mut(&notification.owner) {
            records[index] = notification.clone();
        }
        Ok(())
    }

    fn remove(&mut self, notification: &Notification) -> Result<()> {
        let index = self.position(notification)?;
        if let Some(records) = self.records.get_mut(&notification.owner) {
            records.remove(index);
            if records.is_empty() {
                self.records.remove(&notification.owner);
            }
        }
        Ok(())
    }

    fn max_active_levels(
        &self,
        owner_type: &str,
        owner_ids: &[OwnerId],
    ) -> Result<AHashMap<OwnerId, Level>> {
        let mut levels: AHashMap<OwnerId, Level> =
            owner_ids.iter().map(|owner_id| (*owner_id, 0)).collect();

        for (owner, records) in self.records.iter() {
            if owner.owner_type != owner_type {
                continue;
            }
            if let Some(level) = levels.get_mut(&owner.owner_id) {
                *level = aggregate::max_active_level(records.iter());
            }
        }

        Ok(levels)
    }
}
