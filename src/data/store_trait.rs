use ahash::AHashMap;

use crate::data::{aggregate, Level, NewNotification, Notification, OwnerId, OwnerRef};
use crate::Result;

/// Durable storage for notification records.
///
/// Supplied by the host application; the ledger only consumes it. Every
/// method reports failures as [`crate::Error::Storage`] and must not retry.
pub trait NotificationStore {
    /// All records belonging to one owner, in the order they were inserted
    fn find_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Notification>>;

    /// Persist a new record and return it with its assigned identifier
    fn insert(&mut self, notification: NewNotification) -> Result<Notification>;

    /// Persist the current state of an existing record, keyed by its identifier
    fn update(&mut self, notification: &Notification) -> Result<()>;

    /// Remove an existing record, keyed by its identifier
    fn remove(&mut self, notification: &Notification) -> Result<()>;

    /// Maximum active level for many owners of one type at once.
    ///
    /// Every requested id is present in the result, with `0` for owners that
    /// have no active notifications. Stores that can aggregate natively should
    /// override this; the default performs one `find_by_owner` per owner.
    fn max_active_levels(
        &self,
        owner_type: &str,
        owner_ids: &[OwnerId],
    ) -> Result<AHashMap<OwnerId, Level>> {
        let mut levels = AHashMap::with_capacity(owner_ids.len());
        for owner_id in owner_ids {
            let owner = OwnerRef::new(owner_type, owner_id.0);
            let records = self.find_by_owner(&owner)?;
            levels.insert(*owner_id, aggregate::max_active_level(records.iter()));
        }
        Ok(levels)
    }
}

impl<T: NotificationStore + ?Sized> NotificationStore for &mut T {
    fn find_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Notification>> {
        (**self).find_by_owner(owner)
    }

    fn insert(&mut self, notification: NewNotification) -> Result<Notification> {
        (**self).insert(notification)
    }

    fn update(&mut self, notification: &Notification) -> Result<()> {
        (**self).update(notification)
    }

    fn remove(&mut self, notification: &Notification) -> Result<()> {
        (**self).remove(notification)
    }

    fn max_active_levels(
        &self,
        owner_type: &str,
        owner_ids: &[OwnerId],
    ) -> Result<AHashMap<OwnerId, Level>> {
        (**self).max_active_levels(owner_type, owner_ids)
    }
}
