use std::collections::BTreeMap;

use log::{debug, info};

use crate::data::{
    aggregate, is_empty_value, now, ExtraData, FieldSet, Level, NewNotification, Notification,
    NotificationOwner, NotificationStore, NotifySwitch, OwnerRef,
};
use crate::{Error, Result};

/// Kind used for "field is empty" notifications, e.g. `NO_EMAIL` for `email`
pub fn empty_field_kind(field: &str) -> String {
    format!("NO_{}", field.to_ascii_uppercase())
}

/// Per-owner cache of notifications and the protocol that keeps it in step
/// with storage.
///
/// The cache is filled lazily on the first operation and stays authoritative
/// until [`invalidate`](Self::invalidate) is called. Every write goes to the
/// store first and only touches the cache once the store accepted it, so a
/// failing store call leaves the ledger exactly as it was.
///
/// Values handed out are copies; changing one does not change the cache.
#[derive(Debug)]
pub struct NotificationLedger {
    owner: OwnerRef,
    cache: Vec<Notification>,
    loaded: bool,
    switch: NotifySwitch,
}

impl NotificationLedger {
    pub fn new(owner: OwnerRef, switch: NotifySwitch) -> Self {
        Self {
            owner,
            cache: Vec::new(),
            loaded: false,
            switch,
        }
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn switch(&self) -> &NotifySwitch {
        &self.switch
    }

    /// Load the owner's notifications from the store unless already loaded.
    ///
    /// Does nothing while notifications are switched off, and does not mark
    /// the cache as loaded in that case, so the next call after switching
    /// back on performs a real load.
    pub fn ensure_loaded<S>(&mut self, store: &S) -> Result<()>
    where
        S: NotificationStore + ?Sized,
    {
        if !self.owner.is_persisted() {
            return Err(Error::NotPersisted(self.owner.clone()));
        }

        if self.loaded || !self.switch.enabled() {
            return Ok(());
        }

        let records = store.find_by_owner(&self.owner)?;
        debug!("Loaded {} notifications for {}", records.len(), self.owner);

        self.cache = records;
        self.loaded = true;
        Ok(())
    }

    /// Create the notification `(kind, fields)` or refresh the level of the
    /// existing one.
    ///
    /// An existing record keeps its original message and extra data; only a
    /// changed level is written back. Returns a copy of the resulting record,
    /// or `None` when notifications are switched off and nothing was loaded.
    pub fn create_or_update<S>(
        &mut self,
        store: &mut S,
        kind: &str,
        message: &str,
        fields: impl Into<FieldSet>,
        level: Level,
        extra_data: ExtraData,
    ) -> Result<Option<Notification>>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(&*store)?;
        if !self.loaded {
            return Ok(None);
        }

        let fields = fields.into();
        if let Some(index) = self.position(kind, &fields) {
            if self.cache[index].level != level {
                let mut updated = self.cache[index].clone();
                updated.level = level;
                updated.updated_at = now();

                store.update(&updated)?;
                debug!(
                    "Updated {} {} on {}: level {} -> {}",
                    kind, updated.fields, self.owner, self.cache[index].level, level
                );
                self.cache[index] = updated;
            }

            return Ok(Some(self.cache[index].clone()));
        }

        let new_notification = NewNotification::new(self.owner.clone(), kind, message)
            .fields(fields)
            .level(level)
            .extra_data(extra_data);

        let record = store.insert(new_notification)?;
        debug!(
            "Created {} {} on {} at level {} (id {})",
            record.kind, record.fields, self.owner, record.level, record.id
        );
        self.cache.push(record.clone());

        Ok(Some(record))
    }

    /// Remove every notification of `kind`, restricted to those whose field
    /// set equals `fields` when given. Returns how many were removed; none is fine.
    ///
    /// Unlike the lookup in [`create_or_update`](Self::create_or_update), this
    /// compares field sets exactly: deleting for `email` leaves a record over
    /// `[email, phone]` alone.
    pub fn delete<S>(&mut self, store: &mut S, kind: &str, fields: Option<&FieldSet>) -> Result<usize>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(&*store)?;
        if !self.loaded {
            return Ok(0);
        }

        let mut removed = 0;
        let mut index = 0;
        while index < self.cache.len() {
            let candidate = &self.cache[index];
            let hit = match fields {
                Some(fields) => candidate.kind == kind && candidate.fields == *fields,
                None => candidate.kind == kind,
            };

            if !hit {
                index += 1;
                continue;
            }

            // Earlier removals in this loop already happened in storage and
            // were dropped from the cache, so an error here keeps them in step.
            store.remove(candidate)?;
            let record = self.cache.remove(index);
            debug!(
                "Deleted {} {} on {} (id {})",
                record.kind, record.fields, self.owner, record.id
            );
            removed += 1;
        }

        Ok(removed)
    }

    /// Create `NO_<FIELD>` when the owner's field is empty, delete it otherwise.
    ///
    /// Repeating the call without changing the field writes nothing.
    pub fn delete_if_field_empty<S, O>(
        &mut self,
        store: &mut S,
        owner: &O,
        field: &str,
        level: Level,
        message: Option<&str>,
    ) -> Result<()>
    where
        S: NotificationStore + ?Sized,
        O: NotificationOwner + ?Sized,
    {
        let kind = empty_field_kind(field);

        if is_empty_value(owner.field_value(field).as_ref()) {
            let message = match message {
                Some(message) if !message.is_empty() => message.to_string(),
                _ => format!("The field {} is empty.", owner.field_caption(field)),
            };
            self.create_or_update(store, &kind, &message, field, level, ExtraData::new())?;
        } else {
            self.delete(store, &kind, Some(&FieldSet::single(field)))?;
        }

        Ok(())
    }

    /// Drop the `NO_<FIELD>` notification for `field`, whatever the field holds
    pub fn delete_for_field<S>(&mut self, store: &mut S, field: &str) -> Result<usize>
    where
        S: NotificationStore + ?Sized,
    {
        let kind = empty_field_kind(field);
        self.delete(store, &kind, Some(&FieldSet::single(field)))
    }

    /// First notification of `kind` in insertion order
    pub fn get_by_type<S>(&mut self, store: &S, kind: &str) -> Result<Option<Notification>>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(store)?;
        Ok(self.cache.iter().find(|n| n.kind == kind).cloned())
    }

    /// Every loaded notification in insertion order
    pub fn notifications<S>(&mut self, store: &S) -> Result<Vec<Notification>>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(store)?;
        Ok(self.cache.clone())
    }

    pub fn max_active_level<S>(&mut self, store: &S) -> Result<Level>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(store)?;
        Ok(aggregate::max_active_level(&self.cache))
    }

    /// Field name to level of active, field-scoped notifications.
    /// See [`aggregate::export_field_levels`] for overlap handling.
    pub fn export_field_levels<S>(&mut self, store: &S) -> Result<BTreeMap<String, Level>>
    where
        S: NotificationStore + ?Sized,
    {
        self.ensure_loaded(store)?;
        Ok(aggregate::export_field_levels(&self.cache))
    }

    /// Remove every stored notification of the owner, including ones this
    /// ledger has not seen. The cache is invalidated afterwards, also on error.
    pub fn purge<S>(&mut self, store: &mut S) -> Result<usize>
    where
        S: NotificationStore + ?Sized,
    {
        if !self.owner.is_persisted() {
            return Err(Error::NotPersisted(self.owner.clone()));
        }

        let result = Self::remove_all(store, &self.owner);
        self.invalidate();

        let removed = result?;
        info!("Purged {} notifications of {}", removed, self.owner);
        Ok(removed)
    }

    fn remove_all<S>(store: &mut S, owner: &OwnerRef) -> Result<usize>
    where
        S: NotificationStore + ?Sized,
    {
        let records = store.find_by_owner(owner)?;
        for record in records.iter() {
            store.remove(record)?;
        }
        Ok(records.len())
    }

    /// Forget the cache; the next operation reloads from the store
    pub fn invalidate(&mut self) {
        if self.loaded {
            debug!("Invalidated notification cache of {}", self.owner);
        }
        self.cache.clear();
        self.loaded = false;
    }

    /// Point the ledger at a different owner identity, e.g. after the host
    /// entity received its id on first save
    pub fn rebind(&mut self, owner: OwnerRef) {
        self.invalidate();
        self.owner = owner;
    }

    fn position(&self, kind: &str, fields: &FieldSet) -> Option<usize> {
        self.cache.iter().position(|n| n.matches(kind, fields))
    }
}
