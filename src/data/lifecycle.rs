use log::debug;

use crate::data::{LedgerConfig, NotificationLedger, NotificationStore, NotifySwitch, OwnerRef, Value};
use crate::Result;

/// A host entity that can carry notifications
pub trait NotificationOwner {
    /// Storage identity of the entity; unsaved entities report id 0
    fn owner_ref(&self) -> OwnerRef;

    /// Current value of one of the entity's fields, `None` when unset
    fn field_value(&self, field: &str) -> Option<Value>;

    /// Human readable name of a field, used in generated messages
    fn field_caption(&self, field: &str) -> String {
        field.to_string()
    }
}

/// Host-side rules deciding which notifications an entity should have.
///
/// Implementations call [`NotificationLedger::create_or_update`] and
/// [`NotificationLedger::delete`] (or the field helpers) for every rule.
pub trait Recheck: NotificationOwner {
    fn recheck(&self, ledger: &mut NotificationLedger, store: &mut dyn NotificationStore) -> Result<()>;
}

/// Entry points a host wires into its own persistence lifecycle
#[derive(Debug, Clone, Default)]
pub struct LifecycleBinding {
    switch: NotifySwitch,
}

impl LifecycleBinding {
    pub fn new(switch: NotifySwitch) -> Self {
        Self { switch }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.switch())
    }

    pub fn switch(&self) -> &NotifySwitch {
        &self.switch
    }

    /// A ledger for `owner` that honours this binding's switch
    pub fn ledger_for(&self, owner: OwnerRef) -> NotificationLedger {
        NotificationLedger::new(owner, self.switch.clone())
    }

    /// Call after the entity was durably saved. Runs the entity's recheck
    /// once, unless notifications are switched off. Returns whether it ran.
    ///
    /// The ledger follows the entity's identity either way, so a ledger made
    /// before the first save is usable once notifications are back on.
    pub fn on_after_save<E>(
        &self,
        entity: &E,
        ledger: &mut NotificationLedger,
        store: &mut dyn NotificationStore,
    ) -> Result<bool>
    where
        E: Recheck + ?Sized,
    {
        Self::follow_owner(entity, ledger);

        if !self.switch.enabled() {
            debug!("Notifications disabled, skipping recheck of {}", ledger.owner());
            return Ok(false);
        }

        entity.recheck(ledger, store)?;
        Ok(true)
    }

    /// Call after the entity was (re)loaded from storage. Always drops the
    /// ledger's cache, whether or not notifications are switched on.
    pub fn on_after_load<E>(&self, entity: &E, ledger: &mut NotificationLedger)
    where
        E: NotificationOwner + ?Sized,
    {
        if !Self::follow_owner(entity, ledger) {
            ledger.invalidate();
        }
    }

    /// Call after the entity was deleted. Removes its notifications from the
    /// store unless notifications are switched off. Returns how many were removed.
    pub fn on_after_delete(
        &self,
        ledger: &mut NotificationLedger,
        store: &mut dyn NotificationStore,
    ) -> Result<usize> {
        if !self.switch.enabled() {
            ledger.invalidate();
            return Ok(0);
        }

        ledger.purge(store)
    }

    /// Rebind the ledger when the entity's identity changed. Returns whether it did.
    fn follow_owner<E>(entity: &E, ledger: &mut NotificationLedger) -> bool
    where
        E: NotificationOwner + ?Sized,
    {
        let owner = entity.owner_ref();
        if &owner == ledger.owner() {
            return false;
        }

        debug!("Rebinding notification ledger from {} to {}", ledger.owner(), owner);
        ledger.rebind(owner);
        true
    }
}
