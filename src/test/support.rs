use std::cell::Cell;
use std::io;

use ahash::AHashMap;

use crate::*;

/// Minimal host entity: an id plus loosely typed fields
#[derive(Debug, Clone)]
pub struct Group {
    pub id: u64,
    pub fields: AHashMap<String, Value>,
    pub rechecks: Cell<usize>,
}

impl Group {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: AHashMap::new(),
            rechecks: Cell::new(0),
        }
    }

    pub fn set(&mut self, field: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.fields.insert(field.to_string(), value);
            }
            None => {
                self.fields.remove(field);
            }
        }
    }
}

impl NotificationOwner for Group {
    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new("Group", self.id)
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        self.fields.get(field).cloned()
    }

    fn field_caption(&self, field: &str) -> String {
        match field {
            "email" => "E-Mail".to_string(),
            _ => field.to_string(),
        }
    }
}

impl Recheck for Group {
    fn recheck(&self, ledger: &mut NotificationLedger, store: &mut dyn NotificationStore) -> Result<()> {
        self.rechecks.set(self.rechecks.get() + 1);
        ledger.delete_if_field_empty(store, self, "email", 3, None)
    }
}

/// Wraps a [`MapStore`], counts calls and fails on demand
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MapStore,
    finds: Cell<usize>,
    pub inserts: usize,
    pub updates: usize,
    pub removes: usize,
    pub fail_reads: bool,
    /// Number of writes still allowed before every further write fails
    pub writes_left: Option<usize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finds(&self) -> usize {
        self.finds.get()
    }

    pub fn writes(&self) -> usize {
        self.inserts + self.updates + self.removes
    }

    pub fn fail_writes(&mut self) {
        self.writes_left = Some(0);
    }

    fn check_write(&mut self) -> Result<()> {
        match self.writes_left.as_mut() {
            Some(0) => Err(Error::storage(io::Error::new(io::ErrorKind::Other, "write rejected"))),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl NotificationStore for CountingStore {
    fn find_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Notification>> {
        self.finds.set(self.finds.get() + 1);
        if self.fail_reads {
            return Err(Error::storage(io::Error::new(io::ErrorKind::Other, "read rejected")));
        }
        self.inner.find_by_owner(owner)
    }

    fn insert(&mut self, notification: NewNotification) -> Result<Notification> {
        self.check_write()?;
        self.inserts += 1;
        self.inner.insert(notification)
    }

    fn update(&mut self, notification: &Notification) -> Result<()> {
        self.check_write()?;
        self.updates += 1;
        self.inner.update(notification)
    }

    fn remove(&mut self, notification: &Notification) -> Result<()> {
        self.check_write()?;
        self.removes += 1;
        self.inner.remove(notification)
    }
}

pub fn group_owner(id: u64) -> OwnerRef {
    OwnerRef::new("Group", id)
}

pub fn ledger(id: u64) -> NotificationLedger {
    NotificationLedger::new(group_owner(id), NotifySwitch::default())
}
