use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Environment variable that seeds [`LedgerConfig::create_notifications`]
pub const CREATE_NOTIFICATIONS_ENV: &str = "Q_CREATE_NOTIFICATIONS";

/// Runtime switch for notification maintenance.
///
/// Clones share the same flag, so one handle can be given to every ledger and
/// binding in a process and flipped from anywhere. Readers check it on every
/// call; nothing caches its value.
#[derive(Debug, Clone)]
pub struct NotifySwitch(Arc<AtomicBool>);

impl NotifySwitch {
    pub fn new(enabled: bool) -> Self {
        NotifySwitch(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Skip all notification reads and writes, e.g. for bulk imports
    pub fn disable(&self) {
        self.set_enabled(false);
    }
}

impl Default for NotifySwitch {
    fn default() -> Self {
        NotifySwitch::new(true)
    }
}

/// Static ledger configuration, loadable from any serde source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Whether notifications are loaded and rechecked at all
    pub create_notifications: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            create_notifications: true,
        }
    }
}

impl LedgerConfig {
    /// Defaults overridden by `Q_CREATE_NOTIFICATIONS`, when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = env::var(CREATE_NOTIFICATIONS_ENV) {
            config.apply_create_notifications(&value);
        }
        config
    }

    fn apply_create_notifications(&mut self, value: &str) {
        match parse_flag(value) {
            Some(flag) => self.create_notifications = flag,
            None => log::warn!(
                "Ignoring {}={:?}: expected a boolean, keeping {}",
                CREATE_NOTIFICATIONS_ENV,
                value,
                self.create_notifications
            ),
        }
    }

    /// A fresh runtime switch seeded from this configuration
    pub fn switch(&self) -> NotifySwitch {
        NotifySwitch::new(self.create_notifications)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
