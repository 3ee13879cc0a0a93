mod config;
mod logging;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex};

use log::{debug, warn};

pub use config::{LogLevel, VaultConfig};
pub use logging::{init_log, set_log_level};

use crate::{
    bindings::{BackupNotifier, DeviceIdentity, PreferenceStore},
    dispatch::{
        CallReply, MethodCall, MethodCallHandler, CLEAR_WITH_PREFIX, CONTAINS_KEY, DELETE,
        GET_UDID, READ_STRING, WRITE_STRING,
    },
    error::VaultError,
};

/// Name of the preferences namespace every entry the bridge writes lives in.
/// The backup registration uses the same name; the two must match exactly.
pub const PREFS_NAMESPACE: &str = "persistence_vault_prefs";

/// Fixed key under which the namespace is registered with the backup helper.
pub const BACKUP_HELPER_KEY: &str = "pv_prefs_helper";

/// Returns the namespace name for host glue that needs it verbatim, e.g. a
/// backup agent declaring which preferences file to helper-back.
#[uniffi::export]
pub fn preferences_namespace() -> String {
    PREFS_NAMESPACE.to_string()
}

/// Returns the helper key the backup registration uses.
#[uniffi::export]
pub fn backup_helper_key() -> String {
    BACKUP_HELPER_KEY.to_string()
}

/// A configuration interface for building a [PersistenceVault].
///
/// Bindings set here serve every request the vault answers. Without a
/// preference store the vault cannot be built; the other bindings degrade
/// gracefully when absent. See [VaultBuilder::set_preference_store].
#[derive(uniffi::Object, Default)]
pub struct VaultBuilder {
    config: Mutex<VaultConfig>,
}

#[uniffi::export]
impl VaultBuilder {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            config: Default::default(),
        }
    }

    /// Binds the platform preference store backing every operation.
    pub fn set_preference_store(&self, store: Box<dyn PreferenceStore>) {
        let mut config = self.config.lock().unwrap();
        config.preference_store = Some(store.into());
    }

    /// Binds the hook used to register the namespace for backup and to
    /// signal data changes after mutations.
    pub fn set_backup_notifier(&self, notifier: Box<dyn BackupNotifier>) {
        let mut config = self.config.lock().unwrap();
        config.backup_notifier = Some(notifier.into());
    }

    /// Binds the source for the getUDID operation.
    pub fn set_device_identity(&self, identity: Box<dyn DeviceIdentity>) {
        let mut config = self.config.lock().unwrap();
        config.device_identity = Some(identity.into());
    }

    /// Set the log filter level.
    ///
    /// By default the log filter is set to [LogLevel::Info]
    pub fn set_log_level(&self, level: LogLevel) {
        let mut config = self.config.lock().unwrap();
        config.log_level = level;
    }

    /// Returns the current log level setting.
    pub fn log_level(&self) -> LogLevel {
        let config = self.config.lock().unwrap();
        config.log_level
    }

    /// Builds the vault and registers the preferences namespace with the
    /// backup helper. Hosts treat re-registration as a no-op, so building
    /// more than one vault is harmless.
    pub fn build(&self) -> Result<Arc<PersistenceVault>, VaultError> {
        let config = self.config.lock().unwrap().clone();
        logging::init_log(config.log_level);

        let store = config
            .preference_store
            .ok_or(VaultError::NoPreferenceStore)?;

        match &config.backup_notifier {
            Some(notifier) => {
                notifier.register(PREFS_NAMESPACE.to_string(), BACKUP_HELPER_KEY.to_string())
            }
            None => warn!("No backup notifier bound - entries will not reach OS backups"),
        }

        Ok(Arc::new(PersistenceVault {
            store,
            backup: config.backup_notifier,
            identity: config.device_identity,
        }))
    }
}

/// The full bridge: answers every recognized request against the bound
/// preference store. No cache and no state of its own; every operation
/// round-trips to the store.
#[derive(uniffi::Object)]
pub struct PersistenceVault {
    store: Arc<dyn PreferenceStore>,
    backup: Option<Arc<dyn BackupNotifier>>,
    identity: Option<Arc<dyn DeviceIdentity>>,
}

impl std::fmt::Debug for PersistenceVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceVault")
            .field("backup", &self.backup.is_some())
            .field("identity", &self.identity.is_some())
            .finish_non_exhaustive()
    }
}

#[uniffi::export]
impl PersistenceVault {
    /// Reads the platform install identifier.
    pub fn get_udid(&self) -> Result<String, VaultError> {
        let udid = self.identity.as_ref().and_then(|identity| identity.udid());
        match udid {
            Some(udid) if !udid.is_empty() => Ok(udid),
            _ => Err(VaultError::Unavailable),
        }
    }

    /// Stores `value` under `key`. A None value clears the entry.
    pub fn write_string(&self, key: String, value: Option<String>) {
        self.store.set(key, value);
        self.notify_backup();
    }

    /// Looks up `key`, or None if nothing is stored under it.
    pub fn read_string(&self, key: String) -> Option<String> {
        self.store.get(key)
    }

    /// Removes the entry under `key`.
    pub fn delete(&self, key: String) {
        self.store.remove(key);
        self.notify_backup();
    }

    /// True if an entry exists under `key`.
    pub fn contains_key(&self, key: String) -> bool {
        self.store.contains(key)
    }

    /// Removes every key that starts with `prefix`. An empty prefix clears
    /// the whole namespace. The backup hook is notified once for the batch.
    pub fn clear_with_prefix(&self, prefix: String) {
        let to_remove: Vec<String> = self
            .store
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .collect();
        debug!(
            "clearing {} entries with prefix {:?}",
            to_remove.len(),
            prefix
        );
        for key in to_remove {
            self.store.remove(key);
        }
        self.notify_backup();
    }

    /// Resolves a named request onto the operations above. Exactly one reply
    /// per call; an unrecognized name answers not-implemented without
    /// touching the store.
    pub fn handle(&self, call: MethodCall) -> Result<CallReply, VaultError> {
        match call.method.as_str() {
            GET_UDID => self.get_udid().map(|value| CallReply::Text { value }),
            WRITE_STRING => {
                let key = call.required("key")?;
                let value = call.optional("value");
                self.write_string(key, value);
                Ok(CallReply::Empty)
            }
            READ_STRING => {
                let key = call.required("key")?;
                match self.read_string(key) {
                    Some(value) => Ok(CallReply::Text { value }),
                    None => Ok(CallReply::Empty),
                }
            }
            DELETE => {
                let key = call.required("key")?;
                self.delete(key);
                Ok(CallReply::Empty)
            }
            CONTAINS_KEY => {
                let key = call.required("key")?;
                Ok(CallReply::Bool {
                    value: self.contains_key(key),
                })
            }
            CLEAR_WITH_PREFIX => {
                let prefix = call.optional("prefix").unwrap_or_default();
                self.clear_with_prefix(prefix);
                Ok(CallReply::Empty)
            }
            _ => Err(VaultError::NotImplemented {
                method: call.method,
            }),
        }
    }
}

impl PersistenceVault {
    // Best-effort; nothing is awaited or retried and failures stay with the
    // notifier.
    fn notify_backup(&self) {
        match &self.backup {
            Some(backup) => backup.data_changed(),
            None => warn!("Backup notifier missing, change will not be backed up"),
        }
    }
}

impl MethodCallHandler for PersistenceVault {
    fn on_method_call(&self, call: MethodCall) -> Result<CallReply, VaultError> {
        self.handle(call)
    }
}
