//! Capability ports the host platform supplies at composition time.
//!
//! The dispatch logic is written once against these traits; each platform
//! hands in its own bindings when it builds the bridge.

/// Keyed access to the per-application preferences namespace.
/// Implementations bind the platform store (e.g. SharedPreferences on
/// Android, NSUserDefaults on iOS) and rely on its internal locking; the
/// bridge performs no coordination of its own.
#[uniffi::export(callback_interface)]
pub trait PreferenceStore: Send + Sync {
    /// Gets the value stored under the given key, or None if not found.
    fn get(&self, key: String) -> Option<String>;

    /// Stores `value` under `key`. A None value clears the entry, matching
    /// the SharedPreferences treatment of null.
    fn set(&self, key: String, value: Option<String>);

    /// Removes the entry for the given key.
    fn remove(&self, key: String);

    /// True if an entry exists under the given key.
    fn contains(&self, key: String) -> bool;

    /// Every key currently present in the namespace.
    fn keys(&self) -> Vec<String>;
}

/// Hook into the OS backup subsystem.
#[uniffi::export(callback_interface)]
pub trait BackupNotifier: Send + Sync {
    /// Associates the preferences namespace with the platform backup helper
    /// under a fixed key. Called when the vault is built; re-registration
    /// must be a no-op on the host side.
    fn register(&self, namespace: String, helper_key: String);

    /// Signals that persisted data changed and should be included in the
    /// next backup pass. Fire and forget; the result is never read and
    /// failures are never surfaced.
    fn data_changed(&self);
}

/// Access to the platform-assigned installation identifier.
#[uniffi::export(callback_interface)]
pub trait DeviceIdentity: Send + Sync {
    /// The identifier, or None when the platform has not assigned one.
    fn udid(&self) -> Option<String>;
}

/// OS name and version, read by the version probe on platforms whose
/// storage binding does not exist yet.
#[uniffi::export(callback_interface)]
pub trait SystemInfo: Send + Sync {
    fn os_name(&self) -> String;

    fn os_version(&self) -> String;
}
