use std::sync::Arc;

use crate::bindings::{BackupNotifier, DeviceIdentity, PreferenceStore};

#[derive(uniffi::Enum, Debug, Clone, Default, Copy)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Default, Clone)]
pub struct VaultConfig {
    /// Binding to the per-application preferences namespace.
    pub preference_store: Option<Arc<dyn PreferenceStore>>,
    /// Backup hook; build registers it, mutations notify it.
    pub backup_notifier: Option<Arc<dyn BackupNotifier>>,
    /// Source of the installation identifier.
    pub device_identity: Option<Arc<dyn DeviceIdentity>>,
    /// Initial log level - defaults to [LogLevel::Info]
    pub log_level: LogLevel,
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field(
                "preference_store",
                &self.preference_store.is_some().then_some("..."),
            )
            .field(
                "backup_notifier",
                &self.backup_notifier.is_some().then_some("..."),
            )
            .field(
                "device_identity",
                &self.device_identity.is_some().then_some("..."),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}
