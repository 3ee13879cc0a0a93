pub mod bindings;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod stub;
pub mod vault;

pub use self::{
    bindings::{BackupNotifier, DeviceIdentity, PreferenceStore, SystemInfo},
    dispatch::{CallReply, MethodCall, MethodCallHandler},
    error::VaultError,
    memory::MemoryPreferences,
    stub::StubBridge,
    vault::{LogLevel, PersistenceVault, VaultBuilder},
};

uniffi::setup_scaffolding!();
