use std::sync::Arc;

use crate::{
    bindings::SystemInfo,
    dispatch::{CallReply, MethodCall, MethodCallHandler, GET_PLATFORM_VERSION},
    error::VaultError,
};

/// Bridge for the platform whose storage binding does not exist yet.
/// Answers the version probe and nothing else; every persistence method is
/// not-implemented until a preference store binding lands.
#[derive(uniffi::Object)]
pub struct StubBridge {
    system: Arc<dyn SystemInfo>,
}

#[uniffi::export]
impl StubBridge {
    #[uniffi::constructor]
    pub fn new(system: Box<dyn SystemInfo>) -> Self {
        Self {
            system: system.into(),
        }
    }

    /// "<os name> <os version>", e.g. "iOS 17.4".
    pub fn platform_version(&self) -> String {
        format!("{} {}", self.system.os_name(), self.system.os_version())
    }

    /// Resolves a named request. Only the version probe is recognized.
    pub fn handle(&self, call: MethodCall) -> Result<CallReply, VaultError> {
        match call.method.as_str() {
            GET_PLATFORM_VERSION => Ok(CallReply::Text {
                value: self.platform_version(),
            }),
            _ => Err(VaultError::NotImplemented {
                method: call.method,
            }),
        }
    }
}

impl MethodCallHandler for StubBridge {
    fn on_method_call(&self, call: MethodCall) -> Result<CallReply, VaultError> {
        self.handle(call)
    }
}
