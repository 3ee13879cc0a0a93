//! The request surface shared by every bridge object.
//!
//! A request is a method name plus a loosely typed mapping of nullable named
//! arguments, exactly as it arrives over the host channel. Each request is
//! independent and stateless and produces exactly one reply.

use std::collections::HashMap;

use crate::error::VaultError;

/// Channel the host registers for this bridge.
pub const METHOD_CHANNEL: &str = "persistence_vault/methods";

// Wire names of the recognized operations. These are a contract with the
// host side and never change.
pub const GET_UDID: &str = "getUDID";
pub const WRITE_STRING: &str = "writeString";
pub const READ_STRING: &str = "readString";
pub const DELETE: &str = "delete";
pub const CONTAINS_KEY: &str = "containsKey";
pub const CLEAR_WITH_PREFIX: &str = "clearWithPrefix";
pub const GET_PLATFORM_VERSION: &str = "getPlatformVersion";

/// Returns the channel name host glue must register for this bridge.
#[uniffi::export]
pub fn method_channel() -> String {
    METHOD_CHANNEL.to_string()
}

/// A single request from the host.
#[derive(uniffi::Record, Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: HashMap<String, Option<String>>,
}

impl MethodCall {
    /// Required argument with a non-null value.
    pub(crate) fn required(&self, name: &str) -> Result<String, VaultError> {
        match self.args.get(name) {
            Some(Some(value)) => Ok(value.clone()),
            _ => Err(VaultError::MissingArgument {
                method: self.method.clone(),
                argument: name.to_string(),
            }),
        }
    }

    /// Optional argument; absent and null both read as None.
    pub(crate) fn optional(&self, name: &str) -> Option<String> {
        self.args.get(name).cloned().flatten()
    }
}

/// The single reply produced for a request.
#[derive(uniffi::Enum, Debug, Clone, PartialEq)]
pub enum CallReply {
    /// Success carrying text, e.g. a stored value or the identifier.
    Text { value: String },
    /// Success carrying a boolean, e.g. a membership test.
    Bool { value: bool },
    /// Success with nothing to return.
    Empty,
}

/// Seam between host glue and a bridge object. The full vault and the
/// platform stub both answer requests through this.
pub trait MethodCallHandler: Send + Sync {
    fn on_method_call(&self, call: MethodCall) -> Result<CallReply, VaultError>;
}
