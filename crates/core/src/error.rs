#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VaultError {
    /// The platform never assigned an installation identifier, or no
    /// identity binding was supplied.
    #[error("UDID not available.")]
    Unavailable,

    #[error("Method not implemented - {method}")]
    NotImplemented { method: String },

    #[error("Missing required argument `{argument}` - {method}")]
    MissingArgument { method: String, argument: String },

    #[error("No preference store was bound before build")]
    NoPreferenceStore,
}

impl VaultError {
    /// Stable code reported on the host side of the channel.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::Unavailable => "UNAVAILABLE",
            VaultError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            VaultError::MissingArgument { .. } => "BAD_ARGS",
            VaultError::NoPreferenceStore => "NO_STORE",
        }
    }
}
