use thiserror::Error;

/// Failure of a single key or ex-command dispatch.
///
/// None of these are fatal: the command line logs them and keeps running. The
/// input that produced them has already been consumed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("private key {0:?} cannot be dispatched")]
    Private(String),
    #[error("no document is open")]
    NoEditor,
    #[error("host action failed: {0:#}")]
    Host(#[from] anyhow::Error),
}

impl DispatchError {
    /// Errors that only reflect a rejected input rather than something going wrong.
    pub fn is_quiet(&self) -> bool {
        matches!(self, DispatchError::Private(_))
    }
}
