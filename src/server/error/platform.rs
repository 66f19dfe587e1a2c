use thiserror::Error;

/// Failures of outbound chat platform calls.
///
/// These are best-effort: callers in the leave workflow log them and carry on.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Discord rejected or failed the request.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// The request did not complete within the platform timeout; safe to retry.
    #[error("Discord request timed out")]
    Timeout,

    /// The effect needs a role or channel that has not been configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl From<serenity::Error> for PlatformError {
    fn from(err: serenity::Error) -> Self {
        PlatformError::Discord(Box::new(err))
    }
}
