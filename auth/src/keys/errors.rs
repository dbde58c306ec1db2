use thiserror::Error;

/// Error type for key material loading.
///
/// Deliberately carries no detail: whether the file was unreadable, the
/// base64 was malformed or the DER structure was rejected is logged where it
/// happens and never surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unable to load key material")]
pub struct KeyLoadError;
