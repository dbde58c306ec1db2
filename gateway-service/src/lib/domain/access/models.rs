use std::fmt;

/// Verified caller, attached to admitted requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub role: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role: role.into(),
        }
    }

    /// Granted authority in `ROLE_<role>` form.
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.role)
    }
}

/// Outcome of the admission check for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestDecision {
    /// Protected path with a valid token
    Forward(Identity),
    /// Public path, no token work done
    ForwardAnonymous,
    Reject(RejectReason),
}

/// Why a request was turned away.
///
/// Only two reasons are ever exposed: expired, forged and malformed tokens
/// all collapse into `InvalidToken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    InvalidToken,
}

impl RejectReason {
    /// Marker carried in the login redirect fragment.
    pub fn marker(&self) -> &'static str {
        match self {
            RejectReason::MissingToken => "missing_token",
            RejectReason::InvalidToken => "invalid_token",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
