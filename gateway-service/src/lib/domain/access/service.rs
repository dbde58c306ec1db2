use crate::access::models::RequestDecision;
use crate::access::models::RejectReason;
use crate::access::paths::PathRules;
use crate::access::ports::TokenValidator;

/// Admission decision for one request.
///
/// Public paths are admitted before the token is looked at, so they never
/// cost a signature check. A present but empty token counts as invalid.
pub fn decide<V>(
    path: &str,
    token: Option<&str>,
    rules: &PathRules,
    validator: &V,
) -> RequestDecision
where
    V: TokenValidator + ?Sized,
{
    if rules.is_public(path) {
        tracing::debug!(path = %path, "Public path");
        return RequestDecision::ForwardAnonymous;
    }

    let Some(token) = token else {
        tracing::info!(path = %path, reason = %RejectReason::MissingToken, "Request rejected");
        return RequestDecision::Reject(RejectReason::MissingToken);
    };

    match validator.validate(token) {
        Ok(identity) => {
            tracing::debug!(
                path = %path,
                subject = %identity.subject,
                authority = %identity.authority(),
                "Request admitted"
            );
            RequestDecision::Forward(identity)
        }
        Err(e) => {
            tracing::warn!(
                path = %path,
                kind = e.kind(),
                error = %e,
                reason = %RejectReason::InvalidToken,
                "Request rejected"
            );
            RequestDecision::Reject(RejectReason::InvalidToken)
        }
    }
}
