pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use claims::DEFAULT_ROLE;
pub use claims::TOKEN_ISSUER;
pub use errors::SigningError;
pub use errors::VerificationError;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
