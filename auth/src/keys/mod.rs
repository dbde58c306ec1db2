pub mod errors;
pub mod pem;

pub use errors::KeyLoadError;
pub use pem::load_private_key;
pub use pem::load_public_key;
pub use pem::parse_private_key_pem;
pub use pem::parse_public_key_pem;
pub use pem::PrivateKey;
pub use pem::PublicKey;
