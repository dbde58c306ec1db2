pub mod proxy;
pub mod verifier;

pub use proxy::HttpProxy;
