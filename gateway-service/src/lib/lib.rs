pub mod config;
pub mod constants;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
