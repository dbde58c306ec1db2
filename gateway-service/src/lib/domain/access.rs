pub mod models;
pub mod paths;
pub mod ports;
pub mod service;
