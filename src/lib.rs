pub mod client;
pub mod config;
pub mod dto;
pub mod errors;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
