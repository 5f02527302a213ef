//! Endpoint implementations.
pub mod token;

pub use token::TokenEndpoint;
