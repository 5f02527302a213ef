//! Token endpoint core of an [OAuth 2.0][rfc6749] authorization server.
//!
//! This crate takes an incoming access token request, checks its envelope,
//! authenticates the client and hands the resulting [`AccessRequest`] to an
//! ordered chain of grant type handlers. Token issuance, storage and scope
//! policy belong to those handlers and to the collaborators behind the
//! [`Store`] and [`Hasher`] traits.
//!
//! # Modules
//!
//! - [`endpoints`] — The [`TokenEndpoint`] tying everything together.
//! - [`credentials`] — Client credentials from the `Authorization` header
//!   or the request body.
//! - [`authenticate`] — Client lookup and secret verification.
//! - [`encoding`] — Percent-decoded / raw fallback for Basic credentials.
//! - [`handler`] — Grant type handler trait and registry.
//! - [`request`], [`form`], [`session`] — The canonical request.
//! - [`client`], [`storage`], [`hash`] — Collaborator traits and simple
//!   implementations.
//! - [`error`], [`server`] — Error kinds and the RFC 6749 error body.
//! - [`config`] — Endpoint settings.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use oauth2_token_core::{
//!     ClientIdBuf, TokenEndpoint,
//!     client::DefaultClient,
//!     form::Form,
//!     hash::PlainText,
//!     http::{HeaderMap, Method},
//!     session::DefaultSession,
//!     storage::MemoryStore,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = MemoryStore::new().with_client(DefaultClient::public(
//!     ClientIdBuf::new("my-app".to_owned()).unwrap(),
//! ));
//! let endpoint = TokenEndpoint::new(Arc::new(store), Arc::new(PlainText));
//!
//! let form: Form = [("grant_type", "authorization_code"), ("client_id", "my-app")]
//!     .into_iter()
//!     .collect();
//!
//! let request = endpoint
//!     .new_access_request(
//!         &Method::POST,
//!         &HeaderMap::new(),
//!         form,
//!         Box::new(DefaultSession::new()),
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(request.grant_types(), ["authorization_code"]);
//! # });
//! ```
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
pub use http;

pub mod authenticate;
pub mod client;
pub mod config;
pub mod credentials;
pub mod encoding;
pub mod endpoints;
pub mod error;
pub mod form;
pub mod handler;
pub mod hash;
pub mod request;
pub mod server;
pub mod session;
pub mod storage;
mod types;

pub use endpoints::TokenEndpoint;
pub use error::{ErrorKind, TokenEndpointError};
pub use request::{AccessRequest, Request};
pub use types::*;
