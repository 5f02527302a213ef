//! Server-side OAuth 2.0 response types.
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::{ErrorKind, TokenEndpointError};

/// An OAuth 2.0 error response.
///
/// This is the standard error format returned by the authorization server
/// when a request fails, as defined in
/// [RFC 6749 Section 5.2](https://datatracker.ietf.org/doc/html/rfc6749#section-5.2).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorResponse<T = String> {
	/// A single error code string.
	pub error: T,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// A URI identifying a human-readable web page with information about
	/// the error.
	pub error_uri: Option<String>,
}

impl<T> ErrorResponse<T> {
	/// Creates a new error response.
	pub fn new(error: T, error_description: Option<String>, error_uri: Option<String>) -> Self {
		Self {
			error,
			error_description,
			error_uri,
		}
	}
}

/// Only the kind and the public description cross over; the cause chain
/// stays on the server.
impl From<&TokenEndpointError> for ErrorResponse<ErrorKind> {
	fn from(value: &TokenEndpointError) -> Self {
		Self::new(value.kind(), Some(value.description().to_owned()), None)
	}
}

impl From<TokenEndpointError> for ErrorResponse<ErrorKind> {
	fn from(value: TokenEndpointError) -> Self {
		Self::from(&value)
	}
}
