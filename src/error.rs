//! Protocol-facing error classification.
//!
//! Every failure produced while handling a token request ends up as a
//! [`TokenEndpointError`] carrying the [`ErrorKind`] chosen by the component
//! that failed and a description safe to show to the client. The underlying
//! failure is kept as `source` for diagnostics.
use std::{borrow::Cow, error::Error as StdError, fmt};

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Boxed error used as root cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Token endpoint error codes.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// The request is missing a required parameter, includes an unsupported
	/// parameter value, repeats a parameter, includes multiple credentials or
	/// is otherwise malformed.
	InvalidRequest,

	/// Client authentication failed (unknown client, no client
	/// authentication included, or unsupported authentication method).
	InvalidClient,

	/// The provided authorization grant or refresh token is invalid,
	/// expired, revoked or was issued to another client.
	InvalidGrant,

	/// The authenticated client is not authorized to use this authorization
	/// grant type.
	UnauthorizedClient,

	/// The authorization grant type is not supported by the authorization
	/// server.
	UnsupportedGrantType,

	/// The requested scope is invalid, unknown, malformed, or exceeds the
	/// scope granted by the resource owner.
	InvalidScope,

	/// The authorization server encountered an unexpected condition that
	/// prevented it from fulfilling the request.
	ServerError,
}

impl ErrorKind {
	/// Wire representation of the error code.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InvalidRequest => "invalid_request",
			Self::InvalidClient => "invalid_client",
			Self::InvalidGrant => "invalid_grant",
			Self::UnauthorizedClient => "unauthorized_client",
			Self::UnsupportedGrantType => "unsupported_grant_type",
			Self::InvalidScope => "invalid_scope",
			Self::ServerError => "server_error",
		}
	}

	/// HTTP status code the token endpoint answers with.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::InvalidClient => StatusCode::UNAUTHORIZED,
			Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
			_ => StatusCode::BAD_REQUEST,
		}
	}

	/// Description used when the failing component does not provide one.
	pub fn default_description(&self) -> &'static str {
		match self {
			Self::InvalidRequest => {
				"The request is missing a required parameter or is otherwise malformed."
			}
			Self::InvalidClient => "Client authentication failed.",
			Self::InvalidGrant => "The provided authorization grant is invalid.",
			Self::UnauthorizedClient => {
				"The client is not authorized to use this authorization grant type."
			}
			Self::UnsupportedGrantType => "The authorization grant type is not supported.",
			Self::InvalidScope => "The requested scope is invalid.",
			Self::ServerError => "The authorization server encountered an unexpected condition.",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned by the token endpoint.
///
/// The `Display` output only contains the kind and the public description.
/// The wrapped cause is never part of it; walk [`StdError::source`] (or call
/// [`root_cause`](Self::root_cause)) to log it.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {description}")]
pub struct TokenEndpointError {
	kind: ErrorKind,
	description: Cow<'static, str>,
	#[source]
	source: Option<BoxError>,
}

impl TokenEndpointError {
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			description: Cow::Borrowed(kind.default_description()),
			source: None,
		}
	}

	pub fn invalid_request() -> Self {
		Self::new(ErrorKind::InvalidRequest)
	}

	pub fn invalid_client() -> Self {
		Self::new(ErrorKind::InvalidClient)
	}

	pub fn server_error() -> Self {
		Self::new(ErrorKind::ServerError)
	}

	/// Replaces the public description.
	pub fn with_description(self, description: impl Into<Cow<'static, str>>) -> Self {
		Self {
			description: description.into(),
			..self
		}
	}

	/// Attaches the failure that caused this error.
	pub fn with_source(self, source: impl Into<BoxError>) -> Self {
		Self {
			source: Some(source.into()),
			..self
		}
	}

	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn status_code(&self) -> StatusCode {
		self.kind.status_code()
	}

	/// Innermost error of the cause chain, if any cause was attached.
	pub fn root_cause(&self) -> Option<&(dyn StdError + 'static)> {
		let mut cause: &(dyn StdError + 'static) = self.source.as_deref()?;

		while let Some(next) = cause.source() {
			cause = next;
		}

		Some(cause)
	}

	/// Renders the full cause chain, for logs only.
	pub fn cause_chain(&self) -> String {
		let mut chain = self.to_string();
		let mut cause = StdError::source(self);

		while let Some(c) = cause {
			chain.push_str(": ");
			chain.push_str(&c.to_string());
			cause = c.source();
		}

		chain
	}

	/// Emits this error on the `log` facade at a level matching its kind.
	pub(crate) fn logged(self) -> Self {
		match self.kind {
			ErrorKind::ServerError => log::error!("token request failed: {}", self.cause_chain()),
			ErrorKind::InvalidRequest => log::warn!("token request rejected: {}", self.cause_chain()),
			_ => log::debug!("token request rejected: {}", self.cause_chain()),
		}

		self
	}
}

impl From<ErrorKind> for TokenEndpointError {
	fn from(kind: ErrorKind) -> Self {
		Self::new(kind)
	}
}
