//! Token endpoint configuration.
use serde::{Deserialize, Serialize};

/// Token endpoint settings.
///
/// Missing fields take their default value, so the struct can be embedded
/// in a larger application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEndpointConfig {
	/// Accept the `client_id` and `client_secret` form parameters when the
	/// request has no `Authorization: Basic` header.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
	pub allow_credentials_in_body: bool,
}

impl Default for TokenEndpointConfig {
	fn default() -> Self {
		Self {
			allow_credentials_in_body: true,
		}
	}
}
