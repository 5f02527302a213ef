//! Extraction of client credentials from a token request.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
use std::string::FromUtf8Error;

use base64::{Engine, prelude::BASE64_STANDARD};
use http::{HeaderMap, HeaderValue, header};

use crate::form::Form;

const BASIC_SCHEME: &str = "Basic";

/// Where the client credentials were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialSource {
	/// `Authorization: Basic` header.
	BasicAuth,

	/// `client_id` and `client_secret` form parameters.
	RequestBody,
}

/// Client identifier and secret as they appeared on the wire.
///
/// Nothing is percent-decoded here. The authenticator tries both readings
/// of Basic credentials; body values arrive form-decoded already.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	pub client_id: String,
	pub client_secret: String,
	pub source: CredentialSource,
}

impl std::fmt::Debug for ClientCredentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("source", &self.source)
			.finish()
	}
}

/// Malformed `Authorization: Basic` header.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
	#[error("authorization header is not visible ASCII")]
	Header(#[from] http::header::ToStrError),

	#[error("basic credentials are empty")]
	Empty,

	#[error("basic credentials are not valid base64")]
	Base64(#[from] base64::DecodeError),

	#[error("basic credentials are not valid UTF-8")]
	Utf8(#[from] FromUtf8Error),

	#[error("basic credentials have no `:` separator")]
	MissingSeparator,
}

/// Returns the parameters of `value` if it uses the `scheme`
/// authentication scheme (case-insensitive), which may be empty.
///
/// The scheme is matched on the raw bytes so that values of other schemes
/// are never required to be visible ASCII.
fn authorization_params<'a>(
	value: &'a HeaderValue,
	scheme: &str,
) -> Result<Option<&'a str>, CredentialsError> {
	let bytes = value.as_bytes();
	let name_len = bytes
		.iter()
		.position(u8::is_ascii_whitespace)
		.unwrap_or(bytes.len());

	if !bytes[..name_len].eq_ignore_ascii_case(scheme.as_bytes()) {
		return Ok(None);
	}

	Ok(Some(value.to_str()?[name_len..].trim()))
}

/// Decodes the parameters of a Basic authorization header into
/// `(identifier, secret)`, split at the first colon.
fn decode_basic(params: &str) -> Result<(String, String), CredentialsError> {
	if params.is_empty() {
		return Err(CredentialsError::Empty);
	}

	let combined = String::from_utf8(BASE64_STANDARD.decode(params)?)?;
	let (client_id, client_secret) = combined
		.split_once(':')
		.ok_or(CredentialsError::MissingSeparator)?;

	Ok((client_id.to_owned(), client_secret.to_owned()))
}

/// Extracts the client credentials of a token request.
///
/// A `Basic` authorization header takes precedence over the body. Other
/// authorization schemes are ignored. When `allow_body` is set and no
/// header was sent, the `client_id` / `client_secret` form parameters are
/// used; a missing secret is read as empty.
///
/// Returns `Ok(None)` when the request carries no client identifier at all.
///
/// # Errors
///
/// Fails if a `Basic` header is present but empty or cannot be decoded.
pub fn extract_client_credentials(
	headers: &HeaderMap,
	form: &Form,
	allow_body: bool,
) -> Result<Option<ClientCredentials>, CredentialsError> {
	if let Some(value) = headers.get(header::AUTHORIZATION) {
		if let Some(params) = authorization_params(value, BASIC_SCHEME)? {
			let (client_id, client_secret) = decode_basic(params)?;
			return Ok(Some(ClientCredentials {
				client_id,
				client_secret,
				source: CredentialSource::BasicAuth,
			}));
		}
	}

	if !allow_body {
		return Ok(None);
	}

	let credentials = form
		.get("client_id")
		.filter(|id| !id.is_empty())
		.map(|client_id| ClientCredentials {
			client_id: client_id.to_owned(),
			client_secret: form.get("client_secret").unwrap_or_default().to_owned(),
			source: CredentialSource::RequestBody,
		});

	Ok(credentials)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn basic(raw: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		let value = format!("Basic {}", BASE64_STANDARD.encode(raw));
		headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
		headers
	}

	fn body(pairs: &[(&str, &str)]) -> Form {
		pairs.iter().copied().collect()
	}

	#[test]
	fn basic_header() {
		let credentials = extract_client_credentials(&basic("foo:bar"), &Form::new(), true)
			.unwrap()
			.unwrap();

		assert_eq!(credentials.client_id, "foo");
		assert_eq!(credentials.client_secret, "bar");
		assert_eq!(credentials.source, CredentialSource::BasicAuth);
	}

	#[test]
	fn basic_header_splits_at_first_colon() {
		let credentials = extract_client_credentials(&basic("foo:b:a:r"), &Form::new(), true)
			.unwrap()
			.unwrap();

		assert_eq!(credentials.client_id, "foo");
		assert_eq!(credentials.client_secret, "b:a:r");
	}

	#[test]
	fn basic_header_is_not_decoded() {
		let credentials = extract_client_credentials(&basic("f+oo:%2Bbar"), &Form::new(), true)
			.unwrap()
			.unwrap();

		assert_eq!(credentials.client_id, "f+oo");
		assert_eq!(credentials.client_secret, "%2Bbar");
	}

	#[test]
	fn basic_header_wins_over_body() {
		let form = body(&[("client_id", "other"), ("client_secret", "secret")]);
		let credentials = extract_client_credentials(&basic("foo:bar"), &form, true)
			.unwrap()
			.unwrap();

		assert_eq!(credentials.client_id, "foo");
		assert_eq!(credentials.source, CredentialSource::BasicAuth);
	}

	#[test]
	fn scheme_is_case_insensitive() {
		let mut headers = HeaderMap::new();
		let value = format!("basic {}", BASE64_STANDARD.encode("foo:bar"));
		headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());

		let credentials = extract_client_credentials(&headers, &Form::new(), false).unwrap();
		assert_eq!(credentials.unwrap().client_id, "foo");
	}

	#[test]
	fn missing_separator() {
		let result = extract_client_credentials(&basic("foobar"), &Form::new(), true);
		assert!(matches!(result, Err(CredentialsError::MissingSeparator)));
	}

	#[test]
	fn invalid_base64() {
		let mut headers = HeaderMap::new();
		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic !!!"));

		let result = extract_client_credentials(&headers, &Form::new(), true);
		assert!(matches!(result, Err(CredentialsError::Base64(_))));
	}

	#[test]
	fn invalid_utf8() {
		let mut headers = HeaderMap::new();
		let value = format!("Basic {}", BASE64_STANDARD.encode(b"\xff:bar"));
		headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());

		let result = extract_client_credentials(&headers, &Form::new(), true);
		assert!(matches!(result, Err(CredentialsError::Utf8(_))));
	}

	#[test]
	fn other_scheme_falls_back_to_body() {
		let mut headers = HeaderMap::new();
		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
		let form = body(&[("client_id", "foo"), ("client_secret", "bar")]);

		let credentials = extract_client_credentials(&headers, &form, true).unwrap().unwrap();
		assert_eq!(credentials.source, CredentialSource::RequestBody);
		assert_eq!(credentials.client_secret, "bar");
	}

	#[test]
	fn body_without_secret() {
		let form = body(&[("client_id", "foo")]);
		let credentials = extract_client_credentials(&HeaderMap::new(), &form, true)
			.unwrap()
			.unwrap();

		assert_eq!(credentials.client_id, "foo");
		assert_eq!(credentials.client_secret, "");
	}

	#[test]
	fn body_disabled() {
		let form = body(&[("client_id", "foo"), ("client_secret", "bar")]);
		let credentials = extract_client_credentials(&HeaderMap::new(), &form, false).unwrap();
		assert!(credentials.is_none());
	}

	#[test]
	fn nothing_present() {
		let form = body(&[("grant_type", "foo"), ("client_id", "")]);
		let credentials = extract_client_credentials(&HeaderMap::new(), &form, true).unwrap();
		assert!(credentials.is_none());
	}

	#[test]
	fn debug_redacts_secret() {
		let credentials = extract_client_credentials(&basic("foo:hunter2"), &Form::new(), true)
			.unwrap()
			.unwrap();

		assert!(!format!("{credentials:?}").contains("hunter2"));
	}

	#[test]
	fn basic_scheme_without_credentials() {
		let form = body(&[("client_id", "foo"), ("client_secret", "bar")]);

		for value in ["Basic", "basic  "] {
			let mut headers = HeaderMap::new();
			headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));

			let result = extract_client_credentials(&headers, &form, true);
			assert!(matches!(result, Err(CredentialsError::Empty)), "{value:?}");
		}
	}

	#[test]
	fn scheme_prefix_is_not_basic() {
		let mut headers = HeaderMap::new();
		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basically abc"));
		let form = body(&[("client_id", "foo")]);

		let credentials = extract_client_credentials(&headers, &form, true).unwrap().unwrap();
		assert_eq!(credentials.source, CredentialSource::RequestBody);
	}

	#[test]
	fn other_scheme_with_opaque_bytes_is_ignored() {
		let mut headers = HeaderMap::new();
		headers.insert(
			header::AUTHORIZATION,
			HeaderValue::from_bytes(b"Bearer \xe2\x82\xac").unwrap(),
		);
		let form = body(&[("client_id", "foo"), ("client_secret", "bar")]);

		let credentials = extract_client_credentials(&headers, &form, true).unwrap().unwrap();
		assert_eq!(credentials.source, CredentialSource::RequestBody);
	}

	#[test]
	fn basic_with_opaque_bytes_is_malformed() {
		let mut headers = HeaderMap::new();
		headers.insert(
			header::AUTHORIZATION,
			HeaderValue::from_bytes(b"Basic \xe2\x82\xac").unwrap(),
		);

		let result = extract_client_credentials(&headers, &Form::new(), true);
		assert!(matches!(result, Err(CredentialsError::Header(_))));
	}
}
