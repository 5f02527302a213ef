//! Form-encoded request parameters.
use serde::{Deserialize, Serialize};

use crate::error::TokenEndpointError;

/// Immutable snapshot of the `application/x-www-form-urlencoded` parameters
/// of a request.
///
/// Pairs keep their submission order and repeated keys are preserved.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form(Vec<(String, String)>);

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a form-encoded request body.
	///
	/// # Errors
	///
	/// Fails with `invalid_request` if the body is not valid
	/// `application/x-www-form-urlencoded` data.
	pub fn parse(body: &[u8]) -> Result<Self, TokenEndpointError> {
		serde_html_form::from_bytes::<Vec<(String, String)>>(body)
			.map(Self)
			.map_err(|e| {
				TokenEndpointError::invalid_request()
					.with_description("The request body is not form-encoded.")
					.with_source(e)
			})
	}

	/// First value submitted for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.get_all(key).next()
	}

	/// Every value submitted for `key`, in submission order.
	pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
		self.0
			.iter()
			.filter(move |(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.iter().any(|(k, _)| k == key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for Form
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
