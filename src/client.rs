//! Registered clients, as seen by the token endpoint.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{ClientId, ClientIdBuf};

/// Capabilities the token endpoint needs from a registered client.
///
/// There are two types of clients. Public clients operate without proof of
/// identity; confidential clients hold a secret that is checked against
/// [`hashed_secret`](Self::hashed_secret) on every token request.
pub trait Client: fmt::Debug + Send + Sync {
	fn id(&self) -> &ClientId;

	/// Public clients are never asked for a secret.
	fn is_public(&self) -> bool;

	/// Stored hash of the client secret. Empty for public clients.
	fn hashed_secret(&self) -> &[u8];

	/// Grant types the client registered for.
	fn grant_types(&self) -> &[String] {
		&[]
	}

	/// Scopes the client may request.
	fn scopes(&self) -> &[String] {
		&[]
	}
}

/// Plain client record, suitable for configuration files and the
/// [`MemoryStore`](crate::storage::MemoryStore).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultClient {
	pub id: ClientIdBuf,

	/// Hash of the secret, as produced by the configured
	/// [`Hasher`](crate::hash::Hasher). `None` for public clients.
	pub hashed_secret: Option<String>,

	#[serde(default)]
	pub grant_types: Vec<String>,

	#[serde(default)]
	pub scopes: Vec<String>,
}

impl DefaultClient {
	/// Creates a public client.
	pub fn public(id: ClientIdBuf) -> Self {
		Self {
			id,
			hashed_secret: None,
			grant_types: Vec::new(),
			scopes: Vec::new(),
		}
	}

	/// Creates a confidential client from an already hashed secret.
	pub fn confidential(id: ClientIdBuf, hashed_secret: String) -> Self {
		Self {
			hashed_secret: Some(hashed_secret),
			..Self::public(id)
		}
	}

	pub fn with_grant_types(self, grant_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			grant_types: grant_types.into_iter().map(Into::into).collect(),
			..self
		}
	}

	pub fn with_scopes(self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			scopes: scopes.into_iter().map(Into::into).collect(),
			..self
		}
	}
}

impl Client for DefaultClient {
	fn id(&self) -> &ClientId {
		self.id.as_client_id()
	}

	fn is_public(&self) -> bool {
		self.hashed_secret.is_none()
	}

	fn hashed_secret(&self) -> &[u8] {
		self.hashed_secret.as_deref().unwrap_or_default().as_bytes()
	}

	fn grant_types(&self) -> &[String] {
		&self.grant_types
	}

	fn scopes(&self) -> &[String] {
		&self.scopes
	}
}
