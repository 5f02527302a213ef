//! Application-defined session data carried by a request.
use std::{any::Any, collections::HashMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of artifact a session expiry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	AccessToken,
	RefreshToken,
	AuthorizationCode,
}

/// Session attached to a request.
///
/// The token endpoint never looks inside the session; it is handed to the
/// grant handlers untouched. Handlers that know the concrete type can get it
/// back with [`downcast_ref`](dyn Session::downcast_ref).
pub trait Session: Any + fmt::Debug + Send + Sync {
	fn expires_at(&self, kind: TokenKind) -> Option<DateTime<Utc>>;

	fn set_expires_at(&mut self, kind: TokenKind, at: DateTime<Utc>);

	fn username(&self) -> Option<&str> {
		None
	}

	fn subject(&self) -> Option<&str> {
		None
	}
}

impl dyn Session {
	pub fn downcast_ref<T: Session>(&self) -> Option<&T> {
		(self as &dyn Any).downcast_ref()
	}

	pub fn downcast_mut<T: Session>(&mut self) -> Option<&mut T> {
		(self as &mut dyn Any).downcast_mut()
	}
}

/// General purpose session.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSession {
	pub expires_at: HashMap<TokenKind, DateTime<Utc>>,

	pub username: Option<String>,

	pub subject: Option<String>,

	/// Free-form claims.
	pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DefaultSession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_subject(self, subject: impl Into<String>) -> Self {
		Self {
			subject: Some(subject.into()),
			..self
		}
	}

	pub fn with_username(self, username: impl Into<String>) -> Self {
		Self {
			username: Some(username.into()),
			..self
		}
	}
}

impl Session for DefaultSession {
	fn expires_at(&self, kind: TokenKind) -> Option<DateTime<Utc>> {
		self.expires_at.get(&kind).copied()
	}

	fn set_expires_at(&mut self, kind: TokenKind, at: DateTime<Utc>) {
		self.expires_at.insert(kind, at);
	}

	fn username(&self) -> Option<&str> {
		self.username.as_deref()
	}

	fn subject(&self) -> Option<&str> {
		self.subject.as_deref()
	}
}
