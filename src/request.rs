//! Canonical in-memory representation of a token request.
use std::{
	ops::{Deref, DerefMut},
	sync::Arc,
};

use chrono::{DateTime, Utc};

use crate::{client::Client, form::Form, session::Session};

/// A request whose client has been authenticated.
///
/// A `Request` can only be built with a client, so holding one means
/// authentication succeeded. The client, the timestamp and the form snapshot
/// are fixed at construction; handlers may only touch the session and the
/// granted scopes.
#[derive(Debug)]
pub struct Request {
	client: Arc<dyn Client>,
	requested_at: DateTime<Utc>,
	session: Box<dyn Session>,
	form: Form,
	granted_scopes: Vec<String>,
}

impl Request {
	/// Creates a request, stamped with the current time.
	pub fn new(client: Arc<dyn Client>, session: Box<dyn Session>, form: Form) -> Self {
		Self {
			client,
			requested_at: Utc::now(),
			session,
			form,
			granted_scopes: Vec::new(),
		}
	}

	pub fn client(&self) -> &Arc<dyn Client> {
		&self.client
	}

	pub fn requested_at(&self) -> DateTime<Utc> {
		self.requested_at
	}

	pub fn session(&self) -> &dyn Session {
		self.session.as_ref()
	}

	pub fn session_mut(&mut self) -> &mut dyn Session {
		self.session.as_mut()
	}

	pub fn into_session(self) -> Box<dyn Session> {
		self.session
	}

	/// Form parameters as submitted.
	pub fn form(&self) -> &Form {
		&self.form
	}

	/// Scopes requested through the `scope` parameter, split on spaces.
	pub fn requested_scopes(&self) -> impl Iterator<Item = &str> {
		self.form
			.get("scope")
			.into_iter()
			.flat_map(|scope| scope.split(' '))
			.filter(|token| !token.is_empty())
	}

	pub fn granted_scopes(&self) -> &[String] {
		&self.granted_scopes
	}

	/// Records that `scope` was granted. Already granted scopes are ignored.
	pub fn grant_scope(&mut self, scope: impl Into<String>) {
		let scope = scope.into();
		if !self.granted_scopes.contains(&scope) {
			self.granted_scopes.push(scope)
		}
	}
}

/// Access token request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug)]
pub struct AccessRequest {
	request: Request,
	grant_types: Vec<String>,
	handled_grant_types: Vec<String>,
}

impl AccessRequest {
	pub fn new(request: Request, grant_types: Vec<String>) -> Self {
		Self {
			request,
			grant_types,
			handled_grant_types: Vec::new(),
		}
	}

	/// `grant_type` values in submission order.
	pub fn grant_types(&self) -> &[String] {
		&self.grant_types
	}

	pub fn has_grant_type(&self, grant_type: &str) -> bool {
		self.grant_types.iter().any(|g| g == grant_type)
	}

	/// Grant types a handler declared it took care of.
	pub fn handled_grant_types(&self) -> &[String] {
		&self.handled_grant_types
	}

	pub fn mark_handled(&mut self, grant_type: impl Into<String>) {
		self.handled_grant_types.push(grant_type.into())
	}

	pub fn into_request(self) -> Request {
		self.request
	}
}

impl Deref for AccessRequest {
	type Target = Request;

	fn deref(&self) -> &Self::Target {
		&self.request
	}
}

impl DerefMut for AccessRequest {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.request
	}
}
