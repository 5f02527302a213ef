//! Grant type handlers.
use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{error::TokenEndpointError, request::AccessRequest};

/// Grant-specific processing of an authenticated access token request.
///
/// Handlers usually check [`AccessRequest::has_grant_type`] first and
/// return `Ok(())` for requests that are none of their business. They may
/// enrich the request (grant scopes, set session expiry, mark the grant type
/// handled).
#[async_trait]
pub trait TokenEndpointHandler: Send + Sync {
	/// # Errors
	///
	/// Any error stops the dispatch and is returned to the caller as is, so
	/// it must already carry the right [`ErrorKind`](crate::error::ErrorKind).
	async fn handle_token_endpoint_request(
		&self,
		request: &mut AccessRequest,
	) -> Result<(), TokenEndpointError>;
}

#[async_trait]
impl<T: TokenEndpointHandler + ?Sized> TokenEndpointHandler for Arc<T> {
	async fn handle_token_endpoint_request(
		&self,
		request: &mut AccessRequest,
	) -> Result<(), TokenEndpointError> {
		T::handle_token_endpoint_request(self, request).await
	}
}

/// Ordered list of handlers, configured once at startup.
#[derive(Clone, Default)]
pub struct TokenEndpointHandlers(Vec<Arc<dyn TokenEndpointHandler>>);

impl TokenEndpointHandlers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `handler`; it runs after every handler added before it.
	pub fn push(&mut self, handler: impl TokenEndpointHandler + 'static) {
		self.0.push(Arc::new(handler))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Runs every handler in registration order.
	///
	/// An empty list accepts every request.
	///
	/// # Errors
	///
	/// Returns the error of the first failing handler, unchanged. Later
	/// handlers are not invoked.
	pub async fn dispatch(&self, request: &mut AccessRequest) -> Result<(), TokenEndpointError> {
		if self.0.is_empty() {
			log::warn!("no token endpoint handler registered");
		}

		for (i, handler) in self.0.iter().enumerate() {
			handler
				.handle_token_endpoint_request(request)
				.await
				.inspect_err(|e| log::debug!("token endpoint handler #{i} failed: {e}"))?;
		}

		Ok(())
	}
}

impl fmt::Debug for TokenEndpointHandlers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TokenEndpointHandlers")
			.field("len", &self.0.len())
			.finish()
	}
}

impl<H: TokenEndpointHandler + 'static> Extend<H> for TokenEndpointHandlers {
	fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
		for handler in iter {
			self.push(handler)
		}
	}
}

impl<H: TokenEndpointHandler + 'static> FromIterator<H> for TokenEndpointHandlers {
	fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
		let mut handlers = Self::new();
		handlers.extend(iter);
		handlers
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use super::*;
	use crate::{
		ClientIdBuf,
		client::DefaultClient,
		error::ErrorKind,
		form::Form,
		request::Request,
		session::DefaultSession,
	};

	struct Step {
		name: &'static str,
		fails_with: Option<ErrorKind>,
		log: Arc<Mutex<Vec<&'static str>>>,
	}

	#[async_trait]
	impl TokenEndpointHandler for Step {
		async fn handle_token_endpoint_request(
			&self,
			request: &mut AccessRequest,
		) -> Result<(), TokenEndpointError> {
			self.log.lock().unwrap().push(self.name);

			match self.fails_with {
				Some(kind) => Err(TokenEndpointError::new(kind).with_description(self.name)),
				None => {
					request.grant_scope(self.name);
					Ok(())
				}
			}
		}
	}

	fn access_request() -> AccessRequest {
		let client = DefaultClient::public(ClientIdBuf::new("app".to_owned()).unwrap());
		let request = Request::new(Arc::new(client), Box::new(DefaultSession::new()), Form::new());
		AccessRequest::new(request, vec!["foo".to_owned()])
	}

	fn steps(
		plan: &[(&'static str, Option<ErrorKind>)],
	) -> (TokenEndpointHandlers, Arc<Mutex<Vec<&'static str>>>) {
		let log = Arc::new(Mutex::new(Vec::new()));
		let handlers = plan
			.iter()
			.map(|&(name, fails_with)| Step {
				name,
				fails_with,
				log: log.clone(),
			})
			.collect();

		(handlers, log)
	}

	#[tokio::test]
	async fn runs_in_registration_order() {
		let (handlers, log) = steps(&[("first", None), ("second", None)]);
		let mut request = access_request();

		handlers.dispatch(&mut request).await.unwrap();

		assert_eq!(*log.lock().unwrap(), ["first", "second"]);
		assert_eq!(request.granted_scopes(), ["first", "second"]);
	}

	#[tokio::test]
	async fn first_failure_stops_dispatch() {
		let (handlers, log) = steps(&[
			("first", None),
			("second", Some(ErrorKind::ServerError)),
			("third", None),
		]);
		let mut request = access_request();

		let err = handlers.dispatch(&mut request).await.unwrap_err();

		assert_eq!(err.kind(), ErrorKind::ServerError);
		assert_eq!(err.description(), "second");
		assert_eq!(*log.lock().unwrap(), ["first", "second"]);
	}

	#[tokio::test]
	async fn handler_error_kind_is_preserved() {
		let (handlers, _) = steps(&[("grant", Some(ErrorKind::InvalidGrant))]);
		let err = handlers.dispatch(&mut access_request()).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidGrant);
	}

	#[tokio::test]
	async fn empty_list_accepts() {
		let handlers = TokenEndpointHandlers::new();
		let mut request = access_request();

		assert!(handlers.is_empty());
		handlers.dispatch(&mut request).await.unwrap();
		assert!(request.granted_scopes().is_empty());
	}
}
