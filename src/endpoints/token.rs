//! Token endpoint.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.2>
use std::sync::Arc;

use http::{HeaderMap, Method};

use crate::{
	authenticate::ClientAuthenticator,
	config::TokenEndpointConfig,
	credentials::extract_client_credentials,
	error::TokenEndpointError,
	form::Form,
	handler::{TokenEndpointHandler, TokenEndpointHandlers},
	hash::Hasher,
	request::{AccessRequest, Request},
	session::Session,
	storage::Store,
};

/// Authenticates token requests and hands them to the grant handlers.
///
/// The endpoint is shared by all concurrent requests. Store, hasher and
/// handlers are only read after startup.
#[derive(Clone)]
pub struct TokenEndpoint {
	store: Arc<dyn Store>,
	hasher: Arc<dyn Hasher>,
	handlers: TokenEndpointHandlers,
	config: TokenEndpointConfig,
}

impl TokenEndpoint {
	pub fn new(store: Arc<dyn Store>, hasher: Arc<dyn Hasher>) -> Self {
		Self {
			store,
			hasher,
			handlers: TokenEndpointHandlers::new(),
			config: TokenEndpointConfig::default(),
		}
	}

	pub fn with_config(self, config: TokenEndpointConfig) -> Self {
		Self { config, ..self }
	}

	/// Appends a grant handler. Handlers run in the order they were added.
	pub fn with_handler(mut self, handler: impl TokenEndpointHandler + 'static) -> Self {
		self.handlers.push(handler);
		self
	}

	pub fn with_handlers(self, handlers: TokenEndpointHandlers) -> Self {
		Self { handlers, ..self }
	}

	pub fn config(&self) -> &TokenEndpointConfig {
		&self.config
	}

	pub fn handlers(&self) -> &TokenEndpointHandlers {
		&self.handlers
	}

	pub fn authenticator(&self) -> ClientAuthenticator<'_> {
		ClientAuthenticator::new(self.store.as_ref(), self.hasher.as_ref())
	}

	/// Validates, authenticates and dispatches an access token request.
	///
	/// `session` is attached to the request untouched.
	///
	/// # Errors
	///
	/// - `invalid_request` if the method is not `POST`, `grant_type` is
	///   missing, or the client credentials are missing or malformed.
	/// - `invalid_client` / `server_error` from client authentication.
	/// - Whatever the first failing handler returned.
	pub async fn new_access_request(
		&self,
		method: &Method,
		headers: &HeaderMap,
		form: Form,
		session: Box<dyn Session>,
	) -> Result<AccessRequest, TokenEndpointError> {
		if *method != Method::POST {
			return Err(TokenEndpointError::invalid_request()
				.with_description(format!("HTTP method is `{method}`, expected `POST`."))
				.logged());
		}

		let grant_types: Vec<String> = form
			.get_all("grant_type")
			.filter(|grant_type| !grant_type.is_empty())
			.map(ToOwned::to_owned)
			.collect();

		if grant_types.is_empty() {
			return Err(TokenEndpointError::invalid_request()
				.with_description("The `grant_type` parameter is missing.")
				.logged());
		}

		let credentials =
			extract_client_credentials(headers, &form, self.config.allow_credentials_in_body)
				.map_err(|e| {
					TokenEndpointError::invalid_request()
						.with_description("The client credentials are malformed.")
						.with_source(e)
						.logged()
				})?
				.ok_or_else(|| {
					TokenEndpointError::invalid_request()
						.with_description("Client credentials are missing.")
						.logged()
				})?;

		let client = self
			.authenticator()
			.authenticate(&credentials)
			.await
			.map_err(TokenEndpointError::logged)?;

		let mut access_request =
			AccessRequest::new(Request::new(client, session, form), grant_types);

		self.handlers.dispatch(&mut access_request).await?;

		log::debug!(
			"accepted access request from `{}` for {:?}",
			access_request.client().id().as_str(),
			access_request.grant_types()
		);

		Ok(access_request)
	}

	/// Same as [`new_access_request`](Self::new_access_request), reading the
	/// form from the `application/x-www-form-urlencoded` body of `request`.
	///
	/// # Errors
	///
	/// `invalid_request` if the body cannot be parsed, and every error of
	/// `new_access_request`.
	pub async fn handle_http_request<B: AsRef<[u8]>>(
		&self,
		request: &http::Request<B>,
		session: Box<dyn Session>,
	) -> Result<AccessRequest, TokenEndpointError> {
		let form = Form::parse(request.body().as_ref()).map_err(TokenEndpointError::logged)?;

		self.new_access_request(request.method(), request.headers(), form, session)
			.await
	}
}
