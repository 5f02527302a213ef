//! Client authentication.
//!
//! Basic credentials are each tried in their percent-decoded and raw
//! readings (see [`try_both_encodings`]), independently of one another: a
//! client may need the decoded identifier but the raw secret. Body
//! credentials were already form-decoded and are used as given.
use std::sync::Arc;

use crate::{
	ClientId,
	client::Client,
	credentials::{ClientCredentials, CredentialSource},
	encoding::try_both_encodings,
	error::TokenEndpointError,
	hash::{HashError, Hasher},
	storage::{Store, StoreError},
};

/// Resolves and authenticates the client of a token request.
#[derive(Clone, Copy)]
pub struct ClientAuthenticator<'a> {
	store: &'a dyn Store,
	hasher: &'a dyn Hasher,
}

impl<'a> ClientAuthenticator<'a> {
	pub fn new(store: &'a dyn Store, hasher: &'a dyn Hasher) -> Self {
		Self { store, hasher }
	}

	/// Authenticates the client presenting `credentials`.
	///
	/// Public clients are accepted without looking at the secret.
	///
	/// # Errors
	///
	/// `invalid_client` if the client is unknown or the secret is wrong,
	/// `server_error` if the hasher failed.
	pub async fn authenticate(
		&self,
		credentials: &ClientCredentials,
	) -> Result<Arc<dyn Client>, TokenEndpointError> {
		let client = self
			.resolve(&credentials.client_id, credentials.source)
			.await?;

		if client.is_public() {
			log::debug!("authenticated public client `{}`", client.id().as_str());
			return Ok(client);
		}

		self.verify_secret(client.as_ref(), &credentials.client_secret, credentials.source)
			.await?;

		log::debug!("authenticated confidential client `{}`", client.id().as_str());
		Ok(client)
	}

	/// Looks up the client registered under `client_id`.
	///
	/// Identifiers from a Basic header are tried decoded first, then raw.
	///
	/// # Errors
	///
	/// `invalid_client` if no reading is registered. The store failure is
	/// kept as cause but never described to the client.
	pub async fn resolve(
		&self,
		client_id: &str,
		source: CredentialSource,
	) -> Result<Arc<dyn Client>, TokenEndpointError> {
		let store = self.store;
		let lookup = |candidate: String| async move {
			let id = ClientId::new(candidate.as_str()).map_err(|_| StoreError::NotFound)?;
			store.get_client(id).await.inspect_err(|e| {
				log::debug!("client lookup for `{}` failed: {e}", candidate.escape_debug())
			})
		};

		match source {
			CredentialSource::BasicAuth => try_both_encodings(client_id, lookup).await,
			CredentialSource::RequestBody => lookup(client_id.to_owned()).await,
		}
		.map_err(|e| {
			TokenEndpointError::invalid_client()
				.with_description("The client is unknown or failed to authenticate.")
				.with_source(e)
		})
	}

	/// Checks `secret` against the stored hash of a confidential client.
	///
	/// Secrets from a Basic header are tried decoded first, then raw.
	///
	/// # Errors
	///
	/// `invalid_client` on mismatch under every reading, `server_error` as
	/// soon as the hasher reports a backend failure.
	pub async fn verify_secret(
		&self,
		client: &dyn Client,
		secret: &str,
		source: CredentialSource,
	) -> Result<(), TokenEndpointError> {
		let hasher = self.hasher;
		let hashed = client.hashed_secret();
		let compare =
			|candidate: String| async move { hasher.compare(hashed, candidate.as_bytes()).await };

		match source {
			CredentialSource::BasicAuth => try_both_encodings(secret, compare).await,
			CredentialSource::RequestBody => compare(secret.to_owned()).await,
		}
		.map_err(|e| match e {
			HashError::Mismatch => TokenEndpointError::invalid_client()
				.with_description("The client is unknown or failed to authenticate.")
				.with_source(e),
			HashError::Backend(_) => TokenEndpointError::server_error()
				.with_description("Client authentication could not be completed.")
				.with_source(e),
		})
	}
}
