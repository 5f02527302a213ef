//! Client lookup.
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::{ClientId, client::Client, encoding::Fallback, error::BoxError};

/// Client lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("client not found")]
	NotFound,

	#[error("client storage failure")]
	Backend(#[source] BoxError),
}

impl StoreError {
	pub fn backend(e: impl Into<BoxError>) -> Self {
		Self::Backend(e.into())
	}
}

/// Any lookup failure leaves room for the other identifier reading.
impl Fallback for StoreError {
	fn allows_fallback(&self) -> bool {
		true
	}
}

/// Source of registered clients.
///
/// Implementations are shared between concurrent requests and must be safe
/// for concurrent use on their own.
#[async_trait]
pub trait Store: Send + Sync {
	/// Returns the client registered under exactly `id`.
	async fn get_client(&self, id: &ClientId) -> Result<Arc<dyn Client>, StoreError>;
}

#[async_trait]
impl<T: Store + ?Sized> Store for Arc<T> {
	async fn get_client(&self, id: &ClientId) -> Result<Arc<dyn Client>, StoreError> {
		T::get_client(self, id).await
	}
}

/// A very simple, in-memory map of client identifiers to clients.
#[derive(Debug, Default)]
pub struct MemoryStore {
	clients: HashMap<String, Arc<dyn Client>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `client`, replacing any client with the same identifier.
	pub fn register_client(&mut self, client: impl Client + 'static) {
		let client: Arc<dyn Client> = Arc::new(client);
		self.clients.insert(client.id().as_str().to_owned(), client);
	}

	pub fn with_client(mut self, client: impl Client + 'static) -> Self {
		self.register_client(client);
		self
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}

impl<C: Client + 'static> Extend<C> for MemoryStore {
	fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
		for client in iter {
			self.register_client(client);
		}
	}
}

impl<C: Client + 'static> FromIterator<C> for MemoryStore {
	fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
		let mut store = Self::new();
		store.extend(iter);
		store
	}
}

#[async_trait]
impl Store for MemoryStore {
	async fn get_client(&self, id: &ClientId) -> Result<Arc<dyn Client>, StoreError> {
		self.clients
			.get(id.as_str())
			.cloned()
			.ok_or(StoreError::NotFound)
	}
}
