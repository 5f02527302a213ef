//! Client secret hashing.
//!
//! A [`Hasher`] turns secrets into the opaque bytes stored with a client and
//! later checks a presented secret against them.
use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::{encoding::Fallback, error::BoxError};

/// Secret verification failure.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
	/// The secret does not match the stored hash.
	#[error("secret does not match")]
	Mismatch,

	/// The hasher could not perform the comparison.
	#[error("hasher failure")]
	Backend(#[source] BoxError),
}

impl HashError {
	pub fn backend(e: impl Into<BoxError>) -> Self {
		Self::Backend(e.into())
	}
}

/// Only a mismatch says something about the candidate secret.
impl Fallback for HashError {
	fn allows_fallback(&self) -> bool {
		matches!(self, Self::Mismatch)
	}
}

/// Determines how client secrets are stored and checked.
#[async_trait]
pub trait Hasher: Send + Sync {
	/// Transforms `secret` so it can be stored with a confidential client.
	async fn hash(&self, secret: &[u8]) -> Result<Vec<u8>, HashError>;

	/// Checks `secret` against a value produced by [`hash`](Self::hash).
	///
	/// # Errors
	///
	/// Returns [`HashError::Mismatch`] if the secret is wrong, and
	/// [`HashError::Backend`] if the comparison itself could not be made.
	async fn compare(&self, hashed: &[u8], secret: &[u8]) -> Result<(), HashError>;
}

/// Stores secrets as they are and compares them in constant time.
///
/// Only meant for tests and local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

#[async_trait]
impl Hasher for PlainText {
	async fn hash(&self, secret: &[u8]) -> Result<Vec<u8>, HashError> {
		Ok(secret.to_vec())
	}

	async fn compare(&self, hashed: &[u8], secret: &[u8]) -> Result<(), HashError> {
		if bool::from(hashed.ct_eq(secret)) {
			Ok(())
		} else {
			Err(HashError::Mismatch)
		}
	}
}

#[cfg(feature = "bcrypt")]
pub use self::bcrypt_hasher::BCrypt;

#[cfg(feature = "bcrypt")]
mod bcrypt_hasher {
	use async_trait::async_trait;
	use tokio::task::spawn_blocking;

	use super::{HashError, Hasher};

	/// Stores secrets with `bcrypt`.
	///
	/// Hashing runs on the blocking thread pool of the current `tokio`
	/// runtime.
	#[derive(Debug, Clone, Copy)]
	pub struct BCrypt {
		cost: u32,
	}

	impl BCrypt {
		pub fn new(cost: u32) -> Self {
			Self { cost }
		}

		pub fn cost(&self) -> u32 {
			self.cost
		}
	}

	impl Default for BCrypt {
		fn default() -> Self {
			Self::new(::bcrypt::DEFAULT_COST)
		}
	}

	#[async_trait]
	impl Hasher for BCrypt {
		async fn hash(&self, secret: &[u8]) -> Result<Vec<u8>, HashError> {
			let secret = secret.to_vec();
			let cost = self.cost;

			spawn_blocking(move || ::bcrypt::hash(secret, cost))
				.await
				.map_err(HashError::backend)?
				.map(String::into_bytes)
				.map_err(HashError::backend)
		}

		async fn compare(&self, hashed: &[u8], secret: &[u8]) -> Result<(), HashError> {
			let hashed = String::from_utf8(hashed.to_vec()).map_err(HashError::backend)?;
			let secret = secret.to_vec();

			let matches = spawn_blocking(move || ::bcrypt::verify(secret, &hashed))
				.await
				.map_err(HashError::backend)?
				.map_err(HashError::backend)?;

			if matches {
				Ok(())
			} else {
				Err(HashError::Mismatch)
			}
		}
	}

	#[cfg(test)]
	mod tests {
		use super::*;

		#[tokio::test]
		async fn round_trip() {
			let hasher = BCrypt::new(4);
			let hashed = hasher.hash(b"s3cret").await.unwrap();

			assert!(hasher.compare(&hashed, b"s3cret").await.is_ok());
			assert!(matches!(
				hasher.compare(&hashed, b"wrong").await,
				Err(HashError::Mismatch)
			));
		}

		#[tokio::test]
		async fn malformed_hash_is_a_backend_error() {
			let result = BCrypt::new(4).compare(b"not a bcrypt hash", b"x").await;
			assert!(matches!(result, Err(HashError::Backend(_))));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn plain_text() {
		let stored = PlainText.hash(b"+bar").await.unwrap();

		assert!(PlainText.compare(&stored, b"+bar").await.is_ok());
		assert!(matches!(
			PlainText.compare(&stored, b" bar").await,
			Err(HashError::Mismatch)
		));
		assert!(matches!(
			PlainText.compare(&stored, b"+ba").await,
			Err(HashError::Mismatch)
		));
	}

	#[test]
	fn only_mismatch_allows_fallback() {
		assert!(HashError::Mismatch.allows_fallback());
		assert!(!HashError::backend("pool exhausted").allows_fallback());
	}
}
