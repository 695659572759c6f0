//! Cache collaborator contract consulted by cache-backed fetches.
//!
//! The client only ever calls [`Cache::get`] and [`Cache::set`] with keys chosen by the
//! calling layer; freshness, eviction, and the storage medium belong to the implementation.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Cache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Async key/value store for decoded response payloads.
pub trait Cache
where
	Self: Send + Sync,
{
	/// Returns the entry stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<JsonValue>>;

	/// Stores or replaces the entry under `key`.
	fn set<'a>(&'a self, key: &'a str, value: JsonValue) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`Cache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Cached payload could not be converted to or from the requested type.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
