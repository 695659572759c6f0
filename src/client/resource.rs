//! Cache-aware reads layered on the transport wrapper.

// self
use crate::{
	_prelude::*,
	ApiClient,
	cache::CacheError,
	fetch::RequestInit,
	obs::LogLevel,
};

impl ApiClient {
	/// Returns the entry cached under `cache_key`, decoded as `T`.
	///
	/// Yields `Ok(None)` without touching anything when no cache is configured, and when the
	/// cache has no entry for the key. Freshness is entirely the cache's concern.
	pub async fn get_cached_response<T>(&self, cache_key: &str) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		let Some(cache) = &self.cache else {
			return Ok(None);
		};

		self.debug_log(LogLevel::Verbose, || format!("Checking cache for key {cache_key}..."));

		let Some(value) = cache.get(cache_key).await? else {
			self.debug_log(LogLevel::Verbose, || {
				format!("No cached response found for key {cache_key}...")
			});

			return Ok(None);
		};

		self.debug_log(LogLevel::Verbose, || format!("Found cached response for key {cache_key}..."));

		let decoded = serde_path_to_error::deserialize(value)
			.map_err(|e| CacheError::Serialization { message: e.to_string() })?;

		Ok(Some(decoded))
	}

	/// Fetches a JSON document, serving and populating the cache when `cache_key` is given.
	///
	/// A cache hit skips the network entirely. On a miss the response must carry a 2xx
	/// status; the decoded document is stored under the key before it is returned. Cache
	/// failures never fail the read: a broken lookup counts as a miss and a failed store is
	/// logged at [`LogLevel::Warn`].
	pub async fn fetch_json<T>(
		&self,
		input: Url,
		init: RequestInit,
		cache_key: Option<&str>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let cached = match cache_key {
			Some(key) => self.get_cached_response(key).await.unwrap_or_else(|e| {
				self.debug_log(LogLevel::Warn, || {
					format!("Cache lookup for key {key} failed: {e} Fetching from the network.")
				});

				None
			}),
			None => None,
		};

		if let Some(cached) = cached {
			return Ok(cached);
		}

		let response = self.fetch(input, init).await.map_err(|e| e.into_inner())?;

		if !response.is_success() {
			return Err(Error::Status { status: response.status.as_u16() });
		}

		let document = response.json::<JsonValue>().map_err(Error::Payload)?;

		let stored = match (&self.cache, cache_key) {
			(Some(cache), Some(key)) => cache.set(key, document.clone()).await.map_err(|e| (key, e)),
			_ => Ok(()),
		};

		if let Err((key, e)) = stored {
			self.debug_log(LogLevel::Warn, || format!("Could not cache response for key {key}: {e}"));
		}

		serde_path_to_error::deserialize(document).map_err(Error::Payload)
	}
}
