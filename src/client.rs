//! The API client: configuration, collaborators, and per-instance token state.
//!
//! [`ApiClient`] owns everything a request needs: the base URL, the authentication scheme,
//! the optional cache/logger/fetch collaborators, and the OAuth [`TokenState`] cached for
//! the lifetime of the instance. The token is never shared between instances, so the type
//! is deliberately not `Clone`; wrap it in an `Arc` to share one client across tasks.

pub mod resource;
pub mod transport;

pub use resource::*;
pub use transport::*;

// self
use crate::{
	_prelude::*,
	auth::{AuthenticationConfig, TokenState},
	cache::Cache,
	error::ConfigError,
	fetch::Fetch,
	oauth::TokenEndpoint,
	obs::{LogLevel, Logger, TracingLogger},
};
#[cfg(feature = "reqwest")] use crate::fetch::ReqwestFetch;

/// Serializable client configuration (camelCase keys).
///
/// Collaborators (cache, logger, custom fetch) are runtime objects and are attached through
/// [`ApiClientBuilder`] instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
	/// Base URL every API path and the token endpoint are resolved against.
	pub base_url: String,
	/// Path prefix inserted before resource paths (e.g. `jsonapi`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_prefix: Option<String>,
	/// Locale segment used when a request does not name one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_locale: Option<String>,
	/// Enables diagnostic logging through the configured logger.
	#[serde(default)]
	pub debug: bool,
	/// Authentication scheme.
	#[serde(default)]
	pub authentication: AuthenticationConfig,
}

/// Authenticated client for a document-oriented HTTP API.
pub struct ApiClient {
	pub(crate) base_url: Url,
	pub(crate) api_prefix: Option<String>,
	pub(crate) default_locale: Option<String>,
	pub(crate) authentication: AuthenticationConfig,
	pub(crate) token_endpoint: TokenEndpoint,
	pub(crate) custom_fetch: Option<Arc<dyn Fetch>>,
	#[cfg(feature = "reqwest")]
	pub(crate) default_fetch: ReqwestFetch,
	pub(crate) cache: Option<Arc<dyn Cache>>,
	pub(crate) logger: Arc<dyn Logger>,
	pub(crate) debug: bool,
	pub(crate) token: RwLock<Option<TokenState>>,
	pub(crate) refresh_guard: AsyncMutex<()>,
}
impl ApiClient {
	/// Starts building a client rooted at `base_url`.
	pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
		ApiClientBuilder::new(base_url)
	}

	/// Builds a client from serialized configuration with default collaborators.
	pub fn from_config(config: ClientConfig) -> Result<Self> {
		ApiClientBuilder {
			api_prefix: config.api_prefix,
			default_locale: config.default_locale,
			debug: config.debug,
			authentication: config.authentication,
			..ApiClientBuilder::new(config.base_url)
		}
		.build()
	}

	/// Parsed base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Configured authentication scheme.
	pub fn authentication(&self) -> &AuthenticationConfig {
		&self.authentication
	}

	/// OAuth token endpoint derived from the base URL.
	pub fn token_endpoint(&self) -> &TokenEndpoint {
		&self.token_endpoint
	}

	/// Returns `true` when diagnostic logging is enabled.
	pub fn debug(&self) -> bool {
		self.debug
	}

	/// Snapshot of the cached OAuth token, if one has been fetched.
	pub fn token(&self) -> Option<TokenState> {
		self.token.read().clone()
	}

	/// Builds `<base>/<locale>/<api_prefix>/<path>`, skipping absent parts.
	///
	/// `locale` falls back to the configured default locale.
	pub fn endpoint(&self, path: &str, locale: Option<&str>) -> Result<Url> {
		let locale = locale.or(self.default_locale.as_deref());
		let segments = locale
			.into_iter()
			.chain(self.api_prefix.as_deref())
			.chain(path.split('/'))
			.filter(|segment| !segment.is_empty());

		Ok(append_path(&self.base_url, segments)?)
	}

	/// Sends `message` to the configured logger at `level`.
	pub fn log(&self, level: LogLevel, message: &str) {
		self.logger.log(level, message);
	}

	/// Logs only when debug mode is on, building the message lazily.
	pub(crate) fn debug_log(&self, level: LogLevel, message: impl FnOnce() -> String) {
		if self.debug {
			self.log(level, &message());
		}
	}

	/// Custom fetch when configured, otherwise the default transport.
	pub(crate) fn fetcher(&self) -> Result<&dyn Fetch, ConfigError> {
		if let Some(fetch) = &self.custom_fetch {
			return Ok(fetch.as_ref());
		}

		#[cfg(feature = "reqwest")]
		{
			Ok(&self.default_fetch)
		}
		#[cfg(not(feature = "reqwest"))]
		{
			Err(ConfigError::NoFetchImplementation)
		}
	}
}
impl Debug for ApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url.as_str())
			.field("api_prefix", &self.api_prefix)
			.field("default_locale", &self.default_locale)
			.field("authentication", &self.authentication.scheme())
			.field("custom_fetch_set", &self.custom_fetch.is_some())
			.field("cache_set", &self.cache.is_some())
			.field("debug", &self.debug)
			.field("token_cached", &self.token.read().is_some())
			.finish()
	}
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
	base_url: String,
	api_prefix: Option<String>,
	default_locale: Option<String>,
	authentication: AuthenticationConfig,
	custom_fetch: Option<Arc<dyn Fetch>>,
	cache: Option<Arc<dyn Cache>>,
	logger: Option<Arc<dyn Logger>>,
	debug: bool,
}
impl ApiClientBuilder {
	fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			api_prefix: None,
			default_locale: None,
			authentication: AuthenticationConfig::None,
			custom_fetch: None,
			cache: None,
			logger: None,
			debug: false,
		}
	}

	/// Sets the authentication scheme.
	pub fn authentication(mut self, authentication: AuthenticationConfig) -> Self {
		self.authentication = authentication;

		self
	}

	/// Replaces the default transport for every request, token exchanges included.
	pub fn custom_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
		self.custom_fetch = Some(fetch);

		self
	}

	/// Attaches a response cache.
	pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Replaces the default [`TracingLogger`].
	pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
		self.logger = Some(logger);

		self
	}

	/// Enables or disables diagnostic logging.
	pub fn debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Sets the API path prefix.
	pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.api_prefix = Some(prefix.into());

		self
	}

	/// Sets the default locale segment.
	pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
		self.default_locale = Some(locale.into());

		self
	}

	/// Validates the base URL and assembles the client.
	pub fn build(self) -> Result<ApiClient> {
		let raw = self.base_url.trim();

		if raw.is_empty() {
			return Err(ConfigError::MissingBaseUrl.into());
		}

		let base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let token_endpoint = TokenEndpoint::for_base(&base_url)?;
		#[cfg(feature = "reqwest")]
		let default_fetch =
			ReqwestFetch::with_client(ReqwestClient::builder().build().map_err(ConfigError::from)?);

		Ok(ApiClient {
			base_url,
			api_prefix: self.api_prefix,
			default_locale: self.default_locale,
			authentication: self.authentication,
			token_endpoint,
			custom_fetch: self.custom_fetch,
			#[cfg(feature = "reqwest")]
			default_fetch,
			cache: self.cache,
			logger: self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
			debug: self.debug,
			token: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
		})
	}
}
impl Debug for ApiClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClientBuilder")
			.field("base_url", &self.base_url)
			.field("authentication", &self.authentication.scheme())
			.field("debug", &self.debug)
			.finish()
	}
}

/// Appends `segments` to the path of `base`, dropping a trailing empty segment first.
pub(crate) fn append_path<'a>(
	base: &Url,
	segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.path_segments_mut()
		.map_err(|_| ConfigError::UnsupportedBaseUrl { url: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}
