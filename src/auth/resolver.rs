//! Authorization resolver: computes the `Authorization` header for outgoing requests.
//!
//! Basic and custom schemes are pure header computations. OAuth reuses the cached
//! [`TokenState`] while more than [`TokenState::SAFETY_MARGIN`] remains before expiry and
//! otherwise fetches a new token lazily; there is no background refresh. Refreshes on one
//! client are single-flight: concurrent callers queue on an async guard and re-check the
//! token once they hold it, so a burst of requests after expiry costs one token exchange.

// crates.io
use http::{HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	ApiClient,
	auth::{AuthenticationConfig, OAuthCredentials, TokenState},
	fetch::RequestInit,
	obs::LogLevel,
};

impl ApiClient {
	/// Returns `init` with the configured authorization header attached.
	///
	/// Requests that omit credentials, and clients without an authentication scheme, get
	/// `init` back untouched. OAuth may perform a token exchange; its failures, like missing
	/// credential fields, are returned before the caller's request is sent.
	pub async fn resolve_authorization(&self, mut init: RequestInit) -> Result<RequestInit> {
		if init.omits_credentials() {
			self.debug_log(LogLevel::Verbose, || {
				"Credentials are omitted for this request. Skipping authorization header.".into()
			});

			return Ok(init);
		}

		let value = match &self.authentication {
			AuthenticationConfig::None => {
				self.debug_log(LogLevel::Debug, || {
					"No authentication scheme is configured. Skipping authorization header.".into()
				});

				return Ok(init);
			},
			AuthenticationConfig::Basic(credentials) => credentials.header_value()?,
			AuthenticationConfig::Custom(credentials) => credentials.header_value()?,
			AuthenticationConfig::OAuth(credentials) => self.oauth_header_value(credentials).await?,
		};

		init.headers.insert(AUTHORIZATION, value);

		Ok(init)
	}

	async fn oauth_header_value(&self, credentials: &OAuthCredentials) -> Result<HeaderValue> {
		credentials.validate()?;

		if let Some(token) = self.usable_token() {
			return Ok(token.header_value()?);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited.
		if let Some(token) = self.usable_token() {
			return Ok(token.header_value()?);
		}

		self.debug_log(LogLevel::Debug, || {
			"OAuth token is missing or expired. Fetching a new one.".into()
		});

		let token = self.token_endpoint.exchange(self.fetcher()?, credentials).await?;
		let header = token.header_value()?;

		*self.token.write() = Some(token);

		Ok(header)
	}

	fn usable_token(&self) -> Option<TokenState> {
		let now = OffsetDateTime::now_utc();

		self.token.read().as_ref().filter(|token| token.is_usable_at(now)).cloned()
	}
}
