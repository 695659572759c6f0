//! In-memory OAuth token state and its reuse window.

// crates.io
use http::HeaderValue;
// self
use crate::{
	_prelude::*,
	auth::{Secret, config::sensitive_header},
	error::ConfigError,
};

/// Access token issued by the token endpoint, replaced wholesale on every refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenState {
	access_token: Secret,
	token_type: String,
	valid_until: OffsetDateTime,
}
impl TokenState {
	/// Remaining lifetime below which a token is no longer reused.
	pub const SAFETY_MARGIN: Duration = Duration::seconds(10);

	/// Creates a token state from its parts.
	pub fn new(
		access_token: impl Into<Secret>,
		token_type: impl Into<String>,
		valid_until: OffsetDateTime,
	) -> Self {
		Self { access_token: access_token.into(), token_type: token_type.into(), valid_until }
	}

	/// Opaque access token.
	pub fn access_token(&self) -> &Secret {
		&self.access_token
	}

	/// Token type as returned by the endpoint (e.g. `Bearer`).
	pub fn token_type(&self) -> &str {
		&self.token_type
	}

	/// Absolute expiry instant.
	pub fn valid_until(&self) -> OffsetDateTime {
		self.valid_until
	}

	/// Returns `true` if more than [`Self::SAFETY_MARGIN`] remains before expiry at `now`.
	pub fn is_usable_at(&self, now: OffsetDateTime) -> bool {
		self.valid_until - now > Self::SAFETY_MARGIN
	}

	/// Checks [`Self::is_usable_at`] against the current UTC instant.
	pub fn is_usable(&self) -> bool {
		self.is_usable_at(OffsetDateTime::now_utc())
	}

	/// Renders `<token_type> <access_token>` as a sensitive header value.
	pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
		sensitive_header(format!("{} {}", self.token_type, self.access_token.expose()))
	}
}
impl Debug for TokenState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenState")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("valid_until", &self.valid_until)
			.finish()
	}
}
