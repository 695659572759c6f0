//! OAuth token endpoint exchange.
//!
//! Tokens are requested with a form-encoded `POST` to `<baseUrl>/oauth/token` through the
//! client's [`Fetch`] implementation directly, so the exchange never re-enters the
//! authorization resolver. Any non-2xx answer is an [`AuthenticationError::Rejected`]; the
//! caller's token state is only replaced once a complete [`TokenState`] has been built.

// crates.io
use http::{
	HeaderValue,
	header::{ACCEPT, CONTENT_TYPE},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{GrantType, OAuthCredentials, TokenState},
	client::append_path,
	error::{AuthenticationError, ConfigError},
	fetch::{Fetch, FetchResponse, RequestInit},
	obs::{self, Outcome, RequestSpan, RequestStage},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	access_token: String,
	expires_in: f64,
	token_type: String,
}

/// Token endpoint rooted at a client's base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEndpoint {
	url: Url,
}
impl TokenEndpoint {
	/// Derives `<base>/oauth/token`, keeping any path the base already carries.
	pub fn for_base(base: &Url) -> Result<Self, ConfigError> {
		Ok(Self { url: append_path(base, ["oauth", "token"])? })
	}

	/// Absolute endpoint URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Exchanges `credentials` for a fresh [`TokenState`].
	///
	/// Credentials are validated before any request is issued.
	pub async fn exchange(
		&self,
		fetch: &dyn Fetch,
		credentials: &OAuthCredentials,
	) -> Result<TokenState> {
		const STAGE: RequestStage = RequestStage::Token;

		credentials.validate()?;

		let span = RequestSpan::new(STAGE, self.url.as_str());

		obs::record_outcome(STAGE, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let init = RequestInit::post(token_request_form(credentials))
					.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
					.header(ACCEPT, HeaderValue::from_static("application/json"))
					.omit_credentials();
				let response = fetch.fetch(self.url.clone(), init).await?;

				if !response.is_success() {
					return Err(
						AuthenticationError::Rejected { status: response.status.as_u16() }.into()
					);
				}

				map_token_response(&response, OffsetDateTime::now_utc())
			})
			.await;

		obs::record_outcome(STAGE, Outcome::of(&result));

		result
	}
}

/// Encodes the grant parameters; resource owner fields are only sent for the password grant.
fn token_request_form(credentials: &OAuthCredentials) -> String {
	let mut form = form_urlencoded::Serializer::new(String::new());

	form.append_pair("grant_type", credentials.grant_type.as_str())
		.append_pair("client_id", &credentials.client_id)
		.append_pair("client_secret", credentials.client_secret.expose());

	if matches!(credentials.grant_type, GrantType::Password) {
		if let Some(username) = &credentials.username {
			form.append_pair("username", username);
		}
		if let Some(password) = &credentials.password {
			form.append_pair("password", password.expose());
		}
	}

	form.finish()
}

fn map_token_response(response: &FetchResponse, now: OffsetDateTime) -> Result<TokenState> {
	let status = response.status.as_u16();
	let body = response
		.json::<TokenEndpointResponse>()
		.map_err(|source| AuthenticationError::MalformedResponse { source, status })?;

	// Non-positive lifetimes still yield a token that is never reused.
	let valid_until = Duration::checked_seconds_f64(body.expires_in)
		.and_then(|lifetime| now.checked_add(lifetime))
		.ok_or(AuthenticationError::ExpiresInOutOfRange)?;

	Ok(TokenState::new(body.access_token, body.token_type, valid_until))
}
