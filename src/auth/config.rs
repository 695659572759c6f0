//! Authentication scheme configuration and per-scheme credential validation.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use http::HeaderValue;
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Authentication scheme applied to outgoing requests.
///
/// Deserializes from the `{ "type": "...", "credentials": { ... } }` shape used by client
/// configuration files, e.g. `{"type":"Basic","credentials":{"username":"u","password":"p"}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "credentials")]
pub enum AuthenticationConfig {
	/// Never attach an authorization header.
	#[default]
	None,
	/// HTTP Basic authentication.
	Basic(BasicCredentials),
	/// OAuth 2.0 bearer tokens fetched from `<baseUrl>/oauth/token`.
	OAuth(OAuthCredentials),
	/// Caller-supplied literal header value.
	Custom(CustomCredentials),
}
impl AuthenticationConfig {
	/// Configures HTTP Basic authentication.
	pub fn basic(username: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self::Basic(BasicCredentials { username: username.into(), password: password.into() })
	}

	/// Configures OAuth with the provided credentials.
	pub fn oauth(credentials: OAuthCredentials) -> Self {
		Self::OAuth(credentials)
	}

	/// Configures a literal `Authorization` value.
	pub fn custom(value: impl Into<Secret>) -> Self {
		Self::Custom(CustomCredentials { value: value.into() })
	}

	/// Returns a stable label for the active scheme.
	pub const fn scheme(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Basic(_) => "basic",
			Self::OAuth(_) => "oauth",
			Self::Custom(_) => "custom",
		}
	}
}

/// Username and password for HTTP Basic authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredentials {
	/// Account name.
	#[serde(default)]
	pub username: String,
	/// Account password.
	#[serde(default)]
	pub password: Secret,
}
impl BasicCredentials {
	/// Fails when either field is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.username.is_empty() {
			return Err(ConfigError::MissingBasicCredentials { field: "username" });
		}
		if self.password.is_empty() {
			return Err(ConfigError::MissingBasicCredentials { field: "password" });
		}

		Ok(())
	}

	/// Encodes `username:password` into a `Basic` header value.
	pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
		self.validate()?;

		let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password.expose()));

		sensitive_header(format!("Basic {encoded}"))
	}
}

/// OAuth 2.0 grant used to obtain access tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Client Credentials grant for app-only tokens.
	#[default]
	ClientCredentials,
	/// Resource Owner Password Credentials grant.
	Password,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "client_credentials",
			GrantType::Password => "password",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Credentials presented to the OAuth token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCredentials {
	/// Grant to request; `client_credentials` unless configured otherwise.
	#[serde(default)]
	pub grant_type: GrantType,
	/// OAuth client identifier.
	#[serde(default)]
	pub client_id: String,
	/// OAuth client secret.
	#[serde(default)]
	pub client_secret: Secret,
	/// Resource owner username; password grant only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Resource owner password; password grant only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password: Option<Secret>,
}
impl OAuthCredentials {
	/// Credentials for the `client_credentials` grant.
	pub fn client_credentials(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
	) -> Self {
		Self {
			grant_type: GrantType::ClientCredentials,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			username: None,
			password: None,
		}
	}

	/// Credentials for the `password` grant.
	pub fn password(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		username: impl Into<String>,
		password: impl Into<Secret>,
	) -> Self {
		Self {
			grant_type: GrantType::Password,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			username: Some(username.into()),
			password: Some(password.into()),
		}
	}

	/// Checks that every field required by the configured grant is present.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() || self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientCredentials);
		}
		if matches!(self.grant_type, GrantType::Password) {
			let username = self.username.as_deref().unwrap_or_default();
			let password = self.password.as_ref().map(Secret::expose).unwrap_or_default();

			if username.is_empty() || password.is_empty() {
				return Err(ConfigError::MissingResourceOwnerCredentials);
			}
		}

		Ok(())
	}
}

/// Literal authorization value supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCredentials {
	/// Header value sent verbatim.
	pub value: Secret,
}
impl CustomCredentials {
	/// Returns the configured value as a header.
	pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
		sensitive_header(self.value.expose())
	}
}

pub(crate) fn sensitive_header(value: impl AsRef<str>) -> Result<HeaderValue, ConfigError> {
	let mut header = HeaderValue::from_str(value.as_ref())?;

	header.set_sensitive(true);

	Ok(header)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_header_is_deterministic() {
		let credentials = BasicCredentials {
			username: "testUser".into(),
			password: Secret::new("testPassword"),
		};
		let first = credentials.header_value().expect("Basic credentials should encode.");
		let second = credentials.header_value().expect("Basic credentials should encode twice.");

		assert_eq!(first, "Basic dGVzdFVzZXI6dGVzdFBhc3N3b3Jk");
		assert_eq!(first, second);
		assert!(first.is_sensitive());
	}

	#[test]
	fn basic_rejects_empty_fields() {
		let err = BasicCredentials { username: String::new(), password: "p".into() }
			.header_value()
			.expect_err("Empty username should be rejected.");

		assert!(matches!(err, ConfigError::MissingBasicCredentials { field: "username" }));

		let err = BasicCredentials { username: "u".into(), password: Secret::default() }
			.validate()
			.expect_err("Empty password should be rejected.");

		assert!(matches!(err, ConfigError::MissingBasicCredentials { field: "password" }));
	}

	#[test]
	fn oauth_validation_depends_on_grant() {
		assert!(OAuthCredentials::client_credentials("id", "secret").validate().is_ok());
		assert!(OAuthCredentials::password("id", "secret", "editor", "pw").validate().is_ok());
		assert!(matches!(
			OAuthCredentials::client_credentials("", "secret").validate(),
			Err(ConfigError::MissingClientCredentials)
		));
		assert!(matches!(
			OAuthCredentials::client_credentials("id", "").validate(),
			Err(ConfigError::MissingClientCredentials)
		));

		let missing_owner = OAuthCredentials {
			grant_type: GrantType::Password,
			..OAuthCredentials::client_credentials("id", "secret")
		};

		assert!(matches!(
			missing_owner.validate(),
			Err(ConfigError::MissingResourceOwnerCredentials)
		));

		let empty_password = OAuthCredentials::password("id", "secret", "editor", "");

		assert!(matches!(
			empty_password.validate(),
			Err(ConfigError::MissingResourceOwnerCredentials)
		));
	}

	#[test]
	fn custom_value_is_passed_verbatim() {
		let header = CustomCredentials { value: "Token abc.def".into() }
			.header_value()
			.expect("Printable values should be accepted.");

		assert_eq!(header, "Token abc.def");

		let err = CustomCredentials { value: "line\nbreak".into() }
			.header_value()
			.expect_err("Control characters cannot be carried in a header.");

		assert!(matches!(err, ConfigError::InvalidHeaderValue { .. }));
	}

	#[test]
	fn config_deserializes_tagged_shape() {
		let oauth: AuthenticationConfig = serde_json::from_str(
			r#"{"type":"OAuth","credentials":{"clientId":"cid","clientSecret":"cs"}}"#,
		)
		.expect("OAuth configuration should deserialize.");

		assert_eq!(
			oauth,
			AuthenticationConfig::oauth(OAuthCredentials::client_credentials("cid", "cs"))
		);
		assert_eq!(oauth.scheme(), "oauth");

		let password: AuthenticationConfig = serde_json::from_str(
			r#"{"type":"OAuth","credentials":{"grantType":"password","clientId":"cid","clientSecret":"cs","username":"u","password":"p"}}"#,
		)
		.expect("Password grant configuration should deserialize.");

		assert_eq!(
			password,
			AuthenticationConfig::oauth(OAuthCredentials::password("cid", "cs", "u", "p"))
		);

		let custom: AuthenticationConfig =
			serde_json::from_str(r#"{"type":"Custom","credentials":{"value":"Bearer xyz"}}"#)
				.expect("Custom configuration should deserialize.");

		assert_eq!(custom, AuthenticationConfig::custom("Bearer xyz"));

		let none: AuthenticationConfig =
			serde_json::from_str(r#"{"type":"None"}"#).expect("None should deserialize.");

		assert_eq!(none, AuthenticationConfig::None);
	}
}
