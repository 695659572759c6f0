//! Client-level error types shared across authorization, transport, and cache layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Decoding failure that records the JSON path where deserialization stopped.
pub type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint refused or garbled the credential exchange.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Transport failure surfaced by the fetch implementation.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Cache collaborator failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),

	/// Resource endpoint answered with a non-success status.
	#[error("Request failed with HTTP status {status}.")]
	Status {
		/// HTTP status code returned by the resource endpoint.
		status: u16,
	},
	/// Resource payload could not be decoded.
	#[error("Response payload could not be decoded.")]
	Payload(#[source] JsonPathError),
}

/// Configuration and validation failures raised before any network access.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No base URL was supplied.
	#[error("A base URL is required.")]
	MissingBaseUrl,
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parses but cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{url}` cannot be used as a base for API paths.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Basic authentication is missing the named field.
	#[error("credentials.{field} is missing on the Basic authentication option.")]
	MissingBasicCredentials {
		/// Credential field name.
		field: &'static str,
	},
	/// OAuth authentication lacks the client identifier or secret.
	#[error(
		"credentials.clientId or credentials.clientSecret is missing on the authentication option."
	)]
	MissingClientCredentials,
	/// The password grant lacks the resource owner's username or password.
	#[error(
		"credentials.username or credentials.password is missing on the authentication option."
	)]
	MissingResourceOwnerCredentials,
	/// Credential material cannot be carried in an HTTP header.
	#[error("Authorization value is not a valid HTTP header value.")]
	InvalidHeaderValue {
		/// Underlying header validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No custom fetch was supplied and no default transport is compiled in.
	#[error("No fetch implementation is available; supply a custom fetch.")]
	NoFetchImplementation,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<http::header::InvalidHeaderValue> for ConfigError {
	fn from(source: http::header::InvalidHeaderValue) -> Self {
		Self::InvalidHeaderValue { source }
	}
}

/// Failures produced while exchanging credentials at the token endpoint.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint answered with a non-success status.
	#[error("Could not authenticate with the provided credentials.")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code returned alongside the body.
		status: u16,
	},
	/// Token endpoint returned an `expires_in` that is not finite or overflows the clock.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

/// Transport-level failures (network, IO, or anything a custom fetch reports).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while executing the request: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while executing the request: {0}")]
	Io(#[from] std::io::Error),
	/// Free-form failure reported by a custom fetch implementation.
	#[error("{0}")]
	Message(String),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Captures an arbitrary displayable failure value.
	pub fn message(value: impl Display) -> Self {
		Self::Message(value.to_string())
	}
}
impl From<String> for TransportError {
	fn from(value: String) -> Self {
		Self::Message(value)
	}
}
impl From<&str> for TransportError {
	fn from(value: &str) -> Self {
		Self::Message(value.to_owned())
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
