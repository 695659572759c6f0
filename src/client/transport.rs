//! Transport wrapper: the single boundary that turns every failure into a [`RequestOutcome`].

// self
use crate::{
	_prelude::*,
	ApiClient,
	fetch::{FetchResponse, RequestInit},
	obs::{self, LogLevel, Outcome, RequestSpan, RequestStage},
};

const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Result of a transport attempt: a response or a normalized error, never both.
pub type RequestOutcome = std::result::Result<FetchResponse, FetchError>;

/// Broad classification of a captured failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
	/// Missing or malformed client configuration.
	Configuration,
	/// Token endpoint rejected the credentials or answered unusably.
	Authentication,
	/// The fetch implementation failed.
	Transport,
	/// Any other client failure.
	Other,
}
impl FetchErrorKind {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchErrorKind::Configuration => "configuration",
			FetchErrorKind::Authentication => "authentication",
			FetchErrorKind::Transport => "transport",
			FetchErrorKind::Other => "other",
		}
	}
}

/// Uniform error captured by [`ApiClient::fetch`]; its message is never empty.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct FetchError {
	kind: FetchErrorKind,
	message: String,
	#[source]
	source: Error,
}
impl FetchError {
	/// Failure classification.
	pub fn kind(&self) -> FetchErrorKind {
		self.kind
	}

	/// Human-readable message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Borrows the underlying client error.
	pub fn error(&self) -> &Error {
		&self.source
	}

	/// Returns the underlying client error.
	pub fn into_inner(self) -> Error {
		self.source
	}
}
impl From<Error> for FetchError {
	fn from(source: Error) -> Self {
		let kind = match &source {
			Error::Config(_) => FetchErrorKind::Configuration,
			Error::Authentication(_) => FetchErrorKind::Authentication,
			Error::Transport(_) => FetchErrorKind::Transport,
			_ => FetchErrorKind::Other,
		};
		let message = source.to_string();
		let message =
			if message.trim().is_empty() { UNKNOWN_ERROR_MESSAGE.to_owned() } else { message };

		Self { kind, message, source }
	}
}

impl ApiClient {
	/// Executes `init` against `input` through the selected fetch implementation.
	///
	/// Unless the request omits credentials, the authorization header is resolved first
	/// (possibly exchanging an OAuth token). Configuration, authentication, and transport
	/// failures are all captured into the returned [`FetchError`] and logged at
	/// [`LogLevel::Error`] when debug mode is on. Non-2xx responses are successes here.
	/// Nothing is retried.
	pub async fn fetch(&self, input: Url, init: RequestInit) -> RequestOutcome {
		const STAGE: RequestStage = RequestStage::Request;

		let omit_credentials = init.omits_credentials();

		if omit_credentials {
			self.debug_log(LogLevel::Verbose, || {
				format!("Disabling authentication for request to {input}.")
			});
		}

		let span = RequestSpan::new(STAGE, input.as_str());

		obs::record_outcome(STAGE, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let init =
					if omit_credentials { init } else { self.resolve_authorization(init).await? };
				let fetch = self.fetcher()?;

				fetch.fetch(input, init).await.map_err(Error::from)
			})
			.await;

		match result {
			Ok(response) => {
				obs::record_outcome(STAGE, Outcome::Success);

				Ok(response)
			},
			Err(error) => {
				obs::record_outcome(STAGE, Outcome::Failure);

				let error = FetchError::from(error);

				self.debug_log(LogLevel::Error, || error.message().to_owned());

				Err(error)
			},
		}
	}
}
