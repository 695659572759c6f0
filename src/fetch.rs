//! Fetch collaborator contract and the default reqwest-backed transport.
//!
//! The client never talks to the network directly. Every outbound request, including the
//! OAuth token exchange, goes through a [`Fetch`] implementation: either the one supplied via
//! [`ApiClientBuilder::custom_fetch`](crate::ApiClientBuilder::custom_fetch) or, with the
//! `reqwest` feature, [`ReqwestFetch`]. Implementations resolve with a [`FetchResponse`] for
//! every HTTP status (non-2xx included) and fail only on transport-level problems.

// crates.io
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`Fetch::fetch`].
pub type FetchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<FetchResponse, TransportError>> + 'a + Send>>;

/// Transport capable of executing a single HTTP request.
///
/// Closures of shape `Fn(Url, RequestInit) -> impl Future<Output = Result<FetchResponse,
/// TransportError>>` implement the trait directly, which keeps test doubles and thin wrappers
/// around other HTTP stacks to a few lines.
pub trait Fetch
where
	Self: Send + Sync,
{
	/// Executes `init` against `input`.
	fn fetch(&self, input: Url, init: RequestInit) -> FetchFuture<'_>;
}
impl<F, Fut> Fetch for F
where
	F: Send + Sync + Fn(Url, RequestInit) -> Fut,
	Fut: 'static + Send + Future<Output = Result<FetchResponse, TransportError>>,
{
	fn fetch(&self, input: Url, init: RequestInit) -> FetchFuture<'_> {
		Box::pin(self(input, init))
	}
}

/// Whether the client may attach credentials to a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Credentials {
	/// Resolve and attach the configured authorization header.
	#[default]
	Include,
	/// Send the request exactly as given, without authorization.
	Omit,
}

/// Request options handed to the transport.
#[derive(Clone, Debug, Default)]
pub struct RequestInit {
	/// HTTP method; defaults to `GET`.
	pub method: Method,
	/// Request headers.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
	/// Credential attachment mode.
	pub credentials: Credentials,
}
impl RequestInit {
	/// Creates `GET` options.
	pub fn get() -> Self {
		Self::default()
	}

	/// Creates `POST` options carrying `body`.
	pub fn post(body: impl Into<Vec<u8>>) -> Self {
		Self { method: Method::POST, body: Some(body.into()), ..Self::default() }
	}

	/// Sets or replaces a header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Opts this request out of credential attachment.
	pub fn omit_credentials(mut self) -> Self {
		self.credentials = Credentials::Omit;

		self
	}

	/// Returns `true` when the request opted out of credential attachment.
	pub fn omits_credentials(&self) -> bool {
		matches!(self.credentials, Credentials::Omit)
	}
}

/// Fully buffered HTTP response.
#[derive(Clone, Debug)]
pub struct FetchResponse {
	/// Response status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl FetchResponse {
	/// Creates a response with empty headers.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Decodes the body as JSON, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T, crate::error::JsonPathError>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
	}
}

/// Default transport backed by [`ReqwestClient`].
///
/// Redirects follow the wrapped client's policy; token endpoints are expected to answer
/// directly.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetch(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestFetch {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Fetch for ReqwestFetch {
	fn fetch(&self, input: Url, init: RequestInit) -> FetchFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut request = client.request(init.method, input).headers(init.headers);

			if let Some(body) = init.body {
				request = request.body(body);
			}

			let response = request.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(FetchResponse { status, headers, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::header::ACCEPT;
	// self
	use super::*;

	#[derive(Debug, Deserialize, PartialEq)]
	struct Article {
		title: String,
	}

	#[test]
	fn request_init_builders_compose() {
		let init = RequestInit::post("a=b")
			.header(ACCEPT, HeaderValue::from_static("application/json"))
			.omit_credentials();

		assert_eq!(init.method, Method::POST);
		assert_eq!(init.body.as_deref(), Some(b"a=b".as_slice()));
		assert_eq!(
			init.headers.get(ACCEPT).map(|value| value.as_bytes()),
			Some(b"application/json".as_slice())
		);
		assert!(init.omits_credentials());
		assert!(!RequestInit::get().omits_credentials());
	}

	#[test]
	fn json_reports_failing_path() {
		let ok = FetchResponse::new(StatusCode::OK, r#"{"title":"Recipes"}"#);

		assert_eq!(ok.json::<Article>().expect("Valid payload should decode."), Article {
			title: "Recipes".into()
		});

		let bad = FetchResponse::new(StatusCode::OK, r#"{"title":7}"#);
		let err = bad.json::<Article>().expect_err("Mistyped payload should fail to decode.");

		assert_eq!(err.path().to_string(), "title");
	}

	#[tokio::test]
	async fn closures_implement_fetch() {
		let fetch = |input: Url, init: RequestInit| async move {
			assert_eq!(input.path(), "/ping");
			assert_eq!(init.method, Method::GET);

			Ok::<_, TransportError>(FetchResponse::new(StatusCode::NO_CONTENT, Vec::new()))
		};
		let response = Fetch::fetch(
			&fetch,
			Url::parse("https://example.com/ping").expect("Fixture URL should parse."),
			RequestInit::get(),
		)
		.await
		.expect("Closure fetch should succeed.");

		assert_eq!(response.status, StatusCode::NO_CONTENT);
		assert!(response.is_success());
	}
}
