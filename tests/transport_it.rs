mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use docapi_client::{
	ApiClient,
	auth::{AuthenticationConfig, OAuthCredentials},
	client::FetchErrorKind,
	error::{ConfigError, Error, TransportError},
	fetch::{Fetch, FetchResponse, RequestInit},
	http::StatusCode,
	obs::LogLevel,
	url::Url,
};

fn target() -> Url {
	Url::parse("https://api.example.com/jsonapi").expect("Fixture URL should parse.")
}

fn failing_fetch(error: fn() -> TransportError) -> Arc<dyn Fetch> {
	Arc::new(move |_input: Url, _init: RequestInit| async move {
		Err::<FetchResponse, _>(error())
	})
}

#[tokio::test]
async fn every_transport_failure_is_normalized() {
	let failures: [fn() -> TransportError; 4] = [
		|| TransportError::from("socket hang up"),
		|| TransportError::message(serde_json::json!({ "code": "ECONNRESET" })),
		|| TransportError::from(std::io::Error::other("tls handshake failed")),
		|| TransportError::message(""),
	];

	for failure in failures {
		let client = ApiClient::builder("https://api.example.com")
			.custom_fetch(failing_fetch(failure))
			.build()
			.expect("Client should build.");
		let err = client
			.fetch(target(), RequestInit::get())
			.await
			.expect_err("Transport failures should be captured.");

		assert_eq!(err.kind(), FetchErrorKind::Transport);
		assert!(!err.message().is_empty());
		assert!(matches!(err.error(), Error::Transport(_)));
	}
}

#[tokio::test]
async fn configuration_errors_are_captured_before_fetching() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.path("/oauth/token");
			then.status(200);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.path("/jsonapi");
			then.status(200);
		})
		.await;
	let client = build_client(
		&server,
		AuthenticationConfig::oauth(OAuthCredentials::client_credentials(CLIENT_ID, "")),
	);
	let err = client
		.fetch(
			Url::parse(&server.url("/jsonapi")).expect("Mock URL should parse."),
			RequestInit::get(),
		)
		.await
		.expect_err("Missing client secret should be captured.");

	assert_eq!(err.kind(), FetchErrorKind::Configuration);
	assert!(matches!(err.error(), Error::Config(ConfigError::MissingClientCredentials)));

	token_mock.assert_calls_async(0).await;
	resource_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn non_success_statuses_are_responses() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/jsonapi/missing");
			then.status(404).body("{\"errors\":[]}");
		})
		.await;
	let client = build_client(&server, AuthenticationConfig::None);
	let response = client
		.fetch(
			Url::parse(&server.url("/jsonapi/missing")).expect("Mock URL should parse."),
			RequestInit::get(),
		)
		.await
		.expect("A 404 is a response, not a transport failure.");

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(!response.is_success());

	mock.assert_async().await;
}

#[tokio::test]
async fn debug_mode_logs_captured_errors() {
	let logger = RecordingLogger::shared();
	let client = ApiClient::builder("https://api.example.com")
		.custom_fetch(failing_fetch(|| TransportError::from("connection refused")))
		.logger(logger.clone())
		.debug(true)
		.build()
		.expect("Client should build.");

	client
		.fetch(target(), RequestInit::get().omit_credentials())
		.await
		.expect_err("Failure should be captured.");

	assert_eq!(logger.messages(LogLevel::Error), vec!["connection refused".to_owned()]);
	assert_eq!(logger.messages(LogLevel::Verbose), vec![
		"Disabling authentication for request to https://api.example.com/jsonapi.".to_owned()
	]);
}

#[tokio::test]
async fn silent_without_debug_mode() {
	let logger = RecordingLogger::shared();
	let client = ApiClient::builder("https://api.example.com")
		.authentication(AuthenticationConfig::basic("u", "p"))
		.custom_fetch(failing_fetch(|| TransportError::from("connection refused")))
		.logger(logger.clone())
		.build()
		.expect("Client should build.");

	client.fetch(target(), RequestInit::get()).await.expect_err("Failure should be captured.");

	assert!(logger.messages(LogLevel::Error).is_empty());
	assert!(logger.messages(LogLevel::Verbose).is_empty());
}

#[tokio::test]
async fn custom_fetch_replaces_default_transport() {
	let fetch: Arc<dyn Fetch> = Arc::new(|input: Url, init: RequestInit| async move {
		let authorization = init
			.headers
			.get("authorization")
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default()
			.to_owned();

		Ok::<_, TransportError>(FetchResponse::new(
			StatusCode::OK,
			format!("{} {authorization}", input.path()),
		))
	});
	let client = ApiClient::builder("https://api.example.com")
		.authentication(AuthenticationConfig::custom("Token xyz"))
		.custom_fetch(fetch)
		.build()
		.expect("Client should build.");
	let response =
		client.fetch(target(), RequestInit::get()).await.expect("Custom fetch should respond.");

	assert_eq!(response.body, b"/jsonapi Token xyz".to_vec());
}
