//! Demonstrates an OAuth client-credentials client against a mock API: the first request
//! exchanges a token, the second reuses it.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use docapi_client::{
	ApiClient,
	auth::{AuthenticationConfig, OAuthCredentials},
	fetch::RequestInit,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/jsonapi/node/recipe")
				.header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/vnd.api+json")
				.body("{\"data\":[]}");
		})
		.await;
	let client = ApiClient::builder(server.base_url())
		.api_prefix("jsonapi")
		.authentication(AuthenticationConfig::oauth(OAuthCredentials::client_credentials(
			"demo-client",
			"super-secret",
		)))
		.build()?;
	let url = client.endpoint("node/recipe", None)?;

	for _ in 0..2 {
		let response = client.fetch(url.clone(), RequestInit::get()).await?;

		println!("Fetched {url} with status {}.", response.status);
	}

	if let Some(token) = client.token() {
		println!("Reusable access token valid until {}.", token.valid_until());
	}

	token_mock.assert_async().await;
	resource_mock.assert_calls_async(2).await;

	Ok(())
}
