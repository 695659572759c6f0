//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use httpmock::MockServer;
use parking_lot::Mutex;
use serde_json::Value;
// self
use docapi_client::{
	ApiClient,
	auth::AuthenticationConfig,
	cache::{Cache, CacheFuture},
	obs::{LogLevel, Logger},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

/// Builds a client rooted at the mock server using the default reqwest transport.
pub fn build_client(server: &MockServer, authentication: AuthenticationConfig) -> ApiClient {
	ApiClient::builder(server.base_url())
		.authentication(authentication)
		.build()
		.expect("Client should build against the mock server.")
}

/// Token endpoint body returned by the mock provider.
pub fn token_body(access_token: &str, expires_in: i64) -> String {
	format!(
		"{{\"access_token\":\"{access_token}\",\"expires_in\":{expires_in},\"token_type\":\"Bearer\"}}"
	)
}

/// In-memory cache that counts collaborator calls.
#[derive(Default)]
pub struct CountingCache {
	entries: Mutex<HashMap<String, Value>>,
	pub gets: AtomicUsize,
	pub sets: AtomicUsize,
}
impl CountingCache {
	pub fn gets(&self) -> usize {
		self.gets.load(Ordering::SeqCst)
	}

	pub fn sets(&self) -> usize {
		self.sets.load(Ordering::SeqCst)
	}

	pub fn entry(&self, key: &str) -> Option<Value> {
		self.entries.lock().get(key).cloned()
	}
}
impl Cache for CountingCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Value>> {
		self.gets.fetch_add(1, Ordering::SeqCst);

		let value = self.entries.lock().get(key).cloned();

		Box::pin(async move { Ok(value) })
	}

	fn set<'a>(&'a self, key: &'a str, value: Value) -> CacheFuture<'a, ()> {
		self.sets.fetch_add(1, Ordering::SeqCst);
		self.entries.lock().insert(key.to_owned(), value);

		Box::pin(async { Ok(()) })
	}
}

/// Logger that records every message it receives, tagged with its level.
#[derive(Default)]
pub struct RecordingLogger(Mutex<Vec<(LogLevel, String)>>);
impl RecordingLogger {
	pub fn shared() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn messages(&self, level: LogLevel) -> Vec<String> {
		self.0
			.lock()
			.iter()
			.filter(|(recorded, _)| *recorded == level)
			.map(|(_, message)| message.clone())
			.collect()
	}
}
impl Logger for RecordingLogger {
	fn error(&self, message: &str) {
		self.0.lock().push((LogLevel::Error, message.to_owned()));
	}

	fn verbose(&self, message: &str) {
		self.0.lock().push((LogLevel::Verbose, message.to_owned()));
	}

	fn debug(&self, message: &str) {
		self.0.lock().push((LogLevel::Debug, message.to_owned()));
	}
}
