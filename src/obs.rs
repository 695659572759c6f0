//! Logging collaborator plus optional tracing spans and metrics for client requests.
//!
//! # Feature Flags
//!
//! - `tracing` (default) routes the default [`TracingLogger`] through `tracing` and wraps
//!   caller requests and token exchanges in a `docapi_client.request` span carrying the
//!   `stage` and `target` fields.
//! - `metrics` counts each request under `docapi_client_request_total`, split by `stage` and
//!   `outcome`.

mod logger;
mod metrics;
mod tracing;

pub use self::{logger::*, metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Where in the client a request originates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestStage {
	/// A request passed to [`ApiClient::fetch`](crate::ApiClient::fetch).
	Request,
	/// The token endpoint call made while resolving OAuth authorization.
	Token,
}
impl RequestStage {
	/// Label used for the `stage` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestStage::Request => "request",
			RequestStage::Token => "token",
		}
	}
}
impl Display for RequestStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How far a request got.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The request was started.
	Attempt,
	/// A response came back (any status for caller requests, 2xx plus a usable token for
	/// exchanges).
	Success,
	/// The request ended in an error.
	Failure,
}
impl Outcome {
	/// Classifies a finished request.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}

	/// Label used for the `outcome` metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
