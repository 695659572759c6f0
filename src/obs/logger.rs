// self
use crate::_prelude::*;

/// Severity levels understood by [`Logger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	/// Failures surfaced to the caller.
	Error,
	/// Recoverable anomalies.
	Warn,
	/// High-level progress.
	Info,
	/// Per-request detail such as cache lookups.
	Verbose,
	/// Diagnostic detail such as token refreshes.
	Debug,
}
impl LogLevel {
	/// Returns a stable lowercase label.
	pub const fn as_str(self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Verbose => "verbose",
			LogLevel::Debug => "debug",
		}
	}
}
impl Display for LogLevel {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Logging collaborator with one method per severity.
///
/// Every method defaults to a no-op, so an implementation only overrides the levels it
/// cares about and messages for the remaining levels are dropped.
pub trait Logger
where
	Self: Send + Sync,
{
	/// Logs at [`LogLevel::Error`].
	fn error(&self, message: &str) {
		let _ = message;
	}

	/// Logs at [`LogLevel::Warn`].
	fn warn(&self, message: &str) {
		let _ = message;
	}

	/// Logs at [`LogLevel::Info`].
	fn info(&self, message: &str) {
		let _ = message;
	}

	/// Logs at [`LogLevel::Verbose`].
	fn verbose(&self, message: &str) {
		let _ = message;
	}

	/// Logs at [`LogLevel::Debug`].
	fn debug(&self, message: &str) {
		let _ = message;
	}

	/// Dispatches `message` to the method matching `level`.
	fn log(&self, level: LogLevel, message: &str) {
		match level {
			LogLevel::Error => self.error(message),
			LogLevel::Warn => self.warn(message),
			LogLevel::Info => self.info(message),
			LogLevel::Verbose => self.verbose(message),
			LogLevel::Debug => self.debug(message),
		}
	}
}

/// Default logger forwarding to `tracing` (no-op without the `tracing` feature).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;
#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
	fn error(&self, message: &str) {
		tracing::error!(target: "docapi_client", "{message}");
	}

	fn warn(&self, message: &str) {
		tracing::warn!(target: "docapi_client", "{message}");
	}

	fn info(&self, message: &str) {
		tracing::info!(target: "docapi_client", "{message}");
	}

	fn verbose(&self, message: &str) {
		tracing::trace!(target: "docapi_client", "{message}");
	}

	fn debug(&self, message: &str) {
		tracing::debug!(target: "docapi_client", "{message}");
	}
}
#[cfg(not(feature = "tracing"))]
impl Logger for TracingLogger {}
