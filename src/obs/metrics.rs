// self
use crate::obs::{Outcome, RequestStage};

/// Counter incremented once per stage transition of a request.
pub const REQUEST_COUNTER: &str = "docapi_client_request_total";

/// Counts `outcome` for `stage` on the installed metrics recorder.
///
/// Without the `metrics` feature this compiles to nothing.
pub fn record_outcome(stage: RequestStage, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(REQUEST_COUNTER, "stage" => stage.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}
