//! Diagnostics for token issuance.
//!
//! # Feature Flags
//!
//! - `tracing` (default) wraps each issuance in an `service_token.issue` span carrying the
//!   `auth_type` and `request_id` fields, and emits a `warn` event for every rejection.
//! - `metrics` increments the `service_token_issue_total` counter for every
//!   attempt/success/failure, labeled by `auth_type` + `outcome`.
//!
//! Nothing in this module feeds back into issuance decisions.

mod metrics;
mod span;

pub use metrics::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Per-call diagnostic handle threaded through issuance.
#[derive(Clone, Debug, Default)]
pub struct LogContext {
	/// Correlation identifier of the originating request.
	pub request_id: Option<String>,
	#[cfg(feature = "tracing")]
	parent: Option<tracing::Span>,
}
impl LogContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a request correlation identifier.
	pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
		self.request_id = Some(request_id.into());

		self
	}

	/// Parents issuance spans under `span` instead of the current span.
	#[cfg(feature = "tracing")]
	pub fn with_parent(mut self, span: tracing::Span) -> Self {
		self.parent = Some(span);

		self
	}

	#[cfg(feature = "tracing")]
	pub(crate) fn parent(&self) -> Option<&tracing::Span> {
		self.parent.as_ref()
	}
}

/// Outcome labels recorded for each issuance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueOutcome {
	/// Entry to the issuance path.
	Attempt,
	/// A signed token was returned.
	Success,
	/// An error was returned.
	Failure,
}
impl IssueOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			IssueOutcome::Attempt => "attempt",
			IssueOutcome::Success => "success",
			IssueOutcome::Failure => "failure",
		}
	}
}
impl Display for IssueOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
