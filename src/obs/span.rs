// self
use crate::{_prelude::*, auth::AuthType, key::KeyIdentifier, obs::LogContext};

/// Span wrapping a single issuance.
#[derive(Clone, Debug)]
pub struct IssueSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl IssueSpan {
	/// Creates a span tagged with the credential kind and the context's request id.
	pub fn new(auth_type: AuthType, ctx: &LogContext) -> Self {
		#[cfg(feature = "tracing")]
		{
			let request_id = ctx.request_id.as_deref().unwrap_or_default();
			let span = match ctx.parent() {
				Some(parent) => tracing::info_span!(
					parent: parent,
					"service_token.issue",
					auth_type = auth_type.as_str(),
					request_id
				),
				None => tracing::info_span!(
					"service_token.issue",
					auth_type = auth_type.as_str(),
					request_id
				),
			};

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (auth_type, ctx);

			Self {}
		}
	}

	/// Enters the span for the synchronous issuance body.
	pub fn entered(self) -> IssueSpanGuard {
		#[cfg(feature = "tracing")]
		{
			IssueSpanGuard { _guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			IssueSpanGuard {}
		}
	}
}

/// RAII guard returned by [`IssueSpan::entered`].
pub struct IssueSpanGuard {
	#[cfg(feature = "tracing")]
	_guard: tracing::span::EnteredSpan,
}
impl Debug for IssueSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("IssueSpanGuard(..)")
	}
}

/// Emits a warning naming why issuance was refused. Never includes secrets.
pub fn emit_rejection(auth_type: AuthType, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(auth_type = auth_type.as_str(), error = %err, "service token issuance refused");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (auth_type, err);
	}
}

/// Emits a debug event identifying which key signed a token.
pub fn emit_issued(kid: &KeyIdentifier, thumbprint: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(kid = kid.as_str(), thumbprint, "service token issued");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kid, thumbprint);
	}
}

/// Emits an info event when a signing key is installed or rotated in.
pub fn emit_key_installed(kid: &KeyIdentifier, thumbprint: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(kid = kid.as_str(), thumbprint, "signing key installed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kid, thumbprint);
	}
}
