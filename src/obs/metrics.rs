// self
use crate::{auth::AuthType, obs::IssueOutcome};

/// Records an issuance outcome via the global metrics recorder (when enabled).
pub fn record_issue_outcome(auth_type: AuthType, outcome: IssueOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"service_token_issue_total",
			"auth_type" => auth_type.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (auth_type, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_issue_outcome_is_infallible() {
		record_issue_outcome(AuthType::ImsToken, IssueOutcome::Failure);
	}
}
