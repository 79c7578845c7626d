//! Shared helpers for command handlers.

use rentdesk_core::{Capability, Session, SessionConfig};

use crate::error::CliError;

/// Login, run a handler body, close -- with CLI-level errors throughout.
///
/// One-shot commands disable both poll timers; `watch` manages its own
/// session lifetime instead of using this.
pub async fn with_session<F, Fut, T>(config: SessionConfig, f: F) -> Result<T, CliError>
where
    F: FnOnce(Session) -> Fut,
    Fut: std::future::Future<Output = Result<T, CliError>>,
{
    let session = Session::new(config.oneshot());
    session.login().await.map_err(CliError::from)?;
    let result = f(session.clone()).await;
    session.close().await;
    result
}

/// Enforce a section gate before running a handler body.
///
/// A denied check renders as an explicit access-denied error naming the
/// operator and the blocked section -- never a silent skip. Unknown
/// (operator not yet resolved) passes, matching the core's fail-open
/// bootstrap semantics.
pub fn require_section(session: &Session, capability: Capability) -> Result<(), CliError> {
    if session.is_authorized(capability) {
        return Ok(());
    }

    let operator = session
        .operator()
        .map(|o| o.full_name.clone())
        .unwrap_or_else(|| "unknown".into());

    Err(CliError::AccessDenied {
        operator,
        section: capability.to_string(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(raw: &str) -> Result<chrono::NaiveDate, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "date".into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}
