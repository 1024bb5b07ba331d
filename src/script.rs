//! Script execution boundary.
//!
//! [`run`] binds a session to the target, executes the user's script, and
//! reduces whatever happened to a terminal [`Outcome`]: outcome signals pass
//! through unconverted, every fault becomes CRITICAL exactly here, and a
//! script that returns normally passes with the default message. [`against`]
//! adds the reporting step - print the verdict line and exit - and is the
//! only place the process terminates.

use std::convert::Infallible;
use std::future::Future;

use crate::check::{Check, Outcome, ScriptError, ScriptResult};
use crate::config::EngineConfig;

/// Message reported when a script finishes without reaching a verdict.
pub const PASS_MESSAGE: &str = "Synthetic Transaction Passed";

/// Run one scripted transaction and reduce it to a terminal [`Outcome`].
///
/// The script receives the session by value and owns it for its whole run.
/// Faults during resolution, connection, or script execution are converted
/// to CRITICAL with the fault's message; this is the only fault handler a
/// caller needs.
pub async fn run<F, Fut>(url: &str, config: &EngineConfig, script: F) -> Outcome
where
    F: FnOnce(Check) -> Fut,
    Fut: Future<Output = ScriptResult<()>>,
{
    let check = match Check::open(url, config).await {
        Ok(check) => check,
        Err(fault) => {
            tracing::warn!(url = %url, error = %fault, "could not open check session");
            return Outcome::critical(fault.to_string());
        }
    };

    match script(check).await {
        Ok(()) => Outcome::ok(PASS_MESSAGE),
        Err(ScriptError::Outcome(outcome)) => outcome,
        Err(fault) => {
            tracing::warn!(url = %url, error = %fault, "script faulted");
            Outcome::critical(fault.to_string())
        }
    }
}

/// Run a transaction, print its verdict line, and terminate the process.
///
/// Exits with the verdict's code (0/1/2/3); never returns.
pub async fn against<F, Fut>(url: &str, config: &EngineConfig, script: F) -> Infallible
where
    F: FnOnce(Check) -> Fut,
    Fut: Future<Output = ScriptResult<()>>,
{
    run(url, config, script).await.report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Status;

    #[tokio::test]
    async fn test_malformed_url_reports_critical() {
        let config = EngineConfig::default();
        let outcome = run("not a url", &config, |_check| async move {
            Ok::<_, ScriptError>(())
        })
        .await;

        assert_eq!(outcome.status, Status::Critical);
        assert!(outcome.message.contains("invalid target URL"));
    }

    #[tokio::test]
    async fn test_missing_host_reports_critical() {
        let config = EngineConfig::default();
        let outcome = run("mailto:oncall@example.com", &config, |_check| async move {
            Ok::<_, ScriptError>(())
        })
        .await;

        assert_eq!(outcome.status, Status::Critical);
    }
}
