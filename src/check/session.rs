//! The check session: one synthetic transaction against one resolved target.

use serde::Serialize;
use thiserror::Error;

use crate::client::{Response, Transport, TransportError};
use crate::config::EngineConfig;

use super::expect::{evaluate, Expectation};
use super::outcome::{Outcome, Status};

/// Session error text recorded when redirect following gives up.
const REDIRECT_LOOP: &str = "redirect loop";

/// Placeholder returned by [`Check::error`] when no error is recorded.
const NO_ERROR: &str = "(no error)";

/// Why a transaction script stopped early.
///
/// `Outcome` is not a failure: it is the intentional termination signal
/// produced by [`Check::ok`] and friends, and the script boundary forwards
/// it unconverted. Every other variant is a fault and becomes CRITICAL at
/// the boundary.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script reached a verdict and asked to stop.
    #[error("{0}")]
    Outcome(Outcome),

    /// URL, resolution, or request failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body pattern failed to compile.
    #[error("invalid body pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An expectation or accessor was used before any request was issued.
    #[error("no response yet: issue a request before inspecting one")]
    NoResponse,

    /// Any other failure raised inside the script.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One synthetic transaction session.
///
/// Holds the transport bound to the resolved target, the latest response
/// (none until a request is made), and the session error string recorded by
/// redirect following. Created by the script boundary and handed to the
/// user's script; discarded when the script ends.
#[derive(Debug)]
pub struct Check {
    transport: Transport,
    last: Option<Response>,
    error: Option<String>,
    redirect_limit: u32,
}

impl Check {
    /// Resolve `url` and bind a fresh session to it.
    ///
    /// The redirect hop limit is copied out of `config` here; configuration
    /// is read-only for the rest of the session's life.
    pub async fn open(url: &str, config: &EngineConfig) -> Result<Self, TransportError> {
        let transport = Transport::connect(url).await?;
        Ok(Self {
            transport,
            last: None,
            error: None,
            redirect_limit: config.redirect_loop_limit,
        })
    }

    /// GET with bounded redirect following.
    ///
    /// Issues a GET for `target`, then keeps re-issuing GETs at each
    /// response's `Location` while the status is a redirect and hops remain.
    /// Returns `true` when a non-redirect response was reached; returns
    /// `false` and records the session error `"redirect loop"` when the hop
    /// limit ran out first. A redirect without a `Location` header is a
    /// fault.
    pub async fn get(&mut self, target: &str) -> ScriptResult<bool> {
        let mut remaining = self.redirect_limit;
        let mut response = self.transport.get(target).await?;

        while response.is_redirect() && remaining > 0 {
            remaining -= 1;
            let location = response
                .location()
                .ok_or(TransportError::MissingLocation)?
                .to_owned();
            tracing::debug!(location = %location, remaining, "following redirect");
            response = self.transport.get(&location).await?;
        }

        let exhausted = response.is_redirect();
        self.last = Some(response);

        if exhausted {
            tracing::warn!(
                limit = self.redirect_limit,
                host = %self.transport.host(),
                "redirect limit exhausted"
            );
            self.error = Some(REDIRECT_LOOP.to_string());
            Ok(false)
        } else {
            self.error = None;
            Ok(true)
        }
    }

    /// Single GET with no redirect handling.
    pub async fn get_once(&mut self, target: &str) -> ScriptResult<&Response> {
        let response = self.transport.get(target).await?;
        Ok(self.last.insert(response))
    }

    /// Form-encoded POST. No redirect handling.
    pub async fn post<T>(&mut self, target: &str, form: &T) -> ScriptResult<&Response>
    where
        T: Serialize + ?Sized,
    {
        let response = self.transport.post(target, form).await?;
        Ok(self.last.insert(response))
    }

    /// The latest response, if a request has been made.
    pub fn last_response(&self) -> Option<&Response> {
        self.last.as_ref()
    }

    /// Status code of the latest response.
    pub fn status_code(&self) -> ScriptResult<u16> {
        Ok(self.response()?.status())
    }

    /// Body of the latest response.
    pub fn body(&self) -> ScriptResult<&str> {
        Ok(self.response()?.body())
    }

    /// Session error recorded by redirect following, `"(no error)"` if none.
    pub fn error(&self) -> &str {
        self.error.as_deref().unwrap_or(NO_ERROR)
    }

    /// Evaluate expectations affirmatively: `true` iff every value matches.
    ///
    /// Stops at the first failing value; later values are not evaluated.
    pub fn expect<I>(&self, states: I) -> ScriptResult<bool>
    where
        I: IntoIterator<Item = Expectation>,
    {
        Ok(evaluate(self.response()?, true, states)?)
    }

    /// Evaluate expectations negated: `true` iff no value matches.
    ///
    /// Stops at the first value that does match.
    pub fn expect_not<I>(&self, states: I) -> ScriptResult<bool>
    where
        I: IntoIterator<Item = Expectation>,
    {
        Ok(evaluate(self.response()?, false, states)?)
    }

    /// Termination signal for an OK verdict. Return it as the script's error:
    ///
    /// ```ignore
    /// return Err(check.ok("login flow healthy"));
    /// ```
    pub fn ok(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Outcome(Outcome::new(Status::Ok, message))
    }

    /// Termination signal for a WARNING verdict.
    pub fn warning(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Outcome(Outcome::new(Status::Warning, message))
    }

    /// Termination signal for a CRITICAL verdict.
    pub fn critical(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Outcome(Outcome::new(Status::Critical, message))
    }

    /// Termination signal for an UNKNOWN verdict.
    pub fn unknown(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Outcome(Outcome::new(Status::Unknown, message))
    }

    fn response(&self) -> ScriptResult<&Response> {
        self.last.as_ref().ok_or(ScriptError::NoResponse)
    }
}
