//! webtx - Scriptable Synthetic HTTP Transaction Checks
//!
//! An embeddable check engine for monitoring schedulers: script one
//! synthetic HTTP transaction against a target and reduce its outcome to
//! the standard OK / WARNING / CRITICAL / UNKNOWN verdict with exit codes
//! 0/1/2/3 and a single verdict line on stdout.
//!
//! ## Modules
//!
//! - [`client`] - URL resolution and the HTTP transport
//! - [`check`] - the check session, expectations, and verdicts
//! - [`config`] - engine configuration
//! - [`script`] - the script execution boundary
//!
//! ## Example
//!
//! ```no_run
//! use webtx::{against, EngineConfig, Expectation, StatusClass};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EngineConfig::default();
//!     webtx::init_tracing(&config);
//!
//!     against("http://192.0.2.10:8080/", &config, |mut check| async move {
//!         check.get("/health").await?;
//!         if !check.expect([Expectation::Code(200), Expectation::Pattern("ready".into())])? {
//!             return Err(check.critical(format!("health probe failed: {}", check.error())));
//!         }
//!         if !check.expect_not([Expectation::Class(StatusClass::ServerError)])? {
//!             return Err(check.critical("backend reported a server error"));
//!         }
//!         Ok(())
//!     })
//!     .await;
//! }
//! ```

pub mod check;
pub mod client;
pub mod config;
pub mod script;

pub use check::{Check, Expectation, Outcome, ScriptError, ScriptResult, Status, StatusClass};
pub use client::{Response, Transport, TransportError, TransportResult};
pub use config::{ConfigError, EngineConfig};
pub use script::{against, run, PASS_MESSAGE};

/// Install the stderr diagnostics channel.
///
/// Filter level follows `config.debug` unless `RUST_LOG` overrides it.
/// Diagnostics go to stderr so the verdict line on stdout stays the only
/// machine-readable output. Call once at startup.
pub fn init_tracing(config: &EngineConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default = if config.debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
