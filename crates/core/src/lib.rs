//! Per-test session coordination for cloud browser farm runs.
//!
//! An end-to-end suite running against an "Automate"-style browser farm
//! needs three things its test runner does not provide:
//!
//! 1. **Routing** - decide once, from the environment, whether this run
//!    targets the farm or a local browser ([`config`]).
//! 2. **Session initiation** - open one dedicated remote session per test,
//!    named after the test's title path, by connecting a WebSocket whose
//!    URL carries the capability object ([`session`], [`connect`]).
//! 3. **Status reporting** - push pass/fail back to the farm's REST API
//!    after each test, resolving the session id by creation-time proximity
//!    because the connect never reveals it ([`report`], [`correlate`]).
//!
//! Reporting is strictly best-effort: a lost update is logged and returned
//! as a [`ReportOutcome::Skipped`] value, and never changes a verdict.
//!
//! ```no_run
//! use farmhand::{SessionManager, TestIdentity, TestStatus};
//!
//! # async fn run() -> farmhand::Result<()> {
//! let manager = SessionManager::from_env()?;
//! let identity = TestIdentity::new(["login.spec.ts", "Login", "valid credentials"]);
//!
//! let session = manager.open(&identity).await?;
//! // ... drive the browser ...
//! let report = manager
//! 	.finish(session, TestStatus::Passed, TestStatus::Passed, None)
//! 	.await;
//! assert!(report.is_reported());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod connect;
pub mod correlate;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod probe;
pub mod report;
pub mod session;

pub use api::FarmApi;
pub use config::{Credentials, FarmConfig};
pub use correlate::SessionCache;
pub use error::{FarmError, Result};
pub use identity::TestIdentity;
pub use outcome::{REASON_LIMIT, RunOutcome, TestStatus, resolve_outcome};
pub use report::{ReportOutcome, SkipReason, report_outcome};
pub use session::{SessionManager, TestSession};
