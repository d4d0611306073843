//! Sumo Logic collector client
//!
//! This module talks to the Sumo Logic Collector Management API to check
//! that an installed collector registered itself, and to inspect or change
//! the sources configured on it.
//!
//! ## Retries
//!
//! Every call runs under one deadline (`client.request_timeout_secs`, 60s by
//! default). Connect timeouts are retried inside that deadline with a backoff
//! growing by `client.backoff_step_secs`; any other failure is returned
//! immediately.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sumo_collector_core::{ClientConfig, CollectorClient};
//!
//! # async fn check() -> sumo_collector_core::Result<()> {
//! let mut client = CollectorClient::new(ClientConfig::new("web-01", "su123", "secret"))?;
//! if client.exists().await? && !client.source_exists("syslog").await? {
//!     println!("collector is registered but has no syslog source");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod response;
mod retry;

pub use client::{collector_exists, CollectorClient};
pub use response::ApiResponse;
pub use retry::RetryPolicy;
