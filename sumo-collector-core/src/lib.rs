//! # sumo-collector-core
//!
//! Client library used to verify Sumo Logic collector installations.
//!
//! This library provides:
//! - A client for the Collector Management API (collector lookup, source CRUD, log search)
//! - Deadline-bounded retries for connect timeouts
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use sumo_collector_core::{collector_exists, Config};
//!
//! # async fn run() -> sumo_collector_core::Result<()> {
//! let config = Config::load_from("sumo.toml".as_ref())?;
//! let _guard = sumo_collector_core::logging::init(&config.logging)?;
//! assert!(collector_exists(config.client).await?);
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use collector::{collector_exists, ApiResponse, CollectorClient, RetryPolicy};
pub use config::{ClientConfig, Config};
pub use error::{Error, Result};
pub use types::{Collector, Source, SourceData};

// Public modules
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;
