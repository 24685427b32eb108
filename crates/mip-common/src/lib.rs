//! MIP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared infrastructure for the MIP workspace members.
//!
//! # Overview
//!
//! - **Logging**: tracing subscriber setup with environment-driven
//!   configuration (level, format, output target)
//!
//! # Example
//!
//! ```no_run
//! use mip_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig};
