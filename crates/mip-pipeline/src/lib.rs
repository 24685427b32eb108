//! MIP Pipeline Library
//!
//! Batch ETL pipeline that merges customer records from a delimited file
//! with product records from a remote JSON API, cleans both tables, checks
//! them against the data-quality contract, and upserts them into PostgreSQL.
//!
//! # Stages
//!
//! The pipeline runs strictly in order, each stage consuming the full output
//! of the previous one:
//!
//! - **Extract**: CSV file reader + single HTTP GET against the product API
//! - **Transform**: pure column-level cleanup producing canonical records
//! - **Validate**: predicate checks producing a verdict and an issue list
//! - **Load**: transactional batch upserts plus a row-count report
//!
//! # Example
//!
//! ```no_run
//! use mip_pipeline::{config::Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let report = Pipeline::new(config).run().await;
//!     assert!(report.success);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod validate;

// Re-export commonly used types
pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, RunReport, Stage};
