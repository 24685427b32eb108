//! Pipeline orchestration
//!
//! Sequences extract -> transform -> validate -> load, aborting on the first
//! failing stage. Control flow is strictly linear: a stage never starts
//! before the previous one has completely finished, and customers and
//! products are never processed in parallel.

use crate::config::{Config, DatabaseConfig};
use crate::error::{PipelineError, Result};
use crate::extract::{extract_customers, ProductApi};
use crate::load::{Loader, TableCounts};
use crate::transform::{transform_customers, transform_products};
use crate::validate::{validate_customers, validate_products};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Stage of the pipeline state machine
///
/// `Failed` is terminal and reachable from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Validate,
    Load,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "EXTRACT"),
            Stage::Transform => write!(f, "TRANSFORM"),
            Stage::Validate => write!(f, "VALIDATE"),
            Stage::Load => write!(f, "LOAD"),
            Stage::Done => write!(f, "DONE"),
            Stage::Failed => write!(f, "FAILED"),
        }
    }
}

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct RunReport {
    pub success: bool,
    pub stage: Stage,
    pub duration: Duration,
    pub counts: Option<TableCounts>,
    pub error: Option<PipelineError>,
}

/// Batch ETL pipeline orchestrator
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline from resolved configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline once
    ///
    /// Never panics and never partially recovers: any propagated stage error
    /// marks the run failed. The report carries the overall verdict and the
    /// elapsed wall-clock duration.
    pub async fn run(&self) -> RunReport {
        let started = Instant::now();
        info!("Starting multi-source integration pipeline");

        match self.execute().await {
            Ok(counts) => {
                let duration = started.elapsed();
                info!(
                    customers = counts.customers,
                    products = counts.products,
                    "Pipeline completed successfully in {:.2}s",
                    duration.as_secs_f64()
                );
                RunReport {
                    success: true,
                    stage: Stage::Done,
                    duration,
                    counts: Some(counts),
                    error: None,
                }
            },
            Err(err) => {
                let duration = started.elapsed();
                error!("Pipeline failed after {:.2}s: {}", duration.as_secs_f64(), err);
                if let PipelineError::ValidationFailed { ref issues } = err {
                    for issue in issues {
                        warn!("validation issue: {}", issue);
                    }
                }
                for hint in remediation_hints(&err) {
                    warn!("hint: {}", hint);
                }
                RunReport {
                    success: false,
                    stage: Stage::Failed,
                    duration,
                    counts: None,
                    error: Some(err),
                }
            },
        }
    }

    async fn execute(&self) -> Result<TableCounts> {
        // EXTRACT
        info!(stage = %Stage::Extract, "Extracting source data");
        let raw_customers = extract_customers(&self.config.customers_file).await?;
        let api = ProductApi::new(&self.config.api)?;
        let raw_products = api.fetch_products().await?;

        // TRANSFORM
        info!(stage = %Stage::Transform, "Transforming records");
        let customers = transform_customers(raw_customers)?;
        if customers.duplicates_removed > 0 {
            info!("Removed {} duplicate customers", customers.duplicates_removed);
        }
        let products = transform_products(raw_products);
        if products.duplicates_removed > 0 {
            info!("Removed {} duplicate products", products.duplicates_removed);
        }

        // VALIDATE
        info!(stage = %Stage::Validate, "Validating records");
        let customer_report = validate_customers(&customers.rows);
        let product_report = validate_products(&products.rows);

        // Both validators run so one pass reports every issue; a false
        // verdict from either keeps the run out of LOAD entirely.
        let mut issues = customer_report.issues;
        issues.extend(product_report.issues);
        if !issues.is_empty() {
            return Err(PipelineError::ValidationFailed { issues });
        }

        // LOAD
        info!(stage = %Stage::Load, "Loading records into the database");
        let db = connect(&self.config.database).await?;
        let loader = Loader::new(db.clone());

        // The session is released on every exit path, including failure.
        let load_result = async {
            loader.load_customers(&customers.rows).await?;
            loader.load_products(&products.rows).await?;
            loader.report_counts().await
        }
        .await;
        db.close().await;

        let counts = load_result?;
        info!(
            "Row counts after load: customers={} products={}",
            counts.customers, counts.products
        );

        Ok(counts)
    }
}

/// Open the database session used by the LOAD stage
///
/// A connection failure aborts the stage before any write is attempted.
async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.url())
        .await
        .map_err(PipelineError::Connection)
}

/// Remediation hints reported alongside a failed run
fn remediation_hints(error: &PipelineError) -> &'static [&'static str] {
    match error {
        PipelineError::NotFound(_) | PipelineError::Io(_) => {
            &["Check that the customer file exists and CUSTOMERS_FILE points at it"]
        },
        PipelineError::Transport(_) | PipelineError::HttpStatus { .. } => {
            &["Verify API_BASE_URL is reachable and API_TIMEOUT is large enough"]
        },
        PipelineError::Format(_) | PipelineError::Type(_) => {
            &["Inspect the source data for malformed rows or fields"]
        },
        PipelineError::ValidationFailed { .. } => {
            &["Fix the reported data-quality issues in the sources before re-running"]
        },
        PipelineError::Connection(_) => &[
            "Check the database settings in .env (DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASSWORD)",
            "Verify the database is running and accepting connections",
        ],
        PipelineError::Load(_) => {
            &["Verify the customers and products tables exist with the expected schema"]
        },
    }
}
