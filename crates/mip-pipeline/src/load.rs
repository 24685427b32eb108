//! Load stage: transactional batch upserts into PostgreSQL
//!
//! The loader works against a session handed to it by the orchestrator; it
//! never opens or owns a connection of its own. Each batch is one multi-row
//! statement inside one transaction, so a failing row rolls back the whole
//! batch and the database is left in its pre-run state.

use crate::error::{PipelineError, Result};
use crate::models::{Customer, Product};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

/// Current row counts of the target tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub customers: i64,
    pub products: i64,
}

/// Database loader for canonical records
pub struct Loader {
    db: PgPool,
}

impl Loader {
    /// Create a loader over an existing database session
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Upsert a customer batch, keyed on `customer_id`
    ///
    /// Inserts absent rows and overwrites `name`, `email`, `signup_date`,
    /// and `country` on conflict. All-or-nothing: any failure rolls the
    /// batch back and surfaces as [`PipelineError::Load`].
    pub async fn load_customers(&self, rows: &[Customer]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await.map_err(PipelineError::Load)?;

        let mut builder = customers_upsert(rows);
        let done = match builder.build().execute(&mut *tx).await {
            Ok(done) => done,
            Err(err) => {
                tx.rollback().await.ok();
                return Err(PipelineError::Load(err));
            },
        };

        tx.commit().await.map_err(PipelineError::Load)?;

        info!("Loaded {} customers", rows.len());

        Ok(done.rows_affected())
    }

    /// Upsert a product batch, keyed on `product_id`
    ///
    /// Same semantics as [`Loader::load_customers`], overwriting `name`,
    /// `price`, and `category` on conflict.
    pub async fn load_products(&self, rows: &[Product]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await.map_err(PipelineError::Load)?;

        let mut builder = products_upsert(rows);
        let done = match builder.build().execute(&mut *tx).await {
            Ok(done) => done,
            Err(err) => {
                tx.rollback().await.ok();
                return Err(PipelineError::Load(err));
            },
        };

        tx.commit().await.map_err(PipelineError::Load)?;

        info!("Loaded {} products", rows.len());

        Ok(done.rows_affected())
    }

    /// Read current row counts for both target tables
    ///
    /// Diagnostic only; not part of the write path.
    pub async fn report_counts(&self) -> Result<TableCounts> {
        let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db)
            .await
            .map_err(PipelineError::Load)?;

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await
            .map_err(PipelineError::Load)?;

        Ok(TableCounts {
            customers,
            products,
        })
    }
}

/// Build the multi-row customer upsert statement
fn customers_upsert<'a>(rows: &'a [Customer]) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO customers (customer_id, name, email, signup_date, country) ",
    );
    builder.push_values(rows, |mut b, customer| {
        b.push_bind(customer.customer_id)
            .push_bind(customer.name.as_deref())
            .push_bind(customer.email.as_deref())
            .push_bind(customer.signup_date)
            .push_bind(customer.country.as_str());
    });
    builder.push(
        " ON CONFLICT (customer_id) DO UPDATE SET \
         name = EXCLUDED.name, \
         email = EXCLUDED.email, \
         signup_date = EXCLUDED.signup_date, \
         country = EXCLUDED.country",
    );
    builder
}

/// Build the multi-row product upsert statement
fn products_upsert<'a>(rows: &'a [Product]) -> QueryBuilder<'a, Postgres> {
    let mut builder =
        QueryBuilder::new("INSERT INTO products (product_id, name, price, category) ");
    builder.push_values(rows, |mut b, product| {
        b.push_bind(product.product_id)
            .push_bind(product.name.as_str())
            .push_bind(product.price)
            .push_bind(product.category.as_str());
    });
    builder.push(
        " ON CONFLICT (product_id) DO UPDATE SET \
         name = EXCLUDED.name, \
         price = EXCLUDED.price, \
         category = EXCLUDED.category",
    );
    builder
}
