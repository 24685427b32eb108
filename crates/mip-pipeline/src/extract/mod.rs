//! Extraction stage: thin readers producing raw tabular records
//!
//! - [`customers`]: delimited-file reader for customer rows
//! - [`products`]: HTTP JSON client for product rows
//!
//! No deduplication or cleansing happens here; that is the transformer's job.

pub mod customers;
pub mod products;

pub use customers::extract_customers;
pub use products::ProductApi;
