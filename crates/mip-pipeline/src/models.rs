//! Record types flowing through the pipeline
//!
//! Raw records are what the extractors hand over; canonical records are what
//! the transformers produce. Records are immutable value objects: each stage
//! builds new vectors rather than mutating its input, and no record outlives
//! a single pipeline run.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Date formats accepted for the `signup_date` column
const SIGNUP_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Customer row as read from the delimited input file
///
/// `customer_id` stays textual until the transformer coerces it; empty cells
/// deserialize to `None`. The signup date is parsed at the extraction
/// boundary so a malformed date fails the extract stage, not a later one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCustomer {
    pub customer_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "de_signup_date")]
    pub signup_date: NaiveDate,
    pub country: Option<String>,
}

/// Canonical customer record
///
/// `name` and `email` stay optional: the cleanup rules never invent values
/// for them, and the validator (not the type system) owns the null checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub signup_date: NaiveDate,
    pub country: String,
}

/// Product row as mapped from the remote API response
#[derive(Debug, Clone, PartialEq)]
pub struct RawProduct {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
}

/// Canonical product record
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Parse a `signup_date` cell, accepting the formats seen in source exports
pub fn parse_signup_date(value: &str) -> Option<NaiveDate> {
    SIGNUP_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn de_signup_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_signup_date(raw.trim()).ok_or_else(|| {
        serde::de::Error::custom(format!("unparsable signup_date '{}'", raw.trim()))
    })
}
