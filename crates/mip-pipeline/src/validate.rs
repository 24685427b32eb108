//! Validation stage: data-quality checks over canonical tables
//!
//! Validators only observe; they return a structured report and leave the
//! decision of what to do with it to the orchestrator. Every check runs,
//! so one pass reports every issue rather than just the first.

use crate::models::{Customer, Product};
use std::collections::HashSet;

/// Verdict plus ordered list of human-readable issues
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// True when no issue was found
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate a canonical customer table
///
/// Checks: null names, null emails, duplicate `customer_id` values,
/// duplicate emails (among non-null values), and emails missing an "@"
/// (null emails are exempt here; the null check already flags them).
pub fn validate_customers(rows: &[Customer]) -> ValidationReport {
    let mut issues = Vec::new();

    let null_names = rows.iter().filter(|c| c.name.is_none()).count();
    if null_names > 0 {
        issues.push(format!("name has {} null values", null_names));
    }

    let null_emails = rows.iter().filter(|c| c.email.is_none()).count();
    if null_emails > 0 {
        issues.push(format!("email has {} null values", null_emails));
    }

    let mut seen_ids = HashSet::new();
    let duplicate_ids = rows
        .iter()
        .filter(|c| !seen_ids.insert(c.customer_id))
        .count();
    if duplicate_ids > 0 {
        issues.push(format!("found {} duplicate customer IDs", duplicate_ids));
    }

    let mut seen_emails = HashSet::new();
    let duplicate_emails = rows
        .iter()
        .filter_map(|c| c.email.as_deref())
        .filter(|email| !seen_emails.insert(*email))
        .count();
    if duplicate_emails > 0 {
        issues.push(format!("found {} duplicate emails", duplicate_emails));
    }

    let invalid_emails = rows
        .iter()
        .filter_map(|c| c.email.as_deref())
        .filter(|email| !email.contains('@'))
        .count();
    if invalid_emails > 0 {
        issues.push(format!("found {} invalid email formats", invalid_emails));
    }

    ValidationReport { issues }
}

/// Validate a canonical product table
///
/// Checks: duplicate `product_id` values and negative prices. The negative
/// price check should be unreachable after transformation, but the invariant
/// is verified independently here.
pub fn validate_products(rows: &[Product]) -> ValidationReport {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    let duplicate_ids = rows
        .iter()
        .filter(|p| !seen_ids.insert(p.product_id))
        .count();
    if duplicate_ids > 0 {
        issues.push(format!("found {} duplicate product IDs", duplicate_ids));
    }

    let negative_prices = rows.iter().filter(|p| p.price < 0.0).count();
    if negative_prices > 0 {
        issues.push(format!("found {} negative prices", negative_prices));
    }

    ValidationReport { issues }
}
