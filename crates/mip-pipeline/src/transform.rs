//! Transformation stage: pure column-level cleanup
//!
//! Each function consumes the raw table and produces a new canonical table;
//! input rows are never mutated in place. Only deduplication drops rows.

use crate::error::{PipelineError, Result};
use crate::models::{Customer, Product, RawCustomer, RawProduct};
use std::collections::HashSet;

/// A transformed table plus what the cleanup removed
#[derive(Debug, Clone)]
pub struct TransformOutcome<T> {
    pub rows: Vec<T>,
    pub duplicates_removed: usize,
}

/// Clean raw customer rows into canonical customer records
///
/// In order: deduplicate by `customer_id` keeping the first occurrence,
/// lowercase and trim emails, trim and title-case names, default missing
/// countries to "Unknown", and coerce `customer_id` to an integer (failure
/// is a [`PipelineError::Type`]).
pub fn transform_customers(raw: Vec<RawCustomer>) -> Result<TransformOutcome<Customer>> {
    let input_count = raw.len();

    let mut seen = HashSet::new();
    let mut deduped = Vec::with_capacity(input_count);
    for row in raw {
        if seen.insert(row.customer_id.clone()) {
            deduped.push(row);
        }
    }
    let duplicates_removed = input_count - deduped.len();

    let mut rows = Vec::with_capacity(deduped.len());
    for row in deduped {
        let customer_id = row.customer_id.trim().parse::<i64>().map_err(|_| {
            PipelineError::Type(format!(
                "customer_id '{}' is not coercible to an integer",
                row.customer_id
            ))
        })?;

        rows.push(Customer {
            customer_id,
            name: row.name.map(|name| title_case(name.trim())),
            email: row.email.map(|email| email.trim().to_lowercase()),
            signup_date: row.signup_date,
            country: row.country.unwrap_or_else(|| "Unknown".to_string()),
        });
    }

    Ok(TransformOutcome {
        rows,
        duplicates_removed,
    })
}

/// Clean raw product rows into canonical product records
///
/// In order: deduplicate by `product_id` keeping the first occurrence, trim
/// names, take the absolute value of prices (negative input prices are sign
/// errors, not rejects), default missing categories to "General", and round
/// prices to 2 decimal places.
pub fn transform_products(raw: Vec<RawProduct>) -> TransformOutcome<Product> {
    let input_count = raw.len();

    let mut seen = HashSet::new();
    let mut deduped = Vec::with_capacity(input_count);
    for row in raw {
        if seen.insert(row.product_id) {
            deduped.push(row);
        }
    }
    let duplicates_removed = input_count - deduped.len();

    let rows = deduped
        .into_iter()
        .map(|row| Product {
            product_id: row.product_id,
            name: row.name.trim().to_string(),
            price: round2(row.price.abs()),
            category: row.category.unwrap_or_else(|| "General".to_string()),
        })
        .collect();

    TransformOutcome {
        rows,
        duplicates_removed,
    }
}

/// Round a price to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Capitalize the first letter of each word, lowercasing the rest
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_customer(id: &str, email: &str) -> RawCustomer {
        RawCustomer {
            customer_id: id.to_string(),
            name: Some("alice smith".to_string()),
            email: Some(email.to_string()),
            signup_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            country: Some("US".to_string()),
        }
    }

    fn raw_product(id: i64, price: f64) -> RawProduct {
        RawProduct {
            product_id: id,
            name: "Widget".to_string(),
            price,
            category: Some("Tools".to_string()),
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let first = raw_customer("42", "first@example.com");
        let second = raw_customer("42", "second@example.com");

        let outcome = transform_customers(vec![first, second]).unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.duplicates_removed, 1);
        assert_eq!(outcome.rows[0].email.as_deref(), Some("first@example.com"));
    }

    #[test]
    fn test_customer_cleanup_rules() {
        // Duplicate id, messy email, missing country
        let raw = vec![
            RawCustomer {
                customer_id: "1".to_string(),
                name: Some("  anna de vries ".to_string()),
                email: Some(" A@X.com ".to_string()),
                signup_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                country: None,
            },
            RawCustomer {
                customer_id: "1".to_string(),
                name: Some("other".to_string()),
                email: Some("b@y.com".to_string()),
                signup_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                country: Some("NL".to_string()),
            },
        ];

        let outcome = transform_customers(raw).unwrap();

        assert_eq!(outcome.rows.len(), 1);
        let customer = &outcome.rows[0];
        assert_eq!(customer.customer_id, 1);
        assert_eq!(customer.email.as_deref(), Some("a@x.com"));
        assert_eq!(customer.name.as_deref(), Some("Anna De Vries"));
        assert_eq!(customer.country, "Unknown");
    }

    #[test]
    fn test_customer_id_coercion_failure() {
        let mut raw = raw_customer("1", "a@x.com");
        raw.customer_id = "not-a-number".to_string();

        let err = transform_customers(vec![raw]).unwrap_err();
        assert!(matches!(err, PipelineError::Type(_)));
    }

    #[test]
    fn test_transform_customers_is_deterministic() {
        let raw = vec![
            raw_customer("1", " A@X.com "),
            raw_customer("2", "b@y.com"),
            raw_customer("1", "c@z.com"),
        ];

        let first = transform_customers(raw.clone()).unwrap();
        let second = transform_customers(raw).unwrap();

        assert_eq!(first.rows, second.rows);
        assert_eq!(first.duplicates_removed, second.duplicates_removed);
    }

    #[test]
    fn test_negative_price_becomes_absolute() {
        let outcome = transform_products(vec![raw_product(7, -5.0)]);
        assert_eq!(outcome.rows[0].price, 5.0);
    }

    #[test]
    fn test_product_cleanup_rules() {
        let raw = vec![
            RawProduct {
                product_id: 10,
                name: "  Widget  ".to_string(),
                price: 19.999,
                category: None,
            },
            raw_product(10, 1.0),
        ];

        let outcome = transform_products(raw);

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.duplicates_removed, 1);
        let product = &outcome.rows[0];
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 20.0);
        assert_eq!(product.category, "General");
    }

    #[test]
    fn test_transform_products_is_deterministic() {
        let raw = vec![raw_product(1, -3.5), raw_product(2, 9.99), raw_product(1, 4.0)];

        let first = transform_products(raw.clone());
        let second = transform_products(raw);

        assert_eq!(first.rows, second.rows);
        assert_eq!(first.duplicates_removed, second.duplicates_removed);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("alice smith"), "Alice Smith");
        assert_eq!(title_case("BOB"), "Bob");
        assert_eq!(title_case("mary-jane o'hara"), "Mary-Jane O'Hara");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(19.999), 20.0);
        assert_eq!(round2(50.004), 50.0);
        assert_eq!(round2(50.006), 50.01);
    }
}
