//! Product extraction from the remote JSON API
//!
//! The upstream resource is a "users"-style endpoint; its objects are mapped
//! into product rows. The API carries no price field, so the price is a
//! placeholder derivation from the id, kept verbatim for compatibility.

use crate::config::ApiConfig;
use crate::error::{PipelineError, Result};
use crate::models::RawProduct;
use crate::transform::round2;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Remote object shape on the "users" resource
#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: i64,
    name: String,
    #[serde(default)]
    company: Option<Value>,
}

/// HTTP client for the product API
pub struct ProductApi {
    client: Client,
    base_url: String,
}

impl ProductApi {
    /// Create a new client with the configured timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("mip-pipeline/0.1")
            .build()
            .map_err(PipelineError::Transport)?;

        Ok(ProductApi {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch product rows with a single GET against the users resource
    ///
    /// Field mapping: `product_id` from `id`, `name` from `name`, `price`
    /// derived as `id * 10 + 20` rounded to 2 decimals, `category` from
    /// `company.name` when `company` is an object carrying one. A failure is
    /// terminal; no retry is attempted.
    pub async fn fetch_products(&self) -> Result<Vec<RawProduct>> {
        let url = format!("{}/users", self.base_url);
        info!("Fetching products from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(PipelineError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::HttpStatus { status, url });
        }

        let body = response.text().await.map_err(PipelineError::Transport)?;
        let users: Vec<RemoteUser> = serde_json::from_str(&body)
            .map_err(|e| PipelineError::Format(format!("unexpected API response body: {}", e)))?;

        let products: Vec<RawProduct> = users.into_iter().map(map_user).collect();

        info!("Extracted {} products from {}", products.len(), url);

        Ok(products)
    }
}

/// Map one remote user object into a raw product row
fn map_user(user: RemoteUser) -> RawProduct {
    let category = user
        .company
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|company| company.get("name"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    RawProduct {
        product_id: user.id,
        name: user.name,
        price: round2(user.id as f64 * 10.0 + 20.0),
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: Value) -> RemoteUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_user_with_company() {
        let product = map_user(user(json!({
            "id": 3,
            "name": "Bob",
            "company": {"name": "Acme"}
        })));

        assert_eq!(product.product_id, 3);
        assert_eq!(product.name, "Bob");
        assert_eq!(product.price, 50.0);
        assert_eq!(product.category.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_map_user_without_company() {
        let product = map_user(user(json!({"id": 1, "name": "Ann"})));

        assert_eq!(product.price, 30.0);
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_map_user_company_not_an_object() {
        // A scalar company field is ignored rather than rejected
        let product = map_user(user(json!({
            "id": 2,
            "name": "Cid",
            "company": "Acme"
        })));

        assert_eq!(product.category, None);
    }
}
