//! Customer extraction from delimited files

use crate::error::{PipelineError, Result};
use crate::models::RawCustomer;
use std::path::Path;
use tracing::info;

/// Extract customer rows from a CSV file
///
/// Expected columns: `customer_id,name,email,signup_date,country`. Fails
/// with [`PipelineError::NotFound`] if the file is absent and with
/// [`PipelineError::Format`] if a row cannot be parsed into the expected
/// columns (including an unparsable `signup_date`). Rows come back in file
/// order, untouched.
pub async fn extract_customers(path: &Path) -> Result<Vec<RawCustomer>> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }

    let contents = tokio::fs::read_to_string(path).await?;

    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<RawCustomer>() {
        rows.push(record?);
    }

    info!("Extracted {} customers from {}", rows.len(), path.display());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_extracts_rows_in_order() {
        let file = write_csv(
            "customer_id,name,email,signup_date,country\n\
             1,Alice,alice@example.com,2024-01-15,US\n\
             2,Bob,bob@example.com,2024-02-01,\n",
        );

        let rows = extract_customers(file.path()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_id, "1");
        assert_eq!(rows[0].name.as_deref(), Some("Alice"));
        assert_eq!(
            rows[0].signup_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(rows[0].country.as_deref(), Some("US"));
        // Empty cells become None, not empty strings
        assert_eq!(rows[1].country, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = extract_customers(Path::new("/no/such/customers.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bad_date_is_format_error() {
        let file = write_csv(
            "customer_id,name,email,signup_date,country\n\
             1,Alice,alice@example.com,yesterday,US\n",
        );

        let err = extract_customers(file.path()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Format(_)));
    }

    #[tokio::test]
    async fn test_short_row_is_format_error() {
        let file = write_csv(
            "customer_id,name,email,signup_date,country\n\
             1,Alice\n",
        );

        let err = extract_customers(file.path()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Format(_)));
    }
}
