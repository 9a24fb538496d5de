//! Seed the database with addresses from a YAML file.
//!
//! # Usage
//!
//! ```bash
//! geo-cli seed fixtures/addresses.yaml
//! ```
//!
//! The file is a YAML sequence of complete address records:
//!
//! ```yaml
//! - id: 1
//!   street: 1600 Pennsylvania Ave NW
//!   city: Washington
//!   state: DC
//!   country: USA
//!   latitude: 38.8977
//!   longitude: -77.0365
//! ```
//!
//! Records whose id already exists are skipped and reported; any other
//! database error stops the run.

use std::path::Path;

use sqlx::SqlitePool;
use tracing::{info, warn};

use geo_addresses_api::db::{AddressRepository, RepositoryError};
use geo_addresses_core::{Address, AddressId};

use super::{CliError, connect};

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Number of addresses inserted.
    pub inserted: usize,
    /// Ids that were already present and left untouched.
    pub skipped: Vec<AddressId>,
}

/// Parse a YAML address list.
///
/// # Errors
///
/// Returns `serde_yaml::Error` if the document is not a list of complete
/// address records.
pub fn parse(content: &str) -> Result<Vec<Address>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Insert each address, skipping ids that already exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` on the first non-conflict failure.
pub async fn insert_all(
    pool: &SqlitePool,
    addresses: &[Address],
) -> Result<SeedSummary, RepositoryError> {
    let repo = AddressRepository::new(pool);
    let mut summary = SeedSummary::default();

    for address in addresses {
        match repo.insert(address).await {
            Ok(()) => summary.inserted += 1,
            Err(RepositoryError::Conflict(reason)) => {
                warn!(address_id = %address.id, %reason, "Skipping existing address");
                summary.skipped.push(address.id);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Seed addresses from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the database
/// rejects an insert for a reason other than a duplicate id.
pub async fn run(file_path: &Path) -> Result<(), CliError> {
    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    let addresses = parse(&content)?;
    info!(count = addresses.len(), "Parsed seed file");

    let (_config, pool) = connect().await?;
    let summary = insert_all(&pool, &addresses).await?;
    pool.close().await;

    info!("Seeding complete!");
    info!("  Addresses inserted: {}", summary.inserted);
    info!("  Addresses skipped (already exist): {}", summary.skipped.len());

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEED: &str = r"
- id: 1
  street: 1600 Pennsylvania Ave NW
  city: Washington
  state: DC
  country: USA
  latitude: 38.8977
  longitude: -77.0365
- id: 2
  street: 350 Fifth Avenue
  city: New York
  state: NY
  country: USA
  latitude: 40.7484
  longitude: -73.9857
";

    #[test]
    fn test_parse_seed_file() {
        let addresses = parse(SEED).unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses.first().unwrap().city, "Washington");
        assert!((addresses.get(1).unwrap().longitude - -73.9857).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_bundled_fixture() {
        let addresses = parse(include_str!("../../../../fixtures/addresses.yaml")).unwrap();
        assert_eq!(addresses.len(), 5);
        assert!(addresses.iter().any(|a| a.city == "Paris"));
    }

    #[test]
    fn test_parse_rejects_incomplete_record() {
        let err = parse("- id: 1\n  street: Nowhere\n").unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[tokio::test]
    async fn test_insert_all_skips_existing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let pool = geo_addresses_api::db::open(&dir.path().join("seed.db"), 1)
            .await
            .unwrap();
        let addresses = parse(SEED).unwrap();

        let first = insert_all(&pool, &addresses).await.unwrap();
        assert_eq!(first.inserted, 2);
        assert!(first.skipped.is_empty());

        let second = insert_all(&pool, &addresses).await.unwrap();
        assert_eq!(
            second,
            SeedSummary {
                inserted: 0,
                skipped: vec![AddressId::new(1), AddressId::new(2)],
            }
        );
    }
}
