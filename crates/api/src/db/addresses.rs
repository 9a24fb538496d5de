//! Address repository for database operations.
//!
//! Every method runs exactly one statement under `SQLite`'s implicit
//! auto-commit. Update and delete report the affected row count but treat
//! zero rows as success.

use sqlx::SqlitePool;

use geo_addresses_core::{Address, AddressId};

use super::RepositoryError;

/// Database row for the `addresses` table.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    street: String,
    city: String,
    state: String,
    country: String,
    latitude: f64,
    longitude: f64,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            street: row.street,
            city: row.city,
            state: row.state,
            country: row.country,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new address using its caller-supplied id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, address: &Address) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO addresses (id, street, city, state, country, latitude, longitude)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(address.id)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .bind(address.latitude)
        .bind(address.longitude)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("address {} already exists", address.id));
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// List every address in storage order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, street, city, state, country, latitude, longitude
            FROM addresses
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    /// Get an address by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, street, city, state, country, latitude, longitude
            FROM addresses
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Overwrite every non-id field of the address with `id`.
    ///
    /// The id inside `address` is ignored; the row is matched on `id` only.
    /// Returns the number of rows changed, which is zero when no address has
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(&self, id: AddressId, address: &Address) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE addresses
            SET street = ?, city = ?, state = ?, country = ?, latitude = ?, longitude = ?
            WHERE id = ?
            ",
        )
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .bind(address.latitude)
        .bind(address.longitude)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete the address with `id` if it exists.
    ///
    /// Returns the number of rows removed (zero or one).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: AddressId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
