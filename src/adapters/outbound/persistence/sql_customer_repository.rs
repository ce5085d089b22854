use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::Customer,
        value_objects::{CustomerId, EmailKey},
    },
    ports::repositories::CustomerRepository,
};

const CUSTOMER_COLUMNS: &str = "id, name, email, address, vat_number, created_at";

/// SQL-based implementation of CustomerRepository using SQLite
#[derive(Clone)]
pub struct SqlCustomerRepository {
    pool: SqlitePool,
}

impl SqlCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `connection_string`, creating the schema if missing
    ///
    /// In-memory databases live per connection, so their pool is pinned to a
    /// single connection.
    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let options = if connection_string.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options.connect(connection_string).await?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                email_key TEXT NOT NULL UNIQUE,
                address TEXT,
                vat_number TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn customer_from_row(row: &SqliteRow) -> RepositoryResult<Customer> {
        let id: String = row.try_get("id").map_err(Self::corrupt)?;
        let id = CustomerId::parse(&id).map_err(|e| RepositoryError::Corrupt {
            message: e.to_string(),
        })?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(Self::corrupt)?;

        Ok(Customer {
            id,
            name: row.try_get("name").map_err(Self::corrupt)?,
            email: row.try_get("email").map_err(Self::corrupt)?,
            address: row.try_get("address").map_err(Self::corrupt)?,
            vat_number: row.try_get("vat_number").map_err(Self::corrupt)?,
            created_at,
        })
    }

    fn corrupt(err: sqlx::Error) -> RepositoryError {
        RepositoryError::Corrupt {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn add(&self, customer: &Customer) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, email_key, address, vat_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(customer.id.to_string())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.email_key().as_str())
        .bind(&customer.address)
        .bind(&customer.vat_number)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::EmailAlreadyExists {
                    email: customer.email.clone(),
                }
            }
            e => RepositoryError::backend("Database error storing customer", e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM customers WHERE id = ?1",
            CUSTOMER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::backend("Database error retrieving customer", e))?;

        row.as_ref().map(Self::customer_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM customers WHERE email_key = ?1",
            CUSTOMER_COLUMNS
        ))
        .bind(EmailKey::new(email).as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::backend("Database error retrieving customer", e))?;

        row.as_ref().map(Self::customer_from_row).transpose()
    }

    async fn remove(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "DELETE FROM customers WHERE id = ?1 RETURNING {}",
            CUSTOMER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::backend("Database error deleting customer", e))?;

        row.as_ref().map(Self::customer_from_row).transpose()
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM customers ORDER BY seq",
            CUSTOMER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::backend("Database error listing customers", e))?;

        rows.iter().map(Self::customer_from_row).collect()
    }
}
