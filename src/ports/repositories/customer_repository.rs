use crate::domain::{
    errors::RepositoryResult,
    models::Customer,
    value_objects::CustomerId,
};
use async_trait::async_trait;

/// Repository owning the live set of customer records
/// This trait handles persistence only; business rules live in the service
#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// Insert a new record under its (fresh) id
    ///
    /// Email uniqueness is checked and enforced atomically with the insert:
    /// when another record holds the same email, ignoring case, nothing is
    /// written and `RepositoryError::EmailAlreadyExists` is returned.
    async fn add(&self, customer: &Customer) -> RepositoryResult<()>;

    /// Find a record by id
    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>>;

    /// Find a record by email, ignoring case
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;

    /// Remove a record, returning it if it existed
    async fn remove(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>>;

    /// List every record, in creation order
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>>;
}
