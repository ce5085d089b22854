use crate::domain::{
    errors::ServiceResult,
    models::{Customer, CustomerSummary, GeolocationData, NewCustomer},
    value_objects::CustomerId,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Port for customer management operations
/// This trait defines the business logic for customer records
#[async_trait]
pub trait CustomerService: Send + Sync + 'static {
    /// Create a customer, failing with `CustomerAlreadyExists` when the
    /// email is taken
    async fn create_customer(
        &self,
        customer: NewCustomer,
        cancel: &CancellationToken,
    ) -> ServiceResult<CustomerId>;

    /// Delete a customer
    async fn delete_customer(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<bool>;

    /// Get a customer
    async fn get_customer(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<Customer>;

    /// List customers, optionally narrowed to exact (case-insensitive)
    /// name and/or email matches
    async fn list_customers(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<CustomerSummary>>;

    /// Resolve the customer's address to coordinates
    async fn get_customer_geolocation(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<GeolocationData>;
}
