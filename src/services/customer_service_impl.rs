use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    domain::{
        errors::{ErrorCode, RepositoryError, ServiceFault, ServiceResult},
        models::{Customer, CustomerSummary, GeolocationData, NewCustomer},
        outcome::{Failure, Outcome},
        value_objects::{CustomerId, EmailKey},
    },
    ports::{
        geolocation::GeolocationLookup, repositories::CustomerRepository,
        services::CustomerService,
    },
};

/// Implementation of CustomerService over a repository and a geolocation lookup
#[derive(Clone)]
pub struct CustomerServiceImpl {
    repository: Arc<dyn CustomerRepository>,
    geolocation: Arc<dyn GeolocationLookup>,
}

impl CustomerServiceImpl {
    /// Create a new CustomerServiceImpl instance
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        geolocation: Arc<dyn GeolocationLookup>,
    ) -> Self {
        Self {
            repository,
            geolocation,
        }
    }

    fn customer_not_found<T>(id: &CustomerId) -> Outcome<T> {
        let failure = Failure::customer_does_not_exist(id);
        warn!("{}", failure.description);
        failure.into()
    }

    fn already_exists<T>(email: &str) -> Outcome<T> {
        let description = format!("A customer with email '{}' already exists.", email);
        warn!("{}", description);
        Outcome::failure(ErrorCode::CustomerAlreadyExists, description)
    }
}

/// Run a store call unless the caller has given up first
///
/// A cancelled token wins over a ready store call, so no store work starts
/// after cancellation.
async fn until_cancelled<F>(cancel: &CancellationToken, call: F) -> Result<F::Output, ServiceFault>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ServiceFault::Cancelled),
        output = call => Ok(output),
    }
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    #[instrument(skip(self, customer, cancel), fields(email = %customer.email))]
    async fn create_customer(
        &self,
        customer: NewCustomer,
        cancel: &CancellationToken,
    ) -> ServiceResult<CustomerId> {
        // Uniqueness is checked before any mutation
        if until_cancelled(cancel, self.repository.find_by_email(&customer.email))
            .await??
            .is_some()
        {
            return Ok(Self::already_exists(&customer.email));
        }

        let id = CustomerId::generate();
        let record = Customer::from_new(id, customer);

        match until_cancelled(cancel, self.repository.add(&record)).await? {
            Ok(()) => {}
            // A concurrent create claimed the email between check and insert
            Err(RepositoryError::EmailAlreadyExists { .. }) => {
                return Ok(Self::already_exists(&record.email));
            }
            Err(err) => return Err(err.into()),
        }

        info!("Customer '{}' created successfully.", record.name);

        Ok(Outcome::success(id))
    }

    #[instrument(skip(self, cancel), fields(customer_id = %id))]
    async fn delete_customer(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<bool> {
        let Some(removed) = until_cancelled(cancel, self.repository.remove(id)).await?? else {
            return Ok(Self::customer_not_found(id));
        };

        info!("Customer '{}' deleted successfully.", removed.name);

        Ok(Outcome::success(true))
    }

    #[instrument(skip(self, cancel), fields(customer_id = %id))]
    async fn get_customer(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<Customer> {
        match until_cancelled(cancel, self.repository.find_by_id(id)).await?? {
            Some(customer) => Ok(Outcome::success(customer)),
            None => Ok(Self::customer_not_found(id)),
        }
    }

    #[instrument(skip(self, cancel))]
    async fn list_customers(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<CustomerSummary>> {
        let mut customers = until_cancelled(cancel, self.repository.list_all()).await??;

        // Both filters are exact matches ignoring case, never substrings
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            let key = EmailKey::new(email);
            customers.retain(|c| key.matches(&c.email));
        }

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            let name = name.to_lowercase();
            customers.retain(|c| c.name.to_lowercase() == name);
        }

        debug!("Listing {} customers", customers.len());

        Ok(Outcome::success(
            customers.into_iter().map(CustomerSummary::from).collect(),
        ))
    }

    #[instrument(skip(self, cancel), fields(customer_id = %id))]
    async fn get_customer_geolocation(
        &self,
        id: &CustomerId,
        cancel: &CancellationToken,
    ) -> ServiceResult<GeolocationData> {
        let Some(customer) = until_cancelled(cancel, self.repository.find_by_id(id)).await??
        else {
            return Ok(Self::customer_not_found(id));
        };

        let Some(address) = customer.geocodable_address() else {
            let description = format!("Customer with id '{}' does not have an address.", id);
            warn!("{}", description);
            return Ok(Outcome::failure(
                ErrorCode::CustomerDoesNotHaveAnAddress,
                description,
            ));
        };

        match self.geolocation.resolve(address, cancel).await {
            Some(data) => Ok(Outcome::success(data)),
            None => {
                let description =
                    format!("Could not get geolocation data for address '{}'.", address);
                warn!("{}", description);
                Ok(Outcome::failure(
                    ErrorCode::CouldNotGetGeolocation,
                    description,
                ))
            }
        }
    }
}

/// Builder for CustomerServiceImpl
#[derive(Default)]
pub struct CustomerServiceBuilder {
    repository: Option<Arc<dyn CustomerRepository>>,
    geolocation: Option<Arc<dyn GeolocationLookup>>,
}

impl CustomerServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn CustomerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn geolocation(mut self, geolocation: Arc<dyn GeolocationLookup>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    pub fn build(self) -> Result<CustomerServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let geolocation = self.geolocation.ok_or("Geolocation lookup is required")?;

        Ok(CustomerServiceImpl::new(repository, geolocation))
    }
}
