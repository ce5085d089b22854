use bon::Builder;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CustomerId, EmailKey};

/// A stored customer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Build the record for a submission under a freshly minted id
    pub fn from_new(id: CustomerId, input: NewCustomer) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            address: input.address,
            vat_number: input.vat_number,
            created_at: Utc::now(),
        }
    }

    pub fn email_key(&self) -> EmailKey {
        EmailKey::new(&self.email)
    }

    /// The address to geolocate, if one is set and not blank
    pub fn geocodable_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

/// A validated customer submission; carries no id
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct NewCustomer {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub email: String,
    #[builder(into)]
    pub address: Option<String>,
    #[builder(into)]
    pub vat_number: Option<String>,
}

/// Public list view of a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}

impl From<Customer> for CustomerSummary {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
        }
    }
}
