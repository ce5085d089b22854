use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{
    errors::ValidationError,
    models::{Customer, CustomerSummary, GeolocationData, GeolocationEntry, NewCustomer},
    value_objects::CustomerId,
};

/// DTO for creating a customer
///
/// Every field is optional on the wire so that missing values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequestDto {
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub vat_number: Option<String>,
}

impl CustomerRequestDto {
    /// Check the submission and turn it into a domain value
    ///
    /// All violations are collected, not just the first one.
    pub fn validate(self) -> Result<NewCustomer, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = non_blank(self.name);
        if name.is_none() {
            errors.push(ValidationError::Required {
                field: "Name",
                label: "Name",
            });
        }

        let email = non_blank(self.email_address);
        match email.as_deref() {
            None => errors.push(ValidationError::Required {
                field: "Email",
                label: "Email",
            }),
            Some(email) if !is_email_address(email) => {
                errors.push(ValidationError::InvalidEmail {
                    field: "Email",
                    label: "Email",
                })
            }
            Some(_) => {}
        }

        let vat_number = self.vat_number.filter(|vat| !vat.is_empty());
        if let Some(vat) = vat_number.as_deref() {
            if !is_vat_number(vat) {
                errors.push(ValidationError::InvalidVatNumber {
                    field: "VatNumber",
                    label: "VAT Number",
                });
            }
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(NewCustomer::builder()
                .name(name)
                .email(email)
                .maybe_address(self.address)
                .maybe_vat_number(vat_number)
                .build()),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Exactly one '@' with something on both sides
fn is_email_address(value: &str) -> bool {
    let mut parts = value.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    )
}

fn is_vat_number(value: &str) -> bool {
    value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit())
}

/// DTO for a single customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponseDto {
    pub name: String,
    pub email_address: String,
    pub address: Option<String>,
    pub vat_number: Option<String>,
}

impl From<Customer> for CustomerResponseDto {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            email_address: customer.email,
            address: customer.address,
            vat_number: customer.vat_number,
        }
    }
}

/// DTO for customer list entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummaryDto {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl From<CustomerSummary> for CustomerSummaryDto {
    fn from(summary: CustomerSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            email: summary.email,
        }
    }
}

/// DTO for listing customers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCustomersDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// DTO for geolocation responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationDataDto {
    pub data: Vec<GeolocationEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationEntryDto {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl From<GeolocationEntry> for GeolocationEntryDto {
    fn from(entry: GeolocationEntry) -> Self {
        Self {
            address: entry.address,
            latitude: entry.latitude,
            longitude: entry.longitude,
            kind: entry.kind,
            locality: entry.locality,
            region: entry.region,
            country: entry.country,
        }
    }
}

impl From<GeolocationData> for GeolocationDataDto {
    fn from(data: GeolocationData) -> Self {
        Self {
            data: data.data.into_iter().map(Into::into).collect(),
        }
    }
}

/// DTO for error responses (problem details)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetailsDto {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

/// DTO for validation error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationProblemDetailsDto {
    pub status: u16,
    pub title: String,
    /// Field name -> messages
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationProblemDetailsDto {
    pub const TITLE: &'static str = "One or more validation errors occurred.";

    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a ValidationError>) -> Self {
        let mut by_field: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in errors {
            by_field
                .entry(error.field().to_string())
                .or_default()
                .push(error.to_string());
        }

        Self {
            status: 400,
            title: Self::TITLE.to_string(),
            errors: by_field,
        }
    }
}
