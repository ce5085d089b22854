use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::Customer,
        value_objects::{CustomerId, EmailKey},
    },
    ports::repositories::CustomerRepository,
};

/// In-memory implementation of CustomerRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    customers: HashMap<CustomerId, Customer>,
    // Case-folded email -> owning id
    email_index: HashMap<EmailKey, CustomerId>,
    // Insertion order, for stable listing
    order: Vec<CustomerId>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn add(&self, customer: &Customer) -> RepositoryResult<()> {
        let mut data = self.data.write().await;

        let key = customer.email_key();
        if data.email_index.contains_key(&key) {
            return Err(RepositoryError::EmailAlreadyExists {
                email: customer.email.clone(),
            });
        }

        data.email_index.insert(key, customer.id);
        data.order.push(customer.id);
        data.customers.insert(customer.id, customer.clone());

        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let data = self.data.read().await;
        Ok(data.customers.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let data = self.data.read().await;

        Ok(data
            .email_index
            .get(&EmailKey::new(email))
            .and_then(|id| data.customers.get(id))
            .cloned())
    }

    async fn remove(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut data = self.data.write().await;

        let Some(removed) = data.customers.remove(id) else {
            return Ok(None);
        };

        data.email_index.remove(&removed.email_key());
        data.order.retain(|existing| existing != id);

        Ok(Some(removed))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let data = self.data.read().await;

        Ok(data
            .order
            .iter()
            .filter_map(|id| data.customers.get(id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewCustomer;

    fn customer(name: &str, email: &str) -> Customer {
        let input = NewCustomer::builder().name(name).email(email).build();
        Customer::from_new(CustomerId::generate(), input)
    }

    #[tokio::test]
    async fn test_add_and_find() {
        let repo = InMemoryCustomerRepository::new();
        let record = customer("A customer", "Someone@Server.pt");

        repo.add(&record).await.unwrap();

        assert_eq!(repo.find_by_id(&record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(
            repo.find_by_email("someone@server.PT").await.unwrap(),
            Some(record)
        );
        assert_eq!(repo.find_by_email("someone@server").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_rejects_email_held_by_another_record() {
        let repo = InMemoryCustomerRepository::new();
        repo.add(&customer("First", "a@x.com")).await.unwrap();

        let err = repo.add(&customer("Second", "A@X.COM")).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::EmailAlreadyExists {
                email: "A@X.COM".to_string()
            }
        );
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_frees_email() {
        let repo = InMemoryCustomerRepository::new();
        let record = customer("First", "a@x.com");
        repo.add(&record).await.unwrap();

        assert_eq!(repo.remove(&record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(repo.remove(&record.id).await.unwrap(), None);
        assert_eq!(repo.find_by_id(&record.id).await.unwrap(), None);

        repo.add(&customer("Again", "a@x.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let repo = InMemoryCustomerRepository::new();
        let records: Vec<Customer> = (1..=3)
            .map(|n| customer(&format!("Customer {}", n), &format!("mail{}@example.com", n)))
            .collect();
        for record in &records {
            repo.add(record).await.unwrap();
        }
        repo.remove(&records[1].id).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Customer 1", "Customer 3"]);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryCustomerRepository::new();
        let other = repo.clone();

        let record = customer("Shared", "shared@x.com");
        repo.add(&record).await.unwrap();

        assert!(other.find_by_id(&record.id).await.unwrap().is_some());
    }
}
