mod in_memory_customer_repository;
mod sql_customer_repository;

pub use in_memory_customer_repository::InMemoryCustomerRepository;
pub use sql_customer_repository::SqlCustomerRepository;
