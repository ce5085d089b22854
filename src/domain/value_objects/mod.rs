mod customer_id;
mod email_key;

pub use customer_id::CustomerId;
pub use email_key::EmailKey;
