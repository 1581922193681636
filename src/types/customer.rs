//! Customer type for the bank ledger

use super::transaction::CustomerId;
use std::fmt;

/// A ledger customer
///
/// Customers are immutable once created and are never removed. Accounts refer
/// to their owner by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer #{}: {} <{}>", self.id, self.name, self.email)
    }
}
