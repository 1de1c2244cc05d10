use anyhow::Result;
use async_trait::async_trait;

use crate::domain::order::{OrderRecord, TransactionEntry};
use crate::domain::{CustomerRecord, ProductRecord};

pub mod memory;

pub use memory::{
    InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore, InMemoryTransactionLog,
    RecordingNotifier, SentEmail,
};

// ============================================================================
// External Collaborator Contracts
// ============================================================================
//
// The pipeline owns none of this state. It reads customer and product
// records, computes deltas, and writes back only on success paths it
// controls. Implementations decide the storage technology; the pipeline
// never sees file paths or connection handles.
//
// Errors cross these boundaries as `anyhow::Error` and are translated to
// user-visible messages at each pipeline stage; internal detail is never
// surfaced to the caller.
//
// ============================================================================

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerRecord>>;
    async fn put(&self, customer: &CustomerRecord) -> Result<()>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, product_id: &str) -> Result<Option<ProductRecord>>;
    async fn put(&self, product: &ProductRecord) -> Result<()>;
}

/// Keyed by order id, append/overwrite semantics
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn put(&self, order_id: &str, record: &OrderRecord) -> Result<()>;
}

/// Append-only, one entry per completed order
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn append(&self, entry: &TransactionEntry) -> Result<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<()>;
}
