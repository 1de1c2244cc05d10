use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::{OrderRecord, TransactionEntry};
use crate::domain::{CustomerRecord, ProductRecord};

use super::{CustomerStore, Notifier, OrderStore, ProductStore, TransactionLog};

// ============================================================================
// In-Memory Stores
// ============================================================================
//
// Map-backed implementations of the collaborator contracts, used by the
// demo binary and the pipeline tests. Each store can be switched into a
// failing mode so tests can exercise the warning paths.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerStore {
    records: RwLock<HashMap<String, CustomerRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, customer: CustomerRecord) {
        self.records
            .write()
            .await
            .insert(customer.id.clone(), customer);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("customer store read failure (injected)");
        }
        Ok(self.records.read().await.get(customer_id).cloned())
    }

    async fn put(&self, customer: &CustomerRecord) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("customer store write failure (injected)");
        }
        self.records
            .write()
            .await
            .insert(customer.id.clone(), customer.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProductStore {
    records: RwLock<HashMap<String, ProductRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, product: ProductRecord) {
        self.records
            .write()
            .await
            .insert(product.id.clone(), product);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn stock_of(&self, product_id: &str) -> Option<u32> {
        self.records.read().await.get(product_id).map(|p| p.stock)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        Ok(self.records.read().await.get(product_id).cloned())
    }

    async fn put(&self, product: &ProductRecord) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("product store write failure (injected)");
        }
        self.records
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    records: RwLock<HashMap<String, OrderRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn get(&self, order_id: &str) -> Option<OrderRecord> {
        self.records.read().await.get(order_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put(&self, order_id: &str, record: &OrderRecord) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("order store write failure (injected)");
        }
        self.records
            .write()
            .await
            .insert(order_id.to_string(), record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTransactionLog {
    entries: RwLock<Vec<TransactionEntry>>,
    fail_appends: AtomicBool,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub async fn entries(&self) -> Vec<TransactionEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(&self, entry: &TransactionEntry) -> Result<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            bail!("transaction log append failure (injected)");
        }
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

/// Captured confirmation email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that records what it was asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<SentEmail>>,
    fail_sends: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            bail!("notifier send failure (injected)");
        }
        tracing::debug!(to = %email, subject = %subject, "Recording outbound email");
        self.sent.write().await.push(SentEmail {
            to: email.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomerType;

    fn customer(id: &str) -> CustomerRecord {
        CustomerRecord {
            id: id.into(),
            customer_type: CustomerType::Regular,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            orders_count: 0,
            total_spent: 0.0,
            last_order_date: None,
        }
    }

    #[tokio::test]
    async fn test_customer_store_round_trip() {
        let store = InMemoryCustomerStore::new();
        store.insert(customer("C1")).await;

        let found = store.get("C1").await.unwrap();
        assert!(found.is_some());
        assert!(store.get("C2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_injected_read_failure() {
        let store = InMemoryCustomerStore::new();
        store.insert(customer("C1")).await;
        store.fail_reads(true);
        assert!(store.get("C1").await.is_err());

        store.fail_reads(false);
        assert!(store.get("C1").await.is_ok());
    }

    #[tokio::test]
    async fn test_product_store_tracks_stock() {
        let store = InMemoryProductStore::new();
        store
            .insert(ProductRecord {
                id: "P1".into(),
                name: "Widget".into(),
                price: 20.0,
                stock: 3,
                active: true,
            })
            .await;

        let mut product = store.get("P1").await.unwrap().unwrap();
        product.stock = 1;
        store.put(&product).await.unwrap();
        assert_eq!(store.stock_of("P1").await, Some(1));
    }

    #[tokio::test]
    async fn test_recording_notifier_captures_sends() {
        let notifier = RecordingNotifier::new();
        notifier
            .send("ada@example.com", "Order Confirmation #O1", "body")
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");

        notifier.fail_sends(true);
        assert!(notifier.send("x@example.com", "s", "b").await.is_err());
    }
}
