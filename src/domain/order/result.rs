use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::request::{ShippingAddress, ShippingMethod};

// ============================================================================
// Order Result - Report Returned to the Caller
// ============================================================================

/// Final status of a processed order. Transitions are monotonic: once
/// `Error` or `PaymentError` is set, processing halts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Error,
    PaymentError,
    Completed,
}

/// Computed financials. `tax` and `discount` are each rounded to cents
/// before `total` is computed from them; see `pricing::round_cents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
}

/// Result of one payment attempt. `transaction_id` is present iff
/// `success` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub message: String,
}

impl PaymentOutcome {
    pub fn approved(transaction_id: String) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            message: "Payment processed successfully".to_string(),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: message.into(),
        }
    }
}

/// Display-ready line accumulated during inventory resolution; echoed
/// into the confirmation email and the persisted order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub total: f64,
}

/// Fulfillment artifact, generated only after successful payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingLabel {
    pub order_id: String,
    pub customer_name: String,
    pub address: ShippingAddress,
    pub shipping_method: ShippingMethod,
    pub tracking_number: String,
    pub generated_at: DateTime<Utc>,
}

/// Report returned to the caller. One is created fresh per invocation;
/// no uncaught fault ever propagates instead of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    pub status: OrderStatus,
    pub messages: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Wall-clock seconds between start and completion
    pub processing_time: Option<f64>,
    pub items: Vec<OrderLine>,
    pub pricing: Option<PricingBreakdown>,
    pub payment_result: Option<PaymentOutcome>,
    pub shipping_label: Option<ShippingLabel>,
    pub estimated_delivery: Option<NaiveDate>,
    /// None until the notify stage runs (or when the customer has no
    /// email on file)
    pub email_sent: Option<bool>,
}

impl OrderResult {
    pub fn started(order_id: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            order_id: order_id.to_string(),
            status: OrderStatus::Pending,
            messages: Vec::new(),
            started_at,
            completed_at: None,
            processing_time: None,
            items: Vec::new(),
            pricing: None,
            payment_result: None,
            shipping_label: None,
            estimated_delivery: None,
            email_sent: None,
        }
    }

    /// Halt with a pre-commit error, recording the user-visible message
    pub fn fail(mut self, error: super::errors::OrderError) -> Self {
        self.messages.push(error.to_string());
        self.status = OrderStatus::Error;
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

// ============================================================================
// Persistence Echoes
// ============================================================================

/// Full order record written to the order store after completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub items: Vec<OrderLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub shipping_address: ShippingAddress,
    pub shipping_label: ShippingLabel,
    pub estimated_delivery: NaiveDate,
    pub status: String,
}

/// One append-only transaction log line per completed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub timestamp: DateTime<Utc>,
    pub order_id: String,
    pub customer_id: String,
    pub total: f64,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::PaymentError).unwrap();
        assert_eq!(json, "\"payment_error\"");
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_approved_outcome_has_transaction_id() {
        let outcome = PaymentOutcome::approved("CC-1-1234".to_string());
        assert!(outcome.success);
        assert_eq!(outcome.transaction_id.as_deref(), Some("CC-1-1234"));
    }

    #[test]
    fn test_declined_outcome_has_no_transaction_id() {
        let outcome = PaymentOutcome::declined("Payment declined by issuer");
        assert!(!outcome.success);
        assert!(outcome.transaction_id.is_none());
    }

    #[test]
    fn test_fail_sets_error_status_and_message() {
        let started = Utc::now();
        let result = OrderResult::started("O1", started)
            .fail(super::super::errors::OrderError::MissingCustomerId);
        assert_eq!(result.status, OrderStatus::Error);
        assert_eq!(result.messages, vec!["Customer ID is required"]);
    }
}
