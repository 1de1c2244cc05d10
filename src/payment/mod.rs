use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::order::{PaymentInfo, PaymentMethod, PaymentOutcome};
use crate::utils::{Clock, Entropy};

// ============================================================================
// Payment Gateway - The Commit Point
// ============================================================================
//
// Payment is attempted before any external write; a declined charge means
// nothing observable has changed. The simulated gateway models a remote
// processor: per-method field checks, a fixed latency, and a fixed
// success probability. Both the clock and the randomness are injected so
// tests can pin outcomes.
//
// ============================================================================

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempt to charge `amount`. Never fails with an error: every
    /// outcome, including malformed details, is reported in the returned
    /// `PaymentOutcome`.
    async fn charge(
        &self,
        method: &PaymentMethod,
        details: &PaymentInfo,
        amount: f64,
    ) -> PaymentOutcome;
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Simulated processor round trip
    pub latency: Duration,
    pub credit_card_success_rate: f64,
    pub paypal_success_rate: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(200),
            credit_card_success_rate: 0.90,
            paypal_success_rate: 0.95,
        }
    }
}

impl GatewayConfig {
    /// No latency, every charge approved. For tests and demos.
    pub fn always_approve() -> Self {
        Self {
            latency: Duration::ZERO,
            credit_card_success_rate: 1.0,
            paypal_success_rate: 1.0,
        }
    }

    /// No latency, every charge declined
    pub fn always_decline() -> Self {
        Self {
            latency: Duration::ZERO,
            credit_card_success_rate: 0.0,
            paypal_success_rate: 0.0,
        }
    }
}

const CREDIT_CARD_ID_PREFIX: &str = "CC";
const PAYPAL_ID_PREFIX: &str = "PP";

pub struct SimulatedGateway {
    config: GatewayConfig,
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn Entropy>,
}

impl SimulatedGateway {
    pub fn new(config: GatewayConfig, clock: Arc<dyn Clock>, entropy: Arc<dyn Entropy>) -> Self {
        Self {
            config,
            clock,
            entropy,
        }
    }

    /// Transaction id scheme: {prefix}-{epoch seconds}-{4 digit suffix}
    fn transaction_id(&self, prefix: &str) -> String {
        format!(
            "{}-{}-{}",
            prefix,
            self.clock.epoch_seconds(),
            self.entropy.number_in(1000..10_000)
        )
    }

    async fn charge_credit_card(&self, details: &PaymentInfo) -> PaymentOutcome {
        if !present(&details.card_number) {
            return PaymentOutcome::declined("Credit card number is required");
        }
        if !present(&details.expiry) {
            return PaymentOutcome::declined("Credit card expiry is required");
        }
        if !present(&details.cvv) {
            return PaymentOutcome::declined("Credit card CVV is required");
        }

        tokio::time::sleep(self.config.latency).await;

        if self.entropy.chance(self.config.credit_card_success_rate) {
            PaymentOutcome::approved(self.transaction_id(CREDIT_CARD_ID_PREFIX))
        } else {
            PaymentOutcome::declined("Payment declined by issuer")
        }
    }

    async fn charge_paypal(&self, details: &PaymentInfo) -> PaymentOutcome {
        if !present(&details.email) {
            return PaymentOutcome::declined("PayPal email is required");
        }

        tokio::time::sleep(self.config.latency).await;

        if self.entropy.chance(self.config.paypal_success_rate) {
            PaymentOutcome::approved(self.transaction_id(PAYPAL_ID_PREFIX))
        } else {
            PaymentOutcome::declined("PayPal payment failed")
        }
    }
}

/// Absent and empty are both treated as missing
fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(
        &self,
        method: &PaymentMethod,
        details: &PaymentInfo,
        amount: f64,
    ) -> PaymentOutcome {
        tracing::debug!(method = method.as_str(), amount = amount, "Charging payment");

        let outcome = match method {
            PaymentMethod::CreditCard => self.charge_credit_card(details).await,
            PaymentMethod::Paypal => self.charge_paypal(details).await,
            PaymentMethod::Other(name) => {
                PaymentOutcome::declined(format!("Unsupported payment method: {}", name))
            }
        };

        if outcome.success {
            tracing::info!(
                method = method.as_str(),
                transaction_id = outcome.transaction_id.as_deref().unwrap_or_default(),
                "Payment approved"
            );
        } else {
            tracing::warn!(
                method = method.as_str(),
                message = %outcome.message,
                "Payment not approved"
            );
        }

        outcome
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{FixedClock, SeededEntropy};
    use chrono::TimeZone;
    use chrono::Utc;

    fn gateway(config: GatewayConfig) -> SimulatedGateway {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        SimulatedGateway::new(
            config,
            Arc::new(FixedClock(instant)),
            Arc::new(SeededEntropy::new(42)),
        )
    }

    #[tokio::test]
    async fn test_credit_card_requires_number_expiry_cvv() {
        let gateway = gateway(GatewayConfig::always_approve());

        let mut details = PaymentInfo::credit_card("4111111111111111", "12/30", "123");
        details.card_number = None;
        let outcome = gateway
            .charge(&PaymentMethod::CreditCard, &details, 10.0)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Credit card number is required");

        let mut details = PaymentInfo::credit_card("4111111111111111", "12/30", "123");
        details.expiry = Some(String::new());
        let outcome = gateway
            .charge(&PaymentMethod::CreditCard, &details, 10.0)
            .await;
        assert_eq!(outcome.message, "Credit card expiry is required");

        let mut details = PaymentInfo::credit_card("4111111111111111", "12/30", "123");
        details.cvv = None;
        let outcome = gateway
            .charge(&PaymentMethod::CreditCard, &details, 10.0)
            .await;
        assert_eq!(outcome.message, "Credit card CVV is required");
        assert!(outcome.transaction_id.is_none());
    }

    #[tokio::test]
    async fn test_approved_credit_card_id_scheme() {
        let gateway = gateway(GatewayConfig::always_approve());
        let details = PaymentInfo::credit_card("4111111111111111", "12/30", "123");
        let outcome = gateway
            .charge(&PaymentMethod::CreditCard, &details, 74.35)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Payment processed successfully");
        let id = outcome.transaction_id.unwrap();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts[0], "CC");
        assert_eq!(parts[1], "1704110400"); // pinned clock
        assert_eq!(parts[2].len(), 4);
    }

    #[tokio::test]
    async fn test_declined_credit_card() {
        let gateway = gateway(GatewayConfig::always_decline());
        let details = PaymentInfo::credit_card("4111111111111111", "12/30", "123");
        let outcome = gateway
            .charge(&PaymentMethod::CreditCard, &details, 74.35)
            .await;

        assert!(!outcome.success);
        assert!(outcome.transaction_id.is_none());
        assert_eq!(outcome.message, "Payment declined by issuer");
    }

    #[tokio::test]
    async fn test_paypal_requires_email() {
        let gateway = gateway(GatewayConfig::always_approve());
        let mut details = PaymentInfo::paypal("ada@example.com");
        details.email = None;
        let outcome = gateway.charge(&PaymentMethod::Paypal, &details, 10.0).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "PayPal email is required");
    }

    #[tokio::test]
    async fn test_paypal_id_prefix_and_failure_message() {
        let approve = gateway(GatewayConfig::always_approve());
        let details = PaymentInfo::paypal("ada@example.com");
        let outcome = approve
            .charge(&PaymentMethod::Paypal, &details, 10.0)
            .await;
        assert!(outcome.transaction_id.unwrap().starts_with("PP-"));

        let decline = gateway(GatewayConfig::always_decline());
        let outcome = decline
            .charge(&PaymentMethod::Paypal, &details, 10.0)
            .await;
        assert_eq!(outcome.message, "PayPal payment failed");
    }

    #[tokio::test]
    async fn test_unsupported_method_names_the_method() {
        let gateway = gateway(GatewayConfig::always_approve());
        let details = PaymentInfo {
            method: Some(PaymentMethod::Other("bitcoin".into())),
            card_number: None,
            expiry: None,
            cvv: None,
            email: None,
        };
        let outcome = gateway
            .charge(&PaymentMethod::Other("bitcoin".into()), &details, 10.0)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Unsupported payment method: bitcoin");
    }
}
