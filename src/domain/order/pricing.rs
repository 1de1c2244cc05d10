use crate::domain::customer::{CustomerRecord, CustomerType};

use super::request::ShippingAddress;
use super::result::PricingBreakdown;

// ============================================================================
// Pricing Rules - Pure Functions
// ============================================================================
//
// Tax, shipping, and discount computation for one order. Everything here
// is a pure function of its inputs: calling twice with identical inputs
// yields identical output, which the pipeline relies on and the tests
// assert.
//
// Rounding contract: tax and discount are each rounded to cents first,
// then the total is computed from the rounded parts and rounded again.
// The two-step form can differ from rounding the raw sum once; callers
// depend on this exact behavior.
//
// ============================================================================

/// States with no sales tax
const NO_SALES_TAX_STATES: [&str; 4] = ["DE", "MT", "NH", "OR"];

const CALIFORNIA_TAX_RATE: f64 = 0.0725;
const NEW_YORK_TAX_RATE: f64 = 0.045;
const DEFAULT_TAX_RATE: f64 = 0.08;

/// Free domestic shipping at or above this subtotal
const FREE_SHIPPING_THRESHOLD: f64 = 100.0;
const DOMESTIC_SHIPPING: f64 = 10.0;
const INTERNATIONAL_SHIPPING: f64 = 25.0;

const PREMIUM_DISCOUNT_RATE: f64 = 0.10;
const LOYALTY_DISCOUNT_RATE: f64 = 0.05;
/// Loyalty discount kicks in strictly above this many lifetime orders
const LOYALTY_ORDER_THRESHOLD: u32 = 10;

const COUPON_SAVE20: &str = "SAVE20";
const COUPON_FREESHIP: &str = "FREESHIP";
const SAVE20_DISCOUNT_RATE: f64 = 0.20;

/// Round half away from zero to 2 decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sales tax rate keyed by the U.S. state code in the address
pub fn tax_rate(state: &str) -> f64 {
    if NO_SALES_TAX_STATES.contains(&state) {
        0.0
    } else if state == "CA" {
        CALIFORNIA_TAX_RATE
    } else if state == "NY" {
        NEW_YORK_TAX_RATE
    } else {
        DEFAULT_TAX_RATE
    }
}

/// Flat-rate shipping before coupons are considered
pub fn base_shipping(address: &ShippingAddress, subtotal: f64) -> f64 {
    if address.is_domestic() {
        if subtotal >= FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            DOMESTIC_SHIPPING
        }
    } else {
        INTERNATIONAL_SHIPPING
    }
}

/// Breakdown plus the human-readable discount messages to surface on the
/// order result
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub breakdown: PricingBreakdown,
    pub messages: Vec<String>,
}

/// Price one order. Premium customers get 10% of subtotal; otherwise a
/// customer past the loyalty threshold gets 5%. The two are mutually
/// exclusive (premium wins). A coupon is evaluated independently on top:
/// SAVE20 adds 20% of subtotal to the discount, FREESHIP zeroes the
/// shipping cost instead.
pub fn price_order(
    subtotal: f64,
    address: &ShippingAddress,
    customer: &CustomerRecord,
    coupon_code: Option<&str>,
) -> PricingOutcome {
    let mut messages = Vec::new();

    let tax = round_cents(subtotal * tax_rate(&address.state));
    let mut shipping = base_shipping(address, subtotal);

    let mut discount = 0.0;
    if customer.customer_type == CustomerType::Premium {
        discount += subtotal * PREMIUM_DISCOUNT_RATE;
        messages.push("Applied 10% premium customer discount".to_string());
    } else if customer.orders_count > LOYALTY_ORDER_THRESHOLD {
        discount += subtotal * LOYALTY_DISCOUNT_RATE;
        messages.push("Applied 5% loyalty discount".to_string());
    }

    match coupon_code {
        Some(COUPON_SAVE20) => {
            discount += subtotal * SAVE20_DISCOUNT_RATE;
            messages.push("Applied 20% coupon discount".to_string());
        }
        Some(COUPON_FREESHIP) => {
            shipping = 0.0;
            messages.push("Applied free shipping coupon".to_string());
        }
        _ => {}
    }

    let discount = round_cents(discount);
    let total = round_cents(subtotal + tax + shipping - discount);

    PricingOutcome {
        breakdown: PricingBreakdown {
            subtotal,
            tax,
            shipping,
            discount,
            total,
        },
        messages,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address(state: &str, country: &str) -> ShippingAddress {
        ShippingAddress {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: state.into(),
            zip: "00001".into(),
            country: country.into(),
        }
    }

    fn customer(customer_type: CustomerType, orders_count: u32) -> CustomerRecord {
        CustomerRecord {
            id: "C1".into(),
            customer_type,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            orders_count,
            total_spent: 0.0,
            last_order_date: None,
        }
    }

    #[test]
    fn test_tax_rate_table() {
        for state in ["DE", "MT", "NH", "OR"] {
            assert_eq!(tax_rate(state), 0.0);
        }
        assert_eq!(tax_rate("CA"), 0.0725);
        assert_eq!(tax_rate("NY"), 0.045);
        assert_eq!(tax_rate("TX"), 0.08);
        assert_eq!(tax_rate("WA"), 0.08);
    }

    #[test]
    fn test_shipping_tiers() {
        assert_eq!(base_shipping(&address("CA", "US"), 99.99), 10.0);
        assert_eq!(base_shipping(&address("CA", "US"), 100.0), 0.0);
        assert_eq!(base_shipping(&address("CA", "US"), 250.0), 0.0);
        assert_eq!(base_shipping(&address("ON", "CA"), 250.0), 25.0);
    }

    #[test]
    fn test_regular_customer_california_scenario() {
        // One item at 20.00 x 3, CA, US, regular customer, no coupon
        let outcome = price_order(
            60.0,
            &address("CA", "US"),
            &customer(CustomerType::Regular, 0),
            None,
        );
        assert_eq!(outcome.breakdown.subtotal, 60.0);
        assert_eq!(outcome.breakdown.tax, 4.35);
        assert_eq!(outcome.breakdown.shipping, 10.0);
        assert_eq!(outcome.breakdown.discount, 0.0);
        assert_eq!(outcome.breakdown.total, 74.35);
        assert!(outcome.messages.is_empty());
    }

    #[test]
    fn test_premium_customer_california_scenario() {
        let outcome = price_order(
            60.0,
            &address("CA", "US"),
            &customer(CustomerType::Premium, 0),
            None,
        );
        assert_eq!(outcome.breakdown.discount, 6.0);
        assert_eq!(outcome.breakdown.total, 68.35);
        assert_eq!(
            outcome.messages,
            vec!["Applied 10% premium customer discount"]
        );
    }

    #[test]
    fn test_premium_discount_not_stacked_with_loyalty() {
        // Premium customer with a long order history still gets exactly 10%
        let outcome = price_order(
            100.0,
            &address("DE", "US"),
            &customer(CustomerType::Premium, 50),
            None,
        );
        assert_eq!(outcome.breakdown.discount, 10.0);
        assert_eq!(outcome.messages.len(), 1);
    }

    #[test]
    fn test_loyalty_discount_strictly_above_threshold() {
        let at_threshold = price_order(
            100.0,
            &address("DE", "US"),
            &customer(CustomerType::Regular, 10),
            None,
        );
        assert_eq!(at_threshold.breakdown.discount, 0.0);

        let past_threshold = price_order(
            100.0,
            &address("DE", "US"),
            &customer(CustomerType::Regular, 11),
            None,
        );
        assert_eq!(past_threshold.breakdown.discount, 5.0);
        assert_eq!(past_threshold.messages, vec!["Applied 5% loyalty discount"]);
    }

    #[test]
    fn test_save20_coupon_is_additive() {
        let without = price_order(
            80.0,
            &address("NY", "US"),
            &customer(CustomerType::Premium, 0),
            None,
        );
        let with = price_order(
            80.0,
            &address("NY", "US"),
            &customer(CustomerType::Premium, 0),
            Some("SAVE20"),
        );
        // 20% of subtotal on top of the premium discount
        assert_eq!(
            with.breakdown.discount,
            round_cents(without.breakdown.discount + 16.0)
        );
    }

    #[test]
    fn test_freeship_coupon_zeroes_shipping() {
        let international = price_order(
            40.0,
            &address("BC", "CA"),
            &customer(CustomerType::Regular, 0),
            Some("FREESHIP"),
        );
        assert_eq!(international.breakdown.shipping, 0.0);
        assert_eq!(international.breakdown.discount, 0.0);

        let domestic = price_order(
            40.0,
            &address("TX", "US"),
            &customer(CustomerType::Regular, 0),
            Some("FREESHIP"),
        );
        assert_eq!(domestic.breakdown.shipping, 0.0);
    }

    #[test]
    fn test_unknown_coupon_is_ignored() {
        let outcome = price_order(
            40.0,
            &address("TX", "US"),
            &customer(CustomerType::Regular, 0),
            Some("BOGUS"),
        );
        assert_eq!(outcome.breakdown.shipping, 10.0);
        assert_eq!(outcome.breakdown.discount, 0.0);
        assert!(outcome.messages.is_empty());
    }

    #[test]
    fn test_total_uses_independently_rounded_parts() {
        let outcome = price_order(
            33.4,
            &address("TX", "US"),
            &customer(CustomerType::Regular, 0),
            None,
        );
        // tax = round(33.4 * 0.08) = round(2.672) = 2.67, rounded before
        // the sum rather than after
        assert_eq!(outcome.breakdown.tax, 2.67);
        assert_eq!(
            outcome.breakdown.total,
            round_cents(33.4 + 2.67 + 10.0 - 0.0)
        );
    }

    #[test]
    fn test_pricing_is_pure() {
        let addr = address("CA", "US");
        let cust = customer(CustomerType::Premium, 3);
        let first = price_order(123.45, &addr, &cust, Some("SAVE20"));
        let second = price_order(123.45, &addr, &cust, Some("SAVE20"));
        assert_eq!(first, second);
    }
}
