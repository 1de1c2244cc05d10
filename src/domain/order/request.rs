use serde::{Deserialize, Serialize};

// ============================================================================
// Order Request - Caller-Owned Input
// ============================================================================

/// One requested (product, quantity) pair within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Destination address. All five fields are required by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn is_domestic(&self) -> bool {
        self.country == "US"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    /// Anything the gateway does not support; kept verbatim so failure
    /// messages can name it.
    #[serde(untagged)]
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Other(name) => name.as_str(),
        }
    }
}

/// Payment details supplied by the caller. Field requirements depend on
/// the method and are enforced by the gateway, not by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
    pub email: Option<String>,
}

impl PaymentInfo {
    pub fn credit_card(number: &str, expiry: &str, cvv: &str) -> Self {
        Self {
            method: Some(PaymentMethod::CreditCard),
            card_number: Some(number.to_string()),
            expiry: Some(expiry.to_string()),
            cvv: Some(cvv.to_string()),
            email: None,
        }
    }

    pub fn paypal(email: &str) -> Self {
        Self {
            method: Some(PaymentMethod::Paypal),
            card_number: None,
            expiry: None,
            cvv: None,
            email: Some(email.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    Express,
    Priority,
    Standard,
}

impl Default for ShippingMethod {
    fn default() -> Self {
        ShippingMethod::Standard
    }
}

impl ShippingMethod {
    pub fn as_str(&self) -> &str {
        match self {
            ShippingMethod::Express => "express",
            ShippingMethod::Priority => "priority",
            ShippingMethod::Standard => "standard",
        }
    }
}

/// Incoming order. Read-only to the pipeline; one result is produced per
/// request and no state is shared between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: String,
    pub customer_id: String,
    pub items: Vec<LineItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_info: Option<PaymentInfo>,
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
}
