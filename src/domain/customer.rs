use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Record - Externally Owned Profile
// ============================================================================

/// Customer tier used by the discount rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Regular,
    Premium,
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Regular
    }
}

/// Profile owned by the customer store. The pipeline reads it during
/// pricing and writes it back only after a fully successful order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub orders_count: u32,
    #[serde(default)]
    pub total_spent: f64,
    pub last_order_date: Option<NaiveDate>,
}

impl CustomerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_type_defaults_to_regular() {
        let json = r#"{"id":"C1","first_name":"Ada","last_name":"Lovelace",
                       "email":null,"last_order_date":null}"#;
        let customer: CustomerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(customer.customer_type, CustomerType::Regular);
        assert_eq!(customer.orders_count, 0);
    }

    #[test]
    fn test_customer_type_serialization() {
        let json = serde_json::to_string(&CustomerType::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn test_full_name() {
        let customer = CustomerRecord {
            id: "C1".into(),
            customer_type: CustomerType::Regular,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            orders_count: 0,
            total_spent: 0.0,
            last_order_date: None,
        };
        assert_eq!(customer.full_name(), "Ada Lovelace");
    }
}
