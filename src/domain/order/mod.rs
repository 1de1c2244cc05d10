// ============================================================================
// Order Domain - Request, Result, and Business Rules
// ============================================================================
//
// This module contains ALL order-specific code:
// - Request types (OrderRequest, LineItem, ShippingAddress, PaymentInfo)
// - Result types (OrderResult, PricingBreakdown, ShippingLabel, ...)
// - Errors (OrderError enum)
// - Pricing rules (tax, shipping, discounts, coupons)
// - Fulfillment rules (shipping label, delivery estimation)
//
// This is completely separate from the store and gateway infrastructure.
//
// ============================================================================

pub mod errors;
pub mod fulfillment;
pub mod pricing;
pub mod request;
pub mod result;

// Re-export for convenience
pub use errors::*;
pub use fulfillment::*;
pub use pricing::*;
pub use request::*;
pub use result::*;
