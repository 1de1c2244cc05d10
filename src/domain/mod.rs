// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the domain records and all order-specific logic:
// - Externally owned records (CustomerRecord, ProductRecord)
// - Order request/result types
// - Errors (OrderError enum)
// - Pure pricing and fulfillment rules
//
// This layer is completely separate from the store and gateway seams.
//
// ============================================================================

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{CustomerRecord, CustomerType};
pub use product::ProductRecord;
