// ============================================================================
// Order Business Rule Errors
// ============================================================================
//
// Pre-commit taxonomy: every variant here aborts the order before any
// external state is touched. Display strings are user-visible and name
// the offending field or entity; store internals are never leaked.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    // --- Validation ---
    #[error("Customer ID is required")]
    MissingCustomerId,

    #[error("Order must contain at least one item")]
    EmptyItems,

    #[error("Product ID is required for all items")]
    MissingProductId,

    #[error("Quantity must be positive for all items")]
    InvalidQuantity,

    #[error("Shipping address is required")]
    MissingShippingAddress,

    #[error("Shipping address {0} is required")]
    MissingAddressField(&'static str),

    #[error("Payment information is required")]
    MissingPaymentInfo,

    #[error("Payment method is required")]
    MissingPaymentMethod,

    // --- Lookup ---
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Error loading customer data")]
    CustomerLoadFailed,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product is not available: {0}")]
    ProductInactive(String),

    #[error("Insufficient stock for product: {0}")]
    InsufficientStock(String),

    #[error("Error processing product: {0}")]
    ProductLoadFailed(String),
}
