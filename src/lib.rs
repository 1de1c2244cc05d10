// ============================================================================
// order_pipeline - Single-Order Processing Pipeline
// ============================================================================
//
// One component: transform an OrderRequest into an OrderResult through an
// ordered stage sequence with a single commit point (payment). External
// collaborators are injected trait objects; see `stores` and `payment`.
//
// ============================================================================

pub mod domain;
pub mod payment;
pub mod pipeline;
pub mod stores;
pub mod utils;

pub use domain::order::{OrderRequest, OrderResult, OrderStatus};
pub use pipeline::OrderPipeline;
