use std::sync::Arc;

use crate::domain::customer::CustomerRecord;
use crate::domain::order::{
    estimated_delivery, price_order, tracking_number, LineItem, OrderError, OrderLine,
    OrderRecord, OrderRequest, OrderResult, OrderStatus, PaymentInfo, PaymentMethod,
    PricingBreakdown, ShippingAddress, ShippingLabel, TransactionEntry,
};
use crate::payment::PaymentGateway;
use crate::stores::{CustomerStore, Notifier, OrderStore, ProductStore, TransactionLog};
use crate::utils::{Clock, Entropy};

// ============================================================================
// Order Pipeline - Orchestration
// ============================================================================
//
// Transforms one OrderRequest into one OrderResult through an ordered
// sequence of stages:
//
//   validate -> load customer -> resolve items -> price   (gatekeepers)
//   -> charge payment                                     (commit point)
//   -> inventory -> label -> delivery -> notify
//   -> customer update -> persist -> transaction log      (best effort)
//   -> finalize
//
// Gatekeeper failures abort with no side effects at all. A failed charge
// aborts with pricing populated but nothing written. Once payment clears,
// every remaining stage is wrapped in its own failure boundary: a failure
// is recorded as a warning message and processing moves on. The order
// completes even if every post-commit step fails.
//
// ============================================================================

/// Planned stock change, computed during inventory resolution and applied
/// only after payment succeeds
#[derive(Debug, Clone)]
struct InventoryDelta {
    product_id: String,
    new_stock: u32,
}

struct ResolvedItems {
    subtotal: f64,
    lines: Vec<OrderLine>,
    deltas: Vec<InventoryDelta>,
}

pub struct OrderPipeline {
    customers: Arc<dyn CustomerStore>,
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    transactions: Arc<dyn TransactionLog>,
    notifier: Arc<dyn Notifier>,
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn Entropy>,
}

impl OrderPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        transactions: Arc<dyn TransactionLog>,
        notifier: Arc<dyn Notifier>,
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
        entropy: Arc<dyn Entropy>,
    ) -> Self {
        Self {
            customers,
            products,
            orders,
            transactions,
            notifier,
            gateway,
            clock,
            entropy,
        }
    }

    /// Run the full pipeline for one order. Never returns an error: every
    /// internal fault is translated into the result's status and messages.
    pub async fn process(&self, request: &OrderRequest) -> OrderResult {
        tracing::info!(order_id = %request.order_id, "Processing order");
        let mut result = OrderResult::started(&request.order_id, self.clock.now());

        // --- Gatekeepers: no side effects until payment clears ---

        tracing::debug!("Validating order data");
        let (address, payment, method) = match validate(request) {
            Ok(validated) => validated,
            Err(error) => return result.fail(error),
        };

        tracing::debug!(customer_id = %request.customer_id, "Loading customer data");
        let mut customer = match self.load_customer(&request.customer_id).await {
            Ok(customer) => customer,
            Err(error) => return result.fail(error),
        };

        tracing::debug!("Checking inventory");
        let resolved = match self.resolve_items(&request.items).await {
            Ok(resolved) => resolved,
            Err(error) => return result.fail(error),
        };
        result.items = resolved.lines.clone();

        tracing::debug!(subtotal = resolved.subtotal, "Calculating pricing");
        let pricing = price_order(
            resolved.subtotal,
            address,
            &customer,
            request.coupon_code.as_deref(),
        );
        result.messages.extend(pricing.messages);
        let breakdown = pricing.breakdown;
        result.pricing = Some(breakdown.clone());

        // --- Commit point ---

        tracing::debug!("Processing payment");
        let payment_outcome = self.gateway.charge(method, payment, breakdown.total).await;
        result.payment_result = Some(payment_outcome.clone());
        if !payment_outcome.success {
            result.messages.push(payment_outcome.message.clone());
            result.status = OrderStatus::PaymentError;
            return result;
        }

        // --- Best-effort tail: warnings, never aborts ---

        tracing::debug!("Updating inventory");
        for delta in &resolved.deltas {
            if let Err(error) = self.apply_inventory_delta(delta).await {
                tracing::error!(
                    product_id = %delta.product_id,
                    error = %error,
                    "Inventory update failed"
                );
                result.warn(format!(
                    "Warning: Inventory update failed for product {}",
                    delta.product_id
                ));
            }
        }

        tracing::debug!("Generating shipping label");
        let label = ShippingLabel {
            order_id: request.order_id.clone(),
            customer_name: customer.full_name(),
            address: address.clone(),
            shipping_method: request.shipping_method,
            tracking_number: tracking_number(
                self.clock.epoch_seconds(),
                self.entropy.number_in(10_000..100_000),
            ),
            generated_at: self.clock.now(),
        };
        result.shipping_label = Some(label.clone());

        let delivery = estimated_delivery(
            self.clock.today(),
            request.shipping_method,
            address.is_domestic(),
        );
        result.estimated_delivery = Some(delivery);

        tracing::debug!("Sending confirmation email");
        if let Some(email) = customer.email.clone() {
            let subject = format!("Order Confirmation #{}", request.order_id);
            let body = confirmation_body(
                &customer,
                request,
                method,
                &result.items,
                &breakdown,
                &label,
                delivery,
                self.clock.today(),
            );
            match self.notifier.send(&email, &subject, &body).await {
                Ok(()) => result.email_sent = Some(true),
                Err(error) => {
                    tracing::error!(error = %error, "Failed to send confirmation email");
                    result.warn("Warning: Failed to send confirmation email");
                    result.email_sent = Some(false);
                }
            }
        }

        tracing::debug!("Updating customer records");
        customer.orders_count += 1;
        customer.total_spent += breakdown.total;
        customer.last_order_date = Some(self.clock.today());
        if let Err(error) = self.customers.put(&customer).await {
            tracing::error!(error = %error, "Failed to update customer records");
            result.warn("Warning: Failed to update customer records");
        }

        tracing::debug!("Saving order record");
        let record = OrderRecord {
            order_id: request.order_id.clone(),
            customer_id: request.customer_id.clone(),
            order_date: self.clock.today(),
            items: result.items.clone(),
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            shipping: breakdown.shipping,
            discount: breakdown.discount,
            total: breakdown.total,
            payment_method: method.as_str().to_string(),
            transaction_id: payment_outcome.transaction_id.clone(),
            shipping_address: address.clone(),
            shipping_label: label,
            estimated_delivery: delivery,
            status: "processing".to_string(),
        };
        if let Err(error) = self.orders.put(&request.order_id, &record).await {
            tracing::error!(error = %error, "Failed to save order record");
            result.warn("Warning: Failed to save order record");
        }

        tracing::debug!("Logging transaction");
        let entry = TransactionEntry {
            timestamp: self.clock.now(),
            order_id: request.order_id.clone(),
            customer_id: request.customer_id.clone(),
            total: breakdown.total,
            payment_method: method.as_str().to_string(),
            transaction_id: payment_outcome.transaction_id,
            status: "completed".to_string(),
        };
        if let Err(error) = self.transactions.append(&entry).await {
            // Non-critical, no result message
            tracing::error!(error = %error, "Failed to append transaction log entry");
        }

        result.status = OrderStatus::Completed;
        let completed = self.clock.now();
        result.completed_at = Some(completed);
        result.processing_time =
            Some((completed - result.started_at).num_milliseconds() as f64 / 1000.0);

        tracing::info!(order_id = %request.order_id, "Order processed successfully");
        result
    }

    async fn load_customer(&self, customer_id: &str) -> Result<CustomerRecord, OrderError> {
        match self.customers.get(customer_id).await {
            Ok(Some(customer)) => Ok(customer),
            Ok(None) => Err(OrderError::CustomerNotFound(customer_id.to_string())),
            Err(error) => {
                tracing::error!(error = %error, "Error loading customer data");
                Err(OrderError::CustomerLoadFailed)
            }
        }
    }

    /// Resolve every line item against the catalog, accumulating the
    /// subtotal and the planned stock deltas. The first failing item
    /// aborts the whole order; nothing is written here.
    async fn resolve_items(&self, items: &[LineItem]) -> Result<ResolvedItems, OrderError> {
        let mut resolved = ResolvedItems {
            subtotal: 0.0,
            lines: Vec::with_capacity(items.len()),
            deltas: Vec::with_capacity(items.len()),
        };

        for item in items {
            let product = match self.products.get(&item.product_id).await {
                Ok(Some(product)) => product,
                Ok(None) => return Err(OrderError::ProductNotFound(item.product_id.clone())),
                Err(error) => {
                    tracing::error!(
                        product_id = %item.product_id,
                        error = %error,
                        "Error processing product"
                    );
                    return Err(OrderError::ProductLoadFailed(item.product_id.clone()));
                }
            };

            if !product.active {
                return Err(OrderError::ProductInactive(item.product_id.clone()));
            }
            if product.stock < item.quantity {
                return Err(OrderError::InsufficientStock(item.product_id.clone()));
            }

            let line_total = product.price * item.quantity as f64;
            resolved.subtotal += line_total;
            resolved.deltas.push(InventoryDelta {
                product_id: item.product_id.clone(),
                new_stock: product.stock - item.quantity,
            });
            resolved.lines.push(OrderLine {
                product_id: item.product_id.clone(),
                name: product.name,
                price: product.price,
                quantity: item.quantity,
                total: line_total,
            });
        }

        Ok(resolved)
    }

    async fn apply_inventory_delta(&self, delta: &InventoryDelta) -> anyhow::Result<()> {
        let mut product = self
            .products
            .get(&delta.product_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("product disappeared: {}", delta.product_id))?;
        product.stock = delta.new_stock;
        self.products.put(&product).await
    }
}

/// Fail-fast validation: the first violated rule aborts, naming the
/// specific missing or invalid field
fn validate(
    request: &OrderRequest,
) -> Result<(&ShippingAddress, &PaymentInfo, &PaymentMethod), OrderError> {
    if request.customer_id.is_empty() {
        return Err(OrderError::MissingCustomerId);
    }
    if request.items.is_empty() {
        return Err(OrderError::EmptyItems);
    }
    for item in &request.items {
        if item.product_id.is_empty() {
            return Err(OrderError::MissingProductId);
        }
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity);
        }
    }

    let address = request
        .shipping_address
        .as_ref()
        .ok_or(OrderError::MissingShippingAddress)?;
    let fields = [
        ("street", &address.street),
        ("city", &address.city),
        ("state", &address.state),
        ("zip", &address.zip),
        ("country", &address.country),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            return Err(OrderError::MissingAddressField(name));
        }
    }

    let payment = request
        .payment_info
        .as_ref()
        .ok_or(OrderError::MissingPaymentInfo)?;
    let method = payment
        .method
        .as_ref()
        .ok_or(OrderError::MissingPaymentMethod)?;

    Ok((address, payment, method))
}

#[allow(clippy::too_many_arguments)]
fn confirmation_body(
    customer: &CustomerRecord,
    request: &OrderRequest,
    method: &PaymentMethod,
    lines: &[OrderLine],
    pricing: &PricingBreakdown,
    label: &ShippingLabel,
    estimated_delivery: chrono::NaiveDate,
    order_date: chrono::NaiveDate,
) -> String {
    let salutation = if customer.first_name.is_empty() {
        "Valued Customer"
    } else {
        customer.first_name.as_str()
    };

    let mut body = format!(
        "Dear {},\n\n\
         Thank you for your order! We're pleased to confirm that your order \
         has been received and is being processed.\n\n\
         Order Details:\n\
         - Order Number: {}\n\
         - Order Date: {}\n\
         - Payment Method: {}\n\
         - Tracking Number: {}\n\
         - Estimated Delivery: {}\n\n\
         Items:\n",
        salutation,
        request.order_id,
        order_date,
        method.as_str(),
        label.tracking_number,
        estimated_delivery,
    );

    for line in lines {
        body.push_str(&format!(
            "- {} x {} - ${:.2}\n",
            line.name, line.quantity, line.total
        ));
    }

    body.push_str(&format!(
        "\nSubtotal: ${:.2}\nShipping: ${:.2}\nTax: ${:.2}\nDiscount: ${:.2}\nTotal: ${:.2}\n\n\
         Shipping Address:\n{}\n{}\n{}, {} {}\n{}\n\n\
         Thank you for shopping with us!\n",
        pricing.subtotal,
        pricing.shipping,
        pricing.tax,
        pricing.discount,
        pricing.total,
        label.customer_name,
        label.address.street,
        label.address.city,
        label.address.state,
        label.address.zip,
        label.address.country,
    ));

    body
}

// ============================================================================
// Pipeline Tests
// ============================================================================
