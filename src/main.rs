use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_pipeline::domain::customer::{CustomerRecord, CustomerType};
use order_pipeline::domain::order::{LineItem, OrderRequest, PaymentInfo, ShippingAddress, ShippingMethod};
use order_pipeline::domain::product::ProductRecord;
use order_pipeline::payment::{GatewayConfig, SimulatedGateway};
use order_pipeline::stores::{
    InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore, InMemoryTransactionLog,
    RecordingNotifier,
};
use order_pipeline::utils::{SystemClock, ThreadEntropy};
use order_pipeline::OrderPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_pipeline=debug")),
        )
        .init();

    tracing::info!("🚀 Starting order pipeline demo");

    // === 1. Seed the in-memory stores ===
    let customers = Arc::new(InMemoryCustomerStore::new());
    customers
        .insert(CustomerRecord {
            id: "C1001".into(),
            customer_type: CustomerType::Premium,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            orders_count: 4,
            total_spent: 612.40,
            last_order_date: None,
        })
        .await;

    let products = Arc::new(InMemoryProductStore::new());
    products
        .insert(ProductRecord {
            id: "P100".into(),
            name: "Mechanical Keyboard".into(),
            price: 89.99,
            stock: 25,
            active: true,
        })
        .await;
    products
        .insert(ProductRecord {
            id: "P200".into(),
            name: "USB-C Cable".into(),
            price: 12.50,
            stock: 200,
            active: true,
        })
        .await;

    let orders = Arc::new(InMemoryOrderStore::new());
    let transactions = Arc::new(InMemoryTransactionLog::new());
    let notifier = Arc::new(RecordingNotifier::new());

    // === 2. Wire the pipeline ===
    let clock = Arc::new(SystemClock);
    let entropy = Arc::new(ThreadEntropy);
    let gateway = Arc::new(SimulatedGateway::new(
        GatewayConfig::default(),
        clock.clone(),
        entropy.clone(),
    ));

    let pipeline = OrderPipeline::new(
        customers,
        products,
        orders.clone(),
        transactions.clone(),
        notifier.clone(),
        gateway,
        clock,
        entropy,
    );

    // === 3. Process one order end to end ===
    let order_id = format!("ORD-{}", uuid::Uuid::new_v4());
    let request = OrderRequest {
        order_id: order_id.clone(),
        customer_id: "C1001".into(),
        items: vec![
            LineItem {
                product_id: "P100".into(),
                quantity: 1,
            },
            LineItem {
                product_id: "P200".into(),
                quantity: 3,
            },
        ],
        shipping_address: Some(ShippingAddress {
            street: "1 Analytical Engine Way".into(),
            city: "Sacramento".into(),
            state: "CA".into(),
            zip: "94203".into(),
            country: "US".into(),
        }),
        payment_info: Some(PaymentInfo::credit_card("4111111111111111", "12/30", "123")),
        coupon_code: Some("SAVE20".into()),
        shipping_method: ShippingMethod::Priority,
    };

    let result = pipeline.process(&request).await;

    tracing::info!(
        order_id = %result.order_id,
        status = ?result.status,
        "✅ Pipeline finished"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(record) = orders.get(&order_id).await {
        tracing::info!(total = record.total, "Order record persisted");
    }
    for entry in transactions.entries().await {
        tracing::info!(
            transaction_id = entry.transaction_id.as_deref().unwrap_or("-"),
            total = entry.total,
            "Transaction logged"
        );
    }
    for email in notifier.sent().await {
        tracing::info!(to = %email.to, subject = %email.subject, "Confirmation email captured");
    }

    Ok(())
}
