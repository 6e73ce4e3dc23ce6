use payment_notifier::config::DispatchConfig;
use payment_notifier::domain::payload::SubmissionPayload;
use payment_notifier::domain::ports::{GatewayResponse, PaymentGatewayRef};
use payment_notifier::infrastructure::http::HttpPaymentGateway;
use payment_notifier::infrastructure::in_memory::InMemoryGateway;
use std::sync::Arc;

fn payload(customer_id: &str) -> SubmissionPayload {
    SubmissionPayload {
        api_key: "key".to_string(),
        customer_id: customer_id.to_string(),
        phone: "600".to_string(),
        transaction_ref: "TX".to_string(),
        amount: 1.0,
        payment_date: "2024-01-01".to_string(),
    }
}

#[tokio::test]
async fn test_gateways_as_trait_objects() {
    let in_memory =
        InMemoryGateway::new().with_response("C1", GatewayResponse::text(202, "queued"));
    let config = DispatchConfig::new("http://127.0.0.1:1/pagos", "key").unwrap();

    let gateways: Vec<PaymentGatewayRef> = vec![
        Arc::new(in_memory.clone()),
        Arc::new(HttpPaymentGateway::new(&config).unwrap()),
    ];

    // Verify Send + Sync by spawning tasks
    let handles: Vec<_> = gateways
        .into_iter()
        .map(|gateway| tokio::spawn(async move { gateway.submit(&payload("C1")).await }))
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(results[0].as_ref().unwrap().status, 202);
    assert!(results[1].is_err(), "nothing listens on port 1");
    assert_eq!(in_memory.submissions().await.len(), 1);
}
