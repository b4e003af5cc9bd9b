mod common;

use common::TestBackend;
use smartcare::application::topup::TopUpSubmitter;
use smartcare::domain::account::Balance;
use smartcare::domain::topup::{TopUpMethod, TopUpStatus};
use smartcare::error::SmartCareError;
use smartcare::infrastructure::in_memory::InMemoryTopUpStore;

#[tokio::test]
async fn submit_creates_one_pending_request_and_no_credit() {
    let backend = TestBackend::seeded(10_000).await;
    let store = InMemoryTopUpStore::new();
    let submitter = TopUpSubmitter::new(Box::new(store.clone()));

    let request = submitter
        .submit(&backend.session, 50_000, TopUpMethod::Qris)
        .await
        .unwrap();
    assert_eq!(request.status, TopUpStatus::Pending);
    assert_eq!(request.amount.value(), 50_000);
    assert_eq!(request.method, TopUpMethod::Qris);

    let history = submitter.history(&backend.session).await.unwrap();
    assert_eq!(history, vec![request]);

    // Submission never touches the balance.
    assert_eq!(backend.balance().await, Balance::new(10_000));
}

#[tokio::test]
async fn invalid_submissions_create_no_record() {
    let backend = TestBackend::seeded(0).await;
    let submitter = TopUpSubmitter::new(Box::new(InMemoryTopUpStore::new()));

    let result = submitter
        .submit(&backend.session, 0, TopUpMethod::TransferBank)
        .await;
    assert!(matches!(result, Err(SmartCareError::Validation(_))));

    // An unrecognized method never parses in the first place.
    assert!(matches!(
        "pulsa".parse::<TopUpMethod>(),
        Err(SmartCareError::Validation(_))
    ));

    assert!(
        submitter
            .history(&backend.session)
            .await
            .unwrap()
            .is_empty()
    );
}
