mod common;

use common::TestBackend;
use smartcare::domain::account::{Amount, Balance};
use smartcare::domain::bill::Bill;
use smartcare::domain::ports::BillStore;
use uuid::Uuid;

/// Two sessions race to pay two bills that each consume the whole balance.
/// The conditional debit guarantees at most one settlement goes through;
/// the loser sees either a stale-balance conflict or insufficient funds,
/// depending on interleaving.
#[tokio::test]
async fn concurrent_payments_cannot_overspend() {
    let backend = TestBackend::seeded(150_000).await;

    let first = Bill::new(
        backend.session.account_id,
        Uuid::new_v4(),
        Amount::new(150_000).unwrap(),
    );
    let second = Bill::new(
        backend.session.account_id,
        Uuid::new_v4(),
        Amount::new(150_000).unwrap(),
    );
    backend.bills.insert(first.clone()).await.unwrap();
    backend.bills.insert(second.clone()).await.unwrap();

    let coordinator_a = backend.coordinator();
    let coordinator_b = backend.coordinator();
    let (result_a, result_b) = tokio::join!(
        coordinator_a.pay_bill(&backend.session, first.id),
        coordinator_b.pay_bill(&backend.session, second.id),
    );

    let successes = [&result_a, &result_b]
        .iter()
        .filter(|result| result.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one payment may win the balance");
    assert_eq!(backend.balance().await, Balance::new(0));
}

#[tokio::test]
async fn sequential_payments_drain_balance_exactly() {
    let backend = TestBackend::seeded(300_000).await;
    let coordinator = backend.coordinator();

    for _ in 0..2 {
        let bill = Bill::new(
            backend.session.account_id,
            Uuid::new_v4(),
            Amount::new(150_000).unwrap(),
        );
        backend.bills.insert(bill.clone()).await.unwrap();
        coordinator.pay_bill(&backend.session, bill.id).await.unwrap();
    }

    assert_eq!(backend.balance().await, Balance::new(0));

    // A third identical payment has nothing left to spend.
    let bill = Bill::new(
        backend.session.account_id,
        Uuid::new_v4(),
        Amount::new(150_000).unwrap(),
    );
    backend.bills.insert(bill.clone()).await.unwrap();
    assert!(coordinator.pay_bill(&backend.session, bill.id).await.is_err());
}
