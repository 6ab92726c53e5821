//! End-to-end transfer flow tests against the in-memory store
//!
//! Covers the documented scenarios plus the concurrency properties:
//! no double-spend from the same payer, no deadlock on
//! opposite-direction pairs.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use payflow::account::{AccountKind, NewAccount};
use payflow::balance::Balance;
use payflow::core_types::AccountId;
use payflow::store::{AccountStore, BalanceStore, MemoryStore, TransferStore};
use payflow::transfer::{
    RecordingNotifier, StaticAuthorizationGate, TransferError, TransferOrchestrator,
    TransferStatus,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

struct Harness {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    orchestrator: Arc<TransferOrchestrator>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let gate = Arc::new(StaticAuthorizationGate::allow_all());
    let notifier = Arc::new(RecordingNotifier::new());
    let orchestrator = Arc::new(TransferOrchestrator::new(
        store.clone(),
        store.clone(),
        store.clone(),
        gate,
        notifier.clone(),
    ));
    Harness {
        store,
        notifier,
        orchestrator,
    }
}

async fn onboard(
    store: &MemoryStore,
    name: &str,
    tax_id: &str,
    email: &str,
    kind: AccountKind,
    opening: &str,
) -> AccountId {
    let account = store
        .create(NewAccount {
            full_name: name.to_string(),
            tax_id: tax_id.to_string(),
            email: email.to_string(),
            credential: "pw".to_string(),
            kind,
        })
        .await
        .unwrap();
    store
        .save(&Balance::with_opening(account.id(), dec(opening)))
        .await
        .unwrap();
    account.id()
}

async fn balance_of(store: &MemoryStore, id: AccountId) -> Decimal {
    store.find_by_owner(id).await.unwrap().unwrap().amount()
}

#[tokio::test]
async fn documented_scenario_happy_path() {
    let h = harness();
    let payer = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "1000.00").await;
    let payee = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "500.00").await;

    let transfer = h
        .orchestrator
        .execute(dec("100.00"), payer, payee)
        .await
        .unwrap();

    assert_eq!(transfer.status(), TransferStatus::Authorized);
    assert_eq!(balance_of(&h.store, payer).await, dec("900.00"));
    assert_eq!(balance_of(&h.store, payee).await, dec("600.00"));

    // Exactly one persisted record, retrievable by id, status AUTHORIZED
    let persisted = TransferStore::find_by_id(h.store.as_ref(), transfer.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(persisted.status(), TransferStatus::Authorized);
    assert!(
        TransferStore::find_by_id(h.store.as_ref(), transfer.id() + 1)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(h.notifier.sent(), vec![transfer.id()]);
}

#[tokio::test]
async fn documented_scenario_merchant_payer() {
    let h = harness();
    let payer = onboard(&h.store, "Shop", "333", "shop@example.com", AccountKind::Merchant, "1000.00").await;
    let payee = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "500.00").await;

    let err = h
        .orchestrator
        .execute(dec("100.00"), payer, payee)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::IneligiblePayer));
    assert_eq!(balance_of(&h.store, payer).await, dec("1000.00"));
    assert_eq!(balance_of(&h.store, payee).await, dec("500.00"));
    // No record is ever persisted for a validation failure
    assert!(
        TransferStore::find_by_id(h.store.as_ref(), 1)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn documented_scenario_insufficient_funds() {
    let h = harness();
    let payer = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "1000.00").await;
    let payee = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "500.00").await;

    let err = h
        .orchestrator
        .execute(dec("2000.00"), payer, payee)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InsufficientFunds));
    assert_eq!(balance_of(&h.store, payer).await, dec("1000.00"));
    assert_eq!(balance_of(&h.store, payee).await, dec("500.00"));
}

#[tokio::test]
async fn documented_scenario_unknown_payee() {
    let h = harness();
    let payer = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "1000.00").await;

    let err = h
        .orchestrator
        .execute(dec("100.00"), payer, 42)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::AccountNotFound(payflow::transfer::Role::Payee)
    ));
    assert_eq!(balance_of(&h.store, payer).await, dec("1000.00"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transfers_never_overdraw_the_payer() {
    let h = harness();
    let payer = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "1000.00").await;
    let payee_a = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "0.00").await;
    let payee_b = onboard(&h.store, "Carol", "333", "carol@example.com", AccountKind::Personal, "0.00").await;

    // v1 + v2 > P while each alone fits: at most one may succeed
    let t1 = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.execute(dec("600.00"), payer, payee_a).await }
    });
    let t2 = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.execute(dec("700.00"), payer, payee_b).await }
    });

    let r1 = t1.await.unwrap();
    let r2 = t2.await.unwrap();

    let successes = [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one of the racing transfers may win");

    let loser = if r1.is_err() { r1 } else { r2 };
    assert!(matches!(
        loser.unwrap_err(),
        TransferError::InsufficientFunds
    ));

    let remaining = balance_of(&h.store, payer).await;
    let received =
        balance_of(&h.store, payee_a).await + balance_of(&h.store, payee_b).await;
    assert!(remaining >= Decimal::ZERO);
    assert_eq!(remaining + received, dec("1000.00"), "funds are conserved");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn opposite_direction_transfers_do_not_deadlock() {
    let h = harness();
    let a = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "500.00").await;
    let b = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "500.00").await;

    let mut tasks = Vec::new();
    for i in 0..20u32 {
        let orchestrator = h.orchestrator.clone();
        let (payer, payee) = if i % 2 == 0 { (a, b) } else { (b, a) };
        tasks.push(tokio::spawn(async move {
            orchestrator.execute(dec("10.00"), payer, payee).await
        }));
    }

    let all = async {
        for task in tasks {
            task.await.unwrap().unwrap();
        }
    };
    tokio::time::timeout(Duration::from_secs(10), all)
        .await
        .expect("opposite-direction transfers must not deadlock");

    // 10 each way at 10.00 - both balances end where they started
    assert_eq!(balance_of(&h.store, a).await, dec("500.00"));
    assert_eq!(balance_of(&h.store, b).await, dec("500.00"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sequential_transfers_drain_to_exactly_zero() {
    let h = harness();
    let payer = onboard(&h.store, "Alice", "111", "alice@example.com", AccountKind::Personal, "100.00").await;
    let payee = onboard(&h.store, "Bob", "222", "bob@example.com", AccountKind::Personal, "0.00").await;

    for _ in 0..10 {
        h.orchestrator
            .execute(dec("10.00"), payer, payee)
            .await
            .unwrap();
    }

    assert_eq!(balance_of(&h.store, payer).await, dec("0.00"));
    assert_eq!(balance_of(&h.store, payee).await, dec("100.00"));

    let err = h
        .orchestrator
        .execute(dec("0.01"), payer, payee)
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::InsufficientFunds));
}

#[tokio::test]
async fn seeded_demo_accounts_support_the_documented_scenario() {
    let h = harness();
    payflow::seed::seed_demo_data(h.store.as_ref(), h.store.as_ref())
        .await
        .unwrap();

    // Account 1 (1000.00) pays account 2 (500.00) 100.00
    let transfer = h.orchestrator.execute(dec("100.00"), 1, 2).await.unwrap();
    assert_eq!(transfer.status(), TransferStatus::Authorized);
    assert_eq!(balance_of(&h.store, 1).await, dec("900.00"));
    assert_eq!(balance_of(&h.store, 2).await, dec("600.00"));

    // The seeded merchant (account 3) cannot send
    let err = h.orchestrator.execute(dec("1.00"), 3, 1).await.unwrap_err();
    assert!(matches!(err, TransferError::IneligiblePayer));
}
