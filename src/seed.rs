//! Demo data seeding
//!
//! Startup bootstrap collaborator: creates a small set of demo accounts
//! when the store is empty so the service is usable out of the box.
//! Never invoked by the orchestrator.

use rust_decimal::Decimal;
use tracing::info;

use crate::account::{AccountKind, NewAccount};
use crate::balance::Balance;
use crate::store::{AccountStore, BalanceStore, StoreError};

/// Seed demo accounts if the account store is empty
///
/// Idempotent: a non-empty store is left untouched.
pub async fn seed_demo_data(
    accounts: &dyn AccountStore,
    balances: &dyn BalanceStore,
) -> Result<(), StoreError> {
    if accounts.count().await? > 0 {
        return Ok(());
    }

    info!("Seeding demo accounts");

    let demo: [(&str, &str, &str, AccountKind, Decimal); 3] = [
        (
            "Alice Hartman",
            "12345678901",
            "alice@example.com",
            AccountKind::Personal,
            Decimal::new(100000, 2), // 1000.00
        ),
        (
            "Bob Keller",
            "98765432109",
            "bob@example.com",
            AccountKind::Personal,
            Decimal::new(50000, 2), // 500.00
        ),
        (
            "Hartman's Bakery",
            "12345678000195",
            "orders@hartmans.example.com",
            AccountKind::Merchant,
            Decimal::ZERO,
        ),
    ];

    for (full_name, tax_id, email, kind, opening) in demo {
        let account = accounts
            .create(NewAccount {
                full_name: full_name.to_string(),
                tax_id: tax_id.to_string(),
                email: email.to_string(),
                credential: "demo-credential".to_string(),
                kind,
            })
            .await?;
        balances
            .save(&Balance::with_opening(account.id(), opening))
            .await?;
        info!(
            account_id = account.id(),
            kind = %kind,
            balance = %opening,
            "Seeded {}",
            full_name
        );
    }

    Ok(())
}
