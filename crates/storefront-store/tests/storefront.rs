mod common;

use common::{backend, item, loaded, storefront};
use std::sync::Arc;
use std::time::Duration;
use storefront_core::{ItemId, Money};
use storefront_data::{ApiClient, BackoffStrategy, Method, RetryPolicy};
use storefront_mock::{Fault, FaultRule, InMemoryApi, MockConfig};
use storefront_store::{LoadSummary, Storefront};

#[tokio::test]
async fn test_load() {
    let api = backend();
    let summary = storefront(&api).load().await;
    assert_eq!(
        summary,
        LoadSummary {
            items: 9,
            categories: 3,
            cart_entries: 0
        }
    );
}

#[tokio::test]
async fn test_deleting_item_removes_cart_entry() {
    let api = backend();
    let storefront = loaded(&api).await;
    storefront.cart().add_item(&item(&storefront, 5)).await;
    storefront.cart().add_item(&item(&storefront, 6)).await;

    assert!(storefront.delete_item(ItemId::new(5)).await);

    assert!(!storefront.cart().contains(ItemId::new(5)));
    assert!(storefront.cart().contains(ItemId::new(6)));
    assert!(api.cart().iter().all(|e| e.item_id != ItemId::new(5)));
    assert_eq!(storefront.cart_total(), Money::from_cents(30));
}

#[tokio::test(start_paused = true)]
async fn test_deleting_item_removes_entry_missing_from_snapshot() {
    let api = Arc::new(InMemoryApi::new(
        MockConfig::new().with_latency(Duration::from_millis(100)),
    ));
    let storefront = loaded(&api).await;
    let bread = item(&storefront, 1);

    // The lookup GET answers at 100ms and the POST at 200ms; the refresh
    // that follows fails.
    let adding = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.cart().add_item(&bread).await })
    };
    tokio::time::sleep(Duration::from_millis(150)).await;
    api.inject(FaultRule::new(Fault::Transport).on(Method::Get).at("cart").times(1));
    assert!(adding.await.unwrap().is_some());

    assert!(!storefront.cart().contains(ItemId::new(1)));
    assert!(api.cart().iter().any(|e| e.item_id == ItemId::new(1)));

    assert!(storefront.delete_item(ItemId::new(1)).await);

    assert!(api.items().iter().all(|i| i.id != ItemId::new(1)));
    assert!(api.cart().is_empty());
    assert!(storefront.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_cart_totals_flag_items_missing_from_catalog() {
    let api = backend();
    let storefront = loaded(&api).await;
    storefront.cart().add_item(&item(&storefront, 1)).await;

    // Drop the catalog copy only; the backend still has the item.
    api.inject(FaultRule::new(Fault::Status(500)).on(Method::Delete).at("items").times(1));
    storefront.catalog().delete_item(ItemId::new(1)).await;

    let totals = storefront.cart_totals();
    assert_eq!(totals.unresolved, vec![ItemId::new(1)]);
    assert_eq!(totals.grand_total, Money::ZERO);
    assert_eq!(totals.item_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_policy_recovers_reads() {
    let api = backend();
    api.inject(FaultRule::new(Fault::Status(503)).on(Method::Get).at("items").times(2));

    let client = ApiClient::new(api.clone()).with_retry(
        RetryPolicy::new(2).with_backoff(BackoffStrategy::Fixed(Duration::from_millis(10))),
    );
    let storefront = Storefront::new(client);

    assert_eq!(storefront.catalog().list_items().await.len(), 9);
}
