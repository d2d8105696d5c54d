//! Concurrent sale races over shared stock.
//!
//! The invariant: stock never goes negative and no sale commits without
//! its full decrement, no matter how requests interleave.

mod common;

use bakery_server::core::PriceSource;
use bakery_server::db::repository::SaleRepository;
use bakery_server::db::repository::sale::SaleFilter;
use bakery_server::{AppError, SaleActor, SaleProcessor};
use shared::{CustomerInfo, SaleItemInput, SaleRequest};

fn request(product_id: &str, quantity: i64) -> SaleRequest {
    SaleRequest {
        items: vec![SaleItemInput {
            product_id: product_id.to_string(),
            name: Some("contended".to_string()),
            quantity,
        }],
        payment_method: None,
        customer: CustomerInfo {
            name: "Walk-in".to_string(),
            tax_id: None,
            phone: None,
            address: None,
        },
    }
}

#[tokio::test]
async fn two_sales_over_one_unit_sell_exactly_once() {
    let (state, _dir) = common::test_state().await;
    let product = common::seed_product(&state, "Last Croissant", 1.2, 1).await;
    let id = common::product_id(&product);

    let p = SaleProcessor::new(state.get_db(), PriceSource::Cost);

    let (a, b) = tokio::join!(
        p.process(request(&id, 1), SaleActor::Anonymous),
        p.process(request(&id, 1), SaleActor::Anonymous),
    );

    let results = [a, b];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one sale must win: {results:?}");

    let failure = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one sale must lose");
    assert!(
        matches!(failure, AppError::InsufficientStock(_)),
        "loser must see insufficient stock, got {failure:?}"
    );

    assert_eq!(common::current_stock(&state, &id).await, 0);

    let sales = SaleRepository::new(state.get_db())
        .find_filtered(SaleFilter::default())
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].items[0].quantity, 1);
}

#[tokio::test]
async fn overlapping_quantities_never_oversell() {
    // stock 5, two requests of 3: only one can fit
    let (state, _dir) = common::test_state().await;
    let product = common::seed_product(&state, "Baguette", 0.8, 5).await;
    let id = common::product_id(&product);

    let p = SaleProcessor::new(state.get_db(), PriceSource::Cost);

    let (a, b) = tokio::join!(
        p.process(request(&id, 3), SaleActor::Anonymous),
        p.process(request(&id, 3), SaleActor::Anonymous),
    );

    let results = [a, b];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "only one of the overlapping sales fits");

    // Final stock reflects exactly the winning sale
    assert_eq!(common::current_stock(&state, &id).await, 2);
}

#[tokio::test]
async fn disjoint_stock_lets_both_sales_through() {
    // stock 10 comfortably fits two sales of 3
    let (state, _dir) = common::test_state().await;
    let product = common::seed_product(&state, "Roll", 0.3, 10).await;
    let id = common::product_id(&product);

    let p = SaleProcessor::new(state.get_db(), PriceSource::Cost);

    let (a, b) = tokio::join!(
        p.process(request(&id, 3), SaleActor::Anonymous),
        p.process(request(&id, 3), SaleActor::Anonymous),
    );

    assert!(a.is_ok() && b.is_ok(), "both sales fit: {a:?} {b:?}");
    assert_eq!(common::current_stock(&state, &id).await, 4);
}

#[tokio::test]
async fn many_single_unit_sales_stop_at_zero() {
    let (state, _dir) = common::test_state().await;
    let product = common::seed_product(&state, "Eclair", 1.5, 7).await;
    let id = common::product_id(&product);

    let p = SaleProcessor::new(state.get_db(), PriceSource::Cost);

    let mut handles = Vec::new();
    for _ in 0..12 {
        let p = p.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            p.process(request(&id, 1), SaleActor::Anonymous).await
        }));
    }

    let mut successes = 0;
    let mut shortages = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => successes += 1,
            Err(AppError::InsufficientStock(_)) => shortages += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 7, "every unit sells exactly once");
    assert_eq!(shortages, 5);
    assert_eq!(common::current_stock(&state, &id).await, 0);
}
