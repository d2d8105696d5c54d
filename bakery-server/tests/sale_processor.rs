//! Sale processor behaviour against a real embedded database.

mod common;

use bakery_server::core::PriceSource;
use bakery_server::db::repository::SaleRepository;
use bakery_server::db::repository::sale::SaleFilter;
use bakery_server::{AppError, SaleActor, SaleProcessor, ServerState};
use shared::{CustomerInfo, PaymentMethod, SaleItemInput, SaleRequest};

fn walk_in() -> CustomerInfo {
    CustomerInfo {
        name: "Walk-in".to_string(),
        tax_id: None,
        phone: None,
        address: None,
    }
}

fn request(items: Vec<SaleItemInput>) -> SaleRequest {
    SaleRequest {
        items,
        payment_method: None,
        customer: walk_in(),
    }
}

fn line(product_id: &str, name: &str, quantity: i64) -> SaleItemInput {
    SaleItemInput {
        product_id: product_id.to_string(),
        name: Some(name.to_string()),
        quantity,
    }
}

fn processor(state: &ServerState) -> SaleProcessor {
    SaleProcessor::new(state.get_db(), PriceSource::Cost)
}

async fn sale_count(state: &ServerState) -> usize {
    SaleRepository::new(state.get_db())
        .find_filtered(SaleFilter::default())
        .await
        .expect("sale query failed")
        .len()
}

#[tokio::test]
async fn sale_decrements_stock_and_records_totals() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.5, 5).await;
    let id = common::product_id(&muffin);

    let sale = processor(&state)
        .process(request(vec![line(&id, "Muffin", 3)]), SaleActor::Anonymous)
        .await
        .expect("sale should succeed");

    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].name, "Muffin");
    assert_eq!(sale.items[0].quantity, 3);
    assert_eq!(sale.items[0].unit_price, 2.5);
    assert_eq!(sale.items[0].line_total, 7.5);
    assert_eq!(sale.total, 7.5);
    assert_eq!(sale.payment_method, PaymentMethod::Cash);
    assert_eq!(sale.sold_by_name, "Online customer");
    assert!(sale.sold_by.is_none());

    assert_eq!(common::current_stock(&state, &id).await, 2);
}

#[tokio::test]
async fn insufficient_stock_aborts_without_mutation() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.5, 2).await;
    let id = common::product_id(&muffin);

    let err = processor(&state)
        .process(request(vec![line(&id, "Muffin", 3)]), SaleActor::Anonymous)
        .await
        .expect_err("sale must fail");

    match err {
        AppError::InsufficientStock(msg) => {
            assert!(msg.contains("Muffin"));
            assert!(msg.contains("2"), "message should report availability: {msg}");
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(common::current_stock(&state, &id).await, 2);
    assert_eq!(sale_count(&state).await, 0);
}

#[tokio::test]
async fn unknown_product_fails_with_not_found() {
    let (state, _dir) = common::test_state().await;

    let err = processor(&state)
        .process(
            request(vec![line("product:missing", "Unicorn Cake", 1)]),
            SaleActor::Anonymous,
        )
        .await
        .expect_err("sale must fail");

    match err {
        AppError::NotFound(msg) => assert!(msg.contains("Unicorn Cake")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    assert_eq!(sale_count(&state).await, 0);
}

#[tokio::test]
async fn one_bad_line_leaves_all_stock_unchanged() {
    let (state, _dir) = common::test_state().await;
    let bread = common::seed_product(&state, "Bread", 1.0, 10).await;
    let cake = common::seed_product(&state, "Cake", 8.0, 1).await;
    let bread_id = common::product_id(&bread);
    let cake_id = common::product_id(&cake);

    let err = processor(&state)
        .process(
            request(vec![line(&bread_id, "Bread", 2), line(&cake_id, "Cake", 3)]),
            SaleActor::Anonymous,
        )
        .await
        .expect_err("sale must fail");

    assert!(matches!(err, AppError::InsufficientStock(_)));
    // No partial decrement, even for the valid first line
    assert_eq!(common::current_stock(&state, &bread_id).await, 10);
    assert_eq!(common::current_stock(&state, &cake_id).await, 1);
    assert_eq!(sale_count(&state).await, 0);
}

#[tokio::test]
async fn replaying_a_request_sells_twice() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.0, 10).await;
    let id = common::product_id(&muffin);
    let p = processor(&state);

    let first = p
        .process(request(vec![line(&id, "Muffin", 2)]), SaleActor::Anonymous)
        .await
        .expect("first sale");
    let second = p
        .process(request(vec![line(&id, "Muffin", 2)]), SaleActor::Anonymous)
        .await
        .expect("second sale");

    assert_ne!(first.id, second.id);
    assert_eq!(common::current_stock(&state, &id).await, 6);
    assert_eq!(sale_count(&state).await, 2);
}

#[tokio::test]
async fn invalid_requests_are_rejected_without_mutation() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.0, 5).await;
    let id = common::product_id(&muffin);
    let p = processor(&state);

    // Empty cart
    let err = p
        .process(request(vec![]), SaleActor::Anonymous)
        .await
        .expect_err("empty cart must fail");
    assert!(matches!(err, AppError::Validation(_)));

    // Non-positive quantity
    let err = p
        .process(request(vec![line(&id, "Muffin", 0)]), SaleActor::Anonymous)
        .await
        .expect_err("zero quantity must fail");
    assert!(matches!(err, AppError::Validation(_)));

    // Missing customer name
    let mut req = request(vec![line(&id, "Muffin", 1)]);
    req.customer.name = "   ".to_string();
    let err = p
        .process(req, SaleActor::Anonymous)
        .await
        .expect_err("blank customer name must fail");
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(common::current_stock(&state, &id).await, 5);
    assert_eq!(sale_count(&state).await, 0);
}

#[tokio::test]
async fn sale_price_policy_snapshots_marked_up_price() {
    let (state, _dir) = common::test_state().await;
    // cost 2.5, 30% margin -> sale price 3.25
    let muffin = common::seed_product(&state, "Muffin", 2.5, 5).await;
    let id = common::product_id(&muffin);

    let sale = SaleProcessor::new(state.get_db(), PriceSource::Sale)
        .process(request(vec![line(&id, "Muffin", 2)]), SaleActor::Anonymous)
        .await
        .expect("sale should succeed");

    assert_eq!(sale.items[0].unit_price, 3.25);
    assert_eq!(sale.total, 6.5);
}

#[tokio::test]
async fn staff_actor_is_linked_on_the_sale() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.0, 5).await;
    let id = common::product_id(&muffin);

    let staff_id: surrealdb::RecordId = "staff:ana".parse().unwrap();
    let sale = processor(&state)
        .process(
            request(vec![line(&id, "Muffin", 1)]),
            SaleActor::Staff {
                id: staff_id.clone(),
                display_name: "Ana Torres".to_string(),
            },
        )
        .await
        .expect("sale should succeed");

    assert_eq!(sale.sold_by_name, "Ana Torres");
    assert_eq!(sale.sold_by, Some(staff_id));
}
