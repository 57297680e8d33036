//! Tests of the store API client and the mock's route contract.

#![allow(clippy::unwrap_used)]

use rocket_shoes_cart::ApiError;
use rocket_shoes_core::ProductId;
use rocket_shoes_integration_tests::{TestContext, catalog};

#[tokio::test]
async fn get_product_returns_the_catalog_record() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let product = api.get_product(ProductId::new(2)).await.unwrap();

    assert_eq!(product.id, ProductId::new(2));
    assert_eq!(product.title, "Tênis VR Caminhada Confortável Detalhes Couro");
    assert_eq!(product.price.to_string(), "139.9");
}

#[tokio::test]
async fn get_unknown_product_is_not_found() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let err = api.get_product(ProductId::new(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn get_products_lists_the_whole_catalog() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let products = api.get_products(None).await.unwrap();
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn get_products_honors_the_id_filter() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let products = api.get_products(Some(ProductId::new(1))).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().unwrap().id, ProductId::new(1));

    let none = api.get_products(Some(ProductId::new(42))).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn get_stock_reflects_mutations() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let stock = api.get_stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.amount, 5);

    ctx.api.set_stock(ProductId::new(1), 0).await;
    let stock = api.get_stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.amount, 0);
}

#[tokio::test]
async fn get_stock_levels_honors_the_id_filter() {
    let ctx = TestContext::start(catalog()).await;
    let api = ctx.api_client();

    let all = api.get_stock_levels(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let one = api.get_stock_levels(Some(ProductId::new(3))).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one.first().unwrap().amount, 0);
}

#[tokio::test]
async fn mock_serves_prices_as_json_numbers() {
    // The real store API serves plain JSON; make sure the mock's wire shape
    // matches what the client is written against.
    let ctx = TestContext::start(catalog()).await;

    let body: serde_json::Value = reqwest::get(format!("{}/products/1", ctx.api.base_url()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["id"], 1);
    assert!(body["price"].is_number());
    assert_eq!(body["title"], "Tênis de Caminhada Leve Confortável");
}
