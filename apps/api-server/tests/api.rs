//! End-to-end tests: requests go through the full router against an
//! in-memory database.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stockroom_api::{router, AppState};
use stockroom_db::{Database, DbConfig};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    router(AppState::new(db))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn call(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Runs an operation that must succeed and returns its `data`.
async fn data(app: &Router, body: Value) -> Value {
    let (status, value) = call(app, body).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {value}");
    value["data"].clone()
}

/// Category + product (100.00, given stock) + supplier.
async fn catalogue(app: &Router, stock: i64) -> (i64, i64, i64) {
    let category = data(
        app,
        json!({ "operation": "createCategory", "input": { "name": "Hardware" } }),
    )
    .await;
    let category_id = category["id"].as_i64().unwrap();

    let product = data(
        app,
        json!({
            "operation": "createProduct",
            "input": {
                "name": "Cordless Drill",
                "categoryId": category_id,
                "unitPriceCents": 10000,
                "unitsInStock": stock
            }
        }),
    )
    .await;

    let supplier = data(
        app,
        json!({
            "operation": "createSupplier",
            "input": { "name": "Acme", "categoryId": category_id }
        }),
    )
    .await;

    (
        category_id,
        product["id"].as_i64().unwrap(),
        supplier["id"].as_i64().unwrap(),
    )
}

async fn customer_with(app: &Router, membership: Option<&str>) -> i64 {
    let membership_id = match membership {
        Some(kind) => {
            let m = data(
                app,
                json!({ "operation": "createMembership", "input": { "membershipType": kind } }),
            )
            .await;
            m["id"].clone()
        }
        None => Value::Null,
    };

    let customer = data(
        app,
        json!({
            "operation": "createCustomer",
            "input": {
                "name": "Dana",
                "contactNumber": "0123456789",
                "email": "dana@shop.io",
                "address": "1 Main St",
                "membershipId": membership_id
            }
        }),
    )
    .await;
    customer["id"].as_i64().unwrap()
}

async fn stock_of(app: &Router, product_id: i64) -> i64 {
    let product = data(
        app,
        json!({ "operation": "getProductById", "input": { "productId": product_id } }),
    )
    .await;
    product["unitsInStock"].as_i64().unwrap()
}

// =============================================================================
// Liveness / readiness
// =============================================================================

#[tokio::test]
async fn test_root_returns_banner() {
    let app = app().await;
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Stock Management App");
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, bytes) = send(&app, request).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "ok" }));
}

// =============================================================================
// Envelope handling
// =============================================================================

#[tokio::test]
async fn test_unknown_operation_is_bad_request() {
    let app = app().await;
    let (status, body) = call(&app, json!({ "operation": "dropEverything" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_missing_input_field_is_bad_request() {
    let app = app().await;
    let (status, body) = call(
        &app,
        json!({ "operation": "getProductById", "input": { "id": 1 } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_lookups_of_missing_rows_are_not_errors() {
    let app = app().await;

    let product = data(
        &app,
        json!({ "operation": "getProductById", "input": { "productId": 41 } }),
    )
    .await;
    assert_eq!(product, Value::Null);

    let deleted = data(
        &app,
        json!({ "operation": "deleteCustomer", "input": { "customerId": 41 } }),
    )
    .await;
    assert_eq!(deleted, json!(false));

    let updated = data(
        &app,
        json!({
            "operation": "updateCategory",
            "input": { "categoryId": 41, "patch": { "name": "Nope" } }
        }),
    )
    .await;
    assert_eq!(updated, Value::Null);

    let all = data(&app, json!({ "operation": "getAllSuppliers" })).await;
    assert_eq!(all, json!([]));
}

// =============================================================================
// Reshaped records
// =============================================================================

#[tokio::test]
async fn test_supplier_and_product_carry_category_name() {
    let app = app().await;
    let (category_id, product_id, supplier_id) = catalogue(&app, 0).await;

    let supplier = data(
        &app,
        json!({ "operation": "getSupplierById", "input": { "supplierId": supplier_id } }),
    )
    .await;
    assert_eq!(supplier["categoryId"], category_id);
    assert_eq!(supplier["categoryName"], "Hardware");

    let products = data(
        &app,
        json!({ "operation": "getProductsByCategory", "input": { "categoryId": category_id } }),
    )
    .await;
    assert_eq!(products[0]["id"], product_id);
    assert_eq!(products[0]["categoryName"], "Hardware");
}

#[tokio::test]
async fn test_customer_carries_membership_type() {
    let app = app().await;
    let customer_id = customer_with(&app, Some("premium")).await;

    let customer = data(
        &app,
        json!({ "operation": "getCustomerById", "input": { "customerId": customer_id } }),
    )
    .await;
    assert_eq!(customer["membershipType"], "premium");

    let by_email = data(
        &app,
        json!({ "operation": "getCustomersByEmail", "input": { "email": "dana@shop.io" } }),
    )
    .await;
    assert_eq!(by_email[0]["membershipType"], "premium");
}

// =============================================================================
// Customer validation
// =============================================================================

#[tokio::test]
async fn test_invalid_customer_is_rejected_and_not_persisted() {
    let app = app().await;

    for (email, number) in [("not-an-email", "0123456789"), ("ok@shop.io", "12345")] {
        let (status, body) = call(
            &app,
            json!({
                "operation": "createCustomer",
                "input": {
                    "name": "Eve",
                    "contactNumber": number,
                    "email": email,
                    "address": "2 Side St"
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let all = data(&app, json!({ "operation": "getAllCustomers" })).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_customer_update_validates_email() {
    let app = app().await;
    let customer_id = customer_with(&app, None).await;

    let (status, _) = call(
        &app,
        json!({
            "operation": "updateCustomer",
            "input": { "customerId": customer_id, "patch": { "email": "broken@" } }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let customer = data(
        &app,
        json!({ "operation": "getCustomerById", "input": { "customerId": customer_id } }),
    )
    .await;
    assert_eq!(customer["email"], "dana@shop.io");
}

// =============================================================================
// Supplier orders and inbound bills
// =============================================================================

#[tokio::test]
async fn test_supplier_order_restocks_and_bills() {
    let app = app().await;
    let (_, product_id, supplier_id) = catalogue(&app, 2).await;

    let order = data(
        &app,
        json!({
            "operation": "createSupplierOrder",
            "input": { "supplierId": supplier_id, "productId": product_id, "quantity": 3 }
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["totalAmountCents"], 30000);
    assert_eq!(stock_of(&app, product_id).await, 5);

    let bills = data(
        &app,
        json!({
            "operation": "getInboundBillsBySupplierOrder",
            "input": { "supplierOrderId": order_id }
        }),
    )
    .await;
    let bills = bills.as_array().unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0]["amountDueCents"], 30000);
    assert_eq!(bills[0]["paymentStatus"], "Pending");
    let bill_id = bills[0]["id"].as_i64().unwrap();

    let partial = data(
        &app,
        json!({
            "operation": "updateInboundBill",
            "input": { "inboundBillId": bill_id, "amountPaidCents": 10000 }
        }),
    )
    .await;
    assert_eq!(partial["amountDueCents"], 20000);
    assert_eq!(partial["paymentStatus"], "Pending");

    let settled = data(
        &app,
        json!({
            "operation": "updateInboundBill",
            "input": { "inboundBillId": bill_id, "amountPaidCents": 20000 }
        }),
    )
    .await;
    assert_eq!(settled["amountDueCents"], 0);
    assert_eq!(settled["paymentStatus"], "Success");

    let supplier_name = data(
        &app,
        json!({
            "operation": "getSupplierNameByOrderId",
            "input": { "supplierOrderId": order_id }
        }),
    )
    .await;
    assert_eq!(supplier_name, "Acme");
}

#[tokio::test]
async fn test_order_total_too_large_is_validation_error() {
    let app = app().await;
    let (category_id, _, supplier_id) = catalogue(&app, 0).await;
    let product = data(
        &app,
        json!({
            "operation": "createProduct",
            "input": {
                "name": "Gold Bar",
                "categoryId": category_id,
                "unitPriceCents": 1_000_000_000_000_i64
            }
        }),
    )
    .await;

    let (status, body) = call(
        &app,
        json!({
            "operation": "createSupplierOrder",
            "input": {
                "supplierId": supplier_id,
                "productId": product["id"],
                "quantity": 10_000_000
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let orders = data(&app, json!({ "operation": "getAllSupplierOrders" })).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_overpaying_inbound_bill_is_rejected() {
    let app = app().await;
    let (_, product_id, supplier_id) = catalogue(&app, 0).await;
    data(
        &app,
        json!({
            "operation": "createSupplierOrder",
            "input": { "supplierId": supplier_id, "productId": product_id, "quantity": 1 }
        }),
    )
    .await;
    let bills = data(&app, json!({ "operation": "getAllInboundBills" })).await;
    let bill_id = bills[0]["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        json!({
            "operation": "updateInboundBill",
            "input": { "inboundBillId": bill_id, "amountPaidCents": 10001 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Customer orders
// =============================================================================

#[tokio::test]
async fn test_customer_order_discounts_by_membership() {
    let app = app().await;
    let (_, product_id, _) = catalogue(&app, 10).await;

    for (membership, discount, total) in [
        (Some("premium"), 2500, 7500),
        (Some("classic"), 500, 9500),
        (None, 0, 10000),
    ] {
        let customer_id = customer_with(&app, membership).await;
        let order = data(
            &app,
            json!({
                "operation": "createCustomerOrder",
                "input": {
                    "customerId": customer_id,
                    "productId": product_id,
                    "quantity": 1,
                    "shippingAddress": "1 Main St"
                }
            }),
        )
        .await;
        assert_eq!(order["discountCents"], discount, "membership {membership:?}");
        assert_eq!(order["totalAmountCents"], total, "membership {membership:?}");
    }

    assert_eq!(stock_of(&app, product_id).await, 7);
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back() {
    let app = app().await;
    let (_, product_id, _) = catalogue(&app, 1).await;
    let customer_id = customer_with(&app, None).await;

    let (status, body) = call(
        &app,
        json!({
            "operation": "createCustomerOrder",
            "input": {
                "customerId": customer_id,
                "productId": product_id,
                "quantity": 2,
                "shippingAddress": "1 Main St"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");

    assert_eq!(stock_of(&app, product_id).await, 1);
    let orders = data(&app, json!({ "operation": "getAllCustomerOrders" })).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_outbound_bill_copies_order_discount() {
    let app = app().await;
    let (_, product_id, _) = catalogue(&app, 5).await;
    let customer_id = customer_with(&app, Some("classic")).await;
    let order = data(
        &app,
        json!({
            "operation": "createCustomerOrder",
            "input": {
                "customerId": customer_id,
                "productId": product_id,
                "quantity": 2,
                "shippingAddress": "1 Main St"
            }
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let bill = data(
        &app,
        json!({
            "operation": "createOutboundBill",
            "input": {
                "customerOrderId": order_id,
                "billDate": "2024-06-10",
                "paymentStatus": "Unpaid"
            }
        }),
    )
    .await;
    assert_eq!(bill["discountCents"], 1000);
    assert_eq!(bill["dueDate"], "2024-06-12");

    let (status, body) = call(
        &app,
        json!({
            "operation": "createOutboundBill",
            "input": {
                "customerOrderId": order_id + 10,
                "billDate": "2024-06-10",
                "paymentStatus": "Unpaid"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Constraints and reports
// =============================================================================

#[tokio::test]
async fn test_deleting_referenced_category_is_a_conflict() {
    let app = app().await;
    let (category_id, _, _) = catalogue(&app, 0).await;

    let (status, body) = call(
        &app,
        json!({ "operation": "deleteCategory", "input": { "categoryId": category_id } }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONSTRAINT_VIOLATION");

    let category = data(
        &app,
        json!({ "operation": "getCategory", "input": { "categoryId": category_id } }),
    )
    .await;
    assert_eq!(category["name"], "Hardware");
}

#[tokio::test]
async fn test_most_sold_product() {
    let app = app().await;
    let (_, product_id, _) = catalogue(&app, 10).await;
    let customer_id = customer_with(&app, None).await;

    let none = data(&app, json!({ "operation": "getMostSoldProduct" })).await;
    assert_eq!(none, Value::Null);

    data(
        &app,
        json!({
            "operation": "createCustomerOrder",
            "input": {
                "customerId": customer_id,
                "productId": product_id,
                "quantity": 4,
                "shippingAddress": "1 Main St"
            }
        }),
    )
    .await;

    let top = data(&app, json!({ "operation": "getMostSoldProduct" })).await;
    assert_eq!(top["product"]["id"], product_id);
    assert_eq!(top["product"]["categoryName"], "Hardware");
    assert_eq!(top["totalQuantity"], 4);
}
