//! # Operation Resolver
//!
//! Runs one [`Operation`] inside one session.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  execute(db, operation)                                                 │
//! │       │                                                                 │
//! │       ├── span "operation" { request_id = uuid v4, operation = name }   │
//! │       ├── db.begin() ──► Session (pooled connection + transaction)      │
//! │       ├── dispatch ──► query::* / mutation::*  ──► serde_json::Value    │
//! │       │                                                                 │
//! │       ├── Ok  ──► session.commit()   ──► { "data": value }              │
//! │       └── Err ──► session.rollback() ──► { "error": { code, message } } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use stockroom_db::{Database, Session};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::operation::Operation;
use crate::api::{mutation, query};
use crate::error::ApiResult;

/// Executes `operation` and returns its JSON result.
pub async fn execute(db: &Database, operation: Operation) -> ApiResult<Value> {
    let name = operation.name();
    let is_mutation = operation.is_mutation();
    let span = info_span!("operation", request_id = %Uuid::new_v4(), operation = name);

    async move {
        let start = Instant::now();
        let mut session = db.begin().await?;

        match dispatch(&mut session, operation).await {
            Ok(value) => {
                session.commit().await?;
                info!(
                    mutation = is_mutation,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Operation completed"
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = session.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                warn!(code = ?err.code, error = %err.message, "Operation failed");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

fn json<T: Serialize>(value: T) -> ApiResult<Value> {
    Ok(serde_json::to_value(value)?)
}

async fn dispatch(session: &mut Session, operation: Operation) -> ApiResult<Value> {
    use Operation::*;

    match operation {
        // Queries
        GetCategory { category_id } => json(query::get_category(session, category_id).await?),
        GetAllCategories => json(query::get_all_categories(session).await?),
        GetProductsByCategory { category_id } => {
            json(query::get_products_by_category(session, category_id).await?)
        }
        GetSuppliersByCategory { category_id } => {
            json(query::get_suppliers_by_category(session, category_id).await?)
        }

        GetSupplierById { supplier_id } => {
            json(query::get_supplier_by_id(session, supplier_id).await?)
        }
        GetAllSuppliers => json(query::get_all_suppliers(session).await?),
        GetSuppliersByName { name } => json(query::get_suppliers_by_name(session, &name).await?),

        GetProductById { product_id } => json(query::get_product_by_id(session, product_id).await?),
        GetAllProducts => json(query::get_all_products(session).await?),
        GetProductsBelowReorderLevel => {
            json(query::get_products_below_reorder_level(session).await?)
        }
        GetMostSoldProduct => json(query::get_most_sold_product(session).await?),
        GetMostBoughtProduct => json(query::get_most_bought_product(session).await?),

        GetMembershipById { membership_id } => {
            json(query::get_membership_by_id(session, membership_id).await?)
        }
        GetAllMemberships => json(query::get_all_memberships(session).await?),

        GetCustomerById { customer_id } => {
            json(query::get_customer_by_id(session, customer_id).await?)
        }
        GetAllCustomers => json(query::get_all_customers(session).await?),
        GetCustomersByName { name } => json(query::get_customers_by_name(session, &name).await?),
        GetCustomersByEmail { email } => {
            json(query::get_customers_by_email(session, &email).await?)
        }

        GetSupplierOrder { supplier_order_id } => {
            json(query::get_supplier_order(session, supplier_order_id).await?)
        }
        GetAllSupplierOrders => json(query::get_all_supplier_orders(session).await?),
        GetSupplierNameByOrderId { supplier_order_id } => {
            json(query::get_supplier_name_by_order_id(session, supplier_order_id).await?)
        }
        GetProductNameByOrderId { supplier_order_id } => {
            json(query::get_product_name_by_order_id(session, supplier_order_id).await?)
        }

        GetCustomerOrderById { customer_order_id } => {
            json(query::get_customer_order_by_id(session, customer_order_id).await?)
        }
        GetAllCustomerOrders => json(query::get_all_customer_orders(session).await?),
        GetCustomerOrdersByCustomer { customer_id } => {
            json(query::get_customer_orders_by_customer(session, customer_id).await?)
        }

        GetInboundBill { inbound_bill_id } => {
            json(query::get_inbound_bill(session, inbound_bill_id).await?)
        }
        GetAllInboundBills => json(query::get_all_inbound_bills(session).await?),
        GetInboundBillsBySupplierOrder { supplier_order_id } => {
            json(query::get_inbound_bills_by_supplier_order(session, supplier_order_id).await?)
        }

        GetOutboundBillById { outbound_bill_id } => {
            json(query::get_outbound_bill_by_id(session, outbound_bill_id).await?)
        }
        GetAllOutboundBills => json(query::get_all_outbound_bills(session).await?),
        GetOutboundBillsByCustomerOrderId { customer_order_id } => {
            json(query::get_outbound_bills_by_customer_order_id(session, customer_order_id).await?)
        }

        // Mutations
        CreateCategory(input) => json(mutation::create_category(session, input).await?),
        UpdateCategory { category_id, patch } => {
            json(mutation::update_category(session, category_id, patch).await?)
        }
        DeleteCategory { category_id } => {
            json(mutation::delete_category(session, category_id).await?)
        }

        CreateSupplier(input) => json(mutation::create_supplier(session, input).await?),
        UpdateSupplier { supplier_id, patch } => {
            json(mutation::update_supplier(session, supplier_id, patch).await?)
        }
        DeleteSupplier { supplier_id } => {
            json(mutation::delete_supplier(session, supplier_id).await?)
        }

        CreateProduct(input) => json(mutation::create_product(session, input).await?),
        UpdateProduct { product_id, patch } => {
            json(mutation::update_product(session, product_id, patch).await?)
        }
        DeleteProduct { product_id } => json(mutation::delete_product(session, product_id).await?),

        CreateMembership(input) => json(mutation::create_membership(session, input).await?),
        UpdateMembership {
            membership_id,
            patch,
        } => json(mutation::update_membership(session, membership_id, patch).await?),
        DeleteMembership { membership_id } => {
            json(mutation::delete_membership(session, membership_id).await?)
        }

        CreateCustomer(input) => json(mutation::create_customer(session, input).await?),
        UpdateCustomer { customer_id, patch } => {
            json(mutation::update_customer(session, customer_id, patch).await?)
        }
        DeleteCustomer { customer_id } => {
            json(mutation::delete_customer(session, customer_id).await?)
        }

        CreateSupplierOrder(input) => json(mutation::create_supplier_order(session, input).await?),
        UpdateSupplierOrder {
            supplier_order_id,
            patch,
        } => json(mutation::update_supplier_order(session, supplier_order_id, patch).await?),
        DeleteSupplierOrder { supplier_order_id } => {
            json(mutation::delete_supplier_order(session, supplier_order_id).await?)
        }

        CreateCustomerOrder(input) => json(mutation::create_customer_order(session, input).await?),
        UpdateCustomerOrder {
            customer_order_id,
            patch,
        } => json(mutation::update_customer_order(session, customer_order_id, patch).await?),
        DeleteCustomerOrder { customer_order_id } => {
            json(mutation::delete_customer_order(session, customer_order_id).await?)
        }

        CreateInboundBill(input) => json(mutation::create_inbound_bill(session, input).await?),
        UpdateInboundBill {
            inbound_bill_id,
            amount_paid_cents,
        } => json(mutation::pay_inbound_bill(session, inbound_bill_id, amount_paid_cents).await?),
        DeleteInboundBill { inbound_bill_id } => {
            json(mutation::delete_inbound_bill(session, inbound_bill_id).await?)
        }

        CreateOutboundBill(input) => json(mutation::create_outbound_bill(session, input).await?),
        UpdateOutboundBill {
            outbound_bill_id,
            patch,
        } => json(mutation::update_outbound_bill(session, outbound_bill_id, patch).await?),
        DeleteOutboundBill { outbound_bill_id } => {
            json(mutation::delete_outbound_bill(session, outbound_bill_id).await?)
        }
    }
}
