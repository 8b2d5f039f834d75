//! # Operations
//!
//! Every query and mutation the API accepts, as one typed envelope.
//!
//! ## Wire Format
//! ```text
//! { "operation": "getProductById",  "input": { "productId": 4 } }
//! { "operation": "getAllProducts" }
//! { "operation": "createCategory",  "input": { "name": "Dairy" } }
//! { "operation": "updateProduct",   "input": { "productId": 4,
//!                                              "patch": { "unitPriceCents": 259 } } }
//! ```
//!
//! `input` is omitted for operations that take nothing. Creates take the
//! entity's create input directly; updates take the id plus a `patch` in
//! which every field is optional (absent = unchanged, `null` = clear).

use serde::Deserialize;
use strum::IntoStaticStr;

use stockroom_core::{
    CategoryPatch, CustomerOrderPatch, CustomerPatch, MembershipPatch, NewCategory, NewCustomer,
    NewCustomerOrder, NewInboundBill, NewMembership, NewOutboundBill, NewProduct, NewSupplier,
    NewSupplierOrder, OutboundBillPatch, ProductPatch, SupplierOrderPatch, SupplierPatch,
};

#[derive(Debug, Deserialize, IntoStaticStr)]
#[serde(
    tag = "operation",
    content = "input",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------
    GetCategory { category_id: i64 },
    GetAllCategories,
    GetProductsByCategory { category_id: i64 },
    GetSuppliersByCategory { category_id: i64 },

    GetSupplierById { supplier_id: i64 },
    GetAllSuppliers,
    GetSuppliersByName { name: String },

    GetProductById { product_id: i64 },
    GetAllProducts,
    GetProductsBelowReorderLevel,
    GetMostSoldProduct,
    GetMostBoughtProduct,

    GetMembershipById { membership_id: i64 },
    GetAllMemberships,

    GetCustomerById { customer_id: i64 },
    GetAllCustomers,
    GetCustomersByName { name: String },
    GetCustomersByEmail { email: String },

    GetSupplierOrder { supplier_order_id: i64 },
    GetAllSupplierOrders,
    GetSupplierNameByOrderId { supplier_order_id: i64 },
    GetProductNameByOrderId { supplier_order_id: i64 },

    GetCustomerOrderById { customer_order_id: i64 },
    GetAllCustomerOrders,
    GetCustomerOrdersByCustomer { customer_id: i64 },

    GetInboundBill { inbound_bill_id: i64 },
    GetAllInboundBills,
    GetInboundBillsBySupplierOrder { supplier_order_id: i64 },

    GetOutboundBillById { outbound_bill_id: i64 },
    GetAllOutboundBills,
    GetOutboundBillsByCustomerOrderId { customer_order_id: i64 },

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------
    CreateCategory(NewCategory),
    UpdateCategory { category_id: i64, patch: CategoryPatch },
    DeleteCategory { category_id: i64 },

    CreateSupplier(NewSupplier),
    UpdateSupplier { supplier_id: i64, patch: SupplierPatch },
    DeleteSupplier { supplier_id: i64 },

    CreateProduct(NewProduct),
    UpdateProduct { product_id: i64, patch: ProductPatch },
    DeleteProduct { product_id: i64 },

    CreateMembership(NewMembership),
    UpdateMembership { membership_id: i64, patch: MembershipPatch },
    DeleteMembership { membership_id: i64 },

    CreateCustomer(NewCustomer),
    UpdateCustomer { customer_id: i64, patch: CustomerPatch },
    DeleteCustomer { customer_id: i64 },

    CreateSupplierOrder(NewSupplierOrder),
    UpdateSupplierOrder { supplier_order_id: i64, patch: SupplierOrderPatch },
    DeleteSupplierOrder { supplier_order_id: i64 },

    CreateCustomerOrder(NewCustomerOrder),
    UpdateCustomerOrder { customer_order_id: i64, patch: CustomerOrderPatch },
    DeleteCustomerOrder { customer_order_id: i64 },

    CreateInboundBill(NewInboundBill),
    /// Records a payment against the bill.
    UpdateInboundBill { inbound_bill_id: i64, amount_paid_cents: i64 },
    DeleteInboundBill { inbound_bill_id: i64 },

    CreateOutboundBill(NewOutboundBill),
    UpdateOutboundBill { outbound_bill_id: i64, patch: OutboundBillPatch },
    DeleteOutboundBill { outbound_bill_id: i64 },
}

impl Operation {
    /// Wire name, e.g. `getProductById`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_mutation(&self) -> bool {
        let name = self.name();
        name.starts_with("create") || name.starts_with("update") || name.starts_with("delete")
    }
}
