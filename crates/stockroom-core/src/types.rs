//! # Domain Types
//!
//! Entities, create inputs, and partial-update patches for Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Category ◄──── Supplier ◄──── SupplierOrder ◄──── InboundBill         │
//! │     ▲                              │                                    │
//! │     │                              ▼                                    │
//! │     └────────── Product ◄──── CustomerOrder ◄──── OutboundBill         │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                 Membership ◄──── Customer                               │
//! │                                                                         │
//! │  Every entity X comes with:                                             │
//! │    NewX    - create input (all required fields)                         │
//! │    XPatch  - partial update (every field is a Patch<T>)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are SQLite integer primary keys (`i64`). Monetary columns are integer
//! cents and carry a `_cents` suffix; accessors return [`Money`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::patch::Patch;
use crate::DEFAULT_MEMBERSHIP_TYPE;

// =============================================================================
// Category
// =============================================================================

/// A product/supplier grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Patch<String>,
}

impl CategoryPatch {
    pub fn apply_to(self, category: &mut Category) {
        self.name.apply(&mut category.name);
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A company products are bought from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Category the supplier is listed under (must exist).
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierPatch {
    pub name: Patch<String>,
    pub contact_person: Patch<Option<String>>,
    pub contact_number: Patch<Option<String>>,
    pub email: Patch<Option<String>>,
    pub address: Patch<Option<String>>,
    pub category_id: Patch<i64>,
}

impl SupplierPatch {
    pub fn apply_to(self, supplier: &mut Supplier) {
        self.name.apply(&mut supplier.name);
        self.contact_person.apply(&mut supplier.contact_person);
        self.contact_number.apply(&mut supplier.contact_number);
        self.email.apply(&mut supplier.email);
        self.address.apply(&mut supplier.address);
        self.category_id.apply(&mut supplier.category_id);
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,

    /// Price per unit in cents.
    pub unit_price_cents: i64,

    /// Units on hand. Raised by supplier orders, lowered by customer orders.
    pub units_in_stock: i64,

    /// Units requested from suppliers but not yet received (informational).
    pub units_on_order: i64,

    /// Stock level at or below which the product is reported for reordering.
    pub reorder_level: i64,

    pub discontinued: bool,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// True when stock has fallen to the reorder level and the product is still sold.
    pub fn needs_reorder(&self) -> bool {
        !self.discontinued && self.units_in_stock <= self.reorder_level
    }

    /// Checks that `quantity` more units can be taken out of stock.
    pub fn ensure_stock(&self, quantity: i64) -> CoreResult<()> {
        if quantity > self.units_in_stock {
            return Err(CoreError::InsufficientStock {
                product_id: self.id,
                available: self.units_in_stock,
                requested: quantity,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: i64,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub units_in_stock: i64,
    #[serde(default)]
    pub units_on_order: i64,
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default)]
    pub discontinued: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Patch<String>,
    pub description: Patch<Option<String>>,
    pub category_id: Patch<i64>,
    pub unit_price_cents: Patch<i64>,
    pub units_in_stock: Patch<i64>,
    pub units_on_order: Patch<i64>,
    pub reorder_level: Patch<i64>,
    pub discontinued: Patch<bool>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        self.name.apply(&mut product.name);
        self.description.apply(&mut product.description);
        self.category_id.apply(&mut product.category_id);
        self.unit_price_cents.apply(&mut product.unit_price_cents);
        self.units_in_stock.apply(&mut product.units_in_stock);
        self.units_on_order.apply(&mut product.units_on_order);
        self.reorder_level.apply(&mut product.reorder_level);
        self.discontinued.apply(&mut product.discontinued);
    }
}

// =============================================================================
// Membership
// =============================================================================

/// A customer membership. `membership_type` is free text; see
/// [`crate::pricing::MembershipTier`] for which values carry a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Membership {
    pub id: i64,
    pub membership_type: String,
}

fn default_membership_type() -> String {
    DEFAULT_MEMBERSHIP_TYPE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMembership {
    #[serde(default = "default_membership_type")]
    pub membership_type: String,
}

impl Default for NewMembership {
    fn default() -> Self {
        NewMembership {
            membership_type: default_membership_type(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MembershipPatch {
    pub membership_type: Patch<String>,
}

impl MembershipPatch {
    pub fn apply_to(self, membership: &mut Membership) {
        self.membership_type.apply(&mut membership.membership_type);
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer placing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub membership_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub membership_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Patch<String>,
    pub contact_person: Patch<Option<String>>,
    pub contact_number: Patch<String>,
    pub email: Patch<String>,
    pub address: Patch<String>,
    pub membership_id: Patch<Option<i64>>,
}

impl CustomerPatch {
    pub fn apply_to(self, customer: &mut Customer) {
        self.name.apply(&mut customer.name);
        self.contact_person.apply(&mut customer.contact_person);
        self.contact_number.apply(&mut customer.contact_number);
        self.email.apply(&mut customer.email);
        self.address.apply(&mut customer.address);
        self.membership_id.apply(&mut customer.membership_id);
    }
}

// =============================================================================
// Supplier Order
// =============================================================================

/// A purchase from a supplier. Creating one raises stock and opens an
/// [`InboundBill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplierOrder {
    pub id: i64,
    pub supplier_id: i64,
    pub product_id: i64,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub quantity: i64,
    /// quantity × unit price at order time.
    pub total_amount_cents: i64,
}

impl SupplierOrder {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplierOrder {
    pub supplier_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// Amounts are fixed when the order is placed; a quantity change only moves stock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierOrderPatch {
    pub quantity: Patch<i64>,
    pub expected_delivery_date: Patch<NaiveDate>,
}

impl SupplierOrderPatch {
    pub fn apply_to(self, order: &mut SupplierOrder) {
        self.quantity.apply(&mut order.quantity);
        self.expected_delivery_date
            .apply(&mut order.expected_delivery_date);
    }
}

// =============================================================================
// Customer Order
// =============================================================================

/// A sale to a customer. `total_amount_cents` is already net of `discount_cents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CustomerOrder {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub order_date: NaiveDate,
    pub shipping_address: String,
    pub quantity: i64,
    pub total_amount_cents: i64,
    pub discount_cents: i64,
}

impl CustomerOrder {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerOrder {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub shipping_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerOrderPatch {
    pub shipping_address: Patch<String>,
    pub quantity: Patch<i64>,
}

impl CustomerOrderPatch {
    pub fn apply_to(self, order: &mut CustomerOrder) {
        self.shipping_address.apply(&mut order.shipping_address);
        self.quantity.apply(&mut order.quantity);
    }
}

// =============================================================================
// Inbound Bill
// =============================================================================

/// Payment state of an inbound bill.
///
/// `Pending → Success` is the only transition, taken when the amount due
/// reaches exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
pub enum InboundBillStatus {
    Pending,
    Success,
}

impl Default for InboundBillStatus {
    fn default() -> Self {
        InboundBillStatus::Pending
    }
}

/// A payable owed to a supplier for a supplier order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InboundBill {
    pub id: i64,
    pub supplier_order_id: i64,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount_due_cents: i64,
    pub amount_paid_cents: i64,
    pub payment_status: InboundBillStatus,
}

impl InboundBill {
    #[inline]
    pub fn amount_due(&self) -> Money {
        Money::from_cents(self.amount_due_cents)
    }

    #[inline]
    pub fn amount_paid(&self) -> Money {
        Money::from_cents(self.amount_paid_cents)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInboundBill {
    pub supplier_order_id: i64,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount_due_cents: i64,
}

// =============================================================================
// Outbound Bill
// =============================================================================

/// An invoice issued to a customer. `payment_status` is caller-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OutboundBill {
    pub id: i64,
    pub customer_order_id: i64,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Copied from the customer order when the bill is created.
    pub discount_cents: i64,
    pub amount_paid_cents: i64,
    pub payment_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOutboundBill {
    pub customer_order_id: i64,
    pub bill_date: NaiveDate,
    #[serde(default)]
    pub amount_paid_cents: i64,
    pub payment_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutboundBillPatch {
    pub amount_paid_cents: Patch<i64>,
    pub payment_status: Patch<String>,
}

impl OutboundBillPatch {
    pub fn apply_to(self, bill: &mut OutboundBill) {
        self.amount_paid_cents.apply(&mut bill.amount_paid_cents);
        self.payment_status.apply(&mut bill.payment_status);
    }
}

// =============================================================================
// Reports
// =============================================================================

/// A product together with a summed order quantity (most sold / most bought).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVolume {
    pub product: Product,
    pub total_quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
