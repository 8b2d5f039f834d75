//! # Response DTOs
//!
//! Wire shapes for every record the API returns. Field names are camelCase;
//! money stays in integer cents with a `Cents` suffix.
//!
//! Suppliers and products carry their `categoryName`, customers their
//! `membershipType`. Those are filled in by the resolvers with a second
//! lookup in the same session.

use chrono::NaiveDate;
use serde::Serialize;
use stockroom_core::{
    Category, Customer, CustomerOrder, InboundBill, InboundBillStatus, Membership, OutboundBill,
    Product, ProductVolume, Supplier, SupplierOrder,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        CategoryDto {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category_id: i64,
    pub category_name: Option<String>,
}

impl SupplierDto {
    pub fn new(s: Supplier, category_name: Option<String>) -> Self {
        SupplierDto {
            id: s.id,
            name: s.name,
            contact_person: s.contact_person,
            contact_number: s.contact_number,
            email: s.email,
            address: s.address,
            category_id: s.category_id,
            category_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub unit_price_cents: i64,
    pub units_in_stock: i64,
    pub units_on_order: i64,
    pub reorder_level: i64,
    pub discontinued: bool,
}

impl ProductDto {
    pub fn new(p: Product, category_name: Option<String>) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            description: p.description,
            category_id: p.category_id,
            category_name,
            unit_price_cents: p.unit_price_cents,
            units_in_stock: p.units_in_stock,
            units_on_order: p.units_on_order,
            reorder_level: p.reorder_level,
            discontinued: p.discontinued,
        }
    }
}

/// A product with the quantity it was ranked by.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVolumeDto {
    pub product: ProductDto,
    pub total_quantity: i64,
}

impl ProductVolumeDto {
    pub fn new(volume: ProductVolume, category_name: Option<String>) -> Self {
        ProductVolumeDto {
            product: ProductDto::new(volume.product, category_name),
            total_quantity: volume.total_quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDto {
    pub id: i64,
    pub membership_type: String,
}

impl From<Membership> for MembershipDto {
    fn from(m: Membership) -> Self {
        MembershipDto {
            id: m.id,
            membership_type: m.membership_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub membership_id: Option<i64>,
    pub membership_type: Option<String>,
}

impl CustomerDto {
    pub fn new(c: Customer, membership_type: Option<String>) -> Self {
        CustomerDto {
            id: c.id,
            name: c.name,
            contact_person: c.contact_person,
            contact_number: c.contact_number,
            email: c.email,
            address: c.address,
            membership_id: c.membership_id,
            membership_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderDto {
    pub id: i64,
    pub supplier_id: i64,
    pub product_id: i64,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub quantity: i64,
    pub total_amount_cents: i64,
}

impl From<SupplierOrder> for SupplierOrderDto {
    fn from(o: SupplierOrder) -> Self {
        SupplierOrderDto {
            id: o.id,
            supplier_id: o.supplier_id,
            product_id: o.product_id,
            order_date: o.order_date,
            expected_delivery_date: o.expected_delivery_date,
            quantity: o.quantity,
            total_amount_cents: o.total_amount_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub order_date: NaiveDate,
    pub shipping_address: String,
    pub quantity: i64,
    /// Net of `discountCents`.
    pub total_amount_cents: i64,
    pub discount_cents: i64,
}

impl From<CustomerOrder> for CustomerOrderDto {
    fn from(o: CustomerOrder) -> Self {
        CustomerOrderDto {
            id: o.id,
            customer_id: o.customer_id,
            product_id: o.product_id,
            order_date: o.order_date,
            shipping_address: o.shipping_address,
            quantity: o.quantity,
            total_amount_cents: o.total_amount_cents,
            discount_cents: o.discount_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundBillDto {
    pub id: i64,
    pub supplier_order_id: i64,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount_due_cents: i64,
    pub amount_paid_cents: i64,
    pub payment_status: InboundBillStatus,
}

impl From<InboundBill> for InboundBillDto {
    fn from(b: InboundBill) -> Self {
        InboundBillDto {
            id: b.id,
            supplier_order_id: b.supplier_order_id,
            bill_date: b.bill_date,
            due_date: b.due_date,
            amount_due_cents: b.amount_due_cents,
            amount_paid_cents: b.amount_paid_cents,
            payment_status: b.payment_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundBillDto {
    pub id: i64,
    pub customer_order_id: i64,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub discount_cents: i64,
    pub amount_paid_cents: i64,
    pub payment_status: String,
}

impl From<OutboundBill> for OutboundBillDto {
    fn from(b: OutboundBill) -> Self {
        OutboundBillDto {
            id: b.id,
            customer_order_id: b.customer_order_id,
            bill_date: b.bill_date,
            due_date: b.due_date,
            discount_cents: b.discount_cents,
            amount_paid_cents: b.amount_paid_cents,
            payment_status: b.payment_status,
        }
    }
}
