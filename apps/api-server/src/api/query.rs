//! # Query Resolvers
//!
//! Read-only operations. A lookup that finds nothing yields `None` (sent as
//! `null`) or an empty list, never an error.
//!
//! ## Reshaping
//! ```text
//! Supplier ──► categories().get_by_id(category_id) ──► SupplierDto.categoryName
//! Product  ──► categories().get_by_id(category_id) ──► ProductDto.categoryName
//! Customer ──► customers().membership_type(id)     ──► CustomerDto.membershipType
//!
//! Lists load the lookup table once instead of once per row.
//! ```

use std::collections::HashMap;

use stockroom_core::{Customer, Product, Supplier};
use stockroom_db::Session;

use crate::api::dto::{
    CategoryDto, CustomerDto, CustomerOrderDto, InboundBillDto, MembershipDto, OutboundBillDto,
    ProductDto, ProductVolumeDto, SupplierDto, SupplierOrderDto,
};
use crate::error::ApiResult;

// =============================================================================
// Reshaping Helpers
// =============================================================================

async fn category_name(session: &mut Session, category_id: i64) -> ApiResult<Option<String>> {
    let category = session.categories().get_by_id(category_id).await?;
    Ok(category.map(|c| c.name))
}

async fn category_names(session: &mut Session) -> ApiResult<HashMap<i64, String>> {
    let categories = session.categories().list_all().await?;
    Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
}

pub(crate) async fn supplier_dto(session: &mut Session, supplier: Supplier) -> ApiResult<SupplierDto> {
    let name = category_name(session, supplier.category_id).await?;
    Ok(SupplierDto::new(supplier, name))
}

async fn supplier_dtos(session: &mut Session, suppliers: Vec<Supplier>) -> ApiResult<Vec<SupplierDto>> {
    let names = category_names(session).await?;
    Ok(suppliers
        .into_iter()
        .map(|s| {
            let name = names.get(&s.category_id).cloned();
            SupplierDto::new(s, name)
        })
        .collect())
}

pub(crate) async fn product_dto(session: &mut Session, product: Product) -> ApiResult<ProductDto> {
    let name = category_name(session, product.category_id).await?;
    Ok(ProductDto::new(product, name))
}

async fn product_dtos(session: &mut Session, products: Vec<Product>) -> ApiResult<Vec<ProductDto>> {
    let names = category_names(session).await?;
    Ok(products
        .into_iter()
        .map(|p| {
            let name = names.get(&p.category_id).cloned();
            ProductDto::new(p, name)
        })
        .collect())
}

pub(crate) async fn customer_dto(session: &mut Session, customer: Customer) -> ApiResult<CustomerDto> {
    let membership_type = session
        .customers()
        .membership_type(customer.id)
        .await?
        .flatten();
    Ok(CustomerDto::new(customer, membership_type))
}

async fn customer_dtos(session: &mut Session, customers: Vec<Customer>) -> ApiResult<Vec<CustomerDto>> {
    let memberships = session.memberships().list_all().await?;
    let types: HashMap<i64, String> = memberships
        .into_iter()
        .map(|m| (m.id, m.membership_type))
        .collect();

    Ok(customers
        .into_iter()
        .map(|c| {
            let membership_type = c.membership_id.and_then(|id| types.get(&id).cloned());
            CustomerDto::new(c, membership_type)
        })
        .collect())
}

// =============================================================================
// Categories
// =============================================================================

pub async fn get_category(session: &mut Session, id: i64) -> ApiResult<Option<CategoryDto>> {
    Ok(session.categories().get_by_id(id).await?.map(CategoryDto::from))
}

pub async fn get_all_categories(session: &mut Session) -> ApiResult<Vec<CategoryDto>> {
    let categories = session.categories().list_all().await?;
    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

pub async fn get_products_by_category(
    session: &mut Session,
    category_id: i64,
) -> ApiResult<Vec<ProductDto>> {
    let products = session.products().list_by_category(category_id).await?;
    product_dtos(session, products).await
}

pub async fn get_suppliers_by_category(
    session: &mut Session,
    category_id: i64,
) -> ApiResult<Vec<SupplierDto>> {
    let suppliers = session.suppliers().list_by_category(category_id).await?;
    supplier_dtos(session, suppliers).await
}

// =============================================================================
// Suppliers
// =============================================================================

pub async fn get_supplier_by_id(session: &mut Session, id: i64) -> ApiResult<Option<SupplierDto>> {
    let Some(supplier) = session.suppliers().get_by_id(id).await? else {
        return Ok(None);
    };
    Ok(Some(supplier_dto(session, supplier).await?))
}

pub async fn get_all_suppliers(session: &mut Session) -> ApiResult<Vec<SupplierDto>> {
    let suppliers = session.suppliers().list_all().await?;
    supplier_dtos(session, suppliers).await
}

pub async fn get_suppliers_by_name(session: &mut Session, name: &str) -> ApiResult<Vec<SupplierDto>> {
    let suppliers = session.suppliers().list_by_name(name).await?;
    supplier_dtos(session, suppliers).await
}

// =============================================================================
// Products
// =============================================================================

pub async fn get_product_by_id(session: &mut Session, id: i64) -> ApiResult<Option<ProductDto>> {
    let Some(product) = session.products().get_by_id(id).await? else {
        return Ok(None);
    };
    Ok(Some(product_dto(session, product).await?))
}

pub async fn get_all_products(session: &mut Session) -> ApiResult<Vec<ProductDto>> {
    let products = session.products().list_all().await?;
    product_dtos(session, products).await
}

pub async fn get_products_below_reorder_level(session: &mut Session) -> ApiResult<Vec<ProductDto>> {
    let products = session.products().list_below_reorder_level().await?;
    product_dtos(session, products).await
}

pub async fn get_most_sold_product(session: &mut Session) -> ApiResult<Option<ProductVolumeDto>> {
    let Some(volume) = session.reports().most_sold_product().await? else {
        return Ok(None);
    };
    let name = category_name(session, volume.product.category_id).await?;
    Ok(Some(ProductVolumeDto::new(volume, name)))
}

pub async fn get_most_bought_product(session: &mut Session) -> ApiResult<Option<ProductVolumeDto>> {
    let Some(volume) = session.reports().most_bought_product().await? else {
        return Ok(None);
    };
    let name = category_name(session, volume.product.category_id).await?;
    Ok(Some(ProductVolumeDto::new(volume, name)))
}

// =============================================================================
// Memberships & Customers
// =============================================================================

pub async fn get_membership_by_id(session: &mut Session, id: i64) -> ApiResult<Option<MembershipDto>> {
    Ok(session.memberships().get_by_id(id).await?.map(MembershipDto::from))
}

pub async fn get_all_memberships(session: &mut Session) -> ApiResult<Vec<MembershipDto>> {
    let memberships = session.memberships().list_all().await?;
    Ok(memberships.into_iter().map(MembershipDto::from).collect())
}

pub async fn get_customer_by_id(session: &mut Session, id: i64) -> ApiResult<Option<CustomerDto>> {
    let Some(customer) = session.customers().get_by_id(id).await? else {
        return Ok(None);
    };
    Ok(Some(customer_dto(session, customer).await?))
}

pub async fn get_all_customers(session: &mut Session) -> ApiResult<Vec<CustomerDto>> {
    let customers = session.customers().list_all().await?;
    customer_dtos(session, customers).await
}

pub async fn get_customers_by_name(session: &mut Session, name: &str) -> ApiResult<Vec<CustomerDto>> {
    let customers = session.customers().list_by_name(name).await?;
    customer_dtos(session, customers).await
}

pub async fn get_customers_by_email(
    session: &mut Session,
    email: &str,
) -> ApiResult<Vec<CustomerDto>> {
    let customers = session.customers().list_by_email(email).await?;
    customer_dtos(session, customers).await
}

// =============================================================================
// Supplier Orders
// =============================================================================

pub async fn get_supplier_order(
    session: &mut Session,
    id: i64,
) -> ApiResult<Option<SupplierOrderDto>> {
    Ok(session
        .supplier_orders()
        .get_by_id(id)
        .await?
        .map(SupplierOrderDto::from))
}

pub async fn get_all_supplier_orders(session: &mut Session) -> ApiResult<Vec<SupplierOrderDto>> {
    let orders = session.supplier_orders().list_all().await?;
    Ok(orders.into_iter().map(SupplierOrderDto::from).collect())
}

pub async fn get_supplier_name_by_order_id(
    session: &mut Session,
    supplier_order_id: i64,
) -> ApiResult<Option<String>> {
    Ok(session.supplier_orders().supplier_name(supplier_order_id).await?)
}

pub async fn get_product_name_by_order_id(
    session: &mut Session,
    supplier_order_id: i64,
) -> ApiResult<Option<String>> {
    Ok(session.supplier_orders().product_name(supplier_order_id).await?)
}

// =============================================================================
// Customer Orders
// =============================================================================

pub async fn get_customer_order_by_id(
    session: &mut Session,
    id: i64,
) -> ApiResult<Option<CustomerOrderDto>> {
    Ok(session
        .customer_orders()
        .get_by_id(id)
        .await?
        .map(CustomerOrderDto::from))
}

pub async fn get_all_customer_orders(session: &mut Session) -> ApiResult<Vec<CustomerOrderDto>> {
    let orders = session.customer_orders().list_all().await?;
    Ok(orders.into_iter().map(CustomerOrderDto::from).collect())
}

pub async fn get_customer_orders_by_customer(
    session: &mut Session,
    customer_id: i64,
) -> ApiResult<Vec<CustomerOrderDto>> {
    let orders = session.customer_orders().list_by_customer(customer_id).await?;
    Ok(orders.into_iter().map(CustomerOrderDto::from).collect())
}

// =============================================================================
// Bills
// =============================================================================

pub async fn get_inbound_bill(session: &mut Session, id: i64) -> ApiResult<Option<InboundBillDto>> {
    Ok(session
        .inbound_bills()
        .get_by_id(id)
        .await?
        .map(InboundBillDto::from))
}

pub async fn get_all_inbound_bills(session: &mut Session) -> ApiResult<Vec<InboundBillDto>> {
    let bills = session.inbound_bills().list_all().await?;
    Ok(bills.into_iter().map(InboundBillDto::from).collect())
}

pub async fn get_inbound_bills_by_supplier_order(
    session: &mut Session,
    supplier_order_id: i64,
) -> ApiResult<Vec<InboundBillDto>> {
    let bills = session
        .inbound_bills()
        .list_by_supplier_order(supplier_order_id)
        .await?;
    Ok(bills.into_iter().map(InboundBillDto::from).collect())
}

pub async fn get_outbound_bill_by_id(
    session: &mut Session,
    id: i64,
) -> ApiResult<Option<OutboundBillDto>> {
    Ok(session
        .outbound_bills()
        .get_by_id(id)
        .await?
        .map(OutboundBillDto::from))
}

pub async fn get_all_outbound_bills(session: &mut Session) -> ApiResult<Vec<OutboundBillDto>> {
    let bills = session.outbound_bills().list_all().await?;
    Ok(bills.into_iter().map(OutboundBillDto::from).collect())
}

pub async fn get_outbound_bills_by_customer_order_id(
    session: &mut Session,
    customer_order_id: i64,
) -> ApiResult<Vec<OutboundBillDto>> {
    let bills = session
        .outbound_bills()
        .list_by_customer_order(customer_order_id)
        .await?;
    Ok(bills.into_iter().map(OutboundBillDto::from).collect())
}
