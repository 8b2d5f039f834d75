//! # Mutation Resolvers
//!
//! Write operations. Each runs inside the request's session, so a failure
//! anywhere (including a cascade into another table) leaves nothing behind.
//!
//! ## Contract
//! ```text
//! create*  ──► the created record
//! update*  ──► the updated record, or null for an unknown id
//! delete*  ──► true if a row was removed, false for an unknown id
//! ```
//!
//! Customer email and contact number formats are checked here, before the
//! repository is touched.

use stockroom_core::validation::{validate_customer_patch, validate_new_customer};
use stockroom_core::{
    CategoryPatch, CustomerOrderPatch, CustomerPatch, Money, MembershipPatch, NewCategory,
    NewCustomer, NewCustomerOrder, NewInboundBill, NewMembership, NewOutboundBill, NewProduct,
    NewSupplier, NewSupplierOrder, OutboundBillPatch, ProductPatch, SupplierOrderPatch,
    SupplierPatch,
};
use stockroom_db::Session;

use crate::api::dto::{
    CategoryDto, CustomerDto, CustomerOrderDto, InboundBillDto, MembershipDto, OutboundBillDto,
    ProductDto, SupplierDto, SupplierOrderDto,
};
use crate::api::query::{customer_dto, product_dto, supplier_dto};
use crate::error::ApiResult;

// =============================================================================
// Categories
// =============================================================================

pub async fn create_category(session: &mut Session, input: NewCategory) -> ApiResult<CategoryDto> {
    let category = session.categories().create(&input).await?;
    Ok(category.into())
}

pub async fn update_category(
    session: &mut Session,
    id: i64,
    patch: CategoryPatch,
) -> ApiResult<Option<CategoryDto>> {
    Ok(session.categories().update(id, patch).await?.map(CategoryDto::from))
}

pub async fn delete_category(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.categories().delete(id).await?)
}

// =============================================================================
// Suppliers
// =============================================================================

pub async fn create_supplier(session: &mut Session, input: NewSupplier) -> ApiResult<SupplierDto> {
    let supplier = session.suppliers().create(&input).await?;
    supplier_dto(session, supplier).await
}

pub async fn update_supplier(
    session: &mut Session,
    id: i64,
    patch: SupplierPatch,
) -> ApiResult<Option<SupplierDto>> {
    let Some(supplier) = session.suppliers().update(id, patch).await? else {
        return Ok(None);
    };
    Ok(Some(supplier_dto(session, supplier).await?))
}

pub async fn delete_supplier(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.suppliers().delete(id).await?)
}

// =============================================================================
// Products
// =============================================================================

pub async fn create_product(session: &mut Session, input: NewProduct) -> ApiResult<ProductDto> {
    let product = session.products().create(&input).await?;
    product_dto(session, product).await
}

pub async fn update_product(
    session: &mut Session,
    id: i64,
    patch: ProductPatch,
) -> ApiResult<Option<ProductDto>> {
    let Some(product) = session.products().update(id, patch).await? else {
        return Ok(None);
    };
    Ok(Some(product_dto(session, product).await?))
}

pub async fn delete_product(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.products().delete(id).await?)
}

// =============================================================================
// Memberships
// =============================================================================

pub async fn create_membership(
    session: &mut Session,
    input: NewMembership,
) -> ApiResult<MembershipDto> {
    let membership = session.memberships().create(&input).await?;
    Ok(membership.into())
}

pub async fn update_membership(
    session: &mut Session,
    id: i64,
    patch: MembershipPatch,
) -> ApiResult<Option<MembershipDto>> {
    Ok(session
        .memberships()
        .update(id, patch)
        .await?
        .map(MembershipDto::from))
}

pub async fn delete_membership(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.memberships().delete(id).await?)
}

// =============================================================================
// Customers
// =============================================================================

pub async fn create_customer(session: &mut Session, input: NewCustomer) -> ApiResult<CustomerDto> {
    validate_new_customer(&input)?;

    let customer = session.customers().create(&input).await?;
    customer_dto(session, customer).await
}

pub async fn update_customer(
    session: &mut Session,
    id: i64,
    patch: CustomerPatch,
) -> ApiResult<Option<CustomerDto>> {
    validate_customer_patch(&patch)?;

    let Some(customer) = session.customers().update(id, patch).await? else {
        return Ok(None);
    };
    Ok(Some(customer_dto(session, customer).await?))
}

pub async fn delete_customer(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.customers().delete(id).await?)
}

// =============================================================================
// Supplier Orders
// =============================================================================

/// Places the order, restocks the product, and opens the inbound bill.
pub async fn create_supplier_order(
    session: &mut Session,
    input: NewSupplierOrder,
) -> ApiResult<SupplierOrderDto> {
    let order = session.supplier_orders().create(&input).await?;
    Ok(order.into())
}

pub async fn update_supplier_order(
    session: &mut Session,
    id: i64,
    patch: SupplierOrderPatch,
) -> ApiResult<Option<SupplierOrderDto>> {
    Ok(session
        .supplier_orders()
        .update(id, patch)
        .await?
        .map(SupplierOrderDto::from))
}

pub async fn delete_supplier_order(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.supplier_orders().delete(id).await?)
}

// =============================================================================
// Customer Orders
// =============================================================================

/// Prices the order for the customer's membership and takes it out of stock.
pub async fn create_customer_order(
    session: &mut Session,
    input: NewCustomerOrder,
) -> ApiResult<CustomerOrderDto> {
    let order = session.customer_orders().create(&input).await?;
    Ok(order.into())
}

pub async fn update_customer_order(
    session: &mut Session,
    id: i64,
    patch: CustomerOrderPatch,
) -> ApiResult<Option<CustomerOrderDto>> {
    Ok(session
        .customer_orders()
        .update(id, patch)
        .await?
        .map(CustomerOrderDto::from))
}

pub async fn delete_customer_order(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.customer_orders().delete(id).await?)
}

// =============================================================================
// Inbound Bills
// =============================================================================

pub async fn create_inbound_bill(
    session: &mut Session,
    input: NewInboundBill,
) -> ApiResult<InboundBillDto> {
    let bill = session.inbound_bills().create(&input).await?;
    Ok(bill.into())
}

/// Records a payment of `amount_paid_cents` against the bill.
pub async fn pay_inbound_bill(
    session: &mut Session,
    id: i64,
    amount_paid_cents: i64,
) -> ApiResult<Option<InboundBillDto>> {
    let bill = session
        .inbound_bills()
        .pay(id, Money::from_cents(amount_paid_cents))
        .await?;
    Ok(bill.map(InboundBillDto::from))
}

pub async fn delete_inbound_bill(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.inbound_bills().delete(id).await?)
}

// =============================================================================
// Outbound Bills
// =============================================================================

pub async fn create_outbound_bill(
    session: &mut Session,
    input: NewOutboundBill,
) -> ApiResult<OutboundBillDto> {
    let bill = session.outbound_bills().create(&input).await?;
    Ok(bill.into())
}

pub async fn update_outbound_bill(
    session: &mut Session,
    id: i64,
    patch: OutboundBillPatch,
) -> ApiResult<Option<OutboundBillDto>> {
    Ok(session
        .outbound_bills()
        .update(id, patch)
        .await?
        .map(OutboundBillDto::from))
}

pub async fn delete_outbound_bill(session: &mut Session, id: i64) -> ApiResult<bool> {
    Ok(session.outbound_bills().delete(id).await?)
}
