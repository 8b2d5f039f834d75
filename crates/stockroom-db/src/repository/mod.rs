//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Resolver                                                               │
//! │       │  session.supplier_orders().create(&input)                       │
//! │       ▼                                                                 │
//! │  SupplierOrderRepository<'c>  (borrows the session's connection)        │
//! │  ├── create / get_by_id / list_all / update / delete                   │
//! │  └── cascades reborrow the same connection:                            │
//! │       ├── ProductRepository::adjust_stock                              │
//! │       └── InboundBillRepository::create                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (one transaction per session)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository follows the same contract: `get_by_id` returns `None`
//! for unknown ids, `update` returns `None` for unknown ids, and `delete`
//! returns `false` for unknown ids. Only write failures are errors.

pub mod category;
pub mod customer;
pub mod customer_order;
pub mod inbound_bill;
pub mod membership;
pub mod outbound_bill;
pub mod product;
pub mod report;
pub mod supplier;
pub mod supplier_order;

pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use customer_order::CustomerOrderRepository;
pub use inbound_bill::InboundBillRepository;
pub use membership::MembershipRepository;
pub use outbound_bill::OutboundBillRepository;
pub use product::ProductRepository;
pub use report::ReportRepository;
pub use supplier::SupplierRepository;
pub use supplier_order::SupplierOrderRepository;
