//! # Session
//!
//! A session is one pooled connection inside one transaction, scoped to a
//! single API request. Every repository borrows the session's connection, so
//! all reads and writes of one operation (including cascades into other
//! tables) commit or roll back together.
//!
//! ```text
//! Database::begin() ──► Session ──┬── categories()      ─┐
//!                                 ├── suppliers()        │  &mut SqliteConnection
//!                                 ├── supplier_orders() ─┤  (same transaction)
//!                                 └── ...                │
//!                                                        ▼
//!                         commit()  |  rollback()  |  drop (= rollback)
//! ```

use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{
    CategoryRepository, CustomerOrderRepository, CustomerRepository, InboundBillRepository,
    MembershipRepository, OutboundBillRepository, ProductRepository, ReportRepository,
    SupplierOrderRepository, SupplierRepository,
};

/// One request's unit of work.
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Session { tx }
    }

    pub fn categories(&mut self) -> CategoryRepository<'_> {
        CategoryRepository::new(&mut self.tx)
    }

    pub fn suppliers(&mut self) -> SupplierRepository<'_> {
        SupplierRepository::new(&mut self.tx)
    }

    pub fn products(&mut self) -> ProductRepository<'_> {
        ProductRepository::new(&mut self.tx)
    }

    pub fn memberships(&mut self) -> MembershipRepository<'_> {
        MembershipRepository::new(&mut self.tx)
    }

    pub fn customers(&mut self) -> CustomerRepository<'_> {
        CustomerRepository::new(&mut self.tx)
    }

    pub fn supplier_orders(&mut self) -> SupplierOrderRepository<'_> {
        SupplierOrderRepository::new(&mut self.tx)
    }

    pub fn customer_orders(&mut self) -> CustomerOrderRepository<'_> {
        CustomerOrderRepository::new(&mut self.tx)
    }

    pub fn inbound_bills(&mut self) -> InboundBillRepository<'_> {
        InboundBillRepository::new(&mut self.tx)
    }

    pub fn outbound_bills(&mut self) -> OutboundBillRepository<'_> {
        OutboundBillRepository::new(&mut self.tx)
    }

    /// Cross-entity reports (most sold / most bought).
    pub fn reports(&mut self) -> ReportRepository<'_> {
        ReportRepository::new(&mut self.tx)
    }

    /// Makes every write of this session durable.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Session committed");
        Ok(())
    }

    /// Discards every write of this session.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Session rolled back");
        Ok(())
    }
}
