//! # Customer Repository
//!
//! Database operations for customers. Email and contact-number formats are
//! checked by the API layer before anything reaches this repository.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_name;
use stockroom_core::{Customer, CustomerPatch, NewCustomer};

const CUSTOMER_COLUMNS: &str =
    "id, name, contact_person, contact_number, email, address, membership_id";

pub struct CustomerRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CustomerRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        CustomerRepository { conn }
    }

    /// Inserts a customer. A supplied membership must exist.
    pub async fn create(&mut self, input: &NewCustomer) -> DbResult<Customer> {
        validate_name("name", &input.name)?;

        let sql = format!(
            "INSERT INTO customers (name, contact_person, contact_number, email, address, membership_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {CUSTOMER_COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(&input.name)
            .bind(&input.contact_person)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .bind(input.membership_id)
            .fetch_one(&mut *self.conn)
            .await?;

        debug!(id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(customer)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Customers whose name matches exactly.
    pub async fn list_by_name(&mut self, name: &str) -> DbResult<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE name = ?1 ORDER BY id");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(name)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(customers)
    }

    /// Customers whose email matches exactly.
    pub async fn list_by_email(&mut self, email: &str) -> DbResult<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?1 ORDER BY id");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(email)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(customers)
    }

    /// Membership type of a customer.
    ///
    /// ## Returns
    /// * `Ok(None)` - no such customer
    /// * `Ok(Some(None))` - customer without a membership
    /// * `Ok(Some(Some(type)))` - customer's membership type
    pub async fn membership_type(&mut self, customer_id: i64) -> DbResult<Option<Option<String>>> {
        let row = sqlx::query_as::<_, (Option<String>,)>(
            "SELECT m.membership_type
             FROM customers c
             LEFT JOIN memberships m ON m.id = c.membership_id
             WHERE c.id = ?1",
        )
        .bind(customer_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(|(membership_type,)| membership_type))
    }

    pub async fn update(&mut self, id: i64, patch: CustomerPatch) -> DbResult<Option<Customer>> {
        if let Some(name) = patch.name.as_set() {
            validate_name("name", name)?;
        }

        let Some(mut customer) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut customer);

        let sql = format!(
            "UPDATE customers
             SET name = ?2, contact_person = ?3, contact_number = ?4, email = ?5,
                 address = ?6, membership_id = ?7
             WHERE id = ?1
             RETURNING {CUSTOMER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(&customer.name)
            .bind(&customer.contact_person)
            .bind(&customer.contact_number)
            .bind(&customer.email)
            .bind(&customer.address)
            .bind(customer.membership_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        debug!(id = id, "Customer updated");
        Ok(updated)
    }

    /// Deletes a customer. Fails while customer orders still reference it.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Customer delete");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support;
    use stockroom_core::Patch;

    #[tokio::test]
    async fn test_create_then_get_matches_input() {
        let (_db, mut session) = test_support::session().await;
        let membership = test_support::membership(&mut session, "classic").await;

        let created = test_support::customer(&mut session, Some(membership.id)).await;
        let fetched = session
            .customers()
            .get_by_id(created.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.name, "Dana");
        assert_eq!(fetched.contact_person, None);
        assert_eq!(fetched.contact_number, "0123456789");
        assert_eq!(fetched.email, "dana@shop.io");
        assert_eq!(fetched.address, "1 Main St");
        assert_eq!(fetched.membership_id, Some(membership.id));
    }

    #[tokio::test]
    async fn test_unknown_membership_rejected() {
        let (_db, mut session) = test_support::session().await;
        let result = session
            .customers()
            .create(&NewCustomer {
                name: "Eve".to_string(),
                contact_person: None,
                contact_number: "0123456789".to_string(),
                email: "eve@shop.io".to_string(),
                address: "2 Side St".to_string(),
                membership_id: Some(99),
            })
            .await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[tokio::test]
    async fn test_lookups_by_name_and_email() {
        let (_db, mut session) = test_support::session().await;
        let dana = test_support::customer(&mut session, None).await;

        assert_eq!(
            session.customers().list_by_name("Dana").await.unwrap(),
            vec![dana.clone()]
        );
        assert_eq!(
            session.customers().list_by_email("dana@shop.io").await.unwrap(),
            vec![dana]
        );
        assert!(session
            .customers()
            .list_by_email("other@shop.io")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_membership_type_lookup() {
        let (_db, mut session) = test_support::session().await;
        let premium = test_support::membership(&mut session, "premium").await;
        let member = test_support::customer(&mut session, Some(premium.id)).await;
        let walk_in = test_support::customer(&mut session, None).await;

        let mut customers = session.customers();
        assert_eq!(
            customers.membership_type(member.id).await.unwrap(),
            Some(Some("premium".to_string()))
        );
        assert_eq!(customers.membership_type(walk_in.id).await.unwrap(), Some(None));
        assert_eq!(customers.membership_type(500).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_clears_membership() {
        let (_db, mut session) = test_support::session().await;
        let premium = test_support::membership(&mut session, "premium").await;
        let customer = test_support::customer(&mut session, Some(premium.id)).await;

        let patch = CustomerPatch {
            membership_id: Patch::Set(None),
            ..Default::default()
        };
        let updated = session
            .customers()
            .update(customer.id, patch)
            .await
            .unwrap()
            .unwrap();

        let mut expected = customer.clone();
        expected.membership_id = None;
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, mut session) = test_support::session().await;
        let customer = test_support::customer(&mut session, None).await;

        assert!(session.customers().delete(customer.id).await.unwrap());
        assert!(session
            .customers()
            .get_by_id(customer.id)
            .await
            .unwrap()
            .is_none());
        assert!(!session.customers().delete(customer.id).await.unwrap());
    }
}
